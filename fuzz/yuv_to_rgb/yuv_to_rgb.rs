/*
 * Copyright (c) Radzivon Bartoshyk, 11/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yuv2rgb::{
    yuv420_to_rgb24, yuv420_to_rgb24_unaligned, YuvPlanarImage, YuvStandard,
};

#[derive(Arbitrary, Debug)]
struct YuvInput {
    width: u8,
    height: u8,
    y_padding: u8,
    uv_padding: u8,
    standard: u8,
    samples: Vec<u8>,
}

fuzz_target!(|input: YuvInput| {
    fuzz_yuv_420(input);
});

fn fuzz_yuv_420(input: YuvInput) {
    if input.width == 0 || input.height == 0 || input.samples.is_empty() {
        return;
    }
    let standard = match input.standard % 3 {
        0 => YuvStandard::FullRangeJpeg,
        1 => YuvStandard::StudioBt601,
        _ => YuvStandard::StudioBt709,
    };
    // Widths past 32 reach the vector kernel
    let width = input.width as usize * 2;
    let height = input.height as usize;
    let y_stride = width + (input.y_padding % 17) as usize;
    let uv_stride = width.div_ceil(2) + (input.uv_padding % 17) as usize;
    let chroma_height = height.div_ceil(2);

    let sample = |i: usize| input.samples[i % input.samples.len()];
    let y_plane: Vec<u8> = (0..y_stride * height).map(sample).collect();
    let u_plane: Vec<u8> = (0..uv_stride * chroma_height)
        .map(|i| sample(i.wrapping_mul(7)))
        .collect();
    let v_plane: Vec<u8> = (0..uv_stride * chroma_height)
        .map(|i| sample(i.wrapping_mul(13)))
        .collect();

    let planar_image = YuvPlanarImage {
        y_plane: &y_plane,
        y_stride: y_stride as u32,
        u_plane: &u_plane,
        u_stride: uv_stride as u32,
        v_plane: &v_plane,
        v_stride: uv_stride as u32,
        width: width as u32,
        height: height as u32,
    };

    let rgb_stride = width * 3;
    let mut scalar_rgb = vec![0u8; rgb_stride * height];
    let mut vector_rgb = vec![0u8; rgb_stride * height];

    yuv420_to_rgb24(&planar_image, &mut scalar_rgb, rgb_stride as u32, standard).unwrap();
    yuv420_to_rgb24_unaligned(&planar_image, &mut vector_rgb, rgb_stride as u32, standard)
        .unwrap();

    // Vector kernel covers whole groups of 32 pixels of every row pair
    let covered = (width - width % 32) * 3;
    for (scalar_row, vector_row) in scalar_rgb
        .chunks_exact(rgb_stride)
        .zip(vector_rgb.chunks_exact(rgb_stride))
        .take(height - height % 2)
    {
        assert_eq!(&scalar_row[..covered], &vector_row[..covered]);
    }
}
