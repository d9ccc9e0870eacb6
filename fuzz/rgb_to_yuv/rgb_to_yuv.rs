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

use libfuzzer_sys::fuzz_target;
use yuv2rgb::{rgb24_to_yuv420, yuv420_to_rgb24, BufferStoreMut, YuvPlanarImageMut, YuvStandard};

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8)| {
    fuzz_rgb_to_yuv_420(data.0, data.1, data.2, data.3, data.4, data.5);
});

fn fuzz_rgb_to_yuv_420(i_width: u8, i_height: u8, r: u8, g: u8, b: u8, standard: u8) {
    if i_height == 0 || i_width == 0 {
        return;
    }
    let standard = match standard % 3 {
        0 => YuvStandard::FullRangeJpeg,
        1 => YuvStandard::StudioBt601,
        _ => YuvStandard::StudioBt709,
    };
    let width = i_width as usize;
    let height = i_height as usize;
    let chroma_width = width.div_ceil(2);
    let chroma_height = height.div_ceil(2);

    let mut y_plane = vec![0u8; width * height];
    let mut u_plane = vec![0u8; chroma_width * chroma_height];
    let mut v_plane = vec![0u8; chroma_width * chroma_height];

    let mut planar_image = YuvPlanarImageMut {
        y_plane: BufferStoreMut::Borrowed(&mut y_plane),
        y_stride: width as u32,
        u_plane: BufferStoreMut::Borrowed(&mut u_plane),
        u_stride: chroma_width as u32,
        v_plane: BufferStoreMut::Borrowed(&mut v_plane),
        v_stride: chroma_width as u32,
        width: width as u32,
        height: height as u32,
    };

    let src_rgb = [r, g, b].repeat(width * height);

    rgb24_to_yuv420(&mut planar_image, &src_rgb, width as u32 * 3, standard).unwrap();

    let mut restored = vec![0u8; width * height * 3];
    yuv420_to_rgb24(
        &planar_image.to_fixed(),
        &mut restored,
        width as u32 * 3,
        standard,
    )
    .unwrap();

    let tolerance = match standard {
        YuvStandard::FullRangeJpeg => 7,
        YuvStandard::StudioBt601 => 12,
        YuvStandard::StudioBt709 => 10,
    };
    for (row_idx, row) in restored.chunks_exact(width * 3).enumerate() {
        if row_idx >= height - height % 2 {
            break;
        }
        for (src, dst) in src_rgb[..(width - width % 2) * 3]
            .iter()
            .zip(row[..(width - width % 2) * 3].iter())
        {
            assert!(src.abs_diff(*dst) <= tolerance);
        }
    }
}
