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
use crate::numerics::clamp_u8;
use crate::yuv_error::check_rgb_destination;
use crate::yuv_support::{ForwardCoefficients, YuvStandard, CHROMA_BIAS, PRECISION};
use crate::{YuvError, YuvPlanarImageMut};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

const RGB_CHANNELS: usize = 3;

#[inline(always)]
fn luma_dot(coeffs: &ForwardCoefficients, rgb: &[u8]) -> i32 {
    let m = &coeffs.matrix;
    rgb[0] as i32 * m.yr as i32 + rgb[1] as i32 * m.yg as i32 + rgb[2] as i32 * m.yb as i32
}

/// Converts two RGB rows into two luma rows and one chroma row.
///
/// Chroma is the mean of the four products of the block, a trailing odd column is not written.
pub(crate) fn rgb24_to_yuv420_row2(
    coeffs: &ForwardCoefficients,
    y_plane0: &mut [u8],
    y_plane1: &mut [u8],
    u_plane: &mut [u8],
    v_plane: &mut [u8],
    rgb0: &[u8],
    rgb1: &[u8],
    width: usize,
) {
    let bias_y = (coeffs.bias_y as i32) << PRECISION;
    let bias_uv = CHROMA_BIAS << PRECISION;
    let m = &coeffs.matrix;
    let (cb_r, cb_g, cb_b) = (m.cb_r as i32, m.cb_g as i32, m.cb_b as i32);
    let (cr_r, cr_g, cr_b) = (m.cr_r as i32, m.cr_g as i32, m.cr_b as i32);

    let blocks = width / 2;

    for (((((y_dst0, y_dst1), u_dst), v_dst), rgb_src0), rgb_src1) in y_plane0[..blocks * 2]
        .chunks_exact_mut(2)
        .zip(y_plane1[..blocks * 2].chunks_exact_mut(2))
        .zip(u_plane[..blocks].iter_mut())
        .zip(v_plane[..blocks].iter_mut())
        .zip(rgb0[..blocks * 6].chunks_exact(RGB_CHANNELS * 2))
        .zip(rgb1[..blocks * 6].chunks_exact(RGB_CHANNELS * 2))
    {
        let mut r_sum = 0i32;
        let mut g_sum = 0i32;
        let mut b_sum = 0i32;

        for (dst, src) in y_dst0
            .iter_mut()
            .chain(y_dst1.iter_mut())
            .zip(
                rgb_src0
                    .chunks_exact(RGB_CHANNELS)
                    .chain(rgb_src1.chunks_exact(RGB_CHANNELS)),
            )
        {
            *dst = clamp_u8(luma_dot(coeffs, src) + bias_y);
            r_sum += src[0] as i32;
            g_sum += src[1] as i32;
            b_sum += src[2] as i32;
        }

        // Division truncates toward zero
        let cb = (r_sum * cb_r + g_sum * cb_g + b_sum * cb_b) / 4;
        let cr = (r_sum * cr_r + g_sum * cr_g + b_sum * cr_b) / 4;
        *u_dst = clamp_u8(cb + bias_uv);
        *v_dst = clamp_u8(cr + bias_uv);
    }
}

/// Convert RGB24 to YUV 420 planar format.
///
/// Each 2x2 block of `rgb` produces four luma samples and one U and one V sample.
/// When width or height is odd, the last luma column or row and the chroma
/// samples that would only cover it are left untouched.
///
/// # Arguments
///
/// * `planar_image` - Target planar image.
/// * `rgb` - The input RGB image data slice.
/// * `rgb_stride` - The stride (bytes per row) for the RGB image data.
/// * `standard` - The YCbCr transform to encode with.
///
/// # Errors
///
/// Returns an error if the lengths of the planes or the RGB data are not valid based
/// on the specified width, height, and strides.
///
pub fn rgb24_to_yuv420(
    planar_image: &mut YuvPlanarImageMut<u8>,
    rgb: &[u8],
    rgb_stride: u32,
    standard: YuvStandard,
) -> Result<(), YuvError> {
    planar_image.check_constraints420()?;
    check_rgb_destination(
        rgb,
        rgb_stride,
        planar_image.width,
        planar_image.height,
        RGB_CHANNELS,
    )?;

    let coeffs = standard.forward_coefficients();

    let width = planar_image.width as usize;
    let rgb_stride = rgb_stride as usize;
    let y_stride = planar_image.y_stride as usize;
    let u_stride = planar_image.u_stride as usize;
    let v_stride = planar_image.v_stride as usize;

    let y_plane = planar_image.y_plane.borrow_mut();
    let u_plane = planar_image.u_plane.borrow_mut();
    let v_plane = planar_image.v_plane.borrow_mut();

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = y_plane
            .par_chunks_exact_mut(y_stride * 2)
            .zip(u_plane.par_chunks_exact_mut(u_stride))
            .zip(v_plane.par_chunks_exact_mut(v_stride))
            .zip(rgb.par_chunks_exact(rgb_stride * 2));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = y_plane
            .chunks_exact_mut(y_stride * 2)
            .zip(u_plane.chunks_exact_mut(u_stride))
            .zip(v_plane.chunks_exact_mut(v_stride))
            .zip(rgb.chunks_exact(rgb_stride * 2));
    }

    iter.for_each(|(((y_plane, u_plane), v_plane), rgb)| {
        let (y_plane0, y_plane1) = y_plane.split_at_mut(y_stride);
        let (rgb0, rgb1) = rgb.split_at(rgb_stride);
        rgb24_to_yuv420_row2(
            &coeffs, y_plane0, y_plane1, u_plane, v_plane, rgb0, rgb1, width,
        );
    });

    Ok(())
}
