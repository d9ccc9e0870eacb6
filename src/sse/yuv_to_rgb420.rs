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

use crate::sse::{
    _mm_load_si128_x, sse_duplicate_epi16, sse_store_rgb_u8, sse_widen_epi8,
};
use crate::yuv_support::{InverseCoefficients, CHROMA_BIAS, PRECISION};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Broadcast coefficients, every lane holds the same value
struct SseInverseCoefficients {
    bias_y: __m128i,
    bias_uv: __m128i,
    y_coef: __m128i,
    cr_coef: __m128i,
    g_coef_cb: __m128i,
    g_coef_cr: __m128i,
    cb_coef: __m128i,
}

/// Chroma contributions of eight chroma samples, 16 luma columns
struct SseChromaTerms {
    r: __m128i,
    g: __m128i,
    b: __m128i,
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_inverse_coefficients(coeffs: &InverseCoefficients) -> SseInverseCoefficients {
    let t = coeffs.transform;
    SseInverseCoefficients {
        bias_y: _mm_set1_epi16(coeffs.bias_y as i16),
        bias_uv: _mm_set1_epi16(CHROMA_BIAS as i16),
        y_coef: _mm_set1_epi16(t.y_coef),
        cr_coef: _mm_set1_epi16(t.cr_coef),
        g_coef_cb: _mm_set1_epi16(t.g_coef_cb),
        g_coef_cr: _mm_set1_epi16(t.g_coef_cr),
        cb_coef: _mm_set1_epi16(t.cb_coef),
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
/// `u` and `v` are biased 16-bit chroma lanes, products fit into 16 bits for 8-bit input
unsafe fn sse_chroma_terms(
    u: __m128i,
    v: __m128i,
    coeffs: &SseInverseCoefficients,
) -> SseChromaTerms {
    SseChromaTerms {
        r: _mm_mullo_epi16(v, coeffs.cr_coef),
        g: _mm_add_epi16(
            _mm_mullo_epi16(u, coeffs.g_coef_cb),
            _mm_mullo_epi16(v, coeffs.g_coef_cr),
        ),
        b: _mm_mullo_epi16(u, coeffs.cb_coef),
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
/// Saturating add keeps the result equal to a 32-bit sum clamped to `0..=255`
unsafe fn sse_descale_u8(
    luma_lo: __m128i,
    luma_hi: __m128i,
    chroma: __m128i,
) -> __m128i {
    let (chroma_lo, chroma_hi) = sse_duplicate_epi16(chroma);
    let lo = _mm_srai_epi16::<PRECISION>(_mm_adds_epi16(luma_lo, chroma_lo));
    let hi = _mm_srai_epi16::<PRECISION>(_mm_adds_epi16(luma_hi, chroma_hi));
    _mm_packus_epi16(lo, hi)
}

#[inline]
#[target_feature(enable = "sse4.1")]
/// Converts 16 luma samples sharing eight chroma samples and stores 48 bytes of RGB24
unsafe fn sse_add_luma_store<const ALIGNED: bool>(
    y_values: __m128i,
    chroma: &SseChromaTerms,
    coeffs: &SseInverseCoefficients,
    dst: *mut u8,
) {
    let (y_lo, y_hi) = sse_widen_epi8(y_values, coeffs.bias_y);
    let luma_lo = _mm_mullo_epi16(y_lo, coeffs.y_coef);
    let luma_hi = _mm_mullo_epi16(y_hi, coeffs.y_coef);

    let r = sse_descale_u8(luma_lo, luma_hi, chroma.r);
    let g = sse_descale_u8(luma_lo, luma_hi, chroma.g);
    let b = sse_descale_u8(luma_lo, luma_hi, chroma.b);

    sse_store_rgb_u8::<ALIGNED>(dst, r, g, b);
}

/// Converts two luma rows sharing one chroma row, 32 pixels per iteration.
/// Returns the count of processed columns, columns past the last full group of 32 are left untouched.
///
/// Caller must check SSE4.1 availability, `ALIGNED` requires every row pointer on a 16 byte boundary.
pub(crate) fn sse_yuv420_to_rgb24_row<const ALIGNED: bool>(
    coeffs: &InverseCoefficients,
    y_plane0: &[u8],
    y_plane1: &[u8],
    u_plane: &[u8],
    v_plane: &[u8],
    rgb0: &mut [u8],
    rgb1: &mut [u8],
    width: usize,
) -> usize {
    let groups_width = width - width % 32;
    debug_assert!(y_plane0.len() >= groups_width && y_plane1.len() >= groups_width);
    debug_assert!(u_plane.len() >= groups_width / 2 && v_plane.len() >= groups_width / 2);
    debug_assert!(rgb0.len() >= groups_width * 3 && rgb1.len() >= groups_width * 3);
    unsafe {
        sse_yuv420_to_rgb24_row_impl::<ALIGNED>(
            coeffs, y_plane0, y_plane1, u_plane, v_plane, rgb0, rgb1, width,
        )
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn sse_yuv420_to_rgb24_row_impl<const ALIGNED: bool>(
    coeffs: &InverseCoefficients,
    y_plane0: &[u8],
    y_plane1: &[u8],
    u_plane: &[u8],
    v_plane: &[u8],
    rgb0: &mut [u8],
    rgb1: &mut [u8],
    width: usize,
) -> usize {
    let v_coeffs = sse_inverse_coefficients(coeffs);

    let y_ptr0 = y_plane0.as_ptr();
    let y_ptr1 = y_plane1.as_ptr();
    let u_ptr = u_plane.as_ptr();
    let v_ptr = v_plane.as_ptr();
    let rgb_ptr0 = rgb0.as_mut_ptr();
    let rgb_ptr1 = rgb1.as_mut_ptr();

    let mut cx = 0usize;
    let mut uv_x = 0usize;

    while cx + 32 <= width {
        let u_values = _mm_load_si128_x::<ALIGNED>(u_ptr.add(uv_x));
        let v_values = _mm_load_si128_x::<ALIGNED>(v_ptr.add(uv_x));

        let (u_lo, u_hi) = sse_widen_epi8(u_values, v_coeffs.bias_uv);
        let (v_lo, v_hi) = sse_widen_epi8(v_values, v_coeffs.bias_uv);

        let chroma_lo = sse_chroma_terms(u_lo, v_lo, &v_coeffs);
        let chroma_hi = sse_chroma_terms(u_hi, v_hi, &v_coeffs);

        for (chroma, offset) in [(&chroma_lo, 0usize), (&chroma_hi, 16usize)] {
            let x = cx + offset;
            let dst_shift = x * 3;

            let y_values0 = _mm_load_si128_x::<ALIGNED>(y_ptr0.add(x));
            sse_add_luma_store::<ALIGNED>(y_values0, chroma, &v_coeffs, rgb_ptr0.add(dst_shift));

            let y_values1 = _mm_load_si128_x::<ALIGNED>(y_ptr1.add(x));
            sse_add_luma_store::<ALIGNED>(y_values1, chroma, &v_coeffs, rgb_ptr1.add(dst_shift));
        }

        cx += 32;
        uv_x += 16;
    }

    if ALIGNED {
        _mm_sfence();
    }

    cx
}
