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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[inline]
#[target_feature(enable = "sse4.1")]
/// Loads 16 bytes, `ALIGNED` requires `ptr` on a 16 byte boundary
pub(crate) unsafe fn _mm_load_si128_x<const ALIGNED: bool>(ptr: *const u8) -> __m128i {
    if ALIGNED {
        _mm_load_si128(ptr as *const __m128i)
    } else {
        _mm_loadu_si128(ptr as *const __m128i)
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
/// Stores 16 bytes, `ALIGNED` bypasses the cache with a non-temporal store
/// and requires `ptr` on a 16 byte boundary
pub(crate) unsafe fn _mm_store_si128_x<const ALIGNED: bool>(ptr: *mut u8, v: __m128i) {
    if ALIGNED {
        _mm_stream_si128(ptr as *mut __m128i, v);
    } else {
        _mm_storeu_si128(ptr as *mut __m128i, v);
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
/// Zero extends 16 bytes into two vectors of eight 16-bit lanes and removes `bias`
pub(crate) unsafe fn sse_widen_epi8(v: __m128i, bias: __m128i) -> (__m128i, __m128i) {
    let zeros = _mm_setzero_si128();
    let lo = _mm_sub_epi16(_mm_unpacklo_epi8(v, zeros), bias);
    let hi = _mm_sub_epi16(_mm_unpackhi_epi8(v, zeros), bias);
    (lo, hi)
}

#[inline]
#[target_feature(enable = "sse4.1")]
/// Repeats every 16-bit lane twice: `a0 a0 a1 a1 ...`
pub(crate) unsafe fn sse_duplicate_epi16(v: __m128i) -> (__m128i, __m128i) {
    (_mm_unpacklo_epi16(v, v), _mm_unpackhi_epi16(v, v))
}

#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn sse_interleave_rgb(
    r: __m128i,
    g: __m128i,
    b: __m128i,
) -> (__m128i, __m128i, __m128i) {
    let sh_a = _mm_setr_epi8(0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15, 10, 5);
    let sh_b = _mm_setr_epi8(5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15, 10);
    let sh_c = _mm_setr_epi8(10, 5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15);
    let a0 = _mm_shuffle_epi8(r, sh_a);
    let b0 = _mm_shuffle_epi8(g, sh_b);
    let c0 = _mm_shuffle_epi8(b, sh_c);

    let m0 = _mm_setr_epi8(0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0);
    let m1 = _mm_setr_epi8(0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0);
    let v0 = _mm_blendv_epi8(_mm_blendv_epi8(a0, b0, m1), c0, m0);
    let v1 = _mm_blendv_epi8(_mm_blendv_epi8(b0, c0, m1), a0, m0);
    let v2 = _mm_blendv_epi8(_mm_blendv_epi8(c0, a0, m1), b0, m0);
    (v0, v1, v2)
}

#[inline]
#[target_feature(enable = "sse4.1")]
/// Writes 16 RGB24 pixels, 48 bytes
pub(crate) unsafe fn sse_store_rgb_u8<const ALIGNED: bool>(
    ptr: *mut u8,
    r: __m128i,
    g: __m128i,
    b: __m128i,
) {
    let (v0, v1, v2) = sse_interleave_rgb(r, g, b);
    _mm_store_si128_x::<ALIGNED>(ptr, v0);
    _mm_store_si128_x::<ALIGNED>(ptr.add(16), v1);
    _mm_store_si128_x::<ALIGNED>(ptr.add(32), v2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_rgb() {
        if !std::arch::is_x86_feature_detected!("sse4.1") {
            return;
        }
        let r: Vec<u8> = (0..16).collect();
        let g: Vec<u8> = (100..116).collect();
        let b: Vec<u8> = (200..216).collect();
        let mut dst = [0u8; 48];
        unsafe {
            let rv = _mm_loadu_si128(r.as_ptr() as *const __m128i);
            let gv = _mm_loadu_si128(g.as_ptr() as *const __m128i);
            let bv = _mm_loadu_si128(b.as_ptr() as *const __m128i);
            sse_store_rgb_u8::<false>(dst.as_mut_ptr(), rv, gv, bv);
        }
        for (i, px) in dst.chunks_exact(3).enumerate() {
            assert_eq!(px, [r[i], g[i], b[i]], "Pixel {} was interleaved wrong", i);
        }
    }

    #[test]
    fn test_widen_and_duplicate() {
        if !std::arch::is_x86_feature_detected!("sse4.1") {
            return;
        }
        let src: Vec<u8> = (120..136).collect();
        let mut lanes = [0i16; 8];
        unsafe {
            let v = _mm_loadu_si128(src.as_ptr() as *const __m128i);
            let (lo, hi) = sse_widen_epi8(v, _mm_set1_epi16(128));
            _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, lo);
            assert_eq!(lanes, [-8, -7, -6, -5, -4, -3, -2, -1]);
            _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, hi);
            assert_eq!(lanes, [0, 1, 2, 3, 4, 5, 6, 7]);
            let (d_lo, d_hi) = sse_duplicate_epi16(hi);
            _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, d_lo);
            assert_eq!(lanes, [0, 0, 1, 1, 2, 2, 3, 3]);
            _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, d_hi);
            assert_eq!(lanes, [4, 4, 5, 5, 6, 6, 7, 7]);
        }
    }
}
