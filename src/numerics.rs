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
#![forbid(unsafe_code)]
use crate::yuv_support::PRECISION;

const LUT_BIAS: i32 = 128 << PRECISION;

const fn build_saturation_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut i = 0usize;
    while i < 512 {
        let value = i as i32 - 128;
        table[i] = if value < 0 {
            0
        } else if value > 255 {
            255
        } else {
            value as u8
        };
        i += 1;
    }
    table
}

static SATURATION_TABLE: [u8; 512] = build_saturation_table();

#[inline(always)]
/// Divides a fixed-point sample by `1 << PRECISION` rounding toward negative infinity
/// and saturates it to `0..=255`.
///
/// Defined for `[-128 << PRECISION, 384 << PRECISION)`, values outside saturate.
pub(crate) fn clamp_u8(v: i32) -> u8 {
    let index = (v + LUT_BIAS) >> PRECISION;
    SATURATION_TABLE[index.clamp(0, 511) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_whole_domain() {
        for v in -(128 << PRECISION)..(384 << PRECISION) {
            let expected = (v >> PRECISION).clamp(0, 255) as u8;
            assert_eq!(clamp_u8(v), expected, "Clamp diverged at {}", v);
        }
    }

    #[test]
    fn test_clamp_boundaries() {
        assert_eq!(clamp_u8(0), 0);
        assert_eq!(clamp_u8(-1), 0);
        assert_eq!(clamp_u8(63), 0);
        assert_eq!(clamp_u8(64), 1);
        assert_eq!(clamp_u8(255 << PRECISION), 255);
        assert_eq!(clamp_u8((255 << PRECISION) - 1), 254);
        assert_eq!(clamp_u8(256 << PRECISION), 255);
        assert_eq!(clamp_u8(-(128 << PRECISION)), 0);
        assert_eq!(clamp_u8((384 << PRECISION) - 1), 255);
    }

    #[test]
    fn test_clamp_saturates_outside_domain() {
        assert_eq!(clamp_u8(i16::MAX as i32 * 2), 255);
        assert_eq!(clamp_u8(i16::MIN as i32 * 2), 0);
        assert_eq!(clamp_u8(i32::MAX - LUT_BIAS), 255);
        assert_eq!(clamp_u8(i32::MIN), 0);
    }
}
