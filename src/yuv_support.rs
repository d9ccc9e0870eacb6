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
use crate::built_coefficients::{get_built_forward_coefficients, get_built_inverse_coefficients};

/// Fractional bits of every fixed-point coefficient
pub const PRECISION: i32 = 6;
/// Neutral chroma value of 8-bit U and V samples
pub const CHROMA_BIAS: i32 = 128;

/// RGB to YUV matrix
///
/// ```text
/// |Y|   |bias_y|          |yr   yg   yb  |   |R|
/// |U| = | 128  | + 1/64 * |cb_r cb_g cb_b| * |G|
/// |V|   | 128  |          |cr_r cr_g cr_b|   |B|
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct CbCrForwardTransform<T> {
    pub yr: T,
    pub yg: T,
    pub yb: T,
    pub cb_r: T,
    pub cb_g: T,
    pub cb_b: T,
    pub cr_r: T,
    pub cr_g: T,
    pub cr_b: T,
}

/// YUV to RGB matrix, the structural zeros (U in R, V in B) are not stored
///
/// ```text
/// |R|          |y_coef  0        cr_coef  |   |Y-bias_y|
/// |G| = 1/64 * |y_coef  g_coef_cb g_coef_cr| * | U-128  |
/// |B|          |y_coef  cb_coef   0       |   | V-128  |
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct CbCrInverseTransform<T> {
    pub y_coef: T,
    pub cr_coef: T,
    pub g_coef_cb: T,
    pub g_coef_cr: T,
    pub cb_coef: T,
}

/// Fixed-point RGB to YUV coefficients of one [YuvStandard]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ForwardCoefficients {
    pub bias_y: u8,
    pub matrix: CbCrForwardTransform<i16>,
}

/// Fixed-point YUV to RGB coefficients of one [YuvStandard]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InverseCoefficients {
    pub bias_y: u8,
    pub transform: CbCrInverseTransform<i16>,
}

impl Eq for CbCrForwardTransform<i16> {}
impl Eq for CbCrInverseTransform<i16> {}

/// Rounds half away from zero, matches `f64::round`
fn to_fixed_point(value: f64, precision: i32) -> i16 {
    (value * (1i32 << precision) as f64).round() as i16
}

impl CbCrForwardTransform<f64> {
    pub fn to_integers(&self, precision: i32) -> CbCrForwardTransform<i16> {
        CbCrForwardTransform {
            yr: to_fixed_point(self.yr, precision),
            yg: to_fixed_point(self.yg, precision),
            yb: to_fixed_point(self.yb, precision),
            cb_r: to_fixed_point(self.cb_r, precision),
            cb_g: to_fixed_point(self.cb_g, precision),
            cb_b: to_fixed_point(self.cb_b, precision),
            cr_r: to_fixed_point(self.cr_r, precision),
            cr_g: to_fixed_point(self.cr_g, precision),
            cr_b: to_fixed_point(self.cr_b, precision),
        }
    }
}

impl CbCrInverseTransform<f64> {
    /// Integral transformation adds an error of up to 1/128 per coefficient
    pub fn to_integers(&self, precision: i32) -> CbCrInverseTransform<i16> {
        CbCrInverseTransform {
            y_coef: to_fixed_point(self.y_coef, precision),
            cr_coef: to_fixed_point(self.cr_coef, precision),
            g_coef_cb: to_fixed_point(self.g_coef_cb, precision),
            g_coef_cr: to_fixed_point(self.g_coef_cr, precision),
            cb_coef: to_fixed_point(self.cb_coef, precision),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// Declares supported YCbCr transforms
pub enum YuvStandard {
    /// ITU-T T.871 (JPEG), Y, U and V use the full 0..=255 range
    FullRangeJpeg = 0,
    /// ITU-R BT.601-7, studio swing Y ∈ [16, 235], UV ∈ [16, 240]
    StudioBt601 = 1,
    /// ITU-R BT.709-6, studio swing Y ∈ [16, 235], UV ∈ [16, 240]
    StudioBt709 = 2,
}

impl YuvStandard {
    /// Offset subtracted from Y before luma gain is applied
    #[inline]
    pub const fn bias_y(self) -> u8 {
        match self {
            YuvStandard::FullRangeJpeg => 0,
            YuvStandard::StudioBt601 | YuvStandard::StudioBt709 => 16,
        }
    }

    /// Published RGB to YUV matrix, values rounded to the fourth decimal.
    ///
    /// T.871 values are taken from section 7, BT.601-7 values are derived from
    /// sections 2.5.1-2.5.3 and BT.709-6 from sections 3.2-3.4,
    /// assuming RGB is encoded in full range.
    pub const fn forward_transform(self) -> CbCrForwardTransform<f64> {
        match self {
            YuvStandard::FullRangeJpeg => CbCrForwardTransform {
                yr: 0.299,
                yg: 0.587,
                yb: 0.114,
                cb_r: -0.1687,
                cb_g: -0.3313,
                cb_b: 0.5,
                cr_r: 0.5,
                cr_g: -0.4187,
                cr_b: -0.0813,
            },
            YuvStandard::StudioBt601 => CbCrForwardTransform {
                yr: 0.2568,
                yg: 0.5041,
                yb: 0.0979,
                cb_r: -0.1482,
                cb_g: -0.291,
                cb_b: 0.4392,
                cr_r: 0.4392,
                cr_g: -0.3678,
                cr_b: -0.0714,
            },
            YuvStandard::StudioBt709 => CbCrForwardTransform {
                yr: 0.1826,
                yg: 0.6142,
                yb: 0.062,
                cb_r: -0.1006,
                cb_g: -0.3386,
                cb_b: 0.4392,
                cr_r: 0.4392,
                cr_g: -0.3989,
                cr_b: -0.0403,
            },
        }
    }

    /// Published YUV to RGB matrix, values rounded to the fourth decimal
    pub const fn inverse_transform(self) -> CbCrInverseTransform<f64> {
        match self {
            YuvStandard::FullRangeJpeg => CbCrInverseTransform {
                y_coef: 1.0,
                cr_coef: 1.402,
                g_coef_cb: -0.3441,
                g_coef_cr: -0.7141,
                cb_coef: 1.772,
            },
            YuvStandard::StudioBt601 => CbCrInverseTransform {
                y_coef: 1.1644,
                cr_coef: 1.596,
                g_coef_cb: -0.3918,
                g_coef_cr: -0.813,
                cb_coef: 2.0172,
            },
            YuvStandard::StudioBt709 => CbCrInverseTransform {
                y_coef: 1.1644,
                cr_coef: 1.7927,
                g_coef_cb: -0.2132,
                g_coef_cr: -0.5329,
                cb_coef: 2.1124,
            },
        }
    }

    /// Fixed-point RGB to YUV coefficients with [PRECISION] fractional bits
    #[inline]
    pub fn forward_coefficients(self) -> ForwardCoefficients {
        get_built_forward_coefficients(self)
    }

    /// Fixed-point YUV to RGB coefficients with [PRECISION] fractional bits
    #[inline]
    pub fn inverse_coefficients(self) -> InverseCoefficients {
        get_built_inverse_coefficients(self)
    }
}
