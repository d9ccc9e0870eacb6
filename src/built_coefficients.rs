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
use crate::yuv_support::{
    CbCrForwardTransform, CbCrInverseTransform, ForwardCoefficients, InverseCoefficients,
    YuvStandard,
};

static FORWARD_JPEG_FULL_8_6PREC: ForwardCoefficients = ForwardCoefficients {
    bias_y: 0,
    matrix: CbCrForwardTransform {
        yr: 19,
        yg: 38,
        yb: 7,
        cb_r: -11,
        cb_g: -21,
        cb_b: 32,
        cr_r: 32,
        cr_g: -27,
        cr_b: -5,
    },
};

static FORWARD_BT601_LIMITED_8_6PREC: ForwardCoefficients = ForwardCoefficients {
    bias_y: 16,
    matrix: CbCrForwardTransform {
        yr: 16,
        yg: 32,
        yb: 6,
        cb_r: -9,
        cb_g: -19,
        cb_b: 28,
        cr_r: 28,
        cr_g: -24,
        cr_b: -5,
    },
};

static FORWARD_BT709_LIMITED_8_6PREC: ForwardCoefficients = ForwardCoefficients {
    bias_y: 16,
    matrix: CbCrForwardTransform {
        yr: 12,
        yg: 39,
        yb: 4,
        cb_r: -6,
        cb_g: -22,
        cb_b: 28,
        cr_r: 28,
        cr_g: -26,
        cr_b: -3,
    },
};

static INVERSE_JPEG_FULL_8_6PREC: InverseCoefficients = InverseCoefficients {
    bias_y: 0,
    transform: CbCrInverseTransform {
        y_coef: 64,
        cr_coef: 90,
        g_coef_cb: -22,
        g_coef_cr: -46,
        cb_coef: 113,
    },
};

static INVERSE_BT601_LIMITED_8_6PREC: InverseCoefficients = InverseCoefficients {
    bias_y: 16,
    transform: CbCrInverseTransform {
        y_coef: 75,
        cr_coef: 102,
        g_coef_cb: -25,
        g_coef_cr: -52,
        cb_coef: 129,
    },
};

static INVERSE_BT709_LIMITED_8_6PREC: InverseCoefficients = InverseCoefficients {
    bias_y: 16,
    transform: CbCrInverseTransform {
        y_coef: 75,
        cr_coef: 115,
        g_coef_cb: -14,
        g_coef_cr: -34,
        cb_coef: 135,
    },
};

#[inline]
pub(crate) fn get_built_forward_coefficients(standard: YuvStandard) -> ForwardCoefficients {
    match standard {
        YuvStandard::FullRangeJpeg => FORWARD_JPEG_FULL_8_6PREC,
        YuvStandard::StudioBt601 => FORWARD_BT601_LIMITED_8_6PREC,
        YuvStandard::StudioBt709 => FORWARD_BT709_LIMITED_8_6PREC,
    }
}

#[inline]
pub(crate) fn get_built_inverse_coefficients(standard: YuvStandard) -> InverseCoefficients {
    match standard {
        YuvStandard::FullRangeJpeg => INVERSE_JPEG_FULL_8_6PREC,
        YuvStandard::StudioBt601 => INVERSE_BT601_LIMITED_8_6PREC,
        YuvStandard::StudioBt709 => INVERSE_BT709_LIMITED_8_6PREC,
    }
}
