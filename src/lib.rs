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
//! Fixed-point conversion between planar YUV 4:2:0 and packed RGB24.
//!
//! Three transforms are supported, see [YuvStandard]. Arithmetic is integer only with
//! 6 fractional bits, SSE4.1 kernels are selected at runtime on x86 when the `sse`
//! feature is enabled and produce the same bytes as the scalar kernel.
#![deny(unreachable_pub)]
#![cfg_attr(docsrs, feature(doc_cfg))]
mod built_coefficients;
mod images;
mod numerics;
mod rgb_to_yuv;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
mod yuv_error;
mod yuv_support;
mod yuv_to_rgb;

pub use images::{BufferStoreMut, YuvPlanarImage, YuvPlanarImageMut};
pub use yuv_error::{MismatchedSize, YuvError, YuvPlaneKind};
pub use yuv_support::{
    CbCrForwardTransform, CbCrInverseTransform, ForwardCoefficients, InverseCoefficients,
    YuvStandard, CHROMA_BIAS, PRECISION,
};

pub use yuv_to_rgb::yuv420_to_rgb24;
pub use yuv_to_rgb::yuv420_to_rgb24_aligned;
pub use yuv_to_rgb::yuv420_to_rgb24_unaligned;

pub use rgb_to_yuv::rgb24_to_yuv420;
