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
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Plane that failed an alignment check
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum YuvPlaneKind {
    Y,
    U,
    V,
    Rgb,
}

impl Display for YuvPlaneKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvPlaneKind::Y => f.write_str("Y"),
            YuvPlaneKind::U => f.write_str("U"),
            YuvPlaneKind::V => f.write_str("V"),
            YuvPlaneKind::Rgb => f.write_str("RGB"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum YuvError {
    DestinationSizeMismatch(MismatchedSize),
    MinimumDestinationSizeMismatch(MismatchedSize),
    PointerOverflow,
    ZeroBaseSize,
    LumaPlaneSizeMismatch(MismatchedSize),
    LumaPlaneMinimumSizeMismatch(MismatchedSize),
    ChromaPlaneSizeMismatch(MismatchedSize),
    ChromaPlaneMinimumSizeMismatch(MismatchedSize),
    MisalignedPlane(YuvPlaneKind),
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::LumaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Luma plane have invalid size, it must be {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::LumaPlaneMinimumSizeMismatch(size) => f.write_fmt(format_args!(
                "Luma plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::ChromaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Chroma plane have invalid size, it must be {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::ChromaPlaneMinimumSizeMismatch(size) => f.write_fmt(format_args!(
                "Chroma plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            YuvError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            YuvError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            YuvError::MinimumDestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
            YuvError::MisalignedPlane(plane) => f.write_fmt(format_args!(
                "{} plane must start on a 16 byte boundary and have a stride multiple of 16",
                plane
            )),
        }
    }
}

impl Error for YuvError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<(), YuvError> {
    let (_, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(YuvError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<(), YuvError> {
    let (product0, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(YuvError::PointerOverflow);
    }
    let (_, overflow) = product0.overflowing_mul(v2);
    if overflow {
        return Err(YuvError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_zero_size(width: u32, height: u32) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_rgb_destination(
    arr: &[u8],
    rgb_stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    check_zero_size(width, height)?;
    check_overflow_v3(width as usize, height as usize, channels)?;
    check_overflow_v2(rgb_stride as usize, height as usize)?;
    if (rgb_stride as usize) < width as usize * channels {
        return Err(YuvError::MinimumDestinationSizeMismatch(MismatchedSize {
            expected: width as usize * height as usize * channels,
            received: rgb_stride as usize * height as usize,
        }));
    }
    if arr.len() != rgb_stride as usize * height as usize {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected: rgb_stride as usize * height as usize,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_y8_channel(
    data: &[u8],
    stride: u32,
    width: u32,
    height: u32,
) -> Result<(), YuvError> {
    check_zero_size(width, height)?;
    check_overflow_v2(stride as usize, height as usize)?;
    check_overflow_v2(width as usize, height as usize)?;
    if stride < width {
        return Err(YuvError::LumaPlaneMinimumSizeMismatch(MismatchedSize {
            expected: width as usize * height as usize,
            received: stride as usize * height as usize,
        }));
    }
    if stride as usize * height as usize != data.len() {
        return Err(YuvError::LumaPlaneSizeMismatch(MismatchedSize {
            expected: stride as usize * height as usize,
            received: data.len(),
        }));
    }
    Ok(())
}

/// Chroma planes of 4:2:0 images are `ceil(width / 2)` by `ceil(height / 2)`
#[inline]
pub(crate) fn check_chroma_channel(
    data: &[u8],
    stride: u32,
    image_width: u32,
    image_height: u32,
) -> Result<(), YuvError> {
    check_zero_size(image_width, image_height)?;
    let chroma_min_width = image_width.div_ceil(2);
    let chroma_height = image_height.div_ceil(2);
    check_overflow_v2(stride as usize, chroma_height as usize)?;
    check_overflow_v2(chroma_min_width as usize, chroma_height as usize)?;
    if stride < chroma_min_width {
        return Err(YuvError::ChromaPlaneMinimumSizeMismatch(MismatchedSize {
            expected: chroma_min_width as usize * chroma_height as usize,
            received: stride as usize * chroma_height as usize,
        }));
    }
    if stride as usize * chroma_height as usize != data.len() {
        return Err(YuvError::ChromaPlaneSizeMismatch(MismatchedSize {
            expected: stride as usize * chroma_height as usize,
            received: data.len(),
        }));
    }
    Ok(())
}

/// Aligned SIMD loads and streaming stores need every row of a plane on a 16 byte boundary
#[inline]
pub(crate) fn check_plane_alignment(
    data: &[u8],
    stride: u32,
    plane: YuvPlaneKind,
) -> Result<(), YuvError> {
    const ALIGNMENT: usize = 16;
    if (data.as_ptr() as usize) % ALIGNMENT != 0 || stride as usize % ALIGNMENT != 0 {
        return Err(YuvError::MisalignedPlane(plane));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_plane_checks() {
        let plane = vec![0u8; 64 * 4];
        assert!(check_y8_channel(&plane, 64, 64, 4).is_ok());
        assert!(check_y8_channel(&plane, 64, 60, 4).is_ok());
        assert_eq!(
            check_y8_channel(&plane, 64, 64, 5),
            Err(YuvError::LumaPlaneSizeMismatch(MismatchedSize {
                expected: 320,
                received: 256,
            }))
        );
        assert!(matches!(
            check_y8_channel(&plane, 32, 64, 8),
            Err(YuvError::LumaPlaneMinimumSizeMismatch(_))
        ));
        assert_eq!(check_y8_channel(&plane, 64, 0, 4), Err(YuvError::ZeroBaseSize));
    }

    #[test]
    fn test_chroma_plane_checks_round_up() {
        let plane = vec![0u8; 3 * 3];
        assert!(check_chroma_channel(&plane, 3, 5, 5).is_ok());
        assert!(check_chroma_channel(&plane, 3, 6, 6).is_ok());
        assert!(matches!(
            check_chroma_channel(&plane, 3, 8, 6),
            Err(YuvError::ChromaPlaneMinimumSizeMismatch(_))
        ));
        assert!(matches!(
            check_chroma_channel(&plane, 3, 6, 8),
            Err(YuvError::ChromaPlaneSizeMismatch(_))
        ));
    }

    #[test]
    fn test_rgb_destination_checks() {
        let rgb = vec![0u8; 10 * 3 * 2];
        assert!(check_rgb_destination(&rgb, 30, 10, 2, 3).is_ok());
        assert!(matches!(
            check_rgb_destination(&rgb, 20, 10, 3, 3),
            Err(YuvError::MinimumDestinationSizeMismatch(_))
        ));
        assert!(matches!(
            check_rgb_destination(&rgb, 30, 10, 3, 3),
            Err(YuvError::DestinationSizeMismatch(_))
        ));
        assert_eq!(
            check_overflow_v3(usize::MAX / 2, 3, 1),
            Err(YuvError::PointerOverflow)
        );
    }

    #[test]
    fn test_alignment_check() {
        let storage = vec![0u8; 96];
        let offset = storage.as_ptr().align_offset(16);
        let aligned = &storage[offset..offset + 32];
        assert!(check_plane_alignment(aligned, 32, YuvPlaneKind::Y).is_ok());
        assert_eq!(
            check_plane_alignment(aligned, 24, YuvPlaneKind::U),
            Err(YuvError::MisalignedPlane(YuvPlaneKind::U))
        );
        assert_eq!(
            check_plane_alignment(&aligned[1..], 32, YuvPlaneKind::Rgb),
            Err(YuvError::MisalignedPlane(YuvPlaneKind::Rgb))
        );
    }
}
