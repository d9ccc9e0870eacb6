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
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::sse_yuv420_to_rgb24_row;
use crate::yuv_error::{check_plane_alignment, check_rgb_destination, YuvPlaneKind};
use crate::yuv_support::{InverseCoefficients, YuvStandard, CHROMA_BIAS};
use crate::{YuvError, YuvPlanarImage};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

const RGB_CHANNELS: usize = 3;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum YuvConversionPath {
    Scalar = 0,
    SimdAligned = 1,
    SimdUnaligned = 2,
}

impl From<u8> for YuvConversionPath {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvConversionPath::Scalar,
            1 => YuvConversionPath::SimdAligned,
            2 => YuvConversionPath::SimdUnaligned,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

#[inline(always)]
fn store_rgb(dst: &mut [u8], luma: i32, r_chroma: i32, g_chroma: i32, b_chroma: i32) {
    dst[0] = clamp_u8(luma + r_chroma);
    dst[1] = clamp_u8(luma + g_chroma);
    dst[2] = clamp_u8(luma + b_chroma);
}

/// Converts columns `start_cx..width` of two rows sharing one chroma row.
///
/// Works on 2x2 blocks, a trailing odd column is not written.
pub(crate) fn yuv420_to_rgb24_row2(
    coeffs: &InverseCoefficients,
    y_plane0: &[u8],
    y_plane1: &[u8],
    u_plane: &[u8],
    v_plane: &[u8],
    rgb0: &mut [u8],
    rgb1: &mut [u8],
    start_cx: usize,
    width: usize,
) {
    let bias_y = coeffs.bias_y as i32;
    let y_coef = coeffs.transform.y_coef as i32;
    let cr_coef = coeffs.transform.cr_coef as i32;
    let cb_coef = coeffs.transform.cb_coef as i32;
    let g_coef_cb = coeffs.transform.g_coef_cb as i32;
    let g_coef_cr = coeffs.transform.g_coef_cr as i32;

    let start = start_cx / 2;
    let end = width / 2;
    if start >= end {
        return;
    }

    for (((((y_src0, y_src1), &u_src), &v_src), rgb_dst0), rgb_dst1) in y_plane0
        [start * 2..end * 2]
        .chunks_exact(2)
        .zip(y_plane1[start * 2..end * 2].chunks_exact(2))
        .zip(u_plane[start..end].iter())
        .zip(v_plane[start..end].iter())
        .zip(rgb0[start * 6..end * 6].chunks_exact_mut(RGB_CHANNELS * 2))
        .zip(rgb1[start * 6..end * 6].chunks_exact_mut(RGB_CHANNELS * 2))
    {
        // Chroma is shared by the whole 2x2 block
        let cb_value = u_src as i32 - CHROMA_BIAS;
        let cr_value = v_src as i32 - CHROMA_BIAS;

        let r_chroma = cr_value * cr_coef;
        let g_chroma = cb_value * g_coef_cb + cr_value * g_coef_cr;
        let b_chroma = cb_value * cb_coef;

        let y00 = (y_src0[0] as i32 - bias_y) * y_coef;
        store_rgb(&mut rgb_dst0[0..3], y00, r_chroma, g_chroma, b_chroma);
        let y01 = (y_src0[1] as i32 - bias_y) * y_coef;
        store_rgb(&mut rgb_dst0[3..6], y01, r_chroma, g_chroma, b_chroma);

        let y10 = (y_src1[0] as i32 - bias_y) * y_coef;
        store_rgb(&mut rgb_dst1[0..3], y10, r_chroma, g_chroma, b_chroma);
        let y11 = (y_src1[1] as i32 - bias_y) * y_coef;
        store_rgb(&mut rgb_dst1[3..6], y11, r_chroma, g_chroma, b_chroma);
    }
}

fn yuv420_to_rgb24_impl<const PATH: u8>(
    planar_image: &YuvPlanarImage<u8>,
    rgb: &mut [u8],
    rgb_stride: u32,
    standard: YuvStandard,
) -> Result<(), YuvError> {
    let path: YuvConversionPath = PATH.into();

    check_rgb_destination(
        rgb,
        rgb_stride,
        planar_image.width,
        planar_image.height,
        RGB_CHANNELS,
    )?;
    planar_image.check_constraints420()?;
    if path == YuvConversionPath::SimdAligned {
        planar_image.check_alignment()?;
        check_plane_alignment(rgb, rgb_stride, YuvPlaneKind::Rgb)?;
    }

    let coeffs = standard.inverse_coefficients();

    let width = planar_image.width as usize;
    // Vector paths cover only whole groups of 32 pixels
    let process_width = match path {
        YuvConversionPath::Scalar => width,
        YuvConversionPath::SimdAligned | YuvConversionPath::SimdUnaligned => width - width % 32,
    };

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let _use_sse =
        path != YuvConversionPath::Scalar && std::arch::is_x86_feature_detected!("sse4.1");

    let rgb_stride = rgb_stride as usize;
    let y_stride = planar_image.y_stride as usize;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rgb
            .par_chunks_exact_mut(rgb_stride * 2)
            .zip(planar_image.y_plane.par_chunks_exact(y_stride * 2))
            .zip(
                planar_image
                    .u_plane
                    .par_chunks_exact(planar_image.u_stride as usize),
            )
            .zip(
                planar_image
                    .v_plane
                    .par_chunks_exact(planar_image.v_stride as usize),
            );
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rgb
            .chunks_exact_mut(rgb_stride * 2)
            .zip(planar_image.y_plane.chunks_exact(y_stride * 2))
            .zip(
                planar_image
                    .u_plane
                    .chunks_exact(planar_image.u_stride as usize),
            )
            .zip(
                planar_image
                    .v_plane
                    .chunks_exact(planar_image.v_stride as usize),
            );
    }

    iter.for_each(|(((rgb, y_plane), u_plane), v_plane)| {
        let (rgb0, rgb1) = rgb.split_at_mut(rgb_stride);
        let (y_plane0, y_plane1) = y_plane.split_at(y_stride);

        let mut _cx = 0usize;

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if _use_sse {
            _cx = match path {
                YuvConversionPath::SimdAligned => sse_yuv420_to_rgb24_row::<true>(
                    &coeffs,
                    y_plane0,
                    y_plane1,
                    u_plane,
                    v_plane,
                    rgb0,
                    rgb1,
                    process_width,
                ),
                _ => sse_yuv420_to_rgb24_row::<false>(
                    &coeffs,
                    y_plane0,
                    y_plane1,
                    u_plane,
                    v_plane,
                    rgb0,
                    rgb1,
                    process_width,
                ),
            };
        }

        yuv420_to_rgb24_row2(
            &coeffs,
            y_plane0,
            y_plane1,
            u_plane,
            v_plane,
            rgb0,
            rgb1,
            _cx,
            process_width,
        );
    });

    Ok(())
}

/// Convert YUV 420 planar format to RGB24 format.
///
/// This function takes YUV 420 planar format data with 8-bit precision,
/// and converts it to packed RGB with 8-bit per channel precision using the scalar kernel.
///
/// Pixels are converted in 2x2 blocks: when width or height is odd,
/// the last column or row of `rgb` is left untouched.
///
/// # Arguments
///
/// * `planar_image` - Source planar image.
/// * `rgb` - A mutable slice to store the converted RGB data.
/// * `rgb_stride` - The stride (bytes per row) for the RGB image data.
/// * `standard` - The YCbCr transform the planes are encoded with.
///
/// # Errors
///
/// Returns an error if the lengths of the planes or the RGB data are not valid based
/// on the specified width, height, and strides.
///
pub fn yuv420_to_rgb24(
    planar_image: &YuvPlanarImage<u8>,
    rgb: &mut [u8],
    rgb_stride: u32,
    standard: YuvStandard,
) -> Result<(), YuvError> {
    yuv420_to_rgb24_impl::<{ YuvConversionPath::Scalar as u8 }>(
        planar_image,
        rgb,
        rgb_stride,
        standard,
    )
}

/// Convert YUV 420 planar format to RGB24 format using aligned SIMD loads and streaming stores.
///
/// Processes 32 pixels per iteration, columns past the last full group of 32 are left untouched,
/// as is the last row when height is odd. Output is byte-identical to [yuv420_to_rgb24]
/// on the converted area. Falls back to the scalar kernel when SSE4.1 is not available.
///
/// # Arguments
///
/// * `planar_image` - Source planar image, every plane must start on a 16 byte boundary
///   and have a stride multiple of 16.
/// * `rgb` - A mutable slice to store the converted RGB data, same alignment rules apply.
/// * `rgb_stride` - The stride (bytes per row) for the RGB image data.
/// * `standard` - The YCbCr transform the planes are encoded with.
///
/// # Errors
///
/// Returns an error if the lengths of the planes or the RGB data are not valid based
/// on the specified width, height, and strides, or if any plane is misaligned.
///
pub fn yuv420_to_rgb24_aligned(
    planar_image: &YuvPlanarImage<u8>,
    rgb: &mut [u8],
    rgb_stride: u32,
    standard: YuvStandard,
) -> Result<(), YuvError> {
    yuv420_to_rgb24_impl::<{ YuvConversionPath::SimdAligned as u8 }>(
        planar_image,
        rgb,
        rgb_stride,
        standard,
    )
}

/// Convert YUV 420 planar format to RGB24 format using unaligned SIMD loads and stores.
///
/// Processes 32 pixels per iteration, columns past the last full group of 32 are left untouched,
/// as is the last row when height is odd. Output is byte-identical to [yuv420_to_rgb24]
/// on the converted area. Falls back to the scalar kernel when SSE4.1 is not available.
///
/// # Arguments
///
/// * `planar_image` - Source planar image.
/// * `rgb` - A mutable slice to store the converted RGB data.
/// * `rgb_stride` - The stride (bytes per row) for the RGB image data.
/// * `standard` - The YCbCr transform the planes are encoded with.
///
/// # Errors
///
/// Returns an error if the lengths of the planes or the RGB data are not valid based
/// on the specified width, height, and strides.
///
pub fn yuv420_to_rgb24_unaligned(
    planar_image: &YuvPlanarImage<u8>,
    rgb: &mut [u8],
    rgb_stride: u32,
    standard: YuvStandard,
) -> Result<(), YuvError> {
    yuv420_to_rgb24_impl::<{ YuvConversionPath::SimdUnaligned as u8 }>(
        planar_image,
        rgb,
        rgb_stride,
        standard,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_support::PRECISION;
    use crate::YuvError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const STANDARDS: [YuvStandard; 3] = [
        YuvStandard::FullRangeJpeg,
        YuvStandard::StudioBt601,
        YuvStandard::StudioBt709,
    ];

    /// Heap buffer whose visible part starts on a 16 byte boundary
    struct AlignedBuffer {
        storage: Vec<u8>,
        offset: usize,
        len: usize,
    }

    impl AlignedBuffer {
        fn new(len: usize, fill: u8) -> Self {
            let storage = vec![fill; len + 16];
            let offset = storage.as_ptr().align_offset(16);
            AlignedBuffer {
                storage,
                offset,
                len,
            }
        }

        fn as_slice(&self) -> &[u8] {
            &self.storage[self.offset..self.offset + self.len]
        }

        fn as_mut_slice(&mut self) -> &mut [u8] {
            &mut self.storage[self.offset..self.offset + self.len]
        }
    }

    struct TestPlanes {
        y: AlignedBuffer,
        u: AlignedBuffer,
        v: AlignedBuffer,
        y_stride: u32,
        uv_stride: u32,
        width: u32,
        height: u32,
    }

    impl TestPlanes {
        fn random(rng: &mut StdRng, width: u32, height: u32, y_stride: u32, uv_stride: u32) -> Self {
            let chroma_height = height.div_ceil(2) as usize;
            let mut y = AlignedBuffer::new(y_stride as usize * height as usize, 0);
            let mut u = AlignedBuffer::new(uv_stride as usize * chroma_height, 0);
            let mut v = AlignedBuffer::new(uv_stride as usize * chroma_height, 0);
            rng.fill(y.as_mut_slice());
            rng.fill(u.as_mut_slice());
            rng.fill(v.as_mut_slice());
            TestPlanes {
                y,
                u,
                v,
                y_stride,
                uv_stride,
                width,
                height,
            }
        }

        fn uniform(width: u32, height: u32, y: u8, u: u8, v: u8) -> Self {
            let chroma_width = width.div_ceil(2);
            let chroma_height = height.div_ceil(2) as usize;
            TestPlanes {
                y: AlignedBuffer::new(width as usize * height as usize, y),
                u: AlignedBuffer::new(chroma_width as usize * chroma_height, u),
                v: AlignedBuffer::new(chroma_width as usize * chroma_height, v),
                y_stride: width,
                uv_stride: chroma_width,
                width,
                height,
            }
        }

        fn image(&self) -> YuvPlanarImage<'_, u8> {
            YuvPlanarImage {
                y_plane: self.y.as_slice(),
                y_stride: self.y_stride,
                u_plane: self.u.as_slice(),
                u_stride: self.uv_stride,
                v_plane: self.v.as_slice(),
                v_stride: self.uv_stride,
                width: self.width,
                height: self.height,
            }
        }
    }

    /// Straight per pixel evaluation of the fixed-point transform
    fn reference_pixel(planes: &TestPlanes, standard: YuvStandard, x: usize, y: usize) -> [u8; 3] {
        let coeffs = standard.inverse_coefficients();
        let t = coeffs.transform;
        let luma = planes.y.as_slice()[y * planes.y_stride as usize + x] as i32;
        let chroma_idx = (y / 2) * planes.uv_stride as usize + x / 2;
        let cb = planes.u.as_slice()[chroma_idx] as i32 - 128;
        let cr = planes.v.as_slice()[chroma_idx] as i32 - 128;
        let l = (luma - coeffs.bias_y as i32) * t.y_coef as i32;
        let descale = |v: i32| (v >> PRECISION).clamp(0, 255) as u8;
        [
            descale(l + cr * t.cr_coef as i32),
            descale(l + cb * t.g_coef_cb as i32 + cr * t.g_coef_cr as i32),
            descale(l + cb * t.cb_coef as i32),
        ]
    }

    #[test]
    fn test_scalar_matches_per_pixel_formula() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for standard in STANDARDS {
            let (width, height) = (18u32, 10u32);
            let planes = TestPlanes::random(&mut rng, width, height, 21, 11);
            let rgb_stride = width as usize * 3 + 5;
            let mut rgb = vec![0u8; rgb_stride * height as usize];
            yuv420_to_rgb24(&planes.image(), &mut rgb, rgb_stride as u32, standard).unwrap();
            for y in 0..height as usize {
                for x in 0..width as usize {
                    let px = &rgb[y * rgb_stride + x * 3..y * rgb_stride + x * 3 + 3];
                    assert_eq!(
                        px,
                        reference_pixel(&planes, standard, x, y),
                        "{:?} pixel ({}, {})",
                        standard,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_reference_colors() {
        let cases = [
            (YuvStandard::FullRangeJpeg, 0u8, [0u8, 0, 0]),
            (YuvStandard::FullRangeJpeg, 255u8, [255u8, 255, 255]),
            (YuvStandard::FullRangeJpeg, 128u8, [128u8, 128, 128]),
            (YuvStandard::StudioBt601, 16u8, [0u8, 0, 0]),
            (YuvStandard::StudioBt601, 235u8, [255u8, 255, 255]),
            (YuvStandard::StudioBt709, 16u8, [0u8, 0, 0]),
            (YuvStandard::StudioBt709, 235u8, [255u8, 255, 255]),
        ];
        for (standard, luma, expected) in cases {
            let planes = TestPlanes::uniform(4, 4, luma, 128, 128);
            let mut rgb = vec![1u8; 4 * 4 * 3];
            yuv420_to_rgb24(&planes.image(), &mut rgb, 12, standard).unwrap();
            for px in rgb.chunks_exact(3) {
                assert_eq!(px, expected, "{:?} Y={}", standard, luma);
            }
        }
    }

    #[test]
    fn test_chroma_direction() {
        // Strong V pushes red up, strong U pushes blue up
        let planes = TestPlanes::uniform(2, 2, 128, 128, 255);
        let mut rgb = vec![0u8; 12];
        yuv420_to_rgb24(&planes.image(), &mut rgb, 6, YuvStandard::FullRangeJpeg).unwrap();
        assert!(rgb[0] > 200 && rgb[1] < 128 && rgb[2] == 128);

        let planes = TestPlanes::uniform(2, 2, 128, 255, 128);
        yuv420_to_rgb24(&planes.image(), &mut rgb, 6, YuvStandard::FullRangeJpeg).unwrap();
        assert!(rgb[0] == 128 && rgb[1] < 128 && rgb[2] == 255);
    }

    fn assert_simd_matches_scalar(planes: &TestPlanes, rgb_stride: u32, standard: YuvStandard) {
        let height = planes.height as usize;
        let mut scalar = AlignedBuffer::new(rgb_stride as usize * height, 0);
        let mut aligned = AlignedBuffer::new(rgb_stride as usize * height, 0);
        let mut unaligned = AlignedBuffer::new(rgb_stride as usize * height, 0);

        yuv420_to_rgb24(&planes.image(), scalar.as_mut_slice(), rgb_stride, standard).unwrap();
        yuv420_to_rgb24_aligned(&planes.image(), aligned.as_mut_slice(), rgb_stride, standard)
            .unwrap();
        yuv420_to_rgb24_unaligned(
            &planes.image(),
            unaligned.as_mut_slice(),
            rgb_stride,
            standard,
        )
        .unwrap();

        assert!(
            scalar.as_slice() == aligned.as_slice(),
            "Aligned kernel diverged for {:?}",
            standard
        );
        assert!(
            scalar.as_slice() == unaligned.as_slice(),
            "Unaligned kernel diverged for {:?}",
            standard
        );
    }

    #[test]
    fn test_simd_equivalence_random() {
        let mut rng = StdRng::seed_from_u64(42);
        for standard in STANDARDS {
            for (width, height) in [(32u32, 2u32), (96, 6), (256, 16)] {
                let planes = TestPlanes::random(&mut rng, width, height, width, width / 2);
                assert_simd_matches_scalar(&planes, width * 3, standard);
            }
        }
    }

    #[test]
    fn test_simd_equivalence_padded_strides() {
        let mut rng = StdRng::seed_from_u64(7);
        for standard in STANDARDS {
            let planes = TestPlanes::random(&mut rng, 64, 8, 80, 48);
            assert_simd_matches_scalar(&planes, 64 * 3 + 16, standard);
        }
    }

    #[test]
    fn test_simd_equivalence_extremes() {
        // Studio range Y=255 with U=255 overflows a plain 16-bit sum
        for standard in STANDARDS {
            for &(y, u, v) in &[
                (0u8, 0u8, 0u8),
                (255, 255, 255),
                (255, 0, 255),
                (0, 255, 0),
                (16, 128, 128),
                (235, 240, 16),
            ] {
                let planes = TestPlanes::uniform(32, 2, y, u, v);
                assert_simd_matches_scalar(&planes, 96, standard);
            }
        }
    }

    #[test]
    fn test_odd_geometry_keeps_last_row_and_column() {
        const SENTINEL: u8 = 0xA5;
        let planes = TestPlanes::uniform(3, 3, 0, 128, 128);
        let mut rgb = vec![SENTINEL; 3 * 3 * 3];
        yuv420_to_rgb24(&planes.image(), &mut rgb, 9, YuvStandard::FullRangeJpeg).unwrap();
        for y in 0..3usize {
            for x in 0..3usize {
                let px = &rgb[y * 9 + x * 3..y * 9 + x * 3 + 3];
                if x == 2 || y == 2 {
                    assert_eq!(px, [SENTINEL; 3], "pixel ({}, {}) was written", x, y);
                } else {
                    assert_eq!(px, [0u8; 3], "pixel ({}, {}) was not written", x, y);
                }
            }
        }
    }

    #[test]
    fn test_simd_leaves_partial_group_untouched() {
        const SENTINEL: u8 = 0x5A;
        let width = 40u32;
        let planes = TestPlanes::uniform(width, 2, 255, 128, 128);
        let rgb_stride = width as usize * 3;
        for aligned in [false, true] {
            let mut rgb = AlignedBuffer::new(rgb_stride * 2, SENTINEL);
            if aligned {
                // 40 pixel luma rows are not 16 byte multiples
                assert_eq!(
                    yuv420_to_rgb24_aligned(
                        &planes.image(),
                        rgb.as_mut_slice(),
                        rgb_stride as u32,
                        YuvStandard::FullRangeJpeg,
                    ),
                    Err(YuvError::MisalignedPlane(YuvPlaneKind::Y))
                );
                continue;
            }
            yuv420_to_rgb24_unaligned(
                &planes.image(),
                rgb.as_mut_slice(),
                rgb_stride as u32,
                YuvStandard::FullRangeJpeg,
            )
            .unwrap();
            for row in rgb.as_slice().chunks_exact(rgb_stride) {
                assert!(row[..32 * 3].iter().all(|&x| x == 255));
                assert!(row[32 * 3..].iter().all(|&x| x == SENTINEL));
            }
        }
    }

    #[test]
    fn test_narrow_image_untouched_by_simd() {
        let planes = TestPlanes::uniform(16, 2, 255, 128, 128);
        let mut rgb = vec![3u8; 16 * 3 * 2];
        yuv420_to_rgb24_unaligned(&planes.image(), &mut rgb, 48, YuvStandard::StudioBt709)
            .unwrap();
        assert!(rgb.iter().all(|&x| x == 3));
    }

    #[test]
    fn test_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let planes = TestPlanes::random(&mut rng, 64, 4, 64, 32);
        let mut first = vec![0u8; 64 * 3 * 4];
        let mut second = vec![0u8; 64 * 3 * 4];
        yuv420_to_rgb24_unaligned(&planes.image(), &mut first, 192, YuvStandard::StudioBt601)
            .unwrap();
        yuv420_to_rgb24_unaligned(&planes.image(), &mut second, 192, YuvStandard::StudioBt601)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_buffers_are_rejected() {
        let planes = TestPlanes::uniform(8, 8, 0, 128, 128);
        let mut rgb = vec![0u8; 8 * 3 * 7];
        assert!(matches!(
            yuv420_to_rgb24(&planes.image(), &mut rgb, 24, YuvStandard::FullRangeJpeg),
            Err(YuvError::DestinationSizeMismatch(_))
        ));

        let mut rgb = vec![0u8; 8 * 3 * 8];
        let mut image = planes.image();
        image.u_plane = &planes.u.as_slice()[1..];
        assert!(matches!(
            yuv420_to_rgb24(&image, &mut rgb, 24, YuvStandard::FullRangeJpeg),
            Err(YuvError::ChromaPlaneSizeMismatch(_))
        ));

        let mut image = planes.image();
        image.width = 0;
        assert_eq!(
            yuv420_to_rgb24(&image, &mut rgb, 24, YuvStandard::FullRangeJpeg),
            Err(YuvError::ZeroBaseSize)
        );
    }

    #[test]
    fn test_aligned_rejects_misaligned_rgb() {
        let planes = TestPlanes::uniform(32, 2, 0, 128, 128);
        let mut rgb = AlignedBuffer::new(96 * 2 + 1, 0);
        let misaligned = &mut rgb.as_mut_slice()[1..];
        assert_eq!(
            yuv420_to_rgb24_aligned(&planes.image(), misaligned, 96, YuvStandard::FullRangeJpeg),
            Err(YuvError::MisalignedPlane(YuvPlaneKind::Rgb))
        );
    }
}
