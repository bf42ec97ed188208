/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Planar to interleaved conversion
use alloc::vec::Vec;

use hdrpix_core::utils::try_alloc;

use crate::errors::ExrDecodeErrors;

/// Interleave `planes` into a new buffer of `pixel_count * planes.len()` samples.
///
/// Sample `i` of plane `c` ends up at `i * planes.len() + c`, values are
/// copied bit for bit.
///
/// # Errors
/// [`ExrDecodeErrors::ShortPlane`] if any plane holds fewer than
/// `pixel_count` samples.
pub fn interleave_planes(
    planes: &[&[f32]], pixel_count: usize
) -> Result<Vec<f32>, ExrDecodeErrors> {
    let size = pixel_count
        .checked_mul(planes.len())
        .ok_or(ExrDecodeErrors::AllocationFailed(usize::MAX))?;

    let mut out = try_alloc(size, 0.0).map_err(|_| ExrDecodeErrors::AllocationFailed(size))?;

    interleave_planes_into(planes, &mut out)?;

    Ok(out)
}

/// Interleave `planes` into `out`.
///
/// The number of pixels written is `out.len() / planes.len()`, trailing
/// samples that don't fill a whole pixel are left untouched.
///
/// # Errors
/// [`ExrDecodeErrors::ShortPlane`] if any plane is shorter than that pixel
/// count, `out` is left unmodified.
pub fn interleave_planes_into(planes: &[&[f32]], out: &mut [f32]) -> Result<(), ExrDecodeErrors> {
    let channels = planes.len();

    if channels == 0 {
        return Ok(());
    }
    let pixels = out.len() / channels;

    if let Some(plane) = planes.iter().find(|plane| plane.len() < pixels) {
        return Err(ExrDecodeErrors::ShortPlane(pixels, plane.len()));
    }
    for (c, plane) in planes.iter().enumerate() {
        for (dst, src) in out.chunks_exact_mut(channels).zip(plane.iter()) {
            dst[c] = *src;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};

    use crate::interleave::{interleave_planes, interleave_planes_into};
    use crate::ExrDecodeErrors;

    #[test]
    fn rgb_planes() {
        let r = [1.0, 2.0];
        let g = [3.0, 4.0];
        let b = [5.0, 6.0];

        assert_eq!(
            interleave_planes(&[&r, &g, &b], 2).unwrap(),
            [1.0, 3.0, 5.0, 2.0, 4.0, 6.0]
        );
    }

    #[test]
    fn values_are_copied_bit_for_bit() {
        let mut rng = WyRand::new_seed(3);
        let mut bits = vec![0_u32; 4 * 64];
        rng.fill(&mut bits);

        // includes NaN payloads, infinities and subnormals
        let samples: Vec<f32> = bits.iter().map(|x| f32::from_bits(*x)).collect();
        let planes: Vec<&[f32]> = samples.chunks_exact(64).collect();

        let out = interleave_planes(&planes, 64).unwrap();

        for (i, pixel) in out.chunks_exact(4).enumerate() {
            for c in 0..4 {
                assert_eq!(pixel[c].to_bits(), planes[c][i].to_bits());
            }
        }
    }

    #[test]
    fn partial_pixel_is_untouched() {
        let a = [1.0, 2.0];
        let mut out = [9.0; 5];

        interleave_planes_into(&[&a, &a], &mut out).unwrap();
        assert_eq!(out, [1.0, 1.0, 2.0, 2.0, 9.0]);
    }

    #[test]
    fn short_plane_is_an_error() {
        let full = [1.0, 2.0, 3.0];
        let short = [4.0, 5.0];

        assert!(matches!(
            interleave_planes(&[&full, &short, &full], 3),
            Err(ExrDecodeErrors::ShortPlane(3, 2))
        ));

        let mut out = [9.0; 9];
        assert!(matches!(
            interleave_planes_into(&[&full, &full, &short], &mut out),
            Err(ExrDecodeErrors::ShortPlane(3, 2))
        ));
        assert_eq!(out, [9.0; 9]);

        // longer planes are fine, the extra samples are ignored
        assert_eq!(
            interleave_planes(&[&full, &full], 2).unwrap(),
            [1.0, 1.0, 2.0, 2.0]
        );
    }
}
