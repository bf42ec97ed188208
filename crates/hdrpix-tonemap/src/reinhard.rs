/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reinhard global tonemapping with automatic exposure
//!
//! Two passes over the image. The first computes the log-average luminance
//! of every pixel whose luminance is finite and positive, the second scales
//! each pixel so the log-average maps to [`KEY`], compresses it with
//! `L / (1 + L)` and sRGB encodes the result.
//!
//! Pixels with non-finite or non-positive luminance are excluded from the
//! average and come out black, as do pixels so bright that the scaled
//! luminance overflows. Alpha is clamped and quantized without gamma,
//! or set to 255 when the source has none.
use alloc::vec::Vec;

use hdrpix_core::log::trace;
use hdrpix_core::utils::try_alloc;

use crate::errors::TonemapErrors;
use crate::transfer::{linear_to_srgb, quantize, quantize_alpha};

/// Middle grey the log-average luminance is mapped to
pub const KEY: f32 = 0.18;
/// Keeps `ln` finite and bounds the exposure scale
pub const DELTA: f32 = 1e-6;

/// Rec. 709 luminance of a pixel, with negative channels treated as zero.
///
/// NaN channels also count as zero, so a fully NaN pixel has
/// zero luminance while an infinite channel gives infinite luminance.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    let (r, g, b) = (r.max(0.0), g.max(0.0), b.max(0.0));

    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[inline]
fn is_valid(luminance: f32) -> bool {
    luminance.is_finite() && luminance > 0.0
}

/// Geometric mean of the valid luminances in `input`, or `None` when
/// no pixel has a finite positive luminance.
///
/// `input` holds `channels` interleaved samples per pixel, with R, G and B
/// as the first three.
pub fn log_average_luminance(input: &[f32], channels: usize) -> Option<f32> {
    let mut sum_log = 0.0_f32;
    let mut count = 0_usize;

    for pixel in input.chunks_exact(channels.max(3)) {
        let l = luminance(pixel[0], pixel[1], pixel[2]);

        if !is_valid(l) {
            continue;
        }
        sum_log += (l + DELTA).ln();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some((sum_log / count as f32).exp())
}

/// Tonemap `input` into a new `width*height*4` RGBA buffer.
///
/// # Arguments
/// - input: `width*height*channels` linear floats
/// - channels: 3 for RGB, 4 for RGBA
///
/// # Returns
/// The sRGB encoded, 8-bit RGBA raster
///
/// # Example
/// ```
/// use hdrpix_tonemap::tonemap_reinhard;
/// let input = vec![1.0_f32; 2 * 2 * 3];
/// let output = tonemap_reinhard(&input, 2, 2, 3).unwrap();
/// assert_eq!(output.len(), 2 * 2 * 4);
/// assert!(output.chunks_exact(4).all(|x| x[3] == 255));
/// ```
pub fn tonemap_reinhard(
    input: &[f32], width: usize, height: usize, channels: usize
) -> Result<Vec<u8>, TonemapErrors> {
    let size = width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(4))
        .ok_or(TonemapErrors::DimensionsOverflow(width, height))?;

    let mut output = try_alloc(size, 0_u8).map_err(|_| TonemapErrors::AllocationFailed(size))?;

    tonemap_reinhard_into(input, &mut output, width, height, channels)?;

    Ok(output)
}

/// Tonemap `input` into `output`, which must hold at least
/// `width*height*4` bytes.
///
/// On error `output` is left unmodified.
pub fn tonemap_reinhard_into(
    input: &[f32], output: &mut [u8], width: usize, height: usize, channels: usize
) -> Result<(), TonemapErrors> {
    if channels != 3 && channels != 4 {
        return Err(TonemapErrors::UnsupportedChannels(channels));
    }
    let pixels = width
        .checked_mul(height)
        .ok_or(TonemapErrors::DimensionsOverflow(width, height))?;

    let expected_in = pixels
        .checked_mul(channels)
        .ok_or(TonemapErrors::DimensionsOverflow(width, height))?;

    if input.len() != expected_in {
        return Err(TonemapErrors::WrongInputSize(expected_in, input.len()));
    }
    let expected_out = pixels
        .checked_mul(4)
        .ok_or(TonemapErrors::DimensionsOverflow(width, height))?;

    if output.len() < expected_out {
        return Err(TonemapErrors::TooSmallOutput(expected_out, output.len()));
    }
    let has_alpha = channels == 4;

    let alpha = |pixel: &[f32]| {
        if has_alpha {
            quantize_alpha(pixel[3])
        } else {
            255
        }
    };
    let pixels_in = input.chunks_exact(channels);
    let pixels_out = output[..expected_out].chunks_exact_mut(4);

    // pass 1
    let Some(l_avg) = log_average_luminance(input, channels) else {
        trace!("No valid pixels, emitting black");

        for (pixel, out) in pixels_in.zip(pixels_out) {
            out.copy_from_slice(&[0, 0, 0, alpha(pixel)]);
        }
        return Ok(());
    };
    let scale = KEY / l_avg.max(DELTA);

    trace!("Log average luminance: {}, scale: {}", l_avg, scale);

    // pass 2
    for (pixel, out) in pixels_in.zip(pixels_out) {
        let (r, g, b) = (pixel[0].max(0.0), pixel[1].max(0.0), pixel[2].max(0.0));
        let l = luminance(r, g, b);

        if !is_valid(l) {
            out.copy_from_slice(&[0, 0, 0, alpha(pixel)]);
            continue;
        }
        let l_scaled = scale * l;
        let l_mapped = l_scaled / (1.0 + l_scaled);
        let ratio = l_mapped / l;

        out[0] = quantize(linear_to_srgb(r * ratio));
        out[1] = quantize(linear_to_srgb(g * ratio));
        out[2] = quantize(linear_to_srgb(b * ratio));
        out[3] = alpha(pixel);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::reinhard::{log_average_luminance, luminance};

    #[test]
    fn luminance_clamps_negative_and_nan() {
        assert_eq!(luminance(-1.0, -1.0, -1.0), 0.0);
        assert_eq!(luminance(f32::NAN, f32::NAN, f32::NAN), 0.0);
        assert!(luminance(f32::INFINITY, 0.0, 0.0).is_infinite());
        assert_eq!(luminance(0.0, 1.0, 0.0), 0.7152);
    }

    #[test]
    fn log_average_skips_invalid() {
        let input = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, f32::INFINITY, 0.0, 0.0];
        let l_avg = log_average_luminance(&input, 3).unwrap();
        assert!((l_avg - 1.0).abs() < 1e-5);

        assert_eq!(log_average_luminance(&[0.0; 6], 3), None);
        assert_eq!(log_average_luminance(&[f32::NAN; 8], 4), None);
    }
}
