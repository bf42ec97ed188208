/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#[inline]
/// Gamma transfer function for sRGB
///
/// Uses the IEC 61966-2-1 constants, no clamping is done here.
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Clamp a colour value to `[0, 1]` and quantize to 8 bits, rounding half up.
///
/// NaN clamps to `0.0`, so an overflowed colour comes out black.
#[inline]
pub fn quantize(value: f32) -> u8 {
    // max then min, NaN takes the lower bound
    let clamped = value.max(0.0).min(1.0);

    (clamped * 255.0 + 0.5) as u8
}

/// Clamp an alpha value to `[0, 1]` and quantize to 8 bits, rounding half up.
///
/// NaN clamps to `1.0`, so an undefined alpha stays opaque.
#[inline]
pub fn quantize_alpha(value: f32) -> u8 {
    let clamped = value.min(1.0).max(0.0);

    (clamped * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use crate::transfer::{linear_to_srgb, quantize, quantize_alpha};

    #[test]
    fn srgb_segments() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert_eq!(linear_to_srgb(0.001), 0.001 * 12.92);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        assert!((linear_to_srgb(0.18) - 0.461_356).abs() < 1e-4);
    }

    #[test]
    fn quantize_rounds_half_up() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(2.0), 255);
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(0.5), 128);
    }

    #[test]
    fn nan_clamps_per_channel_kind() {
        assert_eq!(quantize(f32::NAN), 0);
        assert_eq!(quantize_alpha(f32::NAN), 255);

        for value in [-1.0, 0.0, 0.25, 0.5, 1.0, 2.0] {
            assert_eq!(quantize(value), quantize_alpha(value));
        }
    }
}
