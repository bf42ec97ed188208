/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image dimensions and the hard decoding limits
//!
//! Dimensions read from a header must pass through [`ImageDimensions::new`]
//! before anything the size of the image is allocated.
use core::fmt::{Debug, Display, Formatter};

use crate::options::DecoderOptions;

/// Largest width or height accepted by any decoder
pub const MAX_DIMENSION: usize = 8192;
/// Largest `width*height` accepted by any decoder
pub const MAX_PIXELS: usize = 64 * 1024 * 1024;
/// Largest input buffer accepted by any decoder
pub const MAX_FILE_SIZE: usize = 256 * 1024 * 1024;
/// Largest Radiance text header
pub const MAX_HEADER_SIZE: usize = 64 * 1024;

/// Reasons declared dimensions are rejected
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// width or height is zero or negative
    NotPositive(i64, i64),
    /// dimension name, limit, found
    TooLarge(&'static str, usize, i64),
    /// limit, found
    TooManyPixels(usize, u64)
}

impl Debug for DimensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DimensionError::NotPositive(w, h) => {
                write!(f, "Image dimensions out of range: {w} x {h}")
            }
            DimensionError::TooLarge(dimension, expected, found) => {
                write!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            DimensionError::TooManyPixels(expected, found) => {
                write!(f, "Image has {found} pixels, limit is {expected}")
            }
        }
    }
}

impl Display for DimensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for DimensionError {}

/// Validated image width and height
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    width:  usize,
    height: usize
}

impl ImageDimensions {
    /// Validate declared dimensions against `options`.
    ///
    /// Inputs are `i64` so that negative values coming out of
    /// a header can be reported rather than wrapped.
    pub fn new(
        width: i64, height: i64, options: &DecoderOptions
    ) -> Result<ImageDimensions, DimensionError> {
        if width <= 0 || height <= 0 {
            return Err(DimensionError::NotPositive(width, height));
        }
        if width as u64 > options.max_width() as u64 {
            return Err(DimensionError::TooLarge("width", options.max_width(), width));
        }
        if height as u64 > options.max_height() as u64 {
            return Err(DimensionError::TooLarge(
                "height",
                options.max_height(),
                height
            ));
        }
        // both are at most 8192 here so this cannot overflow
        let pixels = (width as u64) * (height as u64);

        if pixels > options.max_pixels() as u64 {
            return Err(DimensionError::TooManyPixels(options.max_pixels(), pixels));
        }

        Ok(ImageDimensions {
            width:  width as usize,
            height: height as usize
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// `width*height`, cannot overflow after validation
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of samples of a buffer with `channels` interleaved channels
    pub fn sample_count(&self, channels: usize) -> Option<usize> {
        self.pixel_count().checked_mul(channels)
    }
}

#[cfg(test)]
mod tests {
    use crate::dimensions::{DimensionError, ImageDimensions};
    use crate::options::DecoderOptions;

    #[test]
    fn accepts_limits() {
        let options = DecoderOptions::default();
        let dims = ImageDimensions::new(8192, 8192, &options).unwrap();

        assert_eq!(dims.pixel_count(), 64 * 1024 * 1024);
        assert_eq!(dims.sample_count(4), Some(256 * 1024 * 1024));
    }

    #[test]
    fn rejects_out_of_range() {
        let options = DecoderOptions::default();

        assert!(matches!(
            ImageDimensions::new(0, 10, &options),
            Err(DimensionError::NotPositive(0, 10))
        ));
        assert!(matches!(
            ImageDimensions::new(10, -3, &options),
            Err(DimensionError::NotPositive(..))
        ));
        assert!(matches!(
            ImageDimensions::new(8193, 1, &options),
            Err(DimensionError::TooLarge("width", 8192, 8193))
        ));
        assert!(matches!(
            ImageDimensions::new(1, i64::MAX, &options),
            Err(DimensionError::TooLarge("height", ..))
        ));
    }

    #[test]
    fn pixel_budget_is_separate_from_sides() {
        let options = DecoderOptions::default().set_max_pixels(100);

        assert!(ImageDimensions::new(10, 10, &options).is_ok());
        assert!(matches!(
            ImageDimensions::new(10, 11, &options),
            Err(DimensionError::TooManyPixels(100, 110))
        ));
    }
}
