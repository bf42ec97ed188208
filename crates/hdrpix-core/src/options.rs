/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! One [`DecoderOptions`] is shared by every decoder in the workspace, so the
//! same configuration can be handed to the Radiance and EXR front ends.
//!
//! The defaults are the hard limits in [`dimensions`](crate::dimensions).
//! Options can only make decoding stricter, setters clamp any value above the
//! hard limit back down to it.

use crate::dimensions::{MAX_DIMENSION, MAX_FILE_SIZE, MAX_HEADER_SIZE, MAX_PIXELS};

/// Decoder options
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 8192
    max_width:       usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 8192
    max_height:      usize,
    /// Maximum value of `width*height`
    ///
    /// - Default value: 64 Mi
    max_pixels:      usize,
    /// Largest input buffer a decoder accepts
    ///
    /// - Default value: 256 MiB
    max_file_size:   usize,
    /// Largest Radiance text header before the blank line
    ///
    /// - Default value: 64 KiB
    /// - Respected by: `radiance`
    max_header_size: usize
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:       MAX_DIMENSION,
            max_height:      MAX_DIMENSION,
            max_pixels:      MAX_PIXELS,
            max_file_size:   MAX_FILE_SIZE,
            max_header_size: MAX_HEADER_SIZE
        }
    }
}

impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    pub const fn max_pixels(&self) -> usize {
        self.max_pixels
    }

    pub const fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub const fn max_header_size(&self) -> usize {
        self.max_header_size
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed, values above 8192 are clamped
    ///
    /// returns: DecoderOptions
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width.min(MAX_DIMENSION);
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    ///
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed, values above 8192 are clamped
    ///
    /// returns: DecoderOptions
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height.min(MAX_DIMENSION);
        self
    }

    #[must_use]
    pub fn set_max_pixels(mut self, pixels: usize) -> Self {
        self.max_pixels = pixels.min(MAX_PIXELS);
        self
    }

    #[must_use]
    pub fn set_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size.min(MAX_FILE_SIZE);
        self
    }

    #[must_use]
    pub fn set_max_header_size(mut self, size: usize) -> Self {
        self.max_header_size = size.min(MAX_HEADER_SIZE);
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::dimensions::{MAX_DIMENSION, MAX_PIXELS};
    use crate::options::DecoderOptions;

    #[test]
    fn options_cannot_loosen_limits() {
        let options = DecoderOptions::default()
            .set_max_width(100_000)
            .set_max_pixels(usize::MAX)
            .set_max_height(16);

        assert_eq!(options.max_width(), MAX_DIMENSION);
        assert_eq!(options.max_pixels(), MAX_PIXELS);
        assert_eq!(options.max_height(), 16);
    }
}
