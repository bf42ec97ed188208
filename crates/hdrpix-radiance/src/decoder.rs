/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use hdrpix_core::bytestream::ByteCursor;
use hdrpix_core::channels::ChannelLayout;
use hdrpix_core::log::trace;
use hdrpix_core::options::DecoderOptions;
use hdrpix_core::utils::try_alloc;

use crate::errors::RadianceDecodeErrors;
use crate::header::{parse_header, RadianceHeader};
use crate::scanline::{convert_scanline, decode_scanline};

/// A bounds checked Radiance RGBE decoder
///
/// # Accessing metadata
///
/// Radiance files may contain metadata in their headers as key value pairs,
/// we save the metadata in a map and expose it via [`metadata`](Self::metadata).
/// The decoder does not interpret it, `EXPOSURE` and friends never change
/// the decoded values.
pub struct RadianceDecoder<'a> {
    data:    &'a [u8],
    options: DecoderOptions,
    header:  Option<RadianceHeader>
}

impl<'a> RadianceDecoder<'a> {
    /// Create a new decoder over an in memory Radiance file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hdrpix_radiance::RadianceDecoder;
    /// let file_data = std::fs::read("sample.hdr").unwrap();
    /// let mut decoder = RadianceDecoder::new(&file_data);
    /// let pixels = decoder.decode().unwrap();
    /// ```
    pub fn new(data: &'a [u8]) -> RadianceDecoder<'a> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder with the specified options
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hdrpix_radiance::hdrpix_core::options::DecoderOptions;
    /// use hdrpix_radiance::RadianceDecoder;
    /// let file_data = std::fs::read("sample.hdr").unwrap();
    /// // refuse anything wider than 50 pixels
    /// let options = DecoderOptions::default().set_max_width(50);
    /// let decoder = RadianceDecoder::new_with_options(&file_data, options);
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> RadianceDecoder<'a> {
        RadianceDecoder {
            data,
            options,
            header: None
        }
    }

    /// Decode the text header and validate the declared dimensions.
    ///
    /// Calling this more than once is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), RadianceDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        if self.data.len() > self.options.max_file_size() {
            return Err(RadianceDecodeErrors::TooLargeInput(
                self.options.max_file_size(),
                self.data.len()
            ));
        }
        let header = parse_header(self.data, &self.options)?;

        trace!("Pixel data starts at offset {}", header.pixel_offset);

        self.header = Some(header);
        Ok(())
    }

    /// Get key value metadata found in the header, or `None` if headers
    /// haven't been decoded
    ///
    /// In case the key or value contains non-valid UTF-8, the
    /// characters are replaced with [REPLACEMENT_CHARACTER](core::char::REPLACEMENT_CHARACTER)
    pub fn metadata(&self) -> Option<&BTreeMap<String, String>> {
        self.header.as_ref().map(|x| &x.metadata)
    }

    /// Get image dimensions as a tuple of width and height
    /// or `None` if the headers haven't been decoded.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .as_ref()
            .map(|x| (x.dimensions.width(), x.dimensions.height()))
    }

    /// Whether rows are stored bottom to top (`+Y`), `None` before
    /// headers are decoded
    pub fn flip_vertical(&self) -> Option<bool> {
        self.header.as_ref().map(|x| x.flip_vertical)
    }

    /// Radiance is always three channel RGB
    pub const fn layout(&self) -> ChannelLayout {
        ChannelLayout::rgb()
    }

    /// Return the number of `f32` elements required to hold the decoded image
    ///
    /// # Returns
    ///  - `Some(usize)`: Minimum size for a buffer needed to decode the image
    ///  - `None`: Indicates the image headers were not decoded
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.header.as_ref()?.dimensions.sample_count(3)
    }

    /// Decode the image, returning interleaved linear RGB floats
    ///
    /// # Returns
    /// - `Ok(Vec<f32>)`: `width*height*3` samples, row major, top row first
    /// - `Err(RadianceDecodeErrors)`: Indicates an unrecoverable
    ///  error occurred during decoding.
    pub fn decode(&mut self) -> Result<Vec<f32>, RadianceDecodeErrors> {
        self.decode_headers()?;

        if let Some(header) = self.header.as_ref() {
            // every scanline takes at least four bytes, catch bodies that
            // cannot possibly fill the image before allocating for it
            let remaining = self.data.len().saturating_sub(header.pixel_offset);

            if remaining / 4 < header.dimensions.height() {
                return Err(RadianceDecodeErrors::Truncated("pixel data"));
            }
        }
        let size = self
            .output_buffer_size()
            .ok_or(RadianceDecodeErrors::AllocationFailed(usize::MAX))?;

        let mut buffer =
            try_alloc(size, 0.0_f32).map_err(|_| RadianceDecodeErrors::AllocationFailed(size))?;

        self.decode_into(&mut buffer)?;

        Ok(buffer)
    }

    /// Decode into a pre-allocated buffer
    ///
    /// It is an error if the buffer size is smaller than
    /// [`output_buffer_size()`](Self::output_buffer_size)
    ///
    /// If the buffer is bigger than expected, we ignore the end padding.
    /// On error the contents of `buffer` are unspecified.
    pub fn decode_into(&mut self, buffer: &mut [f32]) -> Result<(), RadianceDecodeErrors> {
        self.decode_headers()?;

        let Some(header) = self.header.as_ref() else {
            return Err(RadianceDecodeErrors::MissingResolution);
        };
        let width = header.dimensions.width();
        let height = header.dimensions.height();
        let output_size = width * height * 3;

        if buffer.len() < output_size {
            return Err(RadianceDecodeErrors::TooSmallOutputArray(
                output_size,
                buffer.len()
            ));
        }
        let mut stream = ByteCursor::new(self.data);
        stream
            .set_position(header.pixel_offset)
            .map_err(|_| RadianceDecodeErrors::Truncated("pixel data"))?;

        // single width scanline, R,G,B,E
        let mut scanline = try_alloc(width * 4, 0_u8)
            .map_err(|_| RadianceDecodeErrors::AllocationFailed(width * 4))?;

        let output_stride = width * 3;

        for y in 0..height {
            decode_scanline(&mut stream, &mut scanline)?;

            let row = if header.flip_vertical {
                height - 1 - y
            } else {
                y
            };
            let start = row * output_stride;

            convert_scanline(&scanline, &mut buffer[start..start + output_stride]);
        }
        trace!("Decoded {} scanlines", height);

        Ok(())
    }
}
