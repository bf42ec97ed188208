/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Accumulate an image that arrives in pieces
use hdrpix_core::log::trace;
use hdrpix_core::options::DecoderOptions;
use hdrpix_tonemap::RgbaImage;

use crate::decode::decode_with_options;
use crate::errors::{DecodeError, DecodeErrorKind};
use crate::format::{guess_format, ImageFormat};

/// Collects chunks of a file until the whole of it is available,
/// then decodes it in one go
///
/// Nothing is decoded while pushing, the size limit is the only thing
/// checked so a stream can't grow the buffer without bound.
///
/// # Example
/// ```
/// use hdrpix::IncrementalDecoder;
///
/// let mut decoder = IncrementalDecoder::new();
/// decoder.push(b"#?RADIANCE\n").unwrap();
/// decoder.push(b"\n-Y 1 +X 1\n").unwrap();
/// decoder.push(&[128, 128, 128, 129]).unwrap();
///
/// let image = decoder.finish().unwrap();
/// assert_eq!(image.dimensions(), (1, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct IncrementalDecoder {
    data:    Vec<u8>,
    options: DecoderOptions
}

impl IncrementalDecoder {
    pub fn new() -> IncrementalDecoder {
        Self::new_with_options(DecoderOptions::default())
    }

    pub fn new_with_options(options: DecoderOptions) -> IncrementalDecoder {
        IncrementalDecoder {
            data: Vec::new(),
            options
        }
    }

    /// Append `chunk` to the buffered data
    ///
    /// Fails without buffering anything if the total would exceed the
    /// maximum file size, or if memory for the chunk can't be reserved.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), DecodeError> {
        let limit = self.options.max_file_size();

        if chunk.len() > limit.saturating_sub(self.data.len()) {
            return Err(DecodeError::corrupt(format!(
                "data exceeds maximum file size ({} > {limit})",
                self.data.len().saturating_add(chunk.len())
            )));
        }
        self.data.try_reserve(chunk.len()).map_err(|_| {
            DecodeError::new(
                DecodeErrorKind::ResourceExhaustion,
                format!("Out of memory buffering {} bytes", chunk.len())
            )
        })?;
        self.data.extend_from_slice(chunk);

        trace!("Buffered {} bytes, {} total", chunk.len(), self.data.len());

        Ok(())
    }

    /// Bytes buffered so far
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The format the buffered bytes look like, `None` until enough of
    /// the signature has arrived
    pub fn format(&self) -> Option<ImageFormat> {
        guess_format(&self.data)
    }

    /// Decode everything pushed so far as one complete file
    pub fn finish(self) -> Result<RgbaImage, DecodeError> {
        decode_with_options(&self.data, self.options)
    }
}
