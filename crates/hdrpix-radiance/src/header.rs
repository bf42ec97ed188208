/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Radiance text header parsing
//!
//! A Radiance file starts with a magic line, then `KEY=VALUE` lines up to a
//! blank line, then a resolution line such as `-Y 512 +X 768`.
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use hdrpix_core::bytestream::ByteCursor;
use hdrpix_core::dimensions::ImageDimensions;
use hdrpix_core::log::{debug, trace};
use hdrpix_core::options::DecoderOptions;

use crate::errors::RadianceDecodeErrors;

const MAGIC_RADIANCE: &[u8] = b"#?RADIANCE";
const MAGIC_RGBE: &[u8] = b"#?RGBE";
/// Smallest buffer that can hold a magic line
const MIN_HEADER_SIZE: usize = 11;
const XYZE_FORMAT: &[u8] = b"32-bit_rle_xyze";

/// Everything the header tells us before pixel decoding starts
#[derive(Debug, Clone, PartialEq)]
pub struct RadianceHeader {
    /// Offset of the first scanline byte from the start of the buffer
    pub pixel_offset:  usize,
    pub dimensions:    ImageDimensions,
    /// `+Y` files store the bottom row first
    pub flip_vertical: bool,
    /// Key value pairs found in the header
    pub metadata:      BTreeMap<String, String>
}

/// Return true if `data` starts with a Radiance magic string
pub fn is_radiance(data: &[u8]) -> bool {
    data.starts_with(MAGIC_RADIANCE) || data.starts_with(MAGIC_RGBE)
}

/// Parse the header of a Radiance file held in `data`.
///
/// The scan for the blank line ending the header is bounded by
/// `options.max_header_size()`; the declared dimensions are validated
/// against `options` before returning.
pub fn parse_header(
    data: &[u8], options: &DecoderOptions
) -> Result<RadianceHeader, RadianceDecodeErrors> {
    if data.len() < MIN_HEADER_SIZE || !is_radiance(data) {
        return Err(RadianceDecodeErrors::InvalidMagicBytes);
    }
    let max_header_size = options.max_header_size();

    let mut stream = ByteCursor::new(data);
    let mut metadata = BTreeMap::new();

    loop {
        let window = max_header_size.saturating_sub(stream.position());

        let line = match stream.read_line(window) {
            Some(line) => strip_cr(line),
            None if data.len() > max_header_size => {
                return Err(RadianceDecodeErrors::HeaderTooLarge(max_header_size));
            }
            None => return Err(RadianceDecodeErrors::UnterminatedHeader)
        };

        if line.is_empty() {
            break;
        }
        if let Some(format) = line.strip_prefix(b"FORMAT=") {
            if contains(format, XYZE_FORMAT) {
                return Err(RadianceDecodeErrors::UnsupportedFormat(
                    String::from_utf8_lossy(format).to_string()
                ));
            }
            // any other value is accepted, some writers emit slight variations
            // and the magic bytes already identified the file
        }
        // comment or the magic line
        if line.starts_with(b"#") {
            continue;
        }
        if let Some(split) = line.iter().position(|x| *x == b'=') {
            // lossy so invalid utf-8 keys end up as garbage in the map
            // instead of failing the decode
            let key = String::from_utf8_lossy(&line[..split]).trim().to_string();
            let value = String::from_utf8_lossy(&line[split + 1..])
                .trim()
                .to_string();
            metadata.insert(key, value);
        }
    }
    trace!("Metadata: {:?}", metadata);

    let resolution = loop {
        match stream.read_line(stream.remaining()) {
            Some(line) if strip_cr(line).is_empty() => continue,
            Some(line) => break strip_cr(line),
            None => return Err(RadianceDecodeErrors::MissingResolution)
        }
    };
    let (width, height, flip_vertical) = parse_resolution(resolution)?;

    let dimensions = ImageDimensions::new(width, height, options)?;

    debug!("Width: {}", dimensions.width());
    debug!("Height: {}", dimensions.height());
    debug!("Flip vertical: {}", flip_vertical);

    Ok(RadianceHeader {
        pixel_offset: stream.position(),
        dimensions,
        flip_vertical,
        metadata
    })
}

/// Parse `-Y <h> +X <w>` or `+Y <h> +X <w>` into `(width, height, flip)`
fn parse_resolution(line: &[u8]) -> Result<(i64, i64, bool), RadianceDecodeErrors> {
    let text = String::from_utf8_lossy(line);
    let unsupported = || RadianceDecodeErrors::UnsupportedOrientation(text.to_string());

    let mut tokens = text.split_ascii_whitespace();

    let (first_type, coords1, second_type, coords2) =
        match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => return Err(unsupported())
        };
    if tokens.next().is_some() || second_type != "+X" {
        return Err(unsupported());
    }
    let flip_vertical = match first_type {
        "-Y" => false,
        "+Y" => true,
        _ => return Err(unsupported())
    };
    let height = coords1.parse::<i64>().map_err(|_| unsupported())?;
    let width = coords2.parse::<i64>().map_err(|_| unsupported())?;

    Ok((width, height, flip_vertical))
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
