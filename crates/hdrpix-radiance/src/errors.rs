/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use hdrpix_core::dimensions::DimensionError;
use hdrpix_core::errors::ErrorKind;

/// Radiance decoding errors
pub enum RadianceDecodeErrors {
    /// Magic bytes do not start with `#?RADIANCE` or `#?RGBE`
    InvalidMagicBytes,
    /// No blank line was found within the header size limit
    HeaderTooLarge(usize),
    /// The buffer ended before the blank line closing the header
    UnterminatedHeader,
    /// The header declares a pixel format we do not decode, e.g. XYZE
    UnsupportedFormat(String),
    /// No resolution line follows the header
    MissingResolution,
    /// The resolution line is not `-Y h +X w` or `+Y h +X w`
    UnsupportedOrientation(String),
    /// Declared dimensions are out of range
    Dimensions(DimensionError),
    /// The input buffer is larger than allowed
    TooLargeInput(usize, usize),
    /// expected, found
    RleWidthMismatch(usize, usize),
    /// RLE literal with a count of zero
    ZeroLengthLiteral,
    /// RLE run writes past the end of the scanline
    RunOverflow,
    /// RLE literal writes past the end of the scanline
    LiteralOverflow,
    /// Ran out of input while decoding the given part
    Truncated(&'static str),
    /// The output array is too small to contain the whole
    /// image
    TooSmallOutputArray(usize, usize),
    /// An image sized buffer could not be allocated
    AllocationFailed(usize)
}

impl RadianceDecodeErrors {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            RadianceDecodeErrors::UnsupportedFormat(_) => ErrorKind::UnsupportedVariant,
            RadianceDecodeErrors::AllocationFailed(_) => ErrorKind::ResourceExhaustion,
            _ => ErrorKind::CorruptImage
        }
    }
}

impl Debug for RadianceDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            RadianceDecodeErrors::InvalidMagicBytes => {
                write!(f, "Not a valid Radiance HDR file")
            }
            RadianceDecodeErrors::HeaderTooLarge(limit) => {
                write!(f, "HDR header exceeds maximum size of {limit} bytes")
            }
            RadianceDecodeErrors::UnterminatedHeader => {
                write!(f, "Unterminated HDR header")
            }
            RadianceDecodeErrors::UnsupportedFormat(format) => {
                write!(f, "Unsupported Radiance format {format}, only RGBE is supported")
            }
            RadianceDecodeErrors::MissingResolution => {
                write!(f, "HDR file missing resolution string")
            }
            RadianceDecodeErrors::UnsupportedOrientation(line) => {
                write!(f, "Unsupported HDR orientation: {line}")
            }
            RadianceDecodeErrors::Dimensions(err) => {
                write!(f, "{err:?}")
            }
            RadianceDecodeErrors::TooLargeInput(limit, found) => {
                write!(f, "HDR file too large ({found} bytes, limit {limit})")
            }
            RadianceDecodeErrors::RleWidthMismatch(expected, found) => {
                write!(f, "HDR RLE width mismatch: expected {expected}, got {found}")
            }
            RadianceDecodeErrors::ZeroLengthLiteral => {
                write!(f, "HDR RLE zero-length literal")
            }
            RadianceDecodeErrors::RunOverflow => {
                write!(f, "HDR RLE run exceeds scanline width")
            }
            RadianceDecodeErrors::LiteralOverflow => {
                write!(f, "HDR RLE literal exceeds scanline width")
            }
            RadianceDecodeErrors::Truncated(part) => {
                write!(f, "HDR {part} truncated")
            }
            RadianceDecodeErrors::TooSmallOutputArray(expected, found) => {
                write!(f, "Too small of an output array, expected array of at least length {expected} but found {found}")
            }
            RadianceDecodeErrors::AllocationFailed(size) => {
                write!(f, "Out of memory allocating {size} element buffer")
            }
        }
    }
}

impl Display for RadianceDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for RadianceDecodeErrors {}

impl From<DimensionError> for RadianceDecodeErrors {
    fn from(value: DimensionError) -> Self {
        RadianceDecodeErrors::Dimensions(value)
    }
}

/// Radiance encoding errors
pub enum RadianceEncodeErrors {
    /// The input size was expected to be of a certain size but isn't
    WrongInputSize(usize, usize),
    /// width, height, one of them is zero
    ZeroDimensions(usize, usize),
    /// Generic message
    Static(&'static str)
}

impl Debug for RadianceEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            RadianceEncodeErrors::WrongInputSize(expected, found) => {
                write!(f, "Input array length {found} doesn't match {expected}")
            }
            RadianceEncodeErrors::ZeroDimensions(width, height) => {
                write!(f, "Cannot encode an image of {width} x {height}")
            }
            RadianceEncodeErrors::Static(err) => write!(f, "{}", err)
        }
    }
}

impl Display for RadianceEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for RadianceEncodeErrors {}

impl From<&'static str> for RadianceEncodeErrors {
    fn from(value: &'static str) -> Self {
        RadianceEncodeErrors::Static(value)
    }
}
