/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::{String, ToString};
use core::fmt::{Debug, Display, Formatter};

use hdrpix_core::dimensions::DimensionError;
use hdrpix_core::errors::ErrorKind;

/// EXR decoding errors
pub enum ExrDecodeErrors {
    /// The buffer does not start with the EXR magic number
    InvalidMagicBytes,
    /// The input buffer is larger than allowed
    TooLargeInput(usize, usize),
    /// The file contains more than one part, with the number of parts
    MultiPart(usize),
    /// The file stores deep data
    DeepData,
    /// The header or pixel data is malformed
    Malformed(String),
    /// Well formed, but uses something the exr reader does not support
    Unsupported(String),
    /// Declared dimensions are out of range
    Dimensions(DimensionError),
    /// One of R, G or B is not in the channel list
    MissingChannel(&'static str),
    /// The pixel reader returned something other than what the header declared
    Inconsistent(&'static str),
    /// A channel plane holds fewer samples than the pixel count,
    /// with the expected and found lengths
    ShortPlane(usize, usize),
    /// An image sized buffer could not be allocated
    AllocationFailed(usize)
}

impl ExrDecodeErrors {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ExrDecodeErrors::MultiPart(_)
            | ExrDecodeErrors::DeepData
            | ExrDecodeErrors::Unsupported(_) => ErrorKind::UnsupportedVariant,
            ExrDecodeErrors::AllocationFailed(_) => ErrorKind::ResourceExhaustion,
            _ => ErrorKind::CorruptImage
        }
    }
}

impl Debug for ExrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ExrDecodeErrors::InvalidMagicBytes => {
                write!(f, "Not a valid EXR file")
            }
            ExrDecodeErrors::TooLargeInput(limit, found) => {
                write!(f, "EXR file too large ({found} bytes, limit {limit})")
            }
            ExrDecodeErrors::MultiPart(parts) => {
                write!(f, "Multipart EXR not supported, file has {parts} parts")
            }
            ExrDecodeErrors::DeepData => {
                write!(f, "Deep data EXR not supported")
            }
            ExrDecodeErrors::Malformed(err) => {
                write!(f, "Failed to parse EXR file: {err}")
            }
            ExrDecodeErrors::Unsupported(err) => {
                write!(f, "Unsupported EXR feature: {err}")
            }
            ExrDecodeErrors::Dimensions(err) => {
                write!(f, "EXR {err:?}")
            }
            ExrDecodeErrors::MissingChannel(name) => {
                write!(f, "EXR file missing required R, G, or B channel ({name})")
            }
            ExrDecodeErrors::Inconsistent(reason) => {
                write!(f, "Failed to load EXR image: {reason}")
            }
            ExrDecodeErrors::ShortPlane(expected, found) => {
                write!(f, "Channel plane holds {found} samples, expected {expected}")
            }
            ExrDecodeErrors::AllocationFailed(size) => {
                write!(f, "Out of memory allocating {size} element float buffer")
            }
        }
    }
}

impl Display for ExrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ExrDecodeErrors {}

impl From<DimensionError> for ExrDecodeErrors {
    fn from(value: DimensionError) -> Self {
        ExrDecodeErrors::Dimensions(value)
    }
}

impl From<exr::error::Error> for ExrDecodeErrors {
    fn from(value: exr::error::Error) -> Self {
        match value {
            exr::error::Error::NotSupported(message) => {
                ExrDecodeErrors::Unsupported(message.to_string())
            }
            other => ExrDecodeErrors::Malformed(other.to_string())
        }
    }
}
