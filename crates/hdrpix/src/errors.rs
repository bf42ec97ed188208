/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The single error type returned by the pipeline
use std::fmt::{Debug, Display, Formatter};

pub use hdrpix_core::errors::ErrorKind as DecodeErrorKind;
use hdrpix_tonemap::{RasterErrors, TonemapErrors};

/// Why a decode failed
///
/// Every stage's error is folded into one of three kinds plus a readable
/// message, so callers only need to look at [`kind`](Self::kind) to decide
/// what to do.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind:    DecodeErrorKind,
    message: String
}

impl DecodeError {
    pub fn new<T: Into<String>>(kind: DecodeErrorKind, message: T) -> DecodeError {
        DecodeError {
            kind,
            message: message.into()
        }
    }

    pub fn corrupt<T: Into<String>>(message: T) -> DecodeError {
        DecodeError::new(DecodeErrorKind::CorruptImage, message)
    }

    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Debug for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DecodeError {}

#[cfg(feature = "radiance")]
impl From<hdrpix_radiance::RadianceDecodeErrors> for DecodeError {
    fn from(value: hdrpix_radiance::RadianceDecodeErrors) -> Self {
        DecodeError::new(value.kind(), format!("hdr: {value:?}"))
    }
}

#[cfg(feature = "exr")]
impl From<hdrpix_exr::ExrDecodeErrors> for DecodeError {
    fn from(value: hdrpix_exr::ExrDecodeErrors) -> Self {
        DecodeError::new(value.kind(), format!("exr: {value:?}"))
    }
}

impl From<TonemapErrors> for DecodeError {
    fn from(value: TonemapErrors) -> Self {
        DecodeError::new(value.kind(), format!("tonemap: {value:?}"))
    }
}

impl From<RasterErrors> for DecodeError {
    fn from(value: RasterErrors) -> Self {
        DecodeError::corrupt(format!("raster: {value:?}"))
    }
}
