/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use hdrpix_core::errors::ErrorKind;

/// Errors from the tonemapper
///
/// Apart from allocation failure these mean the caller passed
/// arguments that don't describe the buffer.
pub enum TonemapErrors {
    /// Only 3 (RGB) and 4 (RGBA) channels are accepted
    UnsupportedChannels(usize),
    /// `width*height*channels` overflows
    DimensionsOverflow(usize, usize),
    /// expected, found
    WrongInputSize(usize, usize),
    /// expected, found
    TooSmallOutput(usize, usize),
    /// The output raster could not be allocated
    AllocationFailed(usize)
}

impl TonemapErrors {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            TonemapErrors::AllocationFailed(_) => ErrorKind::ResourceExhaustion,
            _ => ErrorKind::CorruptImage
        }
    }
}

impl Debug for TonemapErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TonemapErrors::UnsupportedChannels(channels) => {
                write!(f, "Cannot tonemap {channels} channels, expected 3 or 4")
            }
            TonemapErrors::DimensionsOverflow(width, height) => {
                write!(f, "Dimensions {width} x {height} overflow")
            }
            TonemapErrors::WrongInputSize(expected, found) => {
                write!(f, "Input array length {found} doesn't match {expected}")
            }
            TonemapErrors::TooSmallOutput(expected, found) => {
                write!(f, "Too small of an output array, expected {expected} but found {found}")
            }
            TonemapErrors::AllocationFailed(size) => {
                write!(f, "Out of memory allocating {size} byte sRGB buffer")
            }
        }
    }
}

impl Display for TonemapErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for TonemapErrors {}

/// Errors from copying a raster into a strided buffer
pub enum RasterErrors {
    /// stride, bytes in one row
    StrideTooSmall(usize, usize),
    /// expected, found
    WrongSourceSize(usize, usize),
    /// expected, found
    TooSmallDestination(usize, usize),
    /// `width*height*4` or `stride*height` overflows
    Overflow
}

impl Debug for RasterErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            RasterErrors::StrideTooSmall(stride, row) => {
                write!(f, "Stride {stride} is smaller than a {row} byte row")
            }
            RasterErrors::WrongSourceSize(expected, found) => {
                write!(f, "Source raster length {found} doesn't match {expected}")
            }
            RasterErrors::TooSmallDestination(expected, found) => {
                write!(f, "Destination needs at least {expected} bytes but has {found}")
            }
            RasterErrors::Overflow => write!(f, "Raster size overflows")
        }
    }
}

impl Display for RasterErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for RasterErrors {}
