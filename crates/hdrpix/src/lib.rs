/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decode HDR images from memory into 8-bit sRGB
//!
//! This crate ties the Radiance and OpenEXR front ends to the Reinhard
//! tonemapper. A decode runs entirely on the calling thread, reads only
//! from the buffer it is given and either returns a complete
//! [`RgbaImage`] or a [`DecodeError`], never a partial image.
//!
//! ```no_run
//! let data = std::fs::read("memorial.hdr").unwrap();
//! let image = hdrpix::decode(&data).unwrap();
//! let (width, height) = image.dimensions();
//! ```
//!
//! Errors carry one of three [`DecodeErrorKind`]s, corrupt input,
//! an unsupported variant (multi-part EXR, XYZE Radiance) or
//! failure to allocate.
//!
//! # Features
//! - `radiance`: Radiance RGBE decoding, on by default
//! - `exr`: OpenEXR decoding, on by default
//! - `serde-support`: `serde::Serialize` for [`ImageFormat`], [`ImageInfo`]
//!   and [`DecodeError`]
//! - `log`: Trace decoding through the `log` crate
#![forbid(unsafe_code)]

pub use hdrpix_core;
pub use hdrpix_core::options::DecoderOptions;
pub use hdrpix_tonemap::{copy_to_strided, RgbaImage};

pub use crate::decode::{
    decode, decode_exr, decode_exr_with_options, decode_linear, decode_linear_with_options,
    decode_radiance, decode_radiance_with_options, decode_with_options, probe, probe_with_options,
    ImageInfo, LinearImage
};
pub use crate::errors::{DecodeError, DecodeErrorKind};
pub use crate::format::{guess_format, ImageFormat};
pub use crate::incremental::IncrementalDecoder;

mod decode;
mod errors;
mod format;
mod incremental;
mod serde;
