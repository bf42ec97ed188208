/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A bounds checked Radiance RGBE decoder and encoder
//!
//! # Features
//! - Every read is checked against the input buffer, malformed or hostile files
//!   produce an error, never a panic or an out of bounds access.
//! - Dimensions are validated before anything image sized is allocated.
//! - No unsafe
//! - Fuzz tested decoder
//!
//! # Usage notes
//! The decoder returns data in `Vec<f32>` with the exponent already applied,
//! three interleaved channels per pixel, top row first regardless of the file's
//! `-Y`/`+Y` orientation.
//!
//! Only the `32-bit_rle_rgbe` pixel format is decoded, XYZE files are
//! reported as an unsupported variant.
//!
//! # Metadata
//! Radiance images store metadata in key value pairs. We collect them into a
//! map exposed via [`RadianceDecoder::metadata`]; the decoder does not
//! interpret it, so `EXPOSURE` or `GAMMA` never change decoded values.
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;
extern crate core;
pub extern crate hdrpix_core;

pub use decoder::RadianceDecoder;
pub use encoder::{encode_rgbe, float_to_rgbe, RadianceEncoder};
pub use errors::{RadianceDecodeErrors, RadianceEncodeErrors};
pub use header::{is_radiance, parse_header, RadianceHeader};
pub use scanline::{convert_scanline, decode_scanline, rgbe_to_float};

mod decoder;
mod encoder;
mod errors;
mod header;
mod scanline;
