/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! HDR to SDR conversion
//!
//! This crate is the back end shared by the Radiance and EXR front ends. It
//! only ever sees an interleaved `f32` buffer plus its width, height and
//! channel count, and knows nothing about where the buffer came from.
//!
//! - [`tonemap_reinhard`]: two pass Reinhard global operator with automatic
//!   exposure, followed by sRGB encoding and 8-bit quantization.
//! - [`RgbaImage`] and [`copy_to_strided`]: the tightly packed result and a
//!   way to copy it into a buffer whose rows are padded.
#![forbid(unsafe_code)]
extern crate alloc;

pub use errors::{RasterErrors, TonemapErrors};
pub use raster::{copy_to_strided, RgbaImage};
pub use reinhard::{
    log_average_luminance, luminance, tonemap_reinhard, tonemap_reinhard_into, DELTA, KEY
};
pub use transfer::{linear_to_srgb, quantize, quantize_alpha};

mod errors;
mod raster;
mod reinhard;
mod transfer;
