/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An OpenEXR front end
//!
//! Parsing and decompression are done by the [`exr`] crate, this crate
//! validates what it reports before any pixel data is requested and turns the
//! planar channels into one interleaved `f32` buffer.
//!
//! # Scope
//! - Single part files only, multi-part and deep data files are reported
//!   as unsupported.
//! - Only the `R`, `G`, `B` and optional `A` channels are used, looked up by
//!   exact name. Other channels are skipped and never stored.
//! - Every channel is converted to `f32` whatever its storage type.
//!
//! # Output
//! `width*height*3` samples when there is no alpha channel,
//! `width*height*4` otherwise, row major, top row first.
#![forbid(unsafe_code)]
extern crate alloc;
pub extern crate hdrpix_core;

pub use decoder::{is_exr, ExrDecoder, EXR_MAGIC};
pub use errors::ExrDecodeErrors;
pub use interleave::{interleave_planes, interleave_planes_into};

mod decoder;
mod errors;
mod interleave;
