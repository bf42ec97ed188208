/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the hdrpix crates
//!
//! It currently contains
//!
//! - A bounds checked byte cursor for parsing untrusted buffers
//! - Image dimension validation and the hard decoding limits
//! - Decoder options
//! - Channel layout information shared by the front ends
//! - A fallible allocation helper
//! - The error classification shared by all decoders
//!
//! # Features
//!  - `log`: Route the crate's logging macros to the [`log`](https://docs.rs/log) crate,
//!     without it the macros expand to nothing.
//!  - `serde`: Implement `serde::Serialize` for [`ErrorKind`](errors::ErrorKind)
//!     and [`DecoderOptions`](options::DecoderOptions).
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod channels;
pub mod dimensions;
pub mod errors;
pub mod log;
pub mod options;
mod serde;
pub mod utils;
