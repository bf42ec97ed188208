/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Coarse classification shared by every decoder error

/// What kind of failure a decoder hit.
///
/// Each crate's error enum maps its variants onto one of these so callers
/// can react without matching on format specific errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed, truncated or inconsistent input
    CorruptImage,
    /// Well formed input using a feature outside what is decoded,
    /// e.g. XYZE Radiance files or multi-part EXR
    UnsupportedVariant,
    /// An allocation could not be satisfied
    ResourceExhaustion
}
