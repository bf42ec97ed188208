/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]

use alloc::format;

use serde::ser::*;

use crate::errors::ErrorKind;
use crate::options::DecoderOptions;

impl Serialize for ErrorKind {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // error kind serialization is simply it's debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for DecoderOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("DecoderOptions", 5)?;

        state.serialize_field("max_width", &self.max_width())?;
        state.serialize_field("max_height", &self.max_height())?;
        state.serialize_field("max_pixels", &self.max_pixels())?;
        state.serialize_field("max_file_size", &self.max_file_size())?;
        state.serialize_field("max_header_size", &self.max_header_size())?;

        state.end()
    }
}
