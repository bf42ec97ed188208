/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde-support")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::decode::ImageInfo;
use crate::errors::DecodeError;
use crate::format::ImageFormat;

impl Serialize for ImageFormat {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for ImageInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 5;
        let mut state = serializer.serialize_struct("ImageInfo", STRUCT_FIELDS)?;

        state.serialize_field("format", &self.format)?;
        state.serialize_field("mime_type", self.format.mime_type())?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("has_alpha", &self.has_alpha)?;

        state.end()
    }
}

impl Serialize for DecodeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("DecodeError", 2)?;

        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", self.message())?;

        state.end()
    }
}
