/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image formats and signature sniffing

/// Magic bytes each format starts with
const MAGIC_BYTES: [(&[u8], ImageFormat); 3] = [
    (b"#?RADIANCE", ImageFormat::Radiance),
    (b"#?RGBE", ImageFormat::Radiance),
    (&[0x76, 0x2f, 0x31, 0x01], ImageFormat::OpenExr)
];

/// Image formats the pipeline understands
///
/// Whether a format can actually be decoded depends on the crate features,
/// see [`has_decoder`](ImageFormat::has_decoder).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ImageFormat {
    /// Radiance RGBE, `.hdr` and `.pic` files
    Radiance,
    /// Single part OpenEXR
    OpenExr
}

impl ImageFormat {
    /// Short name of the format
    pub const fn name(self) -> &'static str {
        match self {
            ImageFormat::Radiance => "hdr",
            ImageFormat::OpenExr => "exr"
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ImageFormat::Radiance => "Radiance HDR image",
            ImageFormat::OpenExr => "OpenEXR image"
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Radiance => "image/vnd.radiance",
            ImageFormat::OpenExr => "image/x-exr"
        }
    }

    /// File extensions commonly used, without the leading dot
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Radiance => &["hdr", "pic"],
            ImageFormat::OpenExr => &["exr"]
        }
    }

    /// Map a file extension to a format, ignoring ASCII case
    pub fn from_extension<P: AsRef<str>>(extension: P) -> Option<ImageFormat> {
        let extension = extension.as_ref();

        [ImageFormat::Radiance, ImageFormat::OpenExr]
            .into_iter()
            .find(|format| {
                format
                    .extensions()
                    .iter()
                    .any(|x| x.eq_ignore_ascii_case(extension))
            })
    }

    /// Return true if this build carries a decoder for the format
    pub const fn has_decoder(self) -> bool {
        match self {
            ImageFormat::Radiance => cfg!(feature = "radiance"),
            ImageFormat::OpenExr => cfg!(feature = "exr")
        }
    }
}

/// Guess the format of `bytes` from its signature
///
/// Returns `None` when no known signature matches, including buffers
/// too short to hold one.
pub fn guess_format(bytes: &[u8]) -> Option<ImageFormat> {
    MAGIC_BYTES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, format)| *format)
}
