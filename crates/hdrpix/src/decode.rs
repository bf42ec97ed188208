/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The decode pipeline
//!
//! `bytes -> front end -> linear floats -> tonemapper -> RgbaImage`
//!
//! Each stage finishes before the next one starts and the first error ends
//! the pipeline, nothing partially decoded is handed back.
use hdrpix_core::log::trace;
use hdrpix_core::options::DecoderOptions;
use hdrpix_tonemap::{tonemap_reinhard, RgbaImage};

use crate::errors::{DecodeError, DecodeErrorKind};
use crate::format::{guess_format, ImageFormat};

/// Linear light pixels as produced by a front end, before tonemapping
///
/// Samples are interleaved R, G, B and optionally A, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearImage {
    pixels:   Vec<f32>,
    width:    usize,
    height:   usize,
    channels: usize
}

impl LinearImage {
    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// 3 for RGB, 4 for RGBA
    pub const fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<f32> {
        self.pixels
    }

    /// Run the Reinhard tonemapper, producing 8-bit sRGB RGBA
    pub fn tonemap(&self) -> Result<RgbaImage, DecodeError> {
        trace!(
            "Tonemapping {}x{} image, {} channels",
            self.width,
            self.height,
            self.channels
        );
        let raster = tonemap_reinhard(&self.pixels, self.width, self.height, self.channels)?;

        Ok(RgbaImage::new(self.width, self.height, raster)?)
    }
}

/// What a header says about an image, gathered without decoding pixels
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub format:    ImageFormat,
    pub width:     usize,
    pub height:    usize,
    /// Whether the source carries an alpha channel
    pub has_alpha: bool
}

/// Decode a Radiance or OpenEXR image held in `data` into 8-bit sRGB RGBA
///
/// The format is detected from the signature, anything unrecognised is
/// reported as a corrupt image.
///
/// # Example
/// ```
/// let err = hdrpix::decode(b"not an image").unwrap_err();
/// assert_eq!(err.kind(), hdrpix::DecodeErrorKind::CorruptImage);
/// ```
pub fn decode(data: &[u8]) -> Result<RgbaImage, DecodeError> {
    decode_with_options(data, DecoderOptions::default())
}

/// Decode with custom limits, see [`decode`]
pub fn decode_with_options(data: &[u8], options: DecoderOptions) -> Result<RgbaImage, DecodeError> {
    decode_linear_with_options(data, options)?.tonemap()
}

/// Decode to linear floats, skipping the tonemapper
pub fn decode_linear(data: &[u8]) -> Result<LinearImage, DecodeError> {
    decode_linear_with_options(data, DecoderOptions::default())
}

pub fn decode_linear_with_options(
    data: &[u8], options: DecoderOptions
) -> Result<LinearImage, DecodeError> {
    let format = sniff(data, &options)?;

    decode_format(format, data, options)
}

/// Decode `data` as a Radiance file without sniffing its format
pub fn decode_radiance(data: &[u8]) -> Result<RgbaImage, DecodeError> {
    decode_radiance_with_options(data, DecoderOptions::default())
}

pub fn decode_radiance_with_options(
    data: &[u8], options: DecoderOptions
) -> Result<RgbaImage, DecodeError> {
    check_size(data, &options)?;

    decode_format(ImageFormat::Radiance, data, options)?.tonemap()
}

/// Decode `data` as a single part OpenEXR file without sniffing its format
pub fn decode_exr(data: &[u8]) -> Result<RgbaImage, DecodeError> {
    decode_exr_with_options(data, DecoderOptions::default())
}

pub fn decode_exr_with_options(
    data: &[u8], options: DecoderOptions
) -> Result<RgbaImage, DecodeError> {
    check_size(data, &options)?;

    decode_format(ImageFormat::OpenExr, data, options)?.tonemap()
}

/// Read only the headers of `data`, validating dimensions and channels
///
/// Succeeding here does not mean the pixel data is intact.
pub fn probe(data: &[u8]) -> Result<ImageInfo, DecodeError> {
    probe_with_options(data, DecoderOptions::default())
}

pub fn probe_with_options(data: &[u8], options: DecoderOptions) -> Result<ImageInfo, DecodeError> {
    let format = sniff(data, &options)?;

    match format {
        ImageFormat::Radiance => probe_radiance(data, options),
        ImageFormat::OpenExr => probe_exr(data, options)
    }
}

fn check_size(data: &[u8], options: &DecoderOptions) -> Result<(), DecodeError> {
    if data.len() > options.max_file_size() {
        return Err(DecodeError::corrupt(format!(
            "data exceeds maximum file size ({} > {})",
            data.len(),
            options.max_file_size()
        )));
    }
    Ok(())
}

fn sniff(data: &[u8], options: &DecoderOptions) -> Result<ImageFormat, DecodeError> {
    check_size(data, options)?;

    let format =
        guess_format(data).ok_or_else(|| DecodeError::corrupt("Unrecognized image format"))?;

    trace!("Image format: {:?}", format);

    Ok(format)
}

fn decode_format(
    format: ImageFormat, data: &[u8], options: DecoderOptions
) -> Result<LinearImage, DecodeError> {
    match format {
        ImageFormat::Radiance => decode_radiance_linear(data, options),
        ImageFormat::OpenExr => decode_exr_linear(data, options)
    }
}

#[allow(dead_code)]
fn no_decoder(format: ImageFormat) -> DecodeError {
    let feature = match format {
        ImageFormat::Radiance => "radiance",
        ImageFormat::OpenExr => "exr"
    };
    DecodeError::new(
        DecodeErrorKind::UnsupportedVariant,
        format!(
            "No decoder for {}, hdrpix was built without the `{feature}` feature",
            format.description()
        )
    )
}

#[cfg(feature = "radiance")]
fn decode_radiance_linear(data: &[u8], options: DecoderOptions) -> Result<LinearImage, DecodeError> {
    use hdrpix_radiance::{RadianceDecodeErrors, RadianceDecoder};

    let mut decoder = RadianceDecoder::new_with_options(data, options);
    let pixels = decoder.decode()?;

    let (width, height) = decoder
        .dimensions()
        .ok_or(RadianceDecodeErrors::MissingResolution)?;

    Ok(LinearImage {
        pixels,
        width,
        height,
        channels: decoder.layout().num_channels()
    })
}

#[cfg(not(feature = "radiance"))]
fn decode_radiance_linear(_: &[u8], _: DecoderOptions) -> Result<LinearImage, DecodeError> {
    Err(no_decoder(ImageFormat::Radiance))
}

#[cfg(feature = "radiance")]
fn probe_radiance(data: &[u8], options: DecoderOptions) -> Result<ImageInfo, DecodeError> {
    use hdrpix_radiance::{RadianceDecodeErrors, RadianceDecoder};

    let mut decoder = RadianceDecoder::new_with_options(data, options);
    decoder.decode_headers()?;

    let (width, height) = decoder
        .dimensions()
        .ok_or(RadianceDecodeErrors::MissingResolution)?;

    Ok(ImageInfo {
        format: ImageFormat::Radiance,
        width,
        height,
        has_alpha: false
    })
}

#[cfg(not(feature = "radiance"))]
fn probe_radiance(_: &[u8], _: DecoderOptions) -> Result<ImageInfo, DecodeError> {
    Err(no_decoder(ImageFormat::Radiance))
}

#[cfg(feature = "exr")]
fn decode_exr_linear(data: &[u8], options: DecoderOptions) -> Result<LinearImage, DecodeError> {
    use hdrpix_exr::{ExrDecodeErrors, ExrDecoder};

    let mut decoder = ExrDecoder::new_with_options(data, options);
    let pixels = decoder.decode()?;

    let (Some((width, height)), Some(channels)) = (decoder.dimensions(), decoder.num_channels())
    else {
        return Err(ExrDecodeErrors::Inconsistent("headers not decoded").into());
    };

    Ok(LinearImage {
        pixels,
        width,
        height,
        channels
    })
}

#[cfg(not(feature = "exr"))]
fn decode_exr_linear(_: &[u8], _: DecoderOptions) -> Result<LinearImage, DecodeError> {
    Err(no_decoder(ImageFormat::OpenExr))
}

#[cfg(feature = "exr")]
fn probe_exr(data: &[u8], options: DecoderOptions) -> Result<ImageInfo, DecodeError> {
    use hdrpix_exr::{ExrDecodeErrors, ExrDecoder};

    let mut decoder = ExrDecoder::new_with_options(data, options);
    decoder.decode_headers()?;

    let (Some((width, height)), Some(layout)) = (decoder.dimensions(), decoder.layout()) else {
        return Err(ExrDecodeErrors::Inconsistent("headers not decoded").into());
    };

    Ok(ImageInfo {
        format: ImageFormat::OpenExr,
        width,
        height,
        has_alpha: layout.has_alpha()
    })
}

#[cfg(not(feature = "exr"))]
fn probe_exr(_: &[u8], _: DecoderOptions) -> Result<ImageInfo, DecodeError> {
    Err(no_decoder(ImageFormat::OpenExr))
}
