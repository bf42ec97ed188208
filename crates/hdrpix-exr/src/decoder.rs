/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use std::io::Cursor;

use exr::math::Vec2;
use exr::meta::MetaData;
use hdrpix_core::channels::ChannelLayout;
use hdrpix_core::dimensions::ImageDimensions;
use hdrpix_core::log::{debug, trace};
use hdrpix_core::options::DecoderOptions;
use hdrpix_core::utils::try_alloc;

use crate::errors::ExrDecodeErrors;
use crate::interleave::interleave_planes_into;

/// Magic number every OpenEXR file starts with
pub const EXR_MAGIC: [u8; 4] = [0x76, 0x2f, 0x31, 0x01];

/// Return true if `data` starts with the EXR magic number
pub fn is_exr(data: &[u8]) -> bool {
    data.starts_with(&EXR_MAGIC)
}

/// A single part OpenEXR decoder
///
/// Decoding happens in two stages, [`decode_headers`](Self::decode_headers)
/// reads the header alone and validates dimensions and channels, and only
/// after that does [`decode`](Self::decode) ask the `exr` crate for pixels.
pub struct ExrDecoder<'a> {
    data:       &'a [u8],
    options:    DecoderOptions,
    dimensions: Option<ImageDimensions>,
    layout:     Option<ChannelLayout>
}

impl<'a> ExrDecoder<'a> {
    /// Create a new decoder over an in memory EXR file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hdrpix_exr::ExrDecoder;
    /// let file_data = std::fs::read("sample.exr").unwrap();
    /// let mut decoder = ExrDecoder::new(&file_data);
    /// let pixels = decoder.decode().unwrap();
    /// ```
    pub fn new(data: &'a [u8]) -> ExrDecoder<'a> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> ExrDecoder<'a> {
        ExrDecoder {
            data,
            options,
            dimensions: None,
            layout: None
        }
    }

    /// Parse and validate the header.
    ///
    /// Rejects multi-part and deep files, out of range dimensions and
    /// channel lists without R, G and B. No pixel data is read.
    pub fn decode_headers(&mut self) -> Result<(), ExrDecodeErrors> {
        if self.dimensions.is_some() {
            return Ok(());
        }
        if self.data.len() > self.options.max_file_size() {
            return Err(ExrDecodeErrors::TooLargeInput(
                self.options.max_file_size(),
                self.data.len()
            ));
        }
        if !is_exr(self.data) {
            return Err(ExrDecodeErrors::InvalidMagicBytes);
        }
        let meta = MetaData::read_from_buffered(Cursor::new(self.data), false)?;

        if meta.requirements.has_multiple_layers || meta.headers.len() != 1 {
            return Err(ExrDecodeErrors::MultiPart(meta.headers.len()));
        }
        if meta.requirements.has_deep_data {
            return Err(ExrDecodeErrors::DeepData);
        }
        let header = &meta.headers[0];

        if header.deep {
            return Err(ExrDecodeErrors::DeepData);
        }
        let size = header.layer_size;
        let dimensions =
            ImageDimensions::new(size.width() as i64, size.height() as i64, &self.options)?;

        let names: Vec<String> = header
            .channels
            .list
            .iter()
            .map(|channel| channel.name.to_string())
            .collect();

        trace!("Channels: {:?}", names);

        let layout = resolve_layout(&names)?;

        debug!("Width: {}", dimensions.width());
        debug!("Height: {}", dimensions.height());
        debug!("Alpha: {}", layout.has_alpha());

        self.dimensions = Some(dimensions);
        self.layout = Some(layout);

        Ok(())
    }

    /// Get image dimensions as a tuple of width and height
    /// or `None` if the headers haven't been decoded.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions.map(|x| (x.width(), x.height()))
    }

    /// Where R, G, B and A live in the header's channel list,
    /// `None` before headers are decoded
    pub const fn layout(&self) -> Option<ChannelLayout> {
        self.layout
    }

    /// Number of interleaved channels [`decode`](Self::decode) produces, 3 or 4
    pub fn num_channels(&self) -> Option<usize> {
        self.layout.map(|x| x.num_channels())
    }

    /// Return the number of `f32` elements required to hold the decoded image
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.dimensions?.sample_count(self.layout?.num_channels())
    }

    /// Decode the image, returning interleaved linear floats
    ///
    /// The output has [`num_channels`](Self::num_channels) samples per pixel,
    /// in R, G, B, A order.
    pub fn decode(&mut self) -> Result<Vec<f32>, ExrDecodeErrors> {
        self.decode_headers()?;

        let (Some(dimensions), Some(layout)) = (self.dimensions, self.layout) else {
            return Err(ExrDecodeErrors::Inconsistent("headers not decoded"));
        };

        let (size, has_alpha, planes) = read_planes(self.data)?;

        if (size.width(), size.height()) != (dimensions.width(), dimensions.height()) {
            return Err(ExrDecodeErrors::Inconsistent(
                "layer size differs from header"
            ));
        }
        if has_alpha != layout.has_alpha() {
            return Err(ExrDecodeErrors::Inconsistent("channel list changed"));
        }
        let samples = planes.samples.map_err(ExrDecodeErrors::AllocationFailed)?;
        let planes: Vec<&[f32]> = samples.iter().map(|x| x.as_slice()).collect();

        let output_size = dimensions.pixel_count() * planes.len();
        let mut output = try_alloc(output_size, 0.0_f32)
            .map_err(|_| ExrDecodeErrors::AllocationFailed(output_size))?;

        interleave_planes_into(&planes, &mut output)?;

        trace!("Interleaved {} channels", planes.len());

        Ok(output)
    }
}

/// Find R, G, B and A by exact, case sensitive name
fn resolve_layout(names: &[String]) -> Result<ChannelLayout, ExrDecodeErrors> {
    let find = |wanted: &str| names.iter().position(|name| name == wanted);

    Ok(ChannelLayout {
        r: find("R").ok_or(ExrDecodeErrors::MissingChannel("R"))?,
        g: find("G").ok_or(ExrDecodeErrors::MissingChannel("G"))?,
        b: find("B").ok_or(ExrDecodeErrors::MissingChannel("B"))?,
        a: find("A")
    })
}

/// One `f32` plane per channel we keep, filled by the exr pixel reader
struct Planes {
    width:   usize,
    /// The planes, or the plane size that could not be allocated
    samples: Result<Vec<Vec<f32>>, usize>
}

impl Planes {
    fn new(size: Vec2<usize>, channels: usize) -> Planes {
        let pixel_count = size.area();
        let mut planes = Vec::with_capacity(channels);

        for _ in 0..channels {
            match try_alloc(pixel_count, 0.0_f32) {
                Ok(plane) => planes.push(plane),
                Err(_) => {
                    return Planes {
                        width:   size.width(),
                        samples: Err(pixel_count)
                    }
                }
            }
        }
        Planes {
            width:   size.width(),
            samples: Ok(planes)
        }
    }

    fn set(&mut self, position: Vec2<usize>, pixel: [f32; 4]) {
        let index = position.y() * self.width + position.x();

        if let Ok(planes) = self.samples.as_mut() {
            // three planes take R, G and B, a fourth takes A
            for (plane, value) in planes.iter_mut().zip(pixel) {
                if let Some(sample) = plane.get_mut(index) {
                    *sample = value;
                }
            }
        }
    }
}

/// Read R, G, B and A (if present) into planes, converting half and uint
/// samples to `f32`.
///
/// Every other channel is skipped block by block, so its samples are never
/// stored.
fn read_planes(data: &[u8]) -> Result<(Vec2<usize>, bool, Planes), ExrDecodeErrors> {
    use exr::prelude::*;

    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |size, channels: &RgbaChannels| {
                let count = if channels.3.is_some() { 4 } else { 3 };
                Planes::new(size, count)
            },
            |planes: &mut Planes, position, (r, g, b, a): (f32, f32, f32, f32)| {
                planes.set(position, [r, g, b, a]);
            }
        )
        .first_valid_layer()
        .all_attributes()
        .from_buffered(Cursor::new(data))?;

    let layer = image.layer_data;
    let has_alpha = layer.channel_data.channels.3.is_some();

    Ok((layer.size, has_alpha, layer.channel_data.pixels))
}
