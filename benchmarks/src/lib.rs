/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Cursor;

use exr::prelude::{AnyChannel, AnyChannels, FlatSamples, Image, WritableImage};
use hdrpix_radiance::RadianceEncoder;
use nanorand::{Rng, WyRand};

/// Linear RGB floats spanning a few stops, seeded so every run sees the
/// same image
pub fn linear_rgb(width: usize, height: usize, channels: usize) -> Vec<f32> {
    let mut rng = WyRand::new_seed(width as u64 ^ height as u64);
    let mut raw = vec![0_u16; width * height * channels];
    rng.fill(&mut raw);

    raw.iter().map(|x| f32::from(*x) / 2048.0).collect()
}

/// An RLE compressed Radiance file
pub fn radiance_file(width: usize, height: usize) -> Vec<u8> {
    let pixels = linear_rgb(width, height, 3);

    RadianceEncoder::new(&pixels, width, height)
        .encode()
        .unwrap()
}

/// A single part, RGBA, `f32` OpenEXR file
pub fn exr_file(width: usize, height: usize) -> Vec<u8> {
    let pixels = linear_rgb(width, height, 4);

    let channels = ["R", "G", "B", "A"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let plane = pixels.iter().skip(i).step_by(4).copied().collect();
            AnyChannel::new(*name, FlatSamples::F32(plane))
        })
        .collect::<Vec<_>>();

    let image = Image::from_channels((width, height), AnyChannels::sort(channels.into()));

    let mut bytes = Vec::new();
    image
        .write()
        .to_buffered(Cursor::new(&mut bytes))
        .unwrap();
    bytes
}
