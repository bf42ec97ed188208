/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tightly packed RGBA rasters and strided copies
use alloc::vec::Vec;

use crate::errors::RasterErrors;

/// Copy a tightly packed `width*height*4` RGBA raster into `dst`,
/// placing row `y` at `y*stride`.
///
/// Bytes between the end of a row and the next stride are not written.
/// The last row needs no padding, so `dst` must hold at least
/// `stride*(height-1) + width*4` bytes.
pub fn copy_to_strided(
    src: &[u8], width: usize, height: usize, dst: &mut [u8], stride: usize
) -> Result<(), RasterErrors> {
    let row_bytes = width.checked_mul(4).ok_or(RasterErrors::Overflow)?;

    if stride < row_bytes {
        return Err(RasterErrors::StrideTooSmall(stride, row_bytes));
    }
    let expected = row_bytes
        .checked_mul(height)
        .ok_or(RasterErrors::Overflow)?;

    if src.len() != expected {
        return Err(RasterErrors::WrongSourceSize(expected, src.len()));
    }
    if height == 0 || row_bytes == 0 {
        return Ok(());
    }
    let needed = stride
        .checked_mul(height - 1)
        .and_then(|x| x.checked_add(row_bytes))
        .ok_or(RasterErrors::Overflow)?;

    if dst.len() < needed {
        return Err(RasterErrors::TooSmallDestination(needed, dst.len()));
    }
    for (src_row, dst_row) in src.chunks_exact(row_bytes).zip(dst.chunks_mut(stride)) {
        dst_row[..row_bytes].copy_from_slice(src_row);
    }
    Ok(())
}

/// An 8-bit sRGB RGBA image, rows tightly packed, top row first
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl RgbaImage {
    /// Wrap an existing raster, `pixels` must be exactly `width*height*4` bytes
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<RgbaImage, RasterErrors> {
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(4))
            .ok_or(RasterErrors::Overflow)?;

        if pixels.len() != expected {
            return Err(RasterErrors::WrongSourceSize(expected, pixels.len()));
        }
        Ok(RgbaImage {
            width,
            height,
            pixels
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Width and height as a tuple
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Bytes per row of the tightly packed raster
    pub const fn stride(&self) -> usize {
        self.width * 4
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA value at `(x, y)` or `None` when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * 4;
        let px = self.pixels.get(start..start + 4)?;

        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy into a destination with `stride` bytes per row,
    /// see [`copy_to_strided`]
    pub fn copy_to_strided(&self, dst: &mut [u8], stride: usize) -> Result<(), RasterErrors> {
        copy_to_strided(&self.pixels, self.width, self.height, dst, stride)
    }

    /// Consume the image, returning the packed RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}
