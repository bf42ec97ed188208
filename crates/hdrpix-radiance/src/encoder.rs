/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Radiance RGBE encoder

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::errors::RadianceEncodeErrors;
use crate::scanline::ldexp;

/// A simple Radiance encoder
///
/// Data is expected to be in `f32` and its size should be
/// `width*height*3`
pub struct RadianceEncoder<'a> {
    data:    &'a [f32],
    width:   usize,
    height:  usize,
    headers: Option<&'a BTreeMap<String, String>>
}

impl<'a> RadianceEncoder<'a> {
    /// Create a new encoder for `width*height` RGB pixels
    pub fn new(data: &'a [f32], width: usize, height: usize) -> RadianceEncoder<'a> {
        Self {
            data,
            width,
            height,
            headers: None
        }
    }

    /// Add extra headers to be encoded with the image
    ///
    /// # Arguments:
    /// - headers: A map containing keys and values, the values will be encoded as key=value
    /// in the header
    pub fn add_headers(&mut self, headers: &'a BTreeMap<String, String>) {
        self.headers = Some(headers)
    }

    /// Upper bound of the encoded size.
    ///
    /// RLE never expands a scanline past its flat size plus the
    /// four byte marker and one control byte per 128 bytes.
    pub fn expected_buffer_size(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(5)?
            .checked_add(1024)
    }

    /// Encode the image
    ///
    /// Negative and NaN samples are written as zero, values too large
    /// for RGBE saturate.
    ///
    /// # Examples
    /// - Encode a black image of 10x10
    ///```
    /// use hdrpix_radiance::RadianceEncoder;
    /// let (w, h) = (10, 10);
    /// let data = vec![0.0_f32; w * h * 3];
    /// let encoder = RadianceEncoder::new(&data, w, h);
    /// let bytes = encoder.encode().unwrap();
    /// assert!(bytes.starts_with(b"#?RADIANCE\n"));
    ///```
    pub fn encode(&self) -> Result<Vec<u8>, RadianceEncodeErrors> {
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|x| x.checked_mul(3))
            .ok_or(RadianceEncodeErrors::Static("overflow detected"))?;

        if expected != self.data.len() {
            return Err(RadianceEncodeErrors::WrongInputSize(
                expected,
                self.data.len()
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(RadianceEncodeErrors::ZeroDimensions(self.width, self.height));
        }
        let size = self
            .expected_buffer_size()
            .ok_or(RadianceEncodeErrors::Static("overflow detected"))?;

        let mut writer = Vec::with_capacity(size);

        write_header(&mut writer, self.width, self.height, self.headers);

        let mut rgbe_scanline = vec![0_u8; self.width * 4];

        for scanline in self.data.chunks_exact(self.width * 3) {
            for (pixels, out) in scanline
                .chunks_exact(3)
                .zip(rgbe_scanline.chunks_exact_mut(4))
            {
                let rgbe = float_to_rgbe([pixels[0], pixels[1], pixels[2]]);
                out.copy_from_slice(&rgbe);
            }
            write_scanline(&mut writer, &rgbe_scanline, self.width);
        }
        Ok(writer)
    }
}

/// Encode already quantized RGBE quads.
///
/// `rgbe` must hold `width*height*4` bytes. Decoding the result
/// gives back exactly `rgbe_to_float` of every quad, which makes it useful
/// for lossless round trips.
pub fn encode_rgbe(
    rgbe: &[u8], width: usize, height: usize
) -> Result<Vec<u8>, RadianceEncodeErrors> {
    let expected = width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(4))
        .ok_or(RadianceEncodeErrors::Static("overflow detected"))?;

    if expected != rgbe.len() {
        return Err(RadianceEncodeErrors::WrongInputSize(expected, rgbe.len()));
    }
    if width == 0 || height == 0 {
        return Err(RadianceEncodeErrors::ZeroDimensions(width, height));
    }
    let mut writer = Vec::with_capacity(expected + expected / 4 + 1024);

    write_header(&mut writer, width, height, None);

    for scanline in rgbe.chunks_exact(width * 4) {
        write_scanline(&mut writer, scanline, width);
    }
    Ok(writer)
}

fn write_header(
    writer: &mut Vec<u8>, width: usize, height: usize,
    headers: Option<&BTreeMap<String, String>>
) {
    writer.extend_from_slice(b"#?RADIANCE\n");
    writer.extend_from_slice(b"SOFTWARE=hdrpix\n");

    if let Some(headers) = headers {
        for (k, v) in headers {
            writer.extend_from_slice(format!("{}={}\n", k, v).as_bytes());
        }
    }
    writer.extend_from_slice(b"FORMAT=32-bit_rle_rgbe\n\n");
    writer.extend_from_slice(format!("-Y {} +X {}\n", height, width).as_bytes());
}

/// Write one scanline of RGBE quads, run length encoded when the
/// width allows it and flat otherwise
fn write_scanline(writer: &mut Vec<u8>, rgbe_scanline: &[u8], width: usize) {
    if !(8..=0x7fff).contains(&width) {
        writer.extend_from_slice(rgbe_scanline);
        return;
    }
    writer.extend_from_slice(&[2, 2, (width >> 8) as u8, (width & 255) as u8]);

    for i in 0..4 {
        rle(&rgbe_scanline[i..], writer, width);
    }
}

fn rle(data: &[u8], writer: &mut Vec<u8>, width: usize) {
    const MIN_RLE: usize = 4;
    let mut cur = 0;

    while cur < width {
        let mut run_count = 0;
        let mut old_run_count = 0;
        let mut beg_run = cur;

        while run_count < MIN_RLE && beg_run < width {
            beg_run += run_count;
            old_run_count = run_count;
            run_count = 1;

            while (beg_run + run_count < width)
                && (run_count < 127)
                && (data[beg_run * 4] == data[(beg_run + run_count) * 4])
            {
                run_count += 1;
            }
        }
        // a short run right before the long one
        if (old_run_count > 1) && (old_run_count == beg_run - cur) {
            writer.extend_from_slice(&[(128 + old_run_count) as u8, data[cur * 4]]);
            cur = beg_run;
        }

        while cur < beg_run {
            let nonrun_count = 128.min(beg_run - cur);
            writer.push(nonrun_count as u8);

            for i in 0..nonrun_count {
                writer.push(data[(cur + i) * 4]);
            }
            cur += nonrun_count;
        }

        if run_count >= MIN_RLE {
            writer.extend_from_slice(&[(128 + run_count) as u8, data[beg_run * 4]]);
            cur += run_count;
        }
    }
}

/// Quantize one linear RGB pixel to an RGBE quad
pub fn float_to_rgbe(rgb: [f32; 3]) -> [u8; 4] {
    let v = rgb.iter().fold(f32::MIN, |x, y| x.max(*y));

    // also rejects NaN
    if !(v > 1e-32) {
        return [0; 4];
    }
    let (_, e) = frexp(v.min(f32::MAX));
    // exponent byte tops out at 255, larger values saturate
    let e = e.min(127);

    let scale = ldexp(256.0, -e);

    [
        (rgb[0] * scale).clamp(0.0, 255.0) as u8,
        (rgb[1] * scale).clamp(0.0, 255.0) as u8,
        (rgb[2] * scale).clamp(0.0, 255.0) as u8,
        (e + 128) as u8
    ]
}

/// Split a finite positive `x` into `m * 2^e` with `m` in `[0.5, 1)`
fn frexp(x: f32) -> (f32, i32) {
    let bits = x.to_bits();
    let exponent = ((bits >> 23) & 0xff) as i32;

    if exponent == 0 {
        // subnormal, normalize first
        let (m, e) = frexp(x * f32::from_bits((127 + 25) << 23));
        return (m, e - 25);
    }
    let mantissa = f32::from_bits((bits & 0x807f_ffff) | (126 << 23));

    (mantissa, exponent - 126)
}
