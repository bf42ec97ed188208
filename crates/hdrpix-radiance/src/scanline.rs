/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline decoding and RGBE to float conversion
use hdrpix_core::bytestream::ByteCursor;

use crate::errors::RadianceDecodeErrors;

/// Decode one scanline of RGBE quads into `scanline`.
///
/// `scanline.len()` must be `width*4`. New style run length encoded
/// scanlines start with `0x02 0x02` followed by the big endian width,
/// anything else is read as `width*4` flat bytes.
///
/// On success the cursor points past the consumed bytes.
pub fn decode_scanline(
    stream: &mut ByteCursor, scanline: &mut [u8]
) -> Result<(), RadianceDecodeErrors> {
    let width = scanline.len() / 4;

    let start = stream
        .peek_fixed::<4>()
        .map_err(|_| RadianceDecodeErrors::Truncated("pixel data"))?;

    if start[0] == 2 && start[1] == 2 {
        let rle_width = usize::from(u16::from_be_bytes([start[2], start[3]]));

        if rle_width != width {
            return Err(RadianceDecodeErrors::RleWidthMismatch(width, rle_width));
        }
        stream
            .skip(4)
            .map_err(|_| RadianceDecodeErrors::Truncated("pixel data"))?;

        decode_rle(stream, scanline, width)
    } else {
        let flat = stream
            .read_slice(scanline.len())
            .map_err(|_| RadianceDecodeErrors::Truncated("pixel data"))?;
        scanline.copy_from_slice(flat);
        Ok(())
    }
}

/// Each of the R, G, B and E planes is encoded separately, one after the other.
fn decode_rle(
    stream: &mut ByteCursor, scanline: &mut [u8], width: usize
) -> Result<(), RadianceDecodeErrors> {
    const TRUNCATED: RadianceDecodeErrors = RadianceDecodeErrors::Truncated("RLE data");

    for channel in 0..4 {
        let mut x = 0;

        while x < width {
            let control = stream.read_u8().map_err(|_| TRUNCATED)?;

            if control > 128 {
                // run, repeat the next byte
                let count = usize::from(control - 128);

                if x + count > width {
                    return Err(RadianceDecodeErrors::RunOverflow);
                }
                let value = stream.read_u8().map_err(|_| TRUNCATED)?;

                for pixel in scanline[x * 4..(x + count) * 4].chunks_exact_mut(4) {
                    pixel[channel] = value;
                }
                x += count;
            } else {
                // literal, copy the next `control` bytes
                let count = usize::from(control);

                if count == 0 {
                    return Err(RadianceDecodeErrors::ZeroLengthLiteral);
                }
                if x + count > width {
                    return Err(RadianceDecodeErrors::LiteralOverflow);
                }
                let values = stream.read_slice(count).map_err(|_| TRUNCATED)?;

                for (pixel, value) in scanline[x * 4..(x + count) * 4]
                    .chunks_exact_mut(4)
                    .zip(values)
                {
                    pixel[channel] = *value;
                }
                x += count;
            }
        }
    }
    Ok(())
}

/// Convert a scanline of RGBE quads to RGB floats
pub fn convert_scanline(in_scanline: &[u8], out_scanline: &mut [f32]) {
    for (rgbe, out) in in_scanline
        .chunks_exact(4)
        .zip(out_scanline.chunks_exact_mut(3))
    {
        let [r, g, b] = rgbe_to_float([rgbe[0], rgbe[1], rgbe[2], rgbe[3]]);
        out[0] = r;
        out[1] = g;
        out[2] = b;
    }
}

/// Decode a single RGBE quad.
///
/// An exponent of zero is black, otherwise each channel is
/// `mantissa * 2^(exponent - 128 - 8)`, computed exactly.
#[inline]
pub fn rgbe_to_float(rgbe: [u8; 4]) -> [f32; 3] {
    if rgbe[3] == 0 {
        return [0.0; 3];
    }
    let scale = ldexp(1.0, i32::from(rgbe[3]) - 128 - 8);

    [
        f32::from(rgbe[0]) * scale,
        f32::from(rgbe[1]) * scale,
        f32::from(rgbe[2]) * scale
    ]
}

/// `x * 2^exp` for the exponent range RGBE can produce.
///
/// The power of two is built from its bit pattern so it is exact,
/// including the subnormal range reached by small exponents.
#[inline]
pub(crate) fn ldexp(x: f32, exp: i32) -> f32 {
    let pow = if exp >= -126 {
        // normal, biased exponent in the exponent field
        f32::from_bits(((exp + 127) as u32) << 23)
    } else {
        // subnormal, a single mantissa bit
        f32::from_bits(1_u32 << (exp + 149).clamp(0, 22))
    };
    x * pow
}

#[cfg(test)]
mod tests {
    use hdrpix_core::bytestream::ByteCursor;

    use crate::scanline::{decode_scanline, ldexp, rgbe_to_float};
    use crate::RadianceDecodeErrors;

    #[test]
    fn ldexp_is_exact() {
        for exp in -135..=119 {
            assert_eq!(ldexp(1.0, exp), 2.0_f64.powi(exp) as f32, "exponent {exp}");
        }
    }

    #[test]
    fn rgbe_reference_values() {
        assert_eq!(rgbe_to_float([128, 128, 128, 129]), [1.0, 1.0, 1.0]);
        assert_eq!(rgbe_to_float([255, 0, 1, 0]), [0.0, 0.0, 0.0]);
        assert_eq!(rgbe_to_float([128, 64, 32, 128]), [0.5, 0.25, 0.125]);
        assert_eq!(rgbe_to_float([1, 0, 0, 1])[0], 2.0_f64.powi(-135) as f32);
    }

    #[test]
    fn rle_runs_and_literals() {
        // width 4: R run of 4, G literal of 4, B run 2 + literal 2, E run of 4
        let data = [
            2, 2, 0, 4, // header
            132, 10, // R
            4, 1, 2, 3, 4, // G
            130, 7, 2, 8, 9, // B
            132, 128 // E
        ];
        let mut stream = ByteCursor::new(&data);
        let mut scanline = [0_u8; 16];

        decode_scanline(&mut stream, &mut scanline).unwrap();

        assert_eq!(
            scanline,
            [10, 1, 7, 128, 10, 2, 7, 128, 10, 3, 8, 128, 10, 4, 9, 128]
        );
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn rle_errors() {
        let mut scanline = [0_u8; 16];

        let zero = [2, 2, 0, 4, 0];
        assert!(matches!(
            decode_scanline(&mut ByteCursor::new(&zero), &mut scanline),
            Err(RadianceDecodeErrors::ZeroLengthLiteral)
        ));

        let run = [2, 2, 0, 4, 133, 1];
        assert!(matches!(
            decode_scanline(&mut ByteCursor::new(&run), &mut scanline),
            Err(RadianceDecodeErrors::RunOverflow)
        ));

        let literal = [2, 2, 0, 4, 5, 1, 2, 3, 4, 5];
        assert!(matches!(
            decode_scanline(&mut ByteCursor::new(&literal), &mut scanline),
            Err(RadianceDecodeErrors::LiteralOverflow)
        ));

        let width = [2, 2, 0, 5, 132, 1];
        assert!(matches!(
            decode_scanline(&mut ByteCursor::new(&width), &mut scanline),
            Err(RadianceDecodeErrors::RleWidthMismatch(4, 5))
        ));

        let short = [2, 2, 0, 4, 3, 1, 2];
        assert!(matches!(
            decode_scanline(&mut ByteCursor::new(&short), &mut scanline),
            Err(RadianceDecodeErrors::Truncated(_))
        ));
    }

    #[test]
    fn flat_scanline() {
        let data: Vec<u8> = (0..16).collect();
        let mut scanline = [0_u8; 16];

        decode_scanline(&mut ByteCursor::new(&data), &mut scanline).unwrap();
        assert_eq!(&scanline[..], &data[..]);

        assert!(matches!(
            decode_scanline(&mut ByteCursor::new(&data[..15]), &mut scanline),
            Err(RadianceDecodeErrors::Truncated(_))
        ));
    }
}
