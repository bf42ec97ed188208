/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use hdrpix_radiance::hdrpix_core::errors::ErrorKind;
use hdrpix_radiance::hdrpix_core::options::DecoderOptions;
use hdrpix_radiance::{
    encode_rgbe, rgbe_to_float, RadianceDecodeErrors, RadianceDecoder, RadianceEncoder
};
use nanorand::{Rng, WyRand};

fn file_with_body(resolution: &str, body: &[u8]) -> Vec<u8> {
    let mut data = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n".to_vec();
    data.extend_from_slice(resolution.as_bytes());
    data.push(b'\n');
    data.extend_from_slice(body);
    data
}

/// 8x8 flat file, row `y` has mantissas `128 + y`
fn striped_flat_file(resolution: &str) -> Vec<u8> {
    let mut body = vec![];
    for y in 0..8 {
        for _ in 0..8 {
            body.extend_from_slice(&[128 + y, 128 + y, 128 + y, 129]);
        }
    }
    file_with_body(resolution, &body)
}

#[test]
fn short_inputs_are_corrupt() {
    for len in 0..11 {
        let data = &b"#?RADIANCE\n"[..len];
        let err = RadianceDecoder::new(data).decode().unwrap_err();

        assert!(matches!(err, RadianceDecodeErrors::InvalidMagicBytes));
        assert_eq!(err.kind(), ErrorKind::CorruptImage);
    }
}

#[test]
fn bad_magic() {
    let err = RadianceDecoder::new(b"#?RADIANCX\n\n-Y 1 +X 1\n\0\0\0\0")
        .decode()
        .unwrap_err();
    assert!(matches!(err, RadianceDecodeErrors::InvalidMagicBytes));
}

#[test]
fn flat_uniform_image() {
    let data = file_with_body("-Y 8 +X 8", &[128, 128, 128, 129].repeat(64));
    let mut decoder = RadianceDecoder::new(&data);

    let pixels = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((8, 8)));
    assert_eq!(pixels.len(), 8 * 8 * 3);
    assert!(pixels.iter().all(|x| *x == 1.0));
}

#[test]
fn positive_y_is_mirrored() {
    let top_down = RadianceDecoder::new(&striped_flat_file("-Y 8 +X 8"))
        .decode()
        .unwrap();
    let bottom_up = RadianceDecoder::new(&striped_flat_file("+Y 8 +X 8"))
        .decode()
        .unwrap();

    let stride = 8 * 3;
    for y in 0..8 {
        assert_eq!(
            top_down[y * stride..(y + 1) * stride],
            bottom_up[(7 - y) * stride..(8 - y) * stride]
        );
    }
    assert_eq!(top_down[0], 1.0);
    assert_eq!(bottom_up[0], f32::from(128_u8 + 7) / 128.0);
}

#[test]
fn rle_round_trip_is_exact() {
    let mut rng = WyRand::new_seed(0x5eed);

    for (width, height) in [(8, 3), (37, 5), (200, 2), (1, 4), (7, 7)] {
        let mut rgbe = vec![0_u8; width * height * 4];
        rng.fill(&mut rgbe);

        // long runs so the run path is taken as well
        for quad in rgbe.chunks_exact_mut(4).take(width / 2) {
            quad.copy_from_slice(&[9, 9, 9, 140]);
        }
        // flat scanlines must not look like an RLE marker
        for quad in rgbe.chunks_exact_mut(4) {
            if quad[0] == 2 && quad[1] == 2 {
                quad[1] = 3;
            }
        }
        let file = encode_rgbe(&rgbe, width, height).unwrap();
        let pixels = RadianceDecoder::new(&file).decode().unwrap();

        for (quad, pixel) in rgbe.chunks_exact(4).zip(pixels.chunks_exact(3)) {
            let expected = rgbe_to_float([quad[0], quad[1], quad[2], quad[3]]);
            assert_eq!(pixel, &expected[..], "{width}x{height}");
        }
    }
}

#[test]
fn float_round_trip() {
    let (width, height) = (64, 4);
    let mut rng = WyRand::new_seed(7);
    let mut raw = vec![0_u16; width * height * 3];
    rng.fill(&mut raw);

    let data: Vec<f32> = raw.iter().map(|x| f32::from(*x) / 600.0 + 0.01).collect();

    let file = RadianceEncoder::new(&data, width, height).encode().unwrap();
    let pixels = RadianceDecoder::new(&file).decode().unwrap();

    for (pixel, source) in pixels.chunks_exact(3).zip(data.chunks_exact(3)) {
        let max = source.iter().fold(0.0_f32, |x, y| x.max(*y));
        for (a, b) in pixel.iter().zip(source) {
            assert!((a - b).abs() <= max / 128.0, "{a} vs {b}");
        }
    }
}

#[test]
fn metadata_does_not_change_pixels() {
    let plain = file_with_body("-Y 1 +X 1", &[128, 128, 128, 129]);
    let mut exposed = b"#?RADIANCE\nEXPOSURE=4.0\n".to_vec();
    exposed.extend_from_slice(&plain[b"#?RADIANCE\n".len()..]);

    let mut decoder = RadianceDecoder::new(&exposed);
    let a = decoder.decode().unwrap();
    let b = RadianceDecoder::new(&plain).decode().unwrap();

    assert_eq!(a, b);
    assert_eq!(
        decoder.metadata().unwrap().get("EXPOSURE").map(|x| x.as_str()),
        Some("4.0")
    );
}

#[test]
fn xyze_is_unsupported() {
    let data = b"#?RADIANCE\nFORMAT=32-bit_rle_xyze\n\n-Y 1 +X 1\n\x80\x80\x80\x81";
    let err = RadianceDecoder::new(data).decode().unwrap_err();

    assert!(matches!(err, RadianceDecodeErrors::UnsupportedFormat(_)));
    assert_eq!(err.kind(), ErrorKind::UnsupportedVariant);
}

#[test]
fn oversized_dimensions() {
    let data = file_with_body("-Y 1 +X 8193", &[]);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();
    assert!(matches!(err, RadianceDecodeErrors::Dimensions(_)));
    assert_eq!(err.kind(), ErrorKind::CorruptImage);

    let data = file_with_body("-Y 0 +X 10", &[]);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();
    assert!(matches!(err, RadianceDecodeErrors::Dimensions(_)));
}

#[test]
fn huge_image_with_empty_body() {
    // within limits, but the body cannot hold it
    let data = file_with_body("-Y 8192 +X 8192", &[]);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();

    assert!(matches!(err, RadianceDecodeErrors::Truncated(_)));
}

#[test]
fn zero_length_literal_in_file() {
    let data = file_with_body("-Y 1 +X 8", &[2, 2, 0, 8, 0, 0, 0, 0]);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();

    assert!(matches!(err, RadianceDecodeErrors::ZeroLengthLiteral));
    assert_eq!(err.to_string(), "HDR RLE zero-length literal");
}

#[test]
fn run_past_width_in_file() {
    let data = file_with_body("-Y 1 +X 8", &[2, 2, 0, 8, 137, 1, 0, 0]);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();

    assert!(matches!(err, RadianceDecodeErrors::RunOverflow));
}

#[test]
fn rle_width_mismatch_in_file() {
    let data = file_with_body("-Y 1 +X 8", &[2, 2, 0, 9, 136, 1, 136, 1, 136, 1, 136, 1]);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();

    assert!(matches!(err, RadianceDecodeErrors::RleWidthMismatch(8, 9)));
}

#[test]
fn truncated_second_scanline() {
    let mut body = [128, 128, 128, 129].repeat(2);
    body.extend_from_slice(&[128, 128, 128, 129, 1]);

    let data = file_with_body("-Y 2 +X 2", &body);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();

    assert!(matches!(err, RadianceDecodeErrors::Truncated(_)));
}

#[test]
fn header_errors() {
    let err = RadianceDecoder::new(b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n")
        .decode()
        .unwrap_err();
    assert!(matches!(err, RadianceDecodeErrors::UnterminatedHeader));

    let err = RadianceDecoder::new(b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n")
        .decode()
        .unwrap_err();
    assert!(matches!(err, RadianceDecodeErrors::MissingResolution));

    let data = file_with_body("+X 8 -Y 8", &[0; 256]);
    let err = RadianceDecoder::new(&data).decode().unwrap_err();
    assert!(matches!(err, RadianceDecodeErrors::UnsupportedOrientation(_)));
}

#[test]
fn input_size_limit() {
    let data = file_with_body("-Y 1 +X 1", &[128, 128, 128, 129]);
    let options = DecoderOptions::default().set_max_file_size(data.len() - 1);

    let err = RadianceDecoder::new_with_options(&data, options)
        .decode()
        .unwrap_err();
    assert!(matches!(err, RadianceDecodeErrors::TooLargeInput(..)));
}

#[test]
fn decode_into_small_buffer() {
    let data = file_with_body("-Y 1 +X 2", &[128, 128, 128, 129].repeat(2));
    let mut decoder = RadianceDecoder::new(&data);
    decoder.decode_headers().unwrap();

    assert_eq!(decoder.output_buffer_size(), Some(6));

    let mut out = [0.0; 5];
    assert!(matches!(
        decoder.decode_into(&mut out),
        Err(RadianceDecodeErrors::TooSmallOutputArray(6, 5))
    ));
}
