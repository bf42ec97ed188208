/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hdrpix_benches::radiance_file;
use image::ImageFormat;

fn hdrpix_decode_hdr(buf: &[u8]) -> Vec<f32> {
    hdrpix_radiance::RadianceDecoder::new(buf).decode().unwrap()
}

fn hdrpix_decode_pipeline(buf: &[u8]) -> hdrpix::RgbaImage {
    hdrpix::decode(buf).unwrap()
}

fn image_decode_hdr(buf: &[u8]) -> image::DynamicImage {
    image::load_from_memory_with_format(buf, ImageFormat::Hdr).unwrap()
}

fn bench_decode_rle(c: &mut Criterion) {
    let data = radiance_file(1024, 768);
    let mut group = c.benchmark_group("hdr: Simple decode(1024x768 rle)");

    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("image-rs/hdr", |b| {
        b.iter(|| black_box(image_decode_hdr(data.as_slice())))
    });

    group.bench_function("hdrpix/hdr", |b| {
        b.iter(|| black_box(hdrpix_decode_hdr(data.as_slice())))
    });

    group.bench_function("hdrpix/hdr+tonemap", |b| {
        b.iter(|| black_box(hdrpix_decode_pipeline(data.as_slice())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_decode_rle);

criterion_main!(benches);
