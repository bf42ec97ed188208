/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hdrpix_benches::exr_file;

fn hdrpix_decode_exr(buf: &[u8]) -> Vec<f32> {
    hdrpix_exr::ExrDecoder::new(buf).decode().unwrap()
}

fn bench_decode_exr(c: &mut Criterion) {
    let data = exr_file(1024, 768);
    let mut group = c.benchmark_group("exr: Simple decode(1024x768 rgba f32)");

    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("hdrpix/exr", |b| {
        b.iter(|| black_box(hdrpix_decode_exr(data.as_slice())))
    });

    group.bench_function("hdrpix/exr+tonemap", |b| {
        b.iter(|| black_box(hdrpix::decode(data.as_slice()).unwrap()))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=bench_decode_exr);

criterion_main!(benches);
