#![no_main]

use libfuzzer_sys::fuzz_target;

// Any RGBE payload must decode back to exactly the quads that were encoded
fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    let width = usize::from(data[0] % 64) + 1;
    let pixels = &data[1..];
    let height = (pixels.len() / (width * 4)).min(1024);

    if height == 0 {
        return;
    }
    let mut rgbe = pixels[..width * height * 4].to_vec();

    if width < 8 {
        // flat scanlines starting with 2,2 would be read as RLE
        for quad in rgbe.chunks_exact_mut(4) {
            if quad[0] == 2 && quad[1] == 2 {
                quad[1] = 3;
            }
        }
    }
    let file = hdrpix_radiance::encode_rgbe(&rgbe, width, height).unwrap();
    let decoded = hdrpix_radiance::RadianceDecoder::new(&file).decode().unwrap();

    for (quad, pixel) in rgbe.chunks_exact(4).zip(decoded.chunks_exact(3)) {
        let expected = hdrpix_radiance::rgbe_to_float([quad[0], quad[1], quad[2], quad[3]]);
        assert_eq!(pixel, &expected[..]);
    }
});
