#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = hdrpix_exr::ExrDecoder::new(data);
    let _ = decoder.decode();
});
