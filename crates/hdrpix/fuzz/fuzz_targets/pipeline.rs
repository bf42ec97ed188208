#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(image) = hdrpix::decode(data) {
        let (width, height) = image.dimensions();
        assert_eq!(image.pixels().len(), width * height * 4);
    }
});
