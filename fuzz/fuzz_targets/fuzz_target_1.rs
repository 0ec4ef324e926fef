#![no_main]

use libfuzzer_sys::fuzz_target;
use mpeg2ts_psi::descriptor::encode_descriptors;
use mpeg2ts_psi::psi::TablePayload;

fuzz_target!(|data: &[u8]| {
    if let Ok(section) = mpeg2ts_psi::decode_section(data) {
        // anything that decoded must also be re-encodable
        if let TablePayload::ProgramMap(pmt) = section.payload {
            encode_descriptors(&pmt.descriptors).unwrap();
            for stream in &pmt.streams {
                encode_descriptors(&stream.descriptors).unwrap();
            }
        }
    }
});
