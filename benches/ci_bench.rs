use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use mpeg2ts_psi::psi::TablePayload;
use std::hint::black_box;

const PMT: &[u8] = &[
    0x02, 0xb0, 0x3d, 0x00, 0x02, 0xc1, 0x00, 0x00, 0xe0, 0x21, 0xf0, 0x06, 0x05, 0x04, 0x43, 0x55,
    0x45, 0x49, 0x02, 0xe0, 0x21, 0xf0, 0x00, 0x81, 0xe0, 0x24, 0xf0, 0x00, 0x86, 0xe0, 0x2d, 0xf0,
    0x00, 0xc0, 0xe6, 0xe8, 0xf0, 0x09, 0x05, 0x04, 0x45, 0x54, 0x56, 0x31, 0xa2, 0x01, 0x00, 0xc0,
    0xe6, 0xea, 0xf0, 0x08, 0x05, 0x04, 0x45, 0x54, 0x56, 0x31, 0xa1, 0x00, 0x70, 0xfc, 0xbf, 0x1f,
];

#[library_benchmark]
fn pmt() -> usize {
    let mut streams = 0;
    for _ in 0..1000 {
        if let Ok(section) = mpeg2ts_psi::decode_section(black_box(PMT)) {
            if let TablePayload::ProgramMap(pmt) = section.payload {
                streams += pmt.streams.len();
            }
        }
    }
    streams
}

library_benchmark_group!(
    name = ci;
    benchmarks = pmt
);

main!(library_benchmark_groups = ci);
