//! The CRC-32 variant used by sections with section syntax (polynomial `0x04c11db7`, initial
//! value `0xffffffff`, no reflection, no final XOR).

use ::crc::{Crc, CRC_32_MPEG_2};

const MPEG_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_MPEG_2);

/// Computes the CRC over `data`.
///
/// To build a section with a valid trailer, compute this over everything up to (but excluding)
/// the final 4 bytes and write the result there big-endian.
pub fn crc32(data: &[u8]) -> u32 {
    MPEG_CRC.checksum(data)
}
