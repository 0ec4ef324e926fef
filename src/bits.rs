//! Accessors for the fixed-position fields of PSI syntax.
//!
//! Bits are numbered MSB-first from the start of the given slice, which matches the way fields
//! are laid out in _ISO/IEC 13818-1_ syntax tables.  All accessors panic if the field extends
//! beyond the end of the slice, so callers check lengths before reading.

use crate::pid::Pid;

/// Reads the `width`-bit unsigned field which starts `bit_offset` bits into `buf`.
pub(crate) fn read_bits(buf: &[u8], bit_offset: usize, width: u32) -> u32 {
    assert!(width <= 32, "field width {} too large", width);
    let end = bit_offset + width as usize;
    let first = bit_offset / 8;
    let last = (end + 7) / 8;
    let mut value = 0u64;
    for &b in &buf[first..last] {
        value = value << 8 | u64::from(b);
    }
    let trailing = last * 8 - end;
    ((value >> trailing) & ((1u64 << width) - 1)) as u32
}

/// Single bit at `bit_offset`.
pub(crate) fn flag(buf: &[u8], bit_offset: usize) -> bool {
    read_bits(buf, bit_offset, 1) != 0
}

/// Big-endian 16-bit value starting at byte `offset`.
pub(crate) fn u16_at(buf: &[u8], offset: usize) -> u16 {
    read_bits(buf, offset * 8, 16) as u16
}

/// Big-endian 32-bit value starting at byte `offset`.
pub(crate) fn u32_at(buf: &[u8], offset: usize) -> u32 {
    read_bits(buf, offset * 8, 32)
}

/// A 13-bit PID in the low bits of the 16-bit word at byte `offset`, following 3 reserved bits.
pub(crate) fn pid_at(buf: &[u8], offset: usize) -> Pid {
    Pid::from_masked(read_bits(buf, offset * 8 + 3, 13) as u16)
}

/// A 12-bit length in the low bits of the 16-bit word at byte `offset`, following 4 bits of
/// other fields.
pub(crate) fn length_at(buf: &[u8], offset: usize) -> usize {
    read_bits(buf, offset * 8 + 4, 12) as usize
}
