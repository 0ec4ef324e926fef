//! The _maximum bitrate_ descriptor (tag 14) gives an upper bound on the rate of a program or one
//! of its elementary streams, transport overhead included.  It is only found in the PMT.

use super::{descriptor_len, DescriptorError};
use crate::bits;
use std::fmt;

/// Upper bound on the bitrate of whatever the descriptor is attached to.
pub struct MaximumBitrateDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> MaximumBitrateDescriptor<'buf> {
    pub const TAG: u8 = 14;
    const MIN_LEN: usize = 3;

    pub fn new(
        tag: u8,
        buf: &'buf [u8],
    ) -> Result<MaximumBitrateDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, Self::MIN_LEN)?;
        Ok(MaximumBitrateDescriptor { buf })
    }

    /// The raw 22-bit `maximum_bitrate` field, in units of 50 bytes per second.
    pub fn maximum_bitrate(&self) -> u32 {
        bits::read_bits(self.buf, 2, 22)
    }

    /// `maximum_bitrate()` scaled to bits per second.
    pub fn maximum_bits_per_second(&self) -> u32 {
        self.maximum_bitrate() * 400
    }
}

impl fmt::Debug for MaximumBitrateDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaximumBitrateDescriptor")
            .field("bits_per_second", &self.maximum_bits_per_second())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoreDescriptors, Descriptor};
    use super::*;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    #[test]
    fn reserved_bits_ignored() {
        let data = hex!("c00184");
        let desc = Descriptor::new(MaximumBitrateDescriptor::TAG, &data);
        assert_matches!(desc.core(), Ok(CoreDescriptors::MaximumBitrate(rate)) => {
            assert_eq!(rate.maximum_bitrate(), 388);
            assert_eq!(rate.maximum_bits_per_second(), 155_200);
            assert!(format!("{:?}", rate).contains("155200"));
        });
    }

    #[test]
    fn largest_value() {
        let desc = MaximumBitrateDescriptor::new(14, &[0x3f, 0xff, 0xff]).unwrap();
        assert_eq!(desc.maximum_bitrate(), 0x3f_ffff);
    }

    #[test]
    fn truncated() {
        assert_matches!(
            Descriptor::new(MaximumBitrateDescriptor::TAG, &[0xc0, 0x01]).core(),
            Err(DescriptorError::NotEnoughData {
                tag: 14,
                actual: 2,
                expected: 3
            })
        );
    }
}
