//! The _Conditional Access_ descriptor names the packets carrying entitlement messages for a
//! particular CA system.
//!
//! It appears in the Conditional Access Table (pointing at EMM streams) and in the Program Map
//! Table (pointing at ECM streams for a program or one of its elementary streams).

use super::{descriptor_len, DescriptorError};
use crate::bits;
use crate::pid::Pid;
use std::fmt;

/// Identifies a CA system and the PID of the packets carrying its messages.
pub struct CaDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> CaDescriptor<'buf> {
    /// The descriptor tag value which identifies the descriptor as a `CaDescriptor`.
    pub const TAG: u8 = 9;
    /// Construct a `CaDescriptor` instance that will parse the data from the given slice.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<CaDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(CaDescriptor { buf })
    }

    /// The type of CA system, with values allocated by _ETSI TS 101 162_ among others.
    pub fn ca_system_id(&self) -> u16 {
        bits::u16_at(self.buf, 0)
    }

    /// PID of the packets carrying EMM or ECM sections for the `ca_system_id()`.
    pub fn ca_pid(&self) -> Pid {
        bits::pid_at(self.buf, 2)
    }

    /// Bytes following the fixed fields, defined by the CA system.
    pub fn private_data(&self) -> &'buf [u8] {
        &self.buf[4..]
    }
}
impl fmt::Debug for CaDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaDescriptor")
            .field("ca_system_id", &format!("{:#06x}", self.ca_system_id()))
            .field("ca_pid", &self.ca_pid())
            .field("private_data", &format!("{:x?}", self.private_data()))
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
    fn descriptor() {
        let data = hex!("0b00 e1f4 aabb");
        let desc = Descriptor::new(CaDescriptor::TAG, &data);
        assert_matches!(desc.core(), Ok(CoreDescriptors::CA(ca)) => {
            assert_eq!(ca.ca_system_id(), 0x0b00);
            assert_eq!(ca.ca_pid(), Pid::new(0x01f4));
            assert_eq!(ca.private_data(), &[0xaa, 0xbb]);
            assert!(!format!("{:?}", ca).is_empty());
        });
    }

    #[test]
    fn too_short() {
        let data = hex!("0b00e1");
        assert_matches!(
            Descriptor::new(CaDescriptor::TAG, &data).core(),
            Err(DescriptorError::NotEnoughData { tag: 9, .. })
        );
    }
}
