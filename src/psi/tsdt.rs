//! Types related to the _Transport Stream Description Table_

use crate::descriptor::{self, Descriptor};
use crate::pid::Pid;
use crate::psi::SizeError;

/// The identifier of TS Packets containing Transport Stream Description Table sections, with
/// value `0x0002`.
pub const TSDT_PID: Pid = Pid::new(0x0002);

/// Sections of the _Transport Stream Description Table_ carry descriptors applying to the entire
/// transport stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportStreamDescription<'buf> {
    pub descriptors: Vec<Descriptor<'buf>>,
}

impl<'buf> TransportStreamDescription<'buf> {
    pub(crate) fn parse(body: &'buf [u8]) -> Result<TransportStreamDescription<'buf>, SizeError> {
        Ok(TransportStreamDescription {
            descriptors: descriptor::parse_descriptors(body)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::descriptor::CoreDescriptors;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    #[test]
    fn debug_does_not_panic() {
        // A section with a single unknown descriptor (tag=0x80, length=2, payload=0x0102)
        let data = hex!("800201 02");
        let tsdt = TransportStreamDescription::parse(&data).unwrap();
        assert!(!format!("{:?}", tsdt).is_empty());
    }

    #[test]
    fn descriptor_iteration() {
        // Two descriptors: tag=0x80 len=1 payload=0xAA, tag=0x05 len=4 payload="CUEI"
        let data = hex!("8001AA 050443554549");
        let tsdt = TransportStreamDescription::parse(&data).unwrap();
        assert_eq!(tsdt.descriptors.len(), 2);
        assert_matches!(tsdt.descriptors[0].core(), Ok(CoreDescriptors::UserPrivate(_)));
        assert_matches!(tsdt.descriptors[1].core(), Ok(CoreDescriptors::Registration(_)));
    }

    #[test]
    fn empty_section() {
        let tsdt = TransportStreamDescription::parse(&[]).unwrap();
        assert_eq!(tsdt.descriptors.len(), 0);
    }
}
