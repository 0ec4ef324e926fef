//! Types related to the _Conditional Access Table_

use crate::descriptor::ca::CaDescriptor;
use crate::descriptor::{self, Descriptor, DescriptorError};
use crate::pid::Pid;
use crate::psi::SizeError;

/// The identifier of TS Packets containing Conditional Access Table sections, with value `0x0001`.
pub const CAT_PID: Pid = Pid::new(0x0001);

/// Sections of the _Conditional Access Table_ carry descriptors associating CA systems with the
/// PIDs of their EMM streams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionalAccessTable<'buf> {
    pub descriptors: Vec<Descriptor<'buf>>,
}

impl<'buf> ConditionalAccessTable<'buf> {
    pub(crate) fn parse(body: &'buf [u8]) -> Result<ConditionalAccessTable<'buf>, SizeError> {
        Ok(ConditionalAccessTable {
            descriptors: descriptor::parse_descriptors(body)?,
        })
    }

    /// The CA descriptors within this table, skipping descriptors with other tags.
    pub fn ca_descriptors(
        &self,
    ) -> impl Iterator<Item = Result<CaDescriptor<'buf>, DescriptorError>> + '_ {
        self.descriptors
            .iter()
            .filter(|d| d.tag == CaDescriptor::TAG)
            .map(|d| CaDescriptor::new(d.tag, d.data))
    }
}
