//! The _registration_ descriptor (tag 5) names the private syntax a program or stream follows,
//! using a four character code from the SMPTE Registration Authority.

use super::{descriptor_len, DescriptorError};
use smptera_format_identifiers_rust::FormatIdentifier;
use std::fmt;

/// Identifies, by means of a code assigned by a _Registration Authority_, the private syntax
/// used by the program or stream this descriptor is attached to.
pub struct RegistrationDescriptor<'buf> {
    /// `format_identifier` followed by any additional identification bytes
    pub buf: &'buf [u8],
}
impl<'buf> RegistrationDescriptor<'buf> {
    pub const TAG: u8 = 5;

    /// Fails unless `buf` holds at least the 4 byte `format_identifier`.
    pub fn new(tag: u8, buf: &'buf [u8]) -> Result<RegistrationDescriptor<'buf>, DescriptorError> {
        descriptor_len(buf, tag, 4)?;
        Ok(RegistrationDescriptor { buf })
    }

    /// Format identifier value assigned by a _Registration Authority_, for example `CUEI` for
    /// SCTE-35 splice information.
    pub fn format_identifier(&self) -> FormatIdentifier {
        FormatIdentifier::from(&self.buf[0..4])
    }

    /// Shorthand for comparing `format_identifier()` against an expected value.
    pub fn is_format(&self, id: FormatIdentifier) -> bool {
        self.format_identifier() == id
    }

    /// Bytes following the format identifier, interpreted according to that identifier.
    pub fn additional_identification_info(&self) -> &'buf [u8] {
        &self.buf[4..]
    }
}
impl<'buf> fmt::Debug for RegistrationDescriptor<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("RegistrationDescriptor")
            .field("format_identifier", &self.format_identifier())
            .field("info", &format!("{:02x?}", self.additional_identification_info()))
            .finish()
    }
}
