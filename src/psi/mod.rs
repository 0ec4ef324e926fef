//! Types for decoding sections of *Program Specific Information* tables.
//!
//! # Concepts
//!
//! * There are multiple standard types of Program Specific Information, like the *Program
//!   Association Table* and *Program Map Table*.  Standards derived from mpegts may define their
//!   own table types, which this crate hands back undecoded.
//! * A PSI *Table* can split into *Sections*, and each call to [`decode_section()`] handles
//!   exactly one section.
//! * A Section may use a syntax common across a number of the standard table types (the 5 byte
//!   [`SyntaxSection`] header and a trailing CRC), or may be an opaque bag of bytes following the
//!   3 byte [`SectionCommonHeader`].
//!
//! The table-specific payloads are defined in the submodules, with only the generic
//! functionality in this module.

pub mod cat;
pub mod pat;
pub mod pmt;
pub mod tsdt;

use crate::bits;
use crate::crc;
use log::trace;

/// Identifies the kind of table a section belongs to.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TableId {
    /// `0x00`
    ProgramAssociation,
    /// `0x01`
    ConditionalAccess,
    /// `0x02`
    ProgramMap,
    /// `0x03`
    TransportStreamDescription,
    /// `0x04`
    Iso14496SceneDescription,
    /// `0x05`
    Iso14496ObjectDescription,
    /// `0x06`
    Metadata,
    /// `0x07`, ISO/IEC 13818-11 IPMP control information
    Ipmp,
    /// `0x08` to `0x3f`
    Reserved(u8),
    /// `0x40` to `0xfe`, used by derived standards (DVB, ATSC, ARIB, SCTE...) and by vendors
    UserPrivate(u8),
    /// `0xff`
    Forbidden,
}
impl From<u8> for TableId {
    fn from(id: u8) -> Self {
        match id {
            0x00 => TableId::ProgramAssociation,
            0x01 => TableId::ConditionalAccess,
            0x02 => TableId::ProgramMap,
            0x03 => TableId::TransportStreamDescription,
            0x04 => TableId::Iso14496SceneDescription,
            0x05 => TableId::Iso14496ObjectDescription,
            0x06 => TableId::Metadata,
            0x07 => TableId::Ipmp,
            0x08..=0x3f => TableId::Reserved(id),
            0x40..=0xfe => TableId::UserPrivate(id),
            0xff => TableId::Forbidden,
        }
    }
}
impl From<TableId> for u8 {
    fn from(id: TableId) -> Self {
        match id {
            TableId::ProgramAssociation => 0x00,
            TableId::ConditionalAccess => 0x01,
            TableId::ProgramMap => 0x02,
            TableId::TransportStreamDescription => 0x03,
            TableId::Iso14496SceneDescription => 0x04,
            TableId::Iso14496ObjectDescription => 0x05,
            TableId::Metadata => 0x06,
            TableId::Ipmp => 0x07,
            TableId::Reserved(id) => id,
            TableId::UserPrivate(id) => id,
            TableId::Forbidden => 0xff,
        }
    }
}

/// The fields of the 3 byte header that starts every section.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SectionCommonHeader {
    pub table_id: u8,
    pub section_syntax_indicator: bool,
    pub private_indicator: bool,
    /// the number of bytes following the `section_length` field
    pub section_length: usize,
}

impl SectionCommonHeader {
    pub const SIZE: usize = 3;

    pub fn from_bytes(buf: &[u8]) -> Result<SectionCommonHeader, SizeError> {
        if buf.len() < Self::SIZE {
            return Err(SizeError::HeaderTooShort { actual: buf.len() });
        }
        Ok(SectionCommonHeader {
            table_id: buf[0],
            section_syntax_indicator: bits::flag(buf, 8),
            private_indicator: bits::flag(buf, 9),
            section_length: bits::length_at(buf, 1),
        })
    }
}

/// Represents the fields that appear within table sections that use the common 'section syntax'.
///
/// This will only be present for a section if the `section_syntax_indicator` field in the
/// `SectionCommonHeader` of the section is `true`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SyntaxSection {
    /// The initial 16-bit field within a 'section syntax' PSI table (which immediately follows the
    /// `section_length` field).
    /// _13818-1_ refers to this field as,
    ///  - `transport_stream_id` when it appears within a Program Association Section
    ///  - part of the `reserved` field when it appears within a Conditional Access Section
    ///  - `program_number` when it appears within a Program Map Section
    ///  - `table_id_extension` when it appears within a Private Section
    pub table_id_extension: u16,
    /// A 5-bit value that can be used to quickly check if this table has changed since the last
    /// time it was periodically inserted within the transport stream being read.
    pub version_number: u8,
    /// Is this table applicable now (`true`), or will it become applicable at some future time.
    pub current_next_indicator: bool,
    /// The number of this section, within a potentially multi-section table.
    pub section_number: u8,
    /// Indicates the value of `section_number` that will appear within the last section within
    /// a table.
    pub last_section_number: u8,
    /// The value of the CRC field at the end of the section.
    pub crc32: u32,
}

impl SyntaxSection {
    /// Size of the fields following the common header
    pub const SIZE: usize = 5;
    /// Size of the trailing CRC field
    pub const CRC_SIZE: usize = 4;
    /// Offset of the table body within a section that uses section syntax
    pub const BODY_OFFSET: usize = SectionCommonHeader::SIZE + Self::SIZE;

    /// Reads the header fields following the common header of `buf`, and the CRC from its last 4
    /// bytes.
    pub fn from_bytes(buf: &[u8]) -> Result<SyntaxSection, SizeError> {
        if buf.len() < Self::BODY_OFFSET {
            return Err(SizeError::SyntaxHeaderIncomplete {
                actual: buf.len(),
                expected: Self::BODY_OFFSET,
            });
        }
        Ok(SyntaxSection {
            table_id_extension: bits::u16_at(buf, 3),
            version_number: bits::read_bits(buf, 42, 5) as u8,
            current_next_indicator: bits::flag(buf, 47),
            section_number: buf[6],
            last_section_number: buf[7],
            crc32: bits::u32_at(buf, buf.len() - Self::CRC_SIZE),
        })
    }
}

/// One decoded PSI section.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Section<'buf> {
    pub table_id: u8,
    pub private_indicator: bool,
    /// number of bytes in the section following the 3 byte common header
    pub section_length: usize,
    /// present when `section_syntax_indicator` was set
    pub syntax_section: Option<SyntaxSection>,
    pub payload: TablePayload<'buf>,
    body: &'buf [u8],
}

impl<'buf> Section<'buf> {
    /// Same as [`decode_section()`].
    pub fn from_bytes(buf: &'buf [u8]) -> Result<Section<'buf>, SectionError> {
        decode_section(buf)
    }

    /// The kind of table this section belongs to.
    pub fn table(&self) -> TableId {
        TableId::from(self.table_id)
    }

    /// The bytes of the section following the header fields, excluding any CRC.
    pub fn body(&self) -> &'buf [u8] {
        self.body
    }

    /// The undecoded table body, if this section carries private data.  That is the case for
    /// any table not defined by _ISO/IEC 13818-1_ and also for any section with
    /// `private_indicator` set.
    pub fn private_data(&self) -> Option<&'buf [u8]> {
        match self.payload {
            TablePayload::Private(data) => Some(data),
            _ if self.private_indicator => Some(self.body),
            _ => None,
        }
    }
}

/// The table-specific content of a section.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TablePayload<'buf> {
    ProgramAssociation(pat::ProgramAssociation),
    ConditionalAccess(cat::ConditionalAccessTable<'buf>),
    ProgramMap(pmt::ProgramMap<'buf>),
    TransportStreamDescription(tsdt::TransportStreamDescription<'buf>),
    /// The body of a table this crate does not interpret
    Private(&'buf [u8]),
}

impl<'buf> TablePayload<'buf> {
    fn parse(
        table_id: u8,
        syntax_section: Option<&SyntaxSection>,
        body: &'buf [u8],
    ) -> Result<TablePayload<'buf>, SectionError> {
        let require_syntax =
            || syntax_section.ok_or(SectionError::MissingSyntaxSection { table_id });
        let payload = match TableId::from(table_id) {
            TableId::ProgramAssociation => {
                let syntax = require_syntax()?;
                TablePayload::ProgramAssociation(pat::ProgramAssociation::parse(
                    syntax.table_id_extension,
                    body,
                )?)
            }
            TableId::ConditionalAccess => {
                TablePayload::ConditionalAccess(cat::ConditionalAccessTable::parse(body)?)
            }
            TableId::ProgramMap => {
                let syntax = require_syntax()?;
                TablePayload::ProgramMap(pmt::ProgramMap::parse(syntax.table_id_extension, body)?)
            }
            TableId::TransportStreamDescription => TablePayload::TransportStreamDescription(
                tsdt::TransportStreamDescription::parse(body)?,
            ),
            TableId::Iso14496SceneDescription
            | TableId::Iso14496ObjectDescription
            | TableId::Metadata
            | TableId::Ipmp
            | TableId::Reserved(_)
            | TableId::UserPrivate(_)
            | TableId::Forbidden => TablePayload::Private(body),
        };
        Ok(payload)
    }
}

/// Decode the single, complete PSI section held in `buf`.
///
/// `buf` must hold exactly `3 + section_length` bytes: from the `table_id` up to and including
/// the CRC (if the section uses section syntax).  Sizes are validated before the CRC, which is
/// in turn validated before any of the table body is interpreted.
pub fn decode_section(buf: &[u8]) -> Result<Section<'_>, SectionError> {
    let header = SectionCommonHeader::from_bytes(buf)?;
    let syntax_section = if header.section_syntax_indicator {
        Some(SyntaxSection::from_bytes(buf)?)
    } else {
        None
    };

    let section_end = SectionCommonHeader::SIZE + header.section_length;
    if buf.len() < section_end {
        return Err(SizeError::BufferTooShort {
            section_length: header.section_length,
            actual: buf.len(),
        }
        .into());
    }
    if buf.len() > section_end {
        return Err(SizeError::BufferTooLong {
            section_length: header.section_length,
            actual: buf.len(),
        }
        .into());
    }

    let body = match syntax_section {
        Some(ref syntax) => {
            let minimum = SyntaxSection::SIZE + SyntaxSection::CRC_SIZE;
            if header.section_length < minimum {
                return Err(SizeError::SectionLengthTooSmall {
                    section_length: header.section_length,
                    minimum,
                }
                .into());
            }
            let crc_start = section_end - SyntaxSection::CRC_SIZE;
            // don't apply CRC checks when fuzzing, to give more chances of test data triggering
            // parser bugs,
            if !cfg!(fuzz) {
                let actual = crc::crc32(&buf[..crc_start]);
                if actual != syntax.crc32 {
                    return Err(SectionError::InvalidCrc {
                        expected: syntax.crc32,
                        actual,
                    });
                }
            }
            &buf[SyntaxSection::BODY_OFFSET..crc_start]
        }
        None => &buf[SectionCommonHeader::SIZE..section_end],
    };

    trace!(
        "table_id {:#04x} ({:?}) body of {} bytes",
        header.table_id,
        TableId::from(header.table_id),
        body.len()
    );
    let payload = TablePayload::parse(header.table_id, syntax_section.as_ref(), body)?;
    Ok(Section {
        table_id: header.table_id,
        private_indicator: header.private_indicator,
        section_length: header.section_length,
        syntax_section,
        payload,
        body,
    })
}

/// Reasons a section could not be decoded.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum SectionError {
    /// The buffer, or a length field within it, disagrees with the amount of data present
    #[error(transparent)]
    BadSize(#[from] SizeError),
    /// The Program Association and Program Map tables require section syntax, but
    /// `section_syntax_indicator` is 0
    #[error("table_id {table_id:#04x} requires a syntax section, but section_syntax_indicator is 0")]
    MissingSyntaxSection { table_id: u8 },
    /// The CRC computed over the section does not match the section's CRC field
    #[error("CRC mismatch: section carries {expected:#010x} but computed {actual:#010x}")]
    InvalidCrc { expected: u32, actual: u32 },
}

/// The specific size problem behind a [`SectionError::BadSize`].
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum SizeError {
    #[error("sections must be at least 3 bytes long, but got buffer with length {actual}")]
    HeaderTooShort { actual: usize },
    #[error("section_syntax_indicator is 1, but the extended syntax header is incomplete ({actual} of {expected} bytes)")]
    SyntaxHeaderIncomplete { actual: usize, expected: usize },
    #[error("buffer shorter than declared section length (section_length={section_length}, buffer is {actual} bytes)")]
    BufferTooShort { section_length: usize, actual: usize },
    #[error("buffer longer than declared section length (section_length={section_length}, buffer is {actual} bytes)")]
    BufferTooLong { section_length: usize, actual: usize },
    #[error("section_length={section_length} cannot hold the syntax section and CRC ({minimum} bytes)")]
    SectionLengthTooSmall { section_length: usize, minimum: usize },
    #[error("program association body of {len} bytes is not a whole number of 4 byte entries")]
    MisalignedProgramAssociation { len: usize },
    #[error("program map body of {actual} bytes is shorter than its {expected} byte header")]
    ProgramMapHeaderIncomplete { actual: usize, expected: usize },
    #[error("program_info_length={declared} extends beyond end of program map ({available} bytes remain)")]
    ProgramInfoOverrun { declared: usize, available: usize },
    #[error("ES_info_length={declared} for stream {elementary_pid:#06x} extends beyond end of program map ({available} bytes remain)")]
    EsInfoOverrun {
        elementary_pid: u16,
        declared: usize,
        available: usize,
    },
    #[error("descriptor tag {tag} declares {declared} bytes but only {available} remain")]
    DescriptorOverrun {
        tag: u8,
        declared: usize,
        available: usize,
    },
}
