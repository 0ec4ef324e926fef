//! Decoding of _Program Specific Information_ sections from MPEG2 Transport Streams, per the
//! _ISO/IEC 13818-1_ standard.
//!
//! A section is handed over as one complete byte slice (after the transport stream layer has
//! reassembled it from packets and removed any pointer field and stuffing), and
//! [`decode_section()`](psi/fn.decode_section.html) turns it into a [`Section`](psi/struct.Section.html)
//! value, or reports why it could not.
//!
//! ```
//! # use mpeg2ts_psi::psi::TablePayload;
//! let data = [
//!     0x00, 0xb0, 0x0d, 0x00, 0x01, 0xc1, 0x00, 0x00,
//!     0x00, 0x02, 0xe0, 0x20,
//!     0xa0, 0xaa, 0xdc, 0xc8,
//! ];
//! let section = mpeg2ts_psi::decode_section(&data).unwrap();
//! if let TablePayload::ProgramAssociation(pat) = section.payload {
//!     for program in pat.programs {
//!         println!("program {} in {:?}", program.program_number, program.pid);
//!     }
//! }
//! ```
//!
//! # Design principles
//!
//!  * *Avoid copying*.  Descriptor payloads and private data borrow from the input slice; only
//!    the lists of table entries are allocated.
//!  * *Stateless*.  Every call decodes one section and keeps nothing, so sections may be decoded
//!    from any number of threads with no coordination.
//!  * *Strict about sizes*.  Any disagreement between a length field and the bytes available
//!    is an error, and the whole section is rejected.
//!  * *Extensible*.  The standard calls out a number of 'reserved values' and other points of
//!    extension.  Unrecognised tables are handed back as private data, and descriptor
//!    interpretation can be supplied by other crates.
//!
//! # Fuzzing
//!
//! When built with `--cfg fuzz`, CRC checks are skipped to give fuzzed inputs a better chance of
//! reaching the table parsers.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, future_incompatible)]

mod bits;
pub mod crc;
pub mod descriptor;
pub mod pid;
pub mod psi;

pub use crate::pid::Pid;
pub use crate::psi::{decode_section, Section, SectionError, SizeError};

// expose types from these crates, since they appear in the public API,
pub use smptera_format_identifiers_rust as smptera;

macro_rules! stream_types {
    (
        $(
            $(#[$meta:meta])*
            $name:ident = $val:literal
        ),*,
    ) => {
        /// The type of content carried by an elementary stream, as given by the `stream_type` field
        /// of a Program Map Table entry.
        #[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
        pub enum StreamType {
            $(
                $(#[$meta])*
                $name,
            )*
            /// `0x80` to `0xff`, with no well-known assignment
            Private(u8),
            /// Values reserved by _ISO/IEC 13818-1_
            Reserved(u8),
        }

        impl From<u8> for StreamType {
            fn from(val: u8) -> Self {
                match val {
                    $( $val => StreamType::$name, )*
                    _ => {
                        if val >= 0x80 {
                            StreamType::Private(val)
                        } else {
                            StreamType::Reserved(val)
                        }
                    }
                }
            }
        }

        impl From<StreamType> for u8 {
            fn from(val: StreamType) -> Self {
                match val {
                    $( StreamType::$name => $val, )*
                    StreamType::Reserved(val) => val,
                    StreamType::Private(val) => val,
                }
            }
        }
    }
}

stream_types! {
    /// ISO/IEC 11172 Video
    Iso11172Video = 0x01,
    /// ITU-T Rec. H.262 | ISO/IEC 13818-2 Video, or ISO/IEC 11172-2 constrained parameter video
    H262 = 0x02,
    /// ISO/IEC 11172 Audio
    Iso11172Audio = 0x03,
    /// ISO/IEC 13818-3 Audio
    Iso138183Audio = 0x04,
    /// private sections
    H2220PrivateSections = 0x05,
    /// PES packets containing private data
    H2220PesPrivateData = 0x06,
    /// ISO/IEC 13522 MHEG
    Mheg = 0x07,
    /// DSM-CC
    H2220DsmCc = 0x08,
    /// ITU-T Rec. H.222.1
    H2221 = 0x09,
    /// ISO/IEC 13818-6 type A
    Iso138186MultiprotocolEncapsulation = 0x0a,
    /// ISO/IEC 13818-6 type B
    DsmccUnMessages = 0x0b,
    /// ISO/IEC 13818-6 type C
    DsmccStreamDescriptors = 0x0c,
    /// ISO/IEC 13818-6 type D
    DsmccSections = 0x0d,
    /// auxiliary
    H2220Auxiliary = 0x0e,
    /// ISO/IEC 13818-7 Audio with ADTS transport syntax
    Adts = 0x0f,
    /// ISO/IEC 14496-2 Visual
    Iso144962Visual = 0x10,
    /// ISO/IEC 14496-3 Audio with the LATM transport syntax
    Latm = 0x11,
    /// ISO/IEC 14496-1 SL-packetized stream or FlexMux stream carried in PES packets
    FlexMuxPes = 0x12,
    /// ISO/IEC 14496-1 SL-packetized stream or FlexMux stream carried in sections
    FlexMuxIso14496Sections = 0x13,
    /// ISO/IEC 13818-6 Synchronized Download Protocol
    SynchronizedDownloadProtocol = 0x14,
    /// Metadata carried in PES packets
    MetadataInPes = 0x15,
    /// Metadata carried in metadata_sections
    MetadataInMetadataSections = 0x16,
    /// Metadata carried in ISO/IEC 13818-6 Data Carousel
    DsmccDataCarouselMetadata = 0x17,
    /// Metadata carried in ISO/IEC 13818-6 Object Carousel
    DsmccObjectCarouselMetadata = 0x18,
    /// Metadata carried in ISO/IEC 13818-6 Synchronized Download Protocol
    SynchronizedDownloadProtocolMetadata = 0x19,
    /// IPMP stream
    Ipmp = 0x1a,
    /// AVC video stream, ITU-T Rec. H.264 | ISO/IEC 14496-10
    H264 = 0x1b,
    /// HEVC video stream, ITU-T Rec. H.265 | ISO/IEC 23008-2
    H265 = 0x24,
    /// Chinese Video Standard
    ChineseVideoStandard = 0x42,
    /// ATSC Dolby Digital audio
    AtscDolbyDigitalAudio = 0x81,
    /// ATSC DSM CC Network Resources table
    AtscDsmccNetworkResourcesTable = 0x95,
    /// ATSC DSM CC synchronous data
    AtscDsmccSynchronousData = 0xc2,
}
