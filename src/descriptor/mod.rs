//! Descriptors provide metadata about an element of a Transport Stream.
//!
//! For example, a descriptor may be used to specify the language of an audio track.  Use of
//! specific descriptors is often not mandatory (many streams do not describe the language of their
//! audio).
//!
//! The syntax of specific PSI tables often allows descriptors to be attached to the table itself,
//! or to entries within the table.  Decoding a section yields each descriptor as a raw
//! [`Descriptor`] (a tag plus the borrowed payload bytes).  Interpreting a descriptor's payload is
//! a separate, optional step.
//!
//! # Extensions
//!
//! Descriptors are a point of extension, with a range of descriptor types defined by the core
//! standard, and further descriptor types defined by standards based upon transport streams.
//! [`Descriptor::interpret()`] takes a type-parameter so that calling code which wants to use
//! externally-defined descriptors can supply a type which supports them, for example one defined
//! with the [`descriptor_enum!`](../macro.descriptor_enum.html) macro.
//!
//! ```
//! # use mpeg2ts_psi::descriptor::{CoreDescriptors, Descriptor};
//! let desc = Descriptor::new(5, b"CUEI");
//! if let Ok(CoreDescriptors::Registration(reg)) = desc.core() {
//!     println!("registration_descriptor {:?}", reg.format_identifier());
//! }
//! ```

pub mod ca;
pub mod iso_639_language;
pub mod max_bitrate;
pub mod registration;

use self::ca::CaDescriptor;
use self::iso_639_language::Iso639LanguageDescriptor;
use self::max_bitrate::MaximumBitrateDescriptor;
use self::registration::RegistrationDescriptor;
use crate::psi::SizeError;
use std::fmt;

/// A single tag-length-value record, borrowing its payload from the section it was decoded from.
#[derive(Clone, PartialEq, Eq)]
pub struct Descriptor<'buf> {
    /// identifies the kind of descriptor
    pub tag: u8,
    /// the payload bytes following the `descriptor_length` field, which may be empty
    pub data: &'buf [u8],
}
impl<'buf> Descriptor<'buf> {
    /// Size of the `descriptor_tag` and `descriptor_length` fields preceding the payload
    pub const HEADER_SIZE: usize = 2;

    pub fn new(tag: u8, data: &'buf [u8]) -> Descriptor<'buf> {
        Descriptor { tag, data }
    }

    /// Interpret the payload as the descriptor type `Desc`.
    pub fn interpret<Desc: DescriptorKind<'buf>>(&self) -> Result<Desc, DescriptorError> {
        Desc::from_descriptor(self)
    }

    /// Interpret the payload using the descriptors defined by _ISO/IEC 13818-1_.
    pub fn core(&self) -> Result<CoreDescriptors<'buf>, DescriptorError> {
        self.interpret()
    }

    /// Appends the serialised form of this descriptor (tag, length, payload) to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), DescriptorError> {
        let len = u8::try_from(self.data.len()).map_err(|_| DescriptorError::PayloadTooLong {
            tag: self.tag,
            len: self.data.len(),
        })?;
        out.reserve(Self::HEADER_SIZE + self.data.len());
        out.push(self.tag);
        out.push(len);
        out.extend_from_slice(self.data);
        Ok(())
    }
}
impl<'buf> fmt::Debug for Descriptor<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Descriptor")
            .field("tag", &self.tag)
            .field("data", &format!("{:02x?}", self.data))
            .finish()
    }
}

/// Walks the descriptor loop in `buf`, producing each descriptor in turn.
///
/// Iteration ends once fewer than two bytes remain.  A descriptor whose declared length runs past
/// the end of `buf` produces an error, after which the iterator yields nothing more.
pub struct DescriptorIter<'buf> {
    buf: &'buf [u8],
}
impl<'buf> DescriptorIter<'buf> {
    pub fn new(buf: &'buf [u8]) -> DescriptorIter<'buf> {
        DescriptorIter { buf }
    }
}
impl<'buf> Iterator for DescriptorIter<'buf> {
    type Item = Result<Descriptor<'buf>, SizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.len() < Descriptor::HEADER_SIZE {
            return None;
        }
        let tag = self.buf[0];
        let len = self.buf[1] as usize;
        let remaining_size = self.buf.len() - Descriptor::HEADER_SIZE;
        if len > remaining_size {
            // ensure anther call to next() will yield None,
            self.buf = &self.buf[0..0];
            Some(Err(SizeError::DescriptorOverrun {
                tag,
                declared: len,
                available: remaining_size,
            }))
        } else {
            let (desc, rest) = self.buf.split_at(len + Descriptor::HEADER_SIZE);
            self.buf = rest;
            Some(Ok(Descriptor::new(tag, &desc[Descriptor::HEADER_SIZE..])))
        }
    }
}

/// Parses the whole descriptor loop in `buf`, failing if any descriptor overruns it.
pub fn parse_descriptors(buf: &[u8]) -> Result<Vec<Descriptor<'_>>, SizeError> {
    DescriptorIter::new(buf).collect()
}

/// Serialises the given descriptors back-to-back, as they would appear in a descriptor loop.
pub fn encode_descriptors(descriptors: &[Descriptor<'_>]) -> Result<Vec<u8>, DescriptorError> {
    let mut out = Vec::new();
    for desc in descriptors {
        desc.write_to(&mut out)?;
    }
    Ok(out)
}

/// Implemented by types which give a structured view of a descriptor's payload.
pub trait DescriptorKind<'buf>: Sized {
    fn from_descriptor(desc: &Descriptor<'buf>) -> Result<Self, DescriptorError>;
}

/// Builds an enum, one variant per descriptor type, implementing
/// [`DescriptorKind`](descriptor/trait.DescriptorKind.html) by choosing the variant from the
/// descriptor's tag.
///
/// ```
/// # use mpeg2ts_psi::descriptor_enum;
/// # use mpeg2ts_psi::descriptor::{Descriptor, UnknownDescriptor};
/// # use mpeg2ts_psi::descriptor::registration::RegistrationDescriptor;
/// descriptor_enum! {
///     #[derive(Debug)]
///     MyDescriptors {
///         Registration 5 => RegistrationDescriptor,
///         Vendor 0x80..=0xfe => UnknownDescriptor,
///     }
/// }
/// let desc = Descriptor::new(0x81, &[1, 2]);
/// assert!(matches!(
///     desc.interpret::<MyDescriptors>(),
///     Ok(MyDescriptors::Vendor(_))
/// ));
/// ```
#[macro_export]
macro_rules! descriptor_enum {
    (
        $(#[$outer:meta])*
        $name:ident {
            $(
                $(#[$inner:ident $($args:tt)*])*
                $case_name:ident $($tags:pat_param)|* => $t:ident
            ),*,
        }
    ) => {
        $(#[$outer])*
        pub enum $name<'buf> {
            $(
                $(#[$inner $($args)*])*
                $case_name($t<'buf>),
            )*
        }
        impl<'buf> $crate::descriptor::DescriptorKind<'buf> for $name<'buf> {
            fn from_descriptor(
                desc: &$crate::descriptor::Descriptor<'buf>,
            ) -> Result<Self, $crate::descriptor::DescriptorError> {
                #[allow(unreachable_patterns)]
                match desc.tag {
                    $( $( $tags )|* => Ok($name::$case_name($t::new(desc.tag, desc.data)?)), )*
                    _ => Err($crate::descriptor::DescriptorError::UnhandledTagValue(desc.tag)),
                }
            }
        }
    }
}

/// Catch-all type for any descriptor which has no more specific interpretation
pub struct UnknownDescriptor<'buf> {
    pub tag: u8,
    pub payload: &'buf [u8],
}
impl<'buf> UnknownDescriptor<'buf> {
    pub fn new(tag: u8, payload: &'buf [u8]) -> Result<UnknownDescriptor<'buf>, DescriptorError> {
        Ok(UnknownDescriptor { tag, payload })
    }
}
impl<'buf> fmt::Debug for UnknownDescriptor<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("UnknownDescriptor")
            .field("tag", &self.tag)
            .field("len", &self.payload.len())
            .finish()
    }
}

descriptor_enum! {
    /// Descriptor types defined by _ISO/IEC 13818-1_.  Those for which there is no structured
    /// view yet are represented as `UnknownDescriptor`.
    #[derive(Debug)]
    CoreDescriptors {
        Reserved 0|1|36..=63 => UnknownDescriptor,
        VideoStream 2 => UnknownDescriptor,
        AudioStream 3 => UnknownDescriptor,
        Hierarchy 4 => UnknownDescriptor,
        Registration 5 => RegistrationDescriptor,
        DataStreamAlignment 6 => UnknownDescriptor,
        TargetBackgroundGrid 7 => UnknownDescriptor,
        VideoWindow 8 => UnknownDescriptor,
        CA 9 => CaDescriptor,
        ISO639Language 10 => Iso639LanguageDescriptor,
        SystemClock 11 => UnknownDescriptor,
        MultiplexBufferUtilization 12 => UnknownDescriptor,
        Copyright 13 => UnknownDescriptor,
        MaximumBitrate 14 => MaximumBitrateDescriptor,
        PrivateDataIndicator 15 => UnknownDescriptor,
        SmoothingBuffer 16 => UnknownDescriptor,
        STD 17 => UnknownDescriptor,
        IBP 18 => UnknownDescriptor,
        /// ISO IEC 13818-6
        IsoIec13818dash6 19..=26 => UnknownDescriptor,
        MPEG4Video 27 => UnknownDescriptor,
        MPEG4Audio 28 => UnknownDescriptor,
        IOD 29 => UnknownDescriptor,
        SL 30 => UnknownDescriptor,
        FMC 31 => UnknownDescriptor,
        ExternalESID 32 => UnknownDescriptor,
        MuxCode 33 => UnknownDescriptor,
        FmxBufferSize 34 => UnknownDescriptor,
        MultiplexBuffer 35 => UnknownDescriptor,
        UserPrivate 64..=255 => UnknownDescriptor,
    }
}

/// Checks that a descriptor payload holds at least `len` bytes.
pub(crate) fn descriptor_len(buf: &[u8], tag: u8, len: usize) -> Result<(), DescriptorError> {
    if buf.len() < len {
        Err(DescriptorError::NotEnoughData {
            tag,
            actual: buf.len(),
            expected: len,
        })
    } else {
        Ok(())
    }
}

/// Problems interpreting or serialising a descriptor.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// the payload is shorter than the descriptor's fixed fields require
    #[error("descriptor tag {tag} has {actual} payload bytes, at least {expected} required")]
    NotEnoughData {
        tag: u8,
        actual: usize,
        expected: usize,
    },
    /// the payload is too long for the 8-bit `descriptor_length` field
    #[error("descriptor tag {tag} payload of {len} bytes does not fit descriptor_length")]
    PayloadTooLong { tag: u8, len: usize },
    /// the descriptor type given to `interpret()` has no variant for this tag
    #[error("unhandled descriptor tag {0}")]
    UnhandledTagValue(u8),
}
