//! Language descriptor, giving the language(s) of the audio or subtitles carried in an
//! elementary stream, along with a hint about the kind of audio.

use super::DescriptorError;
use std::borrow::Cow;
use std::fmt;

/// The languages of an audio or subtitle stream, one 4 byte entry per language.
pub struct Iso639LanguageDescriptor<'buf> {
    buf: &'buf [u8],
}
impl<'buf> Iso639LanguageDescriptor<'buf> {
    pub const TAG: u8 = 10;

    /// Never fails; a payload with no complete entry simply lists no languages.
    pub fn new(
        _tag: u8,
        buf: &'buf [u8],
    ) -> Result<Iso639LanguageDescriptor<'buf>, DescriptorError> {
        Ok(Iso639LanguageDescriptor { buf })
    }

    /// Produce a list of language references made by this descriptor.  Any trailing bytes which
    /// do not make up a whole 4-byte entry are ignored.
    pub fn languages(&self) -> impl Iterator<Item = Language<'buf>> {
        self.buf.chunks_exact(Language::SIZE).map(Language::new)
    }
}

impl fmt::Debug for Iso639LanguageDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let langs: Vec<_> = self.languages().collect();
        f.debug_tuple("Iso639LanguageDescriptor").field(&langs).finish()
    }
}

/// The `audio_type` field of a language entry.
#[derive(Debug, PartialEq, Eq)]
pub enum AudioType {
    Undefined,
    /// no language-specific content
    CleanEffects,
    HearingImpaired,
    VisualImpairedCommentary,
    /// `0x04` to `0x7f`
    Reserved(u8),
    /// `0x80` to `0xff`
    UserPrivate(u8),
}
impl From<u8> for AudioType {
    fn from(v: u8) -> Self {
        match v {
            0 => AudioType::Undefined,
            1 => AudioType::CleanEffects,
            2 => AudioType::HearingImpaired,
            3 => AudioType::VisualImpairedCommentary,
            0x04..=0x7f => AudioType::Reserved(v),
            _ => AudioType::UserPrivate(v),
        }
    }
}

/// One entry of an `Iso639LanguageDescriptor`.
pub struct Language<'buf> {
    buf: &'buf [u8],
}
impl<'buf> Language<'buf> {
    const SIZE: usize = 4;

    /// `buf` is always a whole entry, as produced by `chunks_exact()`
    fn new(buf: &'buf [u8]) -> Language<'buf> {
        Language { buf }
    }
    /// The 3-letter _ISO 639-2_ language code, encoded as _ISO 8859-1_ text.
    pub fn code(&self) -> Cow<'buf, str> {
        encoding_rs::mem::decode_latin1(&self.buf[0..3])
    }
    pub fn audio_type(&self) -> AudioType {
        AudioType::from(self.buf[3])
    }
}
impl fmt::Debug for Language<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:?}", self.code(), self.audio_type())
    }
}
