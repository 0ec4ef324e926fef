//! Types related to the _Program Map Table_

use crate::bits;
use crate::descriptor::{self, Descriptor};
use crate::pid::Pid;
use crate::psi::SizeError;
use crate::StreamType;
use log::warn;

/// Sections of the _Program Map Table_ give details of the streams within a particular program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramMap<'buf> {
    /// taken from the `table_id_extension` of the section
    pub program_number: u16,
    /// The Pid of packets that will contain the Program Clock Reference for this program, or
    /// `None` if the section gives the null PID (`0x1fff`), meaning there is no PCR
    pub pcr_pid: Option<Pid>,
    /// number of bytes of program-level descriptors
    pub program_info_length: u16,
    /// descriptors attached to the program as a whole
    pub descriptors: Vec<Descriptor<'buf>>,
    /// the streams of which this program is composed, in section order
    pub streams: Vec<StreamInfo<'buf>>,
}

impl<'buf> ProgramMap<'buf> {
    const HEADER_SIZE: usize = 4;

    pub(crate) fn parse(
        program_number: u16,
        body: &'buf [u8],
    ) -> Result<ProgramMap<'buf>, SizeError> {
        if body.len() < Self::HEADER_SIZE {
            return Err(SizeError::ProgramMapHeaderIncomplete {
                actual: body.len(),
                expected: Self::HEADER_SIZE,
            });
        }
        let pcr_pid = match bits::pid_at(body, 0) {
            Pid::NULL => None,
            pid => Some(pid),
        };
        let program_info_length = bits::length_at(body, 2);
        let descriptor_end = Self::HEADER_SIZE + program_info_length;
        if descriptor_end > body.len() {
            return Err(SizeError::ProgramInfoOverrun {
                declared: program_info_length,
                available: body.len() - Self::HEADER_SIZE,
            });
        }
        let descriptors = descriptor::parse_descriptors(&body[Self::HEADER_SIZE..descriptor_end])?;

        let mut streams = vec![];
        let mut rest = &body[descriptor_end..];
        while rest.len() >= StreamInfo::HEADER_SIZE {
            let (stream_info, info_len) = StreamInfo::from_bytes(rest)?;
            streams.push(stream_info);
            rest = &rest[info_len..];
        }
        if !rest.is_empty() {
            warn!(
                "only {} bytes remaining for stream info, at least {} required {:?}",
                rest.len(),
                StreamInfo::HEADER_SIZE,
                rest
            );
        }

        Ok(ProgramMap {
            program_number,
            pcr_pid,
            program_info_length: program_info_length as u16,
            descriptors,
            streams,
        })
    }

    /// The entry for the stream carried in packets with the given PID, if any.
    pub fn stream(&self, elementary_pid: Pid) -> Option<&StreamInfo<'buf>> {
        self.streams
            .iter()
            .find(|s| s.elementary_pid == elementary_pid)
    }
}

/// Details of a particular elementary stream within a program.
///
///  - `stream_type` gives an indication of the kind of content carried within the stream
///  - The `elementary_pid` property allows us to find Transport Stream packets that belong to the
///    elementary stream
///  - `descriptors` _may_ provide extra metadata describing some of the
///    stream's properties (for example, the streams 'language' might be given in a descriptor; or
///    it might not)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamInfo<'buf> {
    pub stream_type: StreamType,
    pub elementary_pid: Pid,
    pub descriptors: Vec<Descriptor<'buf>>,
}

impl<'buf> StreamInfo<'buf> {
    const HEADER_SIZE: usize = 5;

    /// Parses the entry at the start of `data`, which must hold at least `HEADER_SIZE` bytes,
    /// also returning the number of bytes it occupies.
    fn from_bytes(data: &'buf [u8]) -> Result<(StreamInfo<'buf>, usize), SizeError> {
        let elementary_pid = bits::pid_at(data, 1);
        let es_info_length = bits::length_at(data, 3);
        let descriptor_end = Self::HEADER_SIZE + es_info_length;
        if descriptor_end > data.len() {
            return Err(SizeError::EsInfoOverrun {
                elementary_pid: elementary_pid.into(),
                declared: es_info_length,
                available: data.len() - Self::HEADER_SIZE,
            });
        }
        let stream_info = StreamInfo {
            stream_type: StreamType::from(data[0]),
            elementary_pid,
            descriptors: descriptor::parse_descriptors(&data[Self::HEADER_SIZE..descriptor_end])?,
        };
        Ok((stream_info, descriptor_end))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    #[test]
    fn single_stream() {
        let body = hex!("e100 f000 1b e101 f003 0a01ff");
        let pmt = ProgramMap::parse(1, &body).unwrap();
        assert_eq!(pmt.program_number, 1);
        assert_eq!(pmt.pcr_pid, Some(Pid::new(0x100)));
        assert_eq!(pmt.program_info_length, 0);
        assert!(pmt.descriptors.is_empty());
        assert_eq!(pmt.streams.len(), 1);
        let stream = pmt.stream(Pid::new(0x101)).unwrap();
        assert_eq!(stream.stream_type, StreamType::H264);
        assert_eq!(stream.descriptors, vec![Descriptor::new(10, &[0xff])]);
        assert_matches!(pmt.stream(Pid::new(0x102)), None);
    }

    #[test]
    fn null_pcr_pid() {
        let body = hex!("ffff f000");
        let pmt = ProgramMap::parse(1, &body).unwrap();
        assert_eq!(pmt.pcr_pid, None);
        assert!(pmt.streams.is_empty());
    }

    #[test]
    fn header_incomplete() {
        assert_eq!(
            ProgramMap::parse(1, &hex!("e100f0")),
            Err(SizeError::ProgramMapHeaderIncomplete {
                actual: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn program_info_overrun() {
        let body = hex!("e100 f006 05044355");
        assert_eq!(
            ProgramMap::parse(1, &body),
            Err(SizeError::ProgramInfoOverrun {
                declared: 6,
                available: 4
            })
        );
    }

    #[test]
    fn es_info_overrun() {
        let body = hex!("e100 f000 1b e101 f004 0a01");
        assert_eq!(
            ProgramMap::parse(1, &body),
            Err(SizeError::EsInfoOverrun {
                elementary_pid: 0x101,
                declared: 4,
                available: 2
            })
        );
    }

    #[test]
    fn bad_stream_descriptor() {
        let body = hex!("e100 f000 1b e101 f002 0a05");
        assert_matches!(
            ProgramMap::parse(1, &body),
            Err(SizeError::DescriptorOverrun { tag: 10, .. })
        );
    }

    #[test]
    fn trailing_partial_entry_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let body = hex!("e100 f000 1b e101 f000 0f e1");
        let pmt = ProgramMap::parse(1, &body).unwrap();
        assert_eq!(pmt.streams.len(), 1);
        assert_eq!(pmt.streams[0].elementary_pid, Pid::new(0x101));
    }
}
