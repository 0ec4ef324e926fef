//! Types related to the _Program Association Table_

use crate::bits;
use crate::pid::Pid;
use crate::psi::SizeError;

/// The identifier of TS Packets containing Program Association Table sections, with value `0`.
pub const PAT_PID: Pid = Pid::new(0);

/// One 4 byte entry of the Program Association Table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramEntry {
    /// `0` for the entry giving the network PID, otherwise the program number
    pub program_number: u16,
    /// the PID of the Network Information Table, or of the program's Program Map Table
    pub pid: Pid,
}

impl ProgramEntry {
    const SIZE: usize = 4;

    /// panics if fewer than 4 bytes are provided
    fn from_bytes(data: &[u8]) -> ProgramEntry {
        ProgramEntry {
            program_number: bits::u16_at(data, 0),
            pid: bits::pid_at(data, 2),
        }
    }

    /// Does this entry give the PID of the _Network Information Table_ rather than of a
    /// program's PMT?
    pub fn is_network(&self) -> bool {
        self.program_number == 0
    }
}

/// Sections of the _Program Association Table_ give details of the programs within a transport
/// stream.  There may be only one program, or in the case of a broadcast multiplex, there may
/// be many.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramAssociation {
    /// taken from the `table_id_extension` of the section
    pub transport_stream_id: u16,
    /// the entries in the order they appear in the section
    pub programs: Vec<ProgramEntry>,
}

impl ProgramAssociation {
    pub(crate) fn parse(
        transport_stream_id: u16,
        body: &[u8],
    ) -> Result<ProgramAssociation, SizeError> {
        if body.len() % ProgramEntry::SIZE != 0 {
            return Err(SizeError::MisalignedProgramAssociation { len: body.len() });
        }
        Ok(ProgramAssociation {
            transport_stream_id,
            programs: body
                .chunks_exact(ProgramEntry::SIZE)
                .map(ProgramEntry::from_bytes)
                .collect(),
        })
    }

    /// The PID of the _Network Information Table_, if the table gives one.
    pub fn network_pid(&self) -> Option<Pid> {
        self.programs.iter().find(|p| p.is_network()).map(|p| p.pid)
    }

    /// The PID of the Program Map Table for the given program, if the program is listed.
    pub fn pmt_pid(&self, program_number: u16) -> Option<Pid> {
        self.programs
            .iter()
            .find(|p| !p.is_network() && p.program_number == program_number)
            .map(|p| p.pid)
    }
}
