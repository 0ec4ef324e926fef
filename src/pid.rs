//! The 13-bit _Packet Identifier_ values that PSI tables use to refer to other parts of the
//! transport stream.

use std::convert::TryFrom;
use std::fmt;

/// A Packet Identifier.  The Program Association and Program Map tables give the `Pid` values of
/// the packets carrying each program's tables and elementary streams.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(u16);
impl Pid {
    /// The largest possible PID value, `0x1fff`.
    pub const MAX_VALUE: u16 = 0x1fff;

    /// The null packet PID, `0x1fff`.  Within a Program Map Table this value in the `PCR_PID`
    /// field means that no PCR is carried for the program.
    pub const NULL: Pid = Pid::new(0x1fff);

    /// Panics if the given value is greater than `Pid::MAX_VALUE`.
    pub const fn new(pid: u16) -> Pid {
        assert!(pid <= 0x1fff);
        Pid(pid)
    }

    /// Builds a `Pid` from the low 13 bits of the given value, discarding the rest.
    pub(crate) const fn from_masked(value: u16) -> Pid {
        Pid(value & Self::MAX_VALUE)
    }
}
impl TryFrom<u16> for Pid {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= Pid::MAX_VALUE {
            Ok(Pid(value))
        } else {
            Err(())
        }
    }
}
impl From<Pid> for u16 {
    #[inline]
    fn from(pid: Pid) -> Self {
        pid.0
    }
}
impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Pid({:04x})", self.0)
    }
}
