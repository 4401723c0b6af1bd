//! Raw dataset source port trait.

use crate::domain::error::TrackerError;

/// Supplies the delimited price index resource as raw bytes.
///
/// Loading is the only I/O step; decoding and parsing happen in the domain.
pub trait SourcePort {
    fn load_raw(&self) -> Result<Vec<u8>, TrackerError>;

    /// Human-readable origin, for log and error messages.
    fn describe(&self) -> String;
}
