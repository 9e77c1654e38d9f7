//! Simulation error type.
//!
//! Only construction can fail. A calibration probe overrunning its budget is
//! normal control flow (see [`crate::calibrate::Probe`]), and numeric faults
//! are debug assertions at the kernel outputs rather than recoverable
//! errors - a corrupted value would poison every neighbor sum in the next
//! step, so there is nothing sensible to recover to.

use glam::Vec2;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SimError {
    /// The domain rectangle is degenerate or inverted. Fatal at
    /// construction; never silently coerced.
    #[error("invalid domain: top-left {top_left:?} must lie strictly left of and above bottom-right {bottom_right:?}")]
    InvalidDomain { top_left: Vec2, bottom_right: Vec2 },
}
