//! Vigil Notifications
//!
//! Login, logout and session-timeout outcomes surface to the user as
//! notices. Producers push, the UI drains; the pending queue is bounded
//! so an unattended client cannot grow it without limit.

mod center;
mod notice;

pub use center::Notifier;
pub use notice::{Notice, Severity};
