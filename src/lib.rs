#![cfg_attr(not(test), deny(clippy::unwrap_used))]
pub mod controllers;
pub mod math;
pub mod protocol;
pub mod session;
pub mod testing;
pub mod world;

pub use session::{PhaseKind, Session, SessionError, SessionOutcome};
