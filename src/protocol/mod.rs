//! Text protocol spoken with the simulation host.
//!
//! Tokens are whitespace separated, line breaks carry no meaning on input.
//! A session goes through three phases, always in this order:
//!
//! ```text
//! -> ROBOIME_INTEL_PROTOCOL_VERSION 1
//! <- COMPATIBLE 1
//! -> <9 geometry floats>
//! -> <10 header tokens> <4 ball floats> <own robots x 7> <opponent robots x 7>
//! <- <counter>
//! <- <tangential> <normal> <angular> <kick_x> <kick_z> <spin>   (once per own robot)
//! ...
//! ```

mod command;
mod decode;
mod encode;
mod handshake;
mod tokens;

pub use command::{RobotAction, RobotCommand};
pub use decode::{read_frame, read_geometry, read_robot};
pub use encode::encode_commands;
pub use handshake::{read_handshake, HandshakeReply, HandshakeRequest};
pub use tokens::TokenReader;

use std::{fmt, io};

/// token the host must open the session with
pub const PROTOCOL_NAME: &str = "ROBOIME_INTEL_PROTOCOL_VERSION";

/// the only protocol version this client speaks
pub const COMPAT_VERSION: i64 = 1;

#[derive(Debug)]
pub enum DecodeError {
    Io(io::Error),
    /// the stream ended in the middle of a record
    UnexpectedEof { expected: &'static str },
    /// a token could not be read as the value it stands for
    Malformed { expected: &'static str, token: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Io(e) => write!(f, "failed to read from the host: {}", e),
            DecodeError::UnexpectedEof { expected } => {
                write!(f, "stream ended while expecting {}", expected)
            }
            DecodeError::Malformed { expected, token } => {
                write!(f, "expected {}, got '{}'", expected, token)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}
