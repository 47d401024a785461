//! Host side of the protocol, for driving a [`Session`](crate::session::Session)
//! the way the simulator does.

pub mod kinematics;
pub mod peer;

pub use peer::{HostPeer, PeerError};
