//! Wire layer for the scout rover's control channel.
//!
//! The rover speaks a deliberately tiny protocol: a WebSocket endpoint that
//! accepts short plain-text command tokens and defines no response messages.
//! [`Link`] owns one connection to that endpoint for its whole lifetime --
//! there is no reconnection, no send queue beyond the in-flight frame, and
//! no inbound schema. A dropped or failed link is terminal; callers open a
//! fresh one.
//!
//! The separate video feed is plain HTTP and is never consumed here beyond
//! a reachability probe ([`probe_feed`]).

pub mod error;
pub mod probe;
pub mod socket;

pub use error::LinkError;
pub use probe::probe_feed;
pub use socket::{Link, LinkState};
