//! Lagoon Transport Layer
//!
//! Synchronous, blocking TCP transport with newline-delimited JSON framing.
//!
//! # Components
//!
//! - **[`LineCodec`]**: encodes requests and decodes responses, one JSON
//!   object per `\n`-terminated line
//! - **[`Connection`]**: owns a single `TcpStream`, probes liveness without
//!   consuming buffered bytes, and sends/receives complete frames
//!
//! Frames larger than [`MAX_FRAME_SIZE`](tcp::MAX_FRAME_SIZE) are rejected
//! to bound allocation on malformed input.

pub mod codec;
pub mod tcp;


pub use codec::LineCodec;
pub use tcp::Connection;
