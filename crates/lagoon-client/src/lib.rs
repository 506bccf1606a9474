//! Lagoon Client
//!
//! Synchronous, blocking client for the Lagoon key/collection store. Talks
//! line-delimited JSON-RPC over a single persistent TCP connection, probing
//! the connection before every send and receive and transparently replacing
//! it when the peer has gone away.
//!
//! ```no_run
//! use lagoon_client::LagoonClient;
//!
//! let mut client = LagoonClient::connect("localhost", 3030).unwrap();
//! client.create_collection("users").unwrap();
//! client.set_key("users", "alice").unwrap();
//! assert_eq!(client.has_key("users", "alice").unwrap(), true);
//! ```

pub mod client;

pub use client::LagoonClient;
