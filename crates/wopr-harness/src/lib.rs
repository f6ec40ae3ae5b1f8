//! Deterministic simulation harness for WOPR sessions.
//!
//! Test doubles for the seams of `wopr-core` plus turmoil plumbing for
//! `wopr-server`, so whole conversations run in milliseconds and every byte
//! a client would see can be asserted on.
//!
//! - [`SimEnv`]: records pauses instead of (or as well as) sleeping
//! - [`CaptureTransport`]: records every write, screen and disconnect
//! - [`TelnetClient`]: line-oriented client over any byte stream
//! - [`SimListener`]: turmoil listener usable as a server [`Acceptor`]
//!
//! [`Acceptor`]: wopr_server::Acceptor

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capture;
pub mod sim_env;
pub mod sim_listener;
pub mod telnet_client;

pub use capture::CaptureTransport;
pub use sim_env::SimEnv;
pub use sim_listener::SimListener;
pub use telnet_client::TelnetClient;
