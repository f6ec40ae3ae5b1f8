//! Session engine for the WOPR terminal conversation.
//!
//! A scripted, prompt-by-prompt conversation with a fictional military
//! computer. This crate holds everything that decides *what* happens in a
//! session and none of the I/O: sockets, stdin and real clocks live in
//! `wopr-server`, simulated ones in `wopr-harness`.
//!
//! # Components
//!
//! - [`Screen`]: a named point in the scripted conversation
//! - [`normalize`]: canonicalizes raw input before matching
//! - [`transition`]: pure decision logic, `(screen, token) -> Action`
//! - [`DialogueStep`]: the constant per-screen script table
//! - [`Transport`]: send/disconnect capability, local or networked
//! - [`Renderer`]: teletype animation of a step through a transport
//! - [`Session`]: drives one transport through the script
//! - [`SessionRegistry`]: shared, synchronized per-connection state
//!
//! # Data Flow
//!
//! ```text
//! raw bytes -> normalize -> transition(screen, token) -> Action
//!                                                         |
//!           Transport <- Renderer <- Session::apply <-----+
//!               |
//!               +-> set_screen -> SessionRegistry (network only)
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ansi;
mod dialogue;
mod env;
mod error;
mod normalize;
mod registry;
mod render;
mod screen;
mod script;
mod session;
mod transport;

pub use dialogue::{Action, transition};
pub use env::Environment;
pub use error::{RegistryError, SessionError};
pub use normalize::normalize;
pub use registry::{SessionRegistry, SessionState, SessionTable};
pub use render::{RenderConfig, Renderer};
pub use screen::Screen;
pub use script::{Beat, DialogueStep, GAMES, PASSWORD, Pace, Passage, step};
pub use session::{Flow, Session};
pub use transport::{Transport, TransportId};
