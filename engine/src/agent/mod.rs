//! Turn executor and session management
//!
//! The turn executor drives the round loop against the remote agent; the
//! session manager owns the opaque session id that groups turns into one
//! conversation.

pub mod session;
pub mod turn;

pub use session::SessionManager;
pub use turn::{TurnExecutor, TurnReport};
