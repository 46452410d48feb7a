//! # Session Management
//!
//! One session is one in-progress inference run: a fixed rule set plus the
//! answers given so far. Sessions are addressed by an opaque id and live in
//! a concurrent map, never in a process-wide singleton.
//!
//! ## Invariants
//! - SS1: The rule set is fixed at start
//! - SS2: Answers only grow; resubmitting a fact overwrites it
//! - SS3: A finished session accepts no further answers
//! - SS4: Submissions to one session are serialized; sessions never share answers

mod errors;
mod manager;
mod session;

pub use errors::{SessionError, SessionResult};
pub use manager::SessionManager;
pub use session::{Session, SessionSnapshot};
