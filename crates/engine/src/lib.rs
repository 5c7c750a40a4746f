//! Real-time driver for the pure game core.
//!
//! - [`gravity`]: pausable gravity deadline
//! - [`session`]: single-task actor serializing gravity and input
//! - [`log`]: JSON-lines event log
//! - [`replay`]: rebuild a session from its log
//! - [`config`]: environment configuration

pub mod config;
pub mod gravity;
pub mod log;
pub mod replay;
pub mod session;

pub use blockfall_core as core;

pub use config::GameConfig;
pub use gravity::GravityTimer;
pub use log::{read_log, spawn_file_log, EventRecord, LogRecord, LogSink};
pub use replay::replay;
pub use session::{run_session, spawn_session, SessionCommand, SessionHandle};
