//! Client-side game-session engine for a connections-style puzzle game:
//! grid interaction, attempt evaluation, win/loss determination, payload
//! hydration, and reconciliation between locally-cached and server-held
//! progress.
//!
//! Rendering, routing, and authentication live in the surrounding
//! application; this crate owns only the session semantics and the
//! persistence contracts they rely on.

pub mod codec;
pub mod config;
pub mod dto;
pub mod error;
pub mod model;
pub mod services;
pub mod session;
pub mod store;

pub use config::EngineConfig;
pub use error::ServiceError;
pub use session::{GameSession, SelectionOutcome, SessionPhase};
