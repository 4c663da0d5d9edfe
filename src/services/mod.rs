//! Service layer tying sessions, codecs, and stores together.

/// Session lifecycle: fresh games and reconciled resumes.
pub mod game_service;
/// Optimistic display values for in-flight writes.
pub mod optimistic;
/// Local/server progress reconciliation and the stale-reference gate.
pub mod reconciler;
/// Per-puzzle serialized persistence of progress snapshots.
pub mod save_coordinator;

pub use game_service::{build_puzzle, create_game, resume_or_create};
pub use optimistic::{WriteState, reconcile_optimistic};
pub use reconciler::{is_game_payload_valid, pick_latest_game, resolve_payload};
pub use save_coordinator::SaveCoordinator;
