//! Wire shapes exchanged with the backend API and the local store, plus the
//! validation rules enforced at that boundary.

pub mod payload;
pub mod puzzle;
pub mod validation;

pub use payload::GamePayload;
pub use puzzle::{PuzzleBlockDto, PuzzleDto, PuzzleGroupDto};
