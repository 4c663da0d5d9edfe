//! Persistence adapters: the browser-profile-style local store and the
//! backend API remote store.

#[cfg(feature = "http-store")]
pub mod http;
pub mod json_file;
pub mod memory;
pub mod storage;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dto::payload::GamePayload;
use crate::dto::puzzle::PuzzleDto;

pub use json_file::JsonFileStore;
pub use memory::MemoryLocalStore;
pub use storage::{StorageError, StorageResult};

#[cfg(feature = "http-store")]
pub use http::{HttpRemoteStore, RemoteConfig};

/// Namespaced key-value store holding one serialized [`GamePayload`] per
/// puzzle id.
///
/// Contract: operations fail softly. If the underlying storage is
/// unavailable or corrupted, reads act as if the store were empty and writes
/// are dropped with a warning; callers are never interrupted.
pub trait LocalStore: Send + Sync {
    /// Stored progress for a puzzle, if any survives deserialization.
    fn load(&self, puzzle_id: Uuid) -> Option<GamePayload>;
    /// Upsert the entry for a puzzle; last write wins, no merge at this
    /// layer.
    fn save(&self, puzzle_id: Uuid, payload: &GamePayload);
    /// Delete the entry for a puzzle.
    fn remove(&self, puzzle_id: Uuid);
}

/// Backend API surface consumed by the engine. Both game calls assume an
/// authenticated user; that precondition is checked by the surrounding auth
/// layer, not here.
pub trait RemoteStore: Send + Sync {
    /// Fetch a puzzle (block values possibly obfuscated, attempt cap
    /// possibly absent).
    fn fetch_puzzle(&self, puzzle_id: Uuid) -> BoxFuture<'static, StorageResult<PuzzleDto>>;
    /// Fetch the user's persisted progress for a puzzle; `None` means "no
    /// progress yet", not an error.
    fn fetch_game(&self, puzzle_id: Uuid) -> BoxFuture<'static, StorageResult<Option<GamePayload>>>;
    /// Upsert server-side progress; idempotent under retry.
    fn save_game(
        &self,
        puzzle_id: Uuid,
        payload: GamePayload,
    ) -> BoxFuture<'static, StorageResult<GamePayload>>;
    /// Toggle the user's like on a puzzle, returning the new liked state.
    fn toggle_like(&self, puzzle_id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
}
