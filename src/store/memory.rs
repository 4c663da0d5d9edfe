//! In-memory local store for tests and ephemeral embedders.

use dashmap::DashMap;
use uuid::Uuid;

use crate::dto::payload::GamePayload;
use crate::store::LocalStore;

/// In-memory [`LocalStore`], used by tests and embedders without a durable
/// key-value surface.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    entries: DashMap<Uuid, GamePayload>,
}

impl MemoryLocalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn load(&self, puzzle_id: Uuid) -> Option<GamePayload> {
        self.entries.get(&puzzle_id).map(|entry| entry.clone())
    }

    fn save(&self, puzzle_id: Uuid, payload: &GamePayload) {
        self.entries.insert(puzzle_id, payload.clone());
    }

    fn remove(&self, puzzle_id: Uuid) {
        self.entries.remove(&puzzle_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_remove_cycle() {
        let store = MemoryLocalStore::new();
        let puzzle_id = Uuid::new_v4();

        assert_eq!(store.load(puzzle_id), None);

        let payload = GamePayload {
            score: 1,
            attempts: Vec::new(),
            correct: vec![Uuid::new_v4()],
            completed_at: None,
        };
        store.save(puzzle_id, &payload);
        assert_eq!(store.load(puzzle_id), Some(payload.clone()));

        // Last write wins.
        store.save(puzzle_id, &GamePayload::empty());
        assert_eq!(store.load(puzzle_id), Some(GamePayload::empty()));

        store.remove(puzzle_id);
        assert_eq!(store.load(puzzle_id), None);
    }
}
