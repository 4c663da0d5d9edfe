//! Fire-and-forget persistence of progress snapshots, serialized per puzzle.
//!
//! The in-memory state machine never waits on a save: the local store is
//! written synchronously and the remote write runs on a detached task. At
//! most one remote save per puzzle id is in flight at a time; a newer payload
//! arriving meanwhile is parked and re-triggered once the in-flight save
//! settles.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::dto::payload::GamePayload;
use crate::store::{LocalStore, RemoteStore};

/// Payload parked behind an in-flight save for the same puzzle.
#[derive(Debug, Default)]
struct Pending {
    queued: Option<GamePayload>,
}

/// Coordinates local and remote persistence for session progress.
pub struct SaveCoordinator {
    local: Arc<dyn LocalStore>,
    remote: Option<Arc<dyn RemoteStore>>,
    in_flight: Arc<DashMap<Uuid, Pending>>,
}

impl SaveCoordinator {
    /// Build a coordinator; `remote` is `None` for anonymous sessions, which
    /// persist locally only.
    pub fn new(local: Arc<dyn LocalStore>, remote: Option<Arc<dyn RemoteStore>>) -> Self {
        Self {
            local,
            remote,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Persist a progress snapshot. The local write happens before this
    /// returns; the remote write runs on a detached task, serialized per
    /// puzzle id, so it survives the issuing session going away. A remote
    /// failure is logged and never rolls back the local state; the next
    /// attempt-triggered save retries implicitly.
    ///
    /// Once a completed session has been confirmed by the server, the local
    /// copy is removed to avoid unbounded growth.
    ///
    /// Must be called from within the embedding tokio runtime.
    pub fn persist(&self, puzzle_id: Uuid, payload: GamePayload) {
        self.local.save(puzzle_id, &payload);

        let Some(remote) = self.remote.clone() else {
            return;
        };

        use dashmap::mapref::entry::Entry;
        match self.in_flight.entry(puzzle_id) {
            Entry::Occupied(mut entry) => {
                // An earlier save is still in flight; this snapshot queues
                // logically behind it and supersedes any previously parked one.
                entry.get_mut().queued = Some(payload);
                return;
            }
            Entry::Vacant(entry) => {
                entry.insert(Pending::default());
            }
        }

        let local = Arc::clone(&self.local);
        let in_flight = Arc::clone(&self.in_flight);
        tokio::spawn(drive_saves(puzzle_id, payload, remote, local, in_flight));
    }

    /// Whether a remote save for this puzzle is currently in flight.
    pub fn is_saving(&self, puzzle_id: Uuid) -> bool {
        self.in_flight.contains_key(&puzzle_id)
    }
}

/// Remote-save loop for one puzzle id. Holds the in-flight slot until no
/// snapshot remains parked behind the last settled save.
async fn drive_saves(
    puzzle_id: Uuid,
    payload: GamePayload,
    remote: Arc<dyn RemoteStore>,
    local: Arc<dyn LocalStore>,
    in_flight: Arc<DashMap<Uuid, Pending>>,
) {
    let mut current = payload;
    loop {
        match remote.save_game(puzzle_id, current.clone()).await {
            Ok(saved) => {
                debug!(%puzzle_id, attempts = saved.attempts.len(), "progress synced");
                if saved.completed_at.is_some() {
                    local.remove(puzzle_id);
                }
            }
            Err(err) => {
                warn!(
                    %puzzle_id,
                    error = %err,
                    "remote save failed; keeping local progress"
                );
            }
        }

        // Nothing queued: release the slot. If a snapshot was parked
        // between the check and the removal, loop again with it.
        if in_flight
            .remove_if(&puzzle_id, |_, pending| pending.queued.is_none())
            .is_some()
        {
            break;
        }

        let Some(next) = in_flight
            .get_mut(&puzzle_id)
            .and_then(|mut entry| entry.queued.take())
        else {
            in_flight.remove(&puzzle_id);
            break;
        };
        current = next;
    }
}
