//! Reconciliation between the locally-cached and server-held progress
//! snapshots for a puzzle, plus the stale-reference gate that protects a
//! resume against payloads recorded for an older revision of the puzzle.

use tracing::debug;

use crate::dto::payload::GamePayload;
use crate::model::Puzzle;

/// Pick the progress snapshot to resume from when a server copy and a local
/// copy may both exist.
///
/// Schema-invalid payloads are treated as absent. When both survive, the one
/// with more recorded attempts wins; on a tie the server copy does, since the
/// local cache can hold writes the server rejected. `None` means no usable
/// progress exists and the caller should start fresh.
pub fn pick_latest_game(
    server: Option<GamePayload>,
    local: Option<GamePayload>,
) -> Option<GamePayload> {
    let server = server.filter(GamePayload::is_schema_valid);
    let local = local.filter(GamePayload::is_schema_valid);

    match (server, local) {
        (Some(server), Some(local)) => {
            if local.attempts.len() > server.attempts.len() {
                Some(local)
            } else {
                Some(server)
            }
        }
        (Some(server), None) => Some(server),
        (None, Some(local)) => Some(local),
        (None, None) => None,
    }
}

/// Whether a payload can be replayed against this puzzle: every block id in
/// its attempts and every group id in its solved list must exist in the
/// puzzle. A single dangling reference rejects the payload wholesale; a
/// partially-replayed session would misreport the remaining attempts.
pub fn is_game_payload_valid(payload: &GamePayload, puzzle: &Puzzle) -> bool {
    let block_ids = puzzle.block_ids();
    let group_ids = puzzle.group_ids();

    payload
        .attempts
        .iter()
        .flatten()
        .all(|block_id| block_ids.contains(block_id))
        && payload
            .correct
            .iter()
            .all(|group_id| group_ids.contains(group_id))
}

/// Full resolution step for a resume: reconcile the two copies, gate the
/// winner against the current puzzle, and fall back to an empty payload when
/// nothing usable survives.
pub fn resolve_payload(
    server: Option<GamePayload>,
    local: Option<GamePayload>,
    puzzle: &Puzzle,
) -> GamePayload {
    match pick_latest_game(server, local) {
        Some(payload) if is_game_payload_valid(&payload, puzzle) => payload,
        Some(_) => {
            debug!(
                puzzle_id = %puzzle.id,
                "cached progress references unknown blocks or groups; starting fresh"
            );
            GamePayload::empty()
        }
        None => GamePayload::empty(),
    }
}
