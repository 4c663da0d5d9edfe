//! Session lifecycle: building puzzles from wire DTOs, starting fresh games,
//! and resuming from reconciled cached progress.

use time::OffsetDateTime;
use tracing::warn;

use crate::codec;
use crate::config::EngineConfig;
use crate::dto::puzzle::PuzzleDto;
use crate::error::ServiceError;
use crate::model::{Game, Puzzle, PuzzleBlock, PuzzleGroup, User};
use crate::services::reconciler::resolve_payload;
use crate::session::GameSession;
use crate::store::{LocalStore, RemoteStore};

/// Turn a served puzzle into the validated runtime model: block values are
/// decoded, the attempt cap falls back to the difficulty-derived default,
/// and structural invariants are checked.
pub fn build_puzzle(dto: PuzzleDto, config: &EngineConfig) -> Result<Puzzle, ServiceError> {
    let max_attempts = dto
        .max_attempts
        .unwrap_or_else(|| config.default_max_attempts(dto.difficulty));

    let groups = dto
        .groups
        .into_iter()
        .map(|group| PuzzleGroup {
            id: group.id,
            description: group.description,
            blocks: group
                .blocks
                .into_iter()
                .map(|block| PuzzleBlock {
                    id: block.id,
                    puzzle_group_id: block.puzzle_group_id,
                    value: codec::decode_block_text(&block.value),
                })
                .collect(),
        })
        .collect();

    Puzzle::new(dto.id, dto.difficulty, max_attempts, groups).map_err(Into::into)
}

/// Start a brand-new session for a puzzle with no prior progress.
pub fn create_game(puzzle: Puzzle, user: Option<User>, now: OffsetDateTime) -> GameSession {
    GameSession::new(Game::new(puzzle, user, now))
}

/// Load path for opening a puzzle: read the locally-cached payload, fetch
/// the server copy when a user is present, reconcile, gate against the
/// current puzzle, and hydrate, or start fresh when nothing usable
/// survives.
///
/// A remote fetch failure degrades to "no server copy" so cached local
/// progress still resumes offline.
pub async fn resume_or_create(
    puzzle: Puzzle,
    user: Option<User>,
    local: &dyn LocalStore,
    remote: Option<&dyn RemoteStore>,
    now: OffsetDateTime,
) -> GameSession {
    let local_copy = local.load(puzzle.id);

    let server_copy = match (user.as_ref(), remote) {
        (Some(_), Some(remote)) => match remote.fetch_game(puzzle.id).await {
            Ok(copy) => copy,
            Err(err) => {
                warn!(
                    puzzle_id = %puzzle.id,
                    error = %err,
                    "failed to fetch server progress; using local copy only"
                );
                None
            }
        },
        _ => None,
    };

    let payload = resolve_payload(server_copy, local_copy, &puzzle);
    GameSession::new(codec::hydrate(payload, puzzle, user, now))
}
