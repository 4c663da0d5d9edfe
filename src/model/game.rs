//! The live game session object and its owner.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::puzzle::Puzzle;

/// Owner of a game session, as known to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier for the user.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// One submitted guess: exactly four block ids, in the order they were
/// selected, recorded regardless of correctness.
pub type Attempt = [Uuid; 4];

/// Live, hydrated session object for a single puzzle-solving session.
///
/// Owned exclusively by the session that created it; the serializable
/// projection of its progress is [`crate::dto::payload::GamePayload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Primary key of the game.
    pub id: Uuid,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Set on the first grid interaction.
    pub started_at: Option<OffsetDateTime>,
    /// Multiplayer-challenge code carried over from the older generation.
    pub challenge_code: Option<String>,
    /// Number of solved groups; always equals `correct.len()`.
    pub score: u8,
    /// Every submitted guess, in submission order.
    pub attempts: Vec<Attempt>,
    /// Ids of the groups the player has identified.
    pub correct: Vec<Uuid>,
    /// Present once the session has ended, won or lost.
    pub completed_at: Option<OffsetDateTime>,
    /// The puzzle this session is played against.
    pub puzzle: Puzzle,
    /// Owner, when an authenticated user is present.
    pub user: Option<User>,
}

impl Game {
    /// Start a brand-new session with no recorded progress.
    pub fn new(puzzle: Puzzle, user: Option<User>, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            started_at: None,
            challenge_code: None,
            score: 0,
            attempts: Vec::new(),
            correct: Vec::new(),
            completed_at: None,
            puzzle,
            user,
        }
    }

    /// Whether the session has reached a terminal state.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether every group of the puzzle has been solved.
    pub fn is_won(&self) -> bool {
        self.correct.len() == self.puzzle.groups.len()
    }

    /// Whether the attempt cap has been reached without finishing.
    pub fn is_lost(&self) -> bool {
        !self.is_won() && self.attempts.len() >= self.puzzle.max_attempts as usize
    }
}
