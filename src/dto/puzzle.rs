//! Puzzle shapes as served by the backend API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::Difficulty;

/// Puzzle as served by the backend API.
///
/// Block values may arrive obfuscated (see [`crate::codec`]) and the attempt
/// cap may be omitted, in which case the difficulty-derived default from
/// [`crate::config::EngineConfig`] applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleDto {
    /// Primary key of the puzzle.
    pub id: Uuid,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Explicit attempt-cap override, if the puzzle carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    /// Groups of blocks.
    pub groups: Vec<PuzzleGroupDto>,
    /// When the requesting user liked this puzzle, if authenticated.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub liked_at: Option<OffsetDateTime>,
}

/// Group entry inside a served puzzle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleGroupDto {
    /// Stable identifier for the group.
    pub id: Uuid,
    /// The human-readable connection.
    pub description: String,
    /// Blocks that make up the group.
    pub blocks: Vec<PuzzleBlockDto>,
}

/// Block entry inside a served puzzle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleBlockDto {
    /// Stable identifier for the block.
    pub id: Uuid,
    /// Back-reference to the owning group.
    pub puzzle_group_id: Uuid,
    /// Display text; possibly base64-obfuscated on unauthenticated paths.
    pub value: String,
}
