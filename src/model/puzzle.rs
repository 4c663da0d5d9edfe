//! The puzzle model: groups, blocks, and their structural invariants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Number of groups in a puzzle and number of blocks in a group.
///
/// The current design fixes both at 4; earlier generations of the product
/// allowed flexible counts.
pub const GROUP_COUNT: usize = 4;
/// Number of blocks in each group (and in each submitted attempt).
pub const BLOCKS_PER_GROUP: usize = 4;

/// Puzzle difficulty, used to derive the default attempt cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Generous attempt cap.
    Easy,
    /// Standard attempt cap.
    Medium,
    /// Tight attempt cap.
    Hard,
}

/// A single text tile in the puzzle grid; belongs to exactly one group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleBlock {
    /// Stable identifier for the block.
    pub id: Uuid,
    /// Back-reference to the owning group (not ownership).
    pub puzzle_group_id: Uuid,
    /// Display text, already decoded for rendering.
    pub value: String,
}

/// A set of blocks sharing a hidden connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleGroup {
    /// Stable identifier for the group.
    pub id: Uuid,
    /// The human-readable connection, revealed once the group is solved.
    pub description: String,
    /// Blocks that make up the group.
    pub blocks: Vec<PuzzleBlock>,
}

/// Immutable description of a puzzle, supplied by the backend API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Puzzle {
    /// Primary key of the puzzle.
    pub id: Uuid,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Cap on the number of recorded attempts before the session is lost.
    pub max_attempts: u32,
    /// Groups of blocks; every block belongs to exactly one group.
    pub groups: Vec<PuzzleGroup>,
}

/// Structural violations detected when assembling a [`Puzzle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleIntegrityError {
    /// The puzzle does not contain exactly [`GROUP_COUNT`] groups.
    #[error("puzzle must contain exactly {GROUP_COUNT} groups (got {count})")]
    GroupCount {
        /// Number of groups actually present.
        count: usize,
    },
    /// A group does not contain exactly [`BLOCKS_PER_GROUP`] blocks.
    #[error("group `{group_id}` must contain exactly {BLOCKS_PER_GROUP} blocks (got {count})")]
    BlockCount {
        /// Offending group.
        group_id: Uuid,
        /// Number of blocks actually present.
        count: usize,
    },
    /// A block's back-reference names a group other than the one holding it.
    #[error("block `{block_id}` references group `{referenced}` but lives in group `{actual}`")]
    GroupReferenceMismatch {
        /// Offending block.
        block_id: Uuid,
        /// Group named by the back-reference.
        referenced: Uuid,
        /// Group the block actually lives in.
        actual: Uuid,
    },
    /// The same block id appears more than once across the puzzle.
    #[error("duplicate block id `{block_id}`")]
    DuplicateBlock {
        /// Repeated block id.
        block_id: Uuid,
    },
    /// The same group id appears more than once.
    #[error("duplicate group id `{group_id}`")]
    DuplicateGroup {
        /// Repeated group id.
        group_id: Uuid,
    },
    /// The attempt cap must allow at least one guess.
    #[error("max_attempts must be strictly positive")]
    ZeroAttemptCap,
}

impl Puzzle {
    /// Assemble a puzzle and check its structural invariants: exactly
    /// [`GROUP_COUNT`] groups of [`BLOCKS_PER_GROUP`] blocks, consistent
    /// group back-references, and no repeated ids.
    pub fn new(
        id: Uuid,
        difficulty: Difficulty,
        max_attempts: u32,
        groups: Vec<PuzzleGroup>,
    ) -> Result<Self, PuzzleIntegrityError> {
        if max_attempts == 0 {
            return Err(PuzzleIntegrityError::ZeroAttemptCap);
        }

        if groups.len() != GROUP_COUNT {
            return Err(PuzzleIntegrityError::GroupCount {
                count: groups.len(),
            });
        }

        let mut seen_groups = HashSet::new();
        let mut seen_blocks = HashSet::new();

        for group in &groups {
            if !seen_groups.insert(group.id) {
                return Err(PuzzleIntegrityError::DuplicateGroup { group_id: group.id });
            }

            if group.blocks.len() != BLOCKS_PER_GROUP {
                return Err(PuzzleIntegrityError::BlockCount {
                    group_id: group.id,
                    count: group.blocks.len(),
                });
            }

            for block in &group.blocks {
                if block.puzzle_group_id != group.id {
                    return Err(PuzzleIntegrityError::GroupReferenceMismatch {
                        block_id: block.id,
                        referenced: block.puzzle_group_id,
                        actual: group.id,
                    });
                }

                if !seen_blocks.insert(block.id) {
                    return Err(PuzzleIntegrityError::DuplicateBlock { block_id: block.id });
                }
            }
        }

        Ok(Self {
            id,
            difficulty,
            max_attempts,
            groups,
        })
    }

    /// Iterate over every block of every group.
    pub fn blocks(&self) -> impl Iterator<Item = &PuzzleBlock> {
        self.groups.iter().flat_map(|group| group.blocks.iter())
    }

    /// Ids of every block in the puzzle.
    pub fn block_ids(&self) -> HashSet<Uuid> {
        self.blocks().map(|block| block.id).collect()
    }

    /// Ids of every group in the puzzle.
    pub fn group_ids(&self) -> HashSet<Uuid> {
        self.groups.iter().map(|group| group.id).collect()
    }

    /// Look up a group by id.
    pub fn find_group(&self, group_id: Uuid) -> Option<&PuzzleGroup> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    /// Look up a block by id.
    pub fn find_block(&self, block_id: Uuid) -> Option<&PuzzleBlock> {
        self.blocks().find(|block| block.id == block_id)
    }
}

/// True iff every block in the slice carries an identical group reference.
///
/// An empty slice never counts as a match.
pub fn blocks_share_group(blocks: &[&PuzzleBlock]) -> bool {
    let Some(first) = blocks.first() else {
        return false;
    };

    blocks
        .iter()
        .all(|block| block.puzzle_group_id == first.puzzle_group_id)
}
