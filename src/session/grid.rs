//! The rendered grid: tiles, the current selection, and the wrong-guess
//! flash.

use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::model::puzzle::{BLOCKS_PER_GROUP, Puzzle, PuzzleBlock};

/// One rendered cell of the puzzle grid: an unsolved block, or the
/// description tile that replaces a group once it has been solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    /// A selectable, not-yet-solved block.
    Block(PuzzleBlock),
    /// A solved group, rendered as its revealed connection.
    Solved {
        /// Id of the solved group.
        group_id: Uuid,
        /// The revealed connection text.
        description: String,
    },
}

/// Result of toggling a single block, before any submission is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Toggle {
    /// Block added to the selection.
    Selected,
    /// Block removed from the selection.
    Deselected,
    /// Selection already holds four blocks; the toggle was refused.
    Full,
    /// The id names no selectable block on the grid.
    Unknown,
}

/// Ephemeral interaction state derived from a game: the tiles currently
/// rendered, the blocks the user has tapped, and the transient wrong-guess
/// flash. Not persisted directly.
#[derive(Debug, Clone)]
pub struct GridState {
    tiles: Vec<Tile>,
    selected: Vec<Uuid>,
    is_wrong: bool,
}

impl GridState {
    /// Lay out the grid for a game: already-solved groups become description
    /// tiles up front, the remaining blocks are shuffled below them.
    pub fn layout(puzzle: &Puzzle, correct: &[Uuid]) -> Self {
        let mut tiles: Vec<Tile> = puzzle
            .groups
            .iter()
            .filter(|group| correct.contains(&group.id))
            .map(|group| Tile::Solved {
                group_id: group.id,
                description: group.description.clone(),
            })
            .collect();

        let mut blocks: Vec<PuzzleBlock> = puzzle
            .groups
            .iter()
            .filter(|group| !correct.contains(&group.id))
            .flat_map(|group| group.blocks.iter().cloned())
            .collect();
        blocks.shuffle(&mut rand::rng());

        tiles.extend(blocks.into_iter().map(Tile::Block));

        Self {
            tiles,
            selected: Vec::new(),
            is_wrong: false,
        }
    }

    /// Tiles in render order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Currently selected block ids, in tap order.
    pub fn selected(&self) -> &[Uuid] {
        &self.selected
    }

    /// Whether the last submission was a miss; cleared by the caller once
    /// its retry animation has played.
    pub fn is_wrong(&self) -> bool {
        self.is_wrong
    }

    /// Drop the wrong-guess flash.
    pub(crate) fn clear_wrong(&mut self) {
        self.is_wrong = false;
    }

    pub(crate) fn raise_wrong(&mut self) {
        self.is_wrong = true;
    }

    /// Toggle a block in or out of the selection, capped at
    /// [`BLOCKS_PER_GROUP`] simultaneous members.
    pub(crate) fn toggle(&mut self, block_id: Uuid) -> Toggle {
        if let Some(position) = self.selected.iter().position(|id| *id == block_id) {
            self.selected.remove(position);
            return Toggle::Deselected;
        }

        if !self.tiles.iter().any(
            |tile| matches!(tile, Tile::Block(block) if block.id == block_id),
        ) {
            return Toggle::Unknown;
        }

        if self.selected.len() >= BLOCKS_PER_GROUP {
            return Toggle::Full;
        }

        self.selected.push(block_id);
        Toggle::Selected
    }

    /// Hand over the current selection, leaving it empty.
    pub(crate) fn take_selection(&mut self) -> Vec<Uuid> {
        std::mem::take(&mut self.selected)
    }

    /// Look up a selectable block on the grid.
    pub(crate) fn find_block(&self, block_id: Uuid) -> Option<&PuzzleBlock> {
        self.tiles.iter().find_map(|tile| match tile {
            Tile::Block(block) if block.id == block_id => Some(block),
            _ => None,
        })
    }

    /// Replace a solved group's four blocks with a single description tile
    /// at the position of the group's first remaining block.
    pub(crate) fn solve_group(&mut self, group_id: Uuid, description: String) {
        let first = self.tiles.iter().position(
            |tile| matches!(tile, Tile::Block(block) if block.puzzle_group_id == group_id),
        );

        self.tiles.retain(
            |tile| !matches!(tile, Tile::Block(block) if block.puzzle_group_id == group_id),
        );

        let insert_at = first.unwrap_or(0).min(self.tiles.len());
        self.tiles.insert(
            insert_at,
            Tile::Solved {
                group_id,
                description,
            },
        );
    }
}
