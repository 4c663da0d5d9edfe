//! Runtime domain types: puzzles, blocks, groups, and the live game session.

pub mod game;
pub mod puzzle;

pub use game::{Attempt, Game, User};
pub use puzzle::{
    BLOCKS_PER_GROUP, Difficulty, GROUP_COUNT, Puzzle, PuzzleBlock, PuzzleGroup,
    PuzzleIntegrityError, blocks_share_group,
};

#[cfg(test)]
pub(crate) mod test_support {
    use uuid::Uuid;

    use super::puzzle::{BLOCKS_PER_GROUP, Difficulty, GROUP_COUNT, Puzzle, PuzzleBlock, PuzzleGroup};

    /// Build a well-formed 4x4 puzzle for tests, with the given attempt cap.
    pub fn sample_puzzle(max_attempts: u32) -> Puzzle {
        let groups = (0..GROUP_COUNT)
            .map(|g| {
                let group_id = Uuid::new_v4();
                PuzzleGroup {
                    id: group_id,
                    description: format!("connection {g}"),
                    blocks: (0..BLOCKS_PER_GROUP)
                        .map(|b| PuzzleBlock {
                            id: Uuid::new_v4(),
                            puzzle_group_id: group_id,
                            value: format!("word {g}-{b}"),
                        })
                        .collect(),
                }
            })
            .collect();

        Puzzle::new(Uuid::new_v4(), Difficulty::Medium, max_attempts, groups)
            .expect("sample puzzle is well-formed")
    }
}
