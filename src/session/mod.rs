//! The game-session state machine: block selection, attempt evaluation, and
//! win/loss determination.
//!
//! Evaluation is entirely local and synchronous; persistence is a
//! fire-and-forget side effect handled by
//! [`crate::services::save_coordinator`].

pub mod grid;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::puzzle::{BLOCKS_PER_GROUP, blocks_share_group};
use crate::model::{Game, PuzzleBlock};

pub use grid::{GridState, Tile};

use grid::Toggle;

/// High-level phase of a puzzle-solving session.
///
/// `Won` and `Lost` are terminal and distinguished only by whether every
/// group was solved at the moment `completed_at` was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No grid interaction has happened yet.
    NotStarted,
    /// At least one block has been selected; the session is live.
    InProgress,
    /// Every group was solved before the attempt cap.
    Won,
    /// The attempt cap was exhausted first.
    Lost,
}

/// What a single block toggle did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The session is terminal or the id names no selectable block; nothing
    /// changed.
    Ignored,
    /// Four blocks were already selected; the fifth was refused.
    SelectionFull,
    /// Block added to the selection (fewer than four selected so far).
    Selected,
    /// Block removed from the selection.
    Deselected,
    /// The auto-submitted guess matched a group.
    Matched {
        /// The solved group.
        group_id: Uuid,
        /// True when this was the final group and the session is now won.
        won: bool,
    },
    /// The auto-submitted guess matched no group and was recorded.
    Missed {
        /// True when the attempt cap is now exhausted and the session lost.
        lost: bool,
    },
}

/// A live session: the hydrated game plus the ephemeral grid state, evolved
/// one block-selection event at a time.
#[derive(Debug, Clone)]
pub struct GameSession {
    game: Game,
    grid: GridState,
    phase: SessionPhase,
}

impl GameSession {
    /// Wrap a game (fresh or hydrated from a stored payload) in a session,
    /// deriving the phase from its recorded progress.
    pub fn new(game: Game) -> Self {
        let phase = if game.is_completed() {
            if game.is_won() {
                SessionPhase::Won
            } else {
                SessionPhase::Lost
            }
        } else if game.started_at.is_some()
            || !game.attempts.is_empty()
            || !game.correct.is_empty()
        {
            SessionPhase::InProgress
        } else {
            SessionPhase::NotStarted
        };

        let grid = GridState::layout(&game.puzzle, &game.correct);

        Self { game, grid, phase }
    }

    /// The underlying game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The rendered grid.
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether every group has been solved.
    pub fn is_won(&self) -> bool {
        self.phase == SessionPhase::Won
    }

    /// Whether the attempt cap was exhausted without finishing.
    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::Lost
    }

    /// Whether the grid still accepts input.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::NotStarted | SessionPhase::InProgress
        )
    }

    /// Clear the wrong-guess flash once the caller's animation delay has
    /// elapsed.
    pub fn acknowledge_wrong(&mut self) {
        self.grid.clear_wrong();
    }

    /// Toggle a block's membership in the selection. The first selection
    /// starts the session; reaching four selected blocks auto-submits the
    /// guess. Terminal sessions ignore every event.
    pub fn toggle_block(&mut self, block_id: Uuid, now: OffsetDateTime) -> SelectionOutcome {
        if !self.accepts_input() {
            return SelectionOutcome::Ignored;
        }

        match self.grid.toggle(block_id) {
            Toggle::Unknown => SelectionOutcome::Ignored,
            Toggle::Full => SelectionOutcome::SelectionFull,
            Toggle::Deselected => {
                self.grid.clear_wrong();
                SelectionOutcome::Deselected
            }
            Toggle::Selected => {
                self.grid.clear_wrong();
                self.begin_if_needed(now);

                if self.grid.selected().len() == BLOCKS_PER_GROUP {
                    self.submit_selection(now)
                } else {
                    SelectionOutcome::Selected
                }
            }
        }
    }

    fn begin_if_needed(&mut self, now: OffsetDateTime) {
        if self.phase == SessionPhase::NotStarted {
            self.phase = SessionPhase::InProgress;
            self.game.started_at = Some(now);
        }
    }

    /// Evaluate the four selected blocks against the unsolved groups.
    fn submit_selection(&mut self, now: OffsetDateTime) -> SelectionOutcome {
        let selection = self.grid.take_selection();
        let blocks: Vec<&PuzzleBlock> = selection
            .iter()
            .filter_map(|id| self.grid.find_block(*id))
            .collect();

        if blocks.len() == BLOCKS_PER_GROUP && blocks_share_group(&blocks) {
            let group_id = blocks[0].puzzle_group_id;
            self.record_match(group_id, now)
        } else {
            self.record_miss(&selection, now)
        }
    }

    fn record_match(&mut self, group_id: Uuid, now: OffsetDateTime) -> SelectionOutcome {
        self.game.correct.push(group_id);
        self.game.score = self.game.correct.len() as u8;

        let description = self
            .game
            .puzzle
            .find_group(group_id)
            .map(|group| group.description.clone())
            .unwrap_or_default();
        self.grid.solve_group(group_id, description);

        let won = self.game.correct.len() == self.game.puzzle.groups.len();
        if won {
            self.game.completed_at = Some(now);
            self.phase = SessionPhase::Won;
        }

        SelectionOutcome::Matched { group_id, won }
    }

    fn record_miss(&mut self, selection: &[Uuid], now: OffsetDateTime) -> SelectionOutcome {
        let mut attempt = [Uuid::nil(); BLOCKS_PER_GROUP];
        attempt.copy_from_slice(selection);
        self.game.attempts.push(attempt);
        self.grid.raise_wrong();

        let lost = self.game.attempts.len() >= self.game.puzzle.max_attempts as usize;
        if lost {
            self.game.completed_at = Some(now);
            self.phase = SessionPhase::Lost;
        }

        SelectionOutcome::Missed { lost }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::model::test_support::sample_puzzle;
    use crate::model::{Game, Puzzle};

    const NOW: OffsetDateTime = datetime!(2025-03-01 10:00:00 UTC);

    fn fresh_session(max_attempts: u32) -> GameSession {
        GameSession::new(Game::new(sample_puzzle(max_attempts), None, NOW))
    }

    fn group_block_ids(puzzle: &Puzzle, group: usize) -> Vec<Uuid> {
        puzzle.groups[group].blocks.iter().map(|b| b.id).collect()
    }

    /// Four blocks drawn from three different groups: never a match.
    fn mixed_selection(puzzle: &Puzzle, skip_groups: &[Uuid]) -> Vec<Uuid> {
        let available: Vec<&_> = puzzle
            .groups
            .iter()
            .filter(|g| !skip_groups.contains(&g.id))
            .collect();
        vec![
            available[0].blocks[0].id,
            available[0].blocks[1].id,
            available[1].blocks[0].id,
            available[2].blocks[0].id,
        ]
    }

    fn submit(session: &mut GameSession, ids: &[Uuid]) -> SelectionOutcome {
        let mut last = SelectionOutcome::Ignored;
        for id in ids {
            last = session.toggle_block(*id, NOW);
        }
        last
    }

    #[test]
    fn first_selection_starts_the_session() {
        let mut session = fresh_session(6);
        assert_eq!(session.phase(), SessionPhase::NotStarted);

        let id = session.game().puzzle.groups[0].blocks[0].id;
        assert_eq!(session.toggle_block(id, NOW), SelectionOutcome::Selected);
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.game().started_at, Some(NOW));
    }

    #[test]
    fn reaching_four_selected_blocks_auto_submits() {
        let mut session = fresh_session(6);
        let puzzle = session.game().puzzle.clone();
        let ids = mixed_selection(&puzzle, &[]);

        for id in &ids[..3] {
            assert_eq!(session.toggle_block(*id, NOW), SelectionOutcome::Selected);
        }
        assert_eq!(
            session.toggle_block(ids[3], NOW),
            SelectionOutcome::Missed { lost: false }
        );
        assert!(session.grid().selected().is_empty());
    }

    #[test]
    fn correct_guess_solves_the_group_and_updates_score() {
        let mut session = fresh_session(6);
        let puzzle = session.game().puzzle.clone();
        let group = &puzzle.groups[1];

        let outcome = submit(&mut session, &group_block_ids(&puzzle, 1));
        assert_eq!(
            outcome,
            SelectionOutcome::Matched {
                group_id: group.id,
                won: false
            }
        );
        assert_eq!(session.game().score, 1);
        assert_eq!(session.game().correct, vec![group.id]);
        assert!(session.grid().selected().is_empty());
        assert!(!session.grid().is_wrong());
        assert_eq!(session.game().attempts.len(), 0);
    }

    #[test]
    fn wrong_guess_records_the_attempt_in_selection_order() {
        let mut session = fresh_session(6);
        let puzzle = session.game().puzzle.clone();
        let ids = mixed_selection(&puzzle, &[]);

        let outcome = submit(&mut session, &ids);
        assert_eq!(outcome, SelectionOutcome::Missed { lost: false });
        assert_eq!(session.game().attempts, vec![[ids[0], ids[1], ids[2], ids[3]]]);
        assert!(session.grid().is_wrong());
        assert_eq!(session.game().score, 0);

        session.acknowledge_wrong();
        assert!(!session.grid().is_wrong());
    }

    #[test]
    fn score_always_equals_solved_group_count() {
        let mut session = fresh_session(6);
        let puzzle = session.game().puzzle.clone();

        for group in 0..3 {
            submit(&mut session, &group_block_ids(&puzzle, group));
            assert_eq!(
                session.game().score as usize,
                session.game().correct.len()
            );
        }
    }

    #[test]
    fn six_misses_lose_the_session_exactly_at_the_cap() {
        let mut session = fresh_session(6);
        let puzzle = session.game().puzzle.clone();

        for round in 0..6 {
            let ids = mixed_selection(&puzzle, &[]);
            let outcome = submit(&mut session, &ids);
            if round < 5 {
                assert_eq!(outcome, SelectionOutcome::Missed { lost: false });
                assert_eq!(session.phase(), SessionPhase::InProgress);
            } else {
                assert_eq!(outcome, SelectionOutcome::Missed { lost: true });
            }
        }

        assert_eq!(session.game().attempts.len(), 6);
        assert_eq!(session.phase(), SessionPhase::Lost);
        assert!(session.is_game_over());
        assert!(session.game().completed_at.is_some());

        // Grid is disabled once terminal.
        let id = puzzle.groups[0].blocks[0].id;
        assert_eq!(session.toggle_block(id, NOW), SelectionOutcome::Ignored);
    }

    #[test]
    fn four_straight_matches_win_the_session() {
        let mut session = fresh_session(6);
        let puzzle = session.game().puzzle.clone();

        for group in 0..3 {
            let outcome = submit(&mut session, &group_block_ids(&puzzle, group));
            assert!(matches!(
                outcome,
                SelectionOutcome::Matched { won: false, .. }
            ));
        }

        let outcome = submit(&mut session, &group_block_ids(&puzzle, 3));
        assert_eq!(
            outcome,
            SelectionOutcome::Matched {
                group_id: puzzle.groups[3].id,
                won: true
            }
        );

        assert_eq!(session.phase(), SessionPhase::Won);
        assert!(session.is_won());
        assert_eq!(session.game().score, 4);
        assert_eq!(session.game().correct.len(), 4);
        assert!(session.game().completed_at.is_some());
        assert!(session.game().attempts.is_empty());
    }

    #[test]
    fn hydrated_progress_resumes_in_progress() {
        let puzzle = sample_puzzle(6);
        let solved = puzzle.groups[0].id;
        let mut game = Game::new(puzzle, None, NOW);
        game.started_at = Some(NOW);
        game.correct.push(solved);
        game.score = 1;

        let session = GameSession::new(game);
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.grid().tiles().len(), 13);
    }

    #[test]
    fn completed_game_resumes_terminal() {
        let puzzle = sample_puzzle(6);
        let groups: Vec<Uuid> = puzzle.groups.iter().map(|g| g.id).collect();
        let mut game = Game::new(puzzle, None, NOW);
        game.correct = groups;
        game.score = 4;
        game.completed_at = Some(NOW);

        let mut session = GameSession::new(game);
        assert_eq!(session.phase(), SessionPhase::Won);
        assert_eq!(
            session.toggle_block(Uuid::new_v4(), NOW),
            SelectionOutcome::Ignored
        );
    }
}
