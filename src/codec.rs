//! Conversions between wire payloads and live session objects, plus the
//! reversible block-text obfuscation applied on unauthenticated transport
//! paths so solutions cannot be read straight out of the page source.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::dto::payload::GamePayload;
use crate::model::{Game, Puzzle, User};

/// Project a live game down to its serializable progress snapshot.
pub fn dehydrate(game: &Game) -> GamePayload {
    GamePayload {
        score: game.score,
        attempts: game.attempts.clone(),
        correct: game.correct.clone(),
        completed_at: game.completed_at,
    }
}

/// Reconstruct a full [`Game`] by pairing a stored payload with a freshly
/// fetched puzzle. An absent `completed_at` is preserved as "not completed".
pub fn hydrate(
    payload: GamePayload,
    puzzle: Puzzle,
    user: Option<User>,
    now: OffsetDateTime,
) -> Game {
    let has_progress = !payload.attempts.is_empty() || !payload.correct.is_empty();

    Game {
        id: Uuid::new_v4(),
        created_at: now,
        started_at: has_progress.then_some(now),
        challenge_code: None,
        score: payload.score,
        attempts: payload.attempts,
        correct: payload.correct,
        completed_at: payload.completed_at,
        puzzle,
        user,
    }
}

/// Obfuscate a block value for transport.
pub fn encode_block_text(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

/// Undo [`encode_block_text`], passing anything that is not validly encoded
/// through unchanged. Only some transport paths apply the encoding step, so
/// plain text must never be corrupted by a failed decode attempt.
pub fn decode_block_text(value: &str) -> String {
    match STANDARD.decode(value.as_bytes()) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| value.to_owned()),
        Err(_) => value.to_owned(),
    }
}

/// Decode every block value of a puzzle in place.
pub fn decode_puzzle_text(puzzle: &mut Puzzle) {
    for group in &mut puzzle.groups {
        for block in &mut group.blocks {
            block.value = decode_block_text(&block.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::model::test_support::sample_puzzle;

    #[test]
    fn dehydrate_projects_progress_fields_only() {
        let puzzle = sample_puzzle(6);
        let group_id = puzzle.groups[0].id;
        let attempt: [Uuid; 4] = core::array::from_fn(|i| puzzle.groups[0].blocks[i].id);

        let mut game = Game::new(puzzle, None, datetime!(2025-03-01 09:00:00 UTC));
        game.attempts.push(attempt);
        game.correct.push(group_id);
        game.score = 1;

        let payload = dehydrate(&game);
        assert_eq!(payload.score, 1);
        assert_eq!(payload.attempts, vec![attempt]);
        assert_eq!(payload.correct, vec![group_id]);
        assert_eq!(payload.completed_at, None);
    }

    #[test]
    fn hydrate_round_trips_through_dehydrate() {
        let puzzle = sample_puzzle(6);
        let now = datetime!(2025-03-01 09:00:00 UTC);
        let payload = GamePayload {
            score: 1,
            attempts: vec![core::array::from_fn(|i| puzzle.groups[0].blocks[i].id)],
            correct: vec![puzzle.groups[0].id],
            completed_at: None,
        };

        let game = hydrate(payload.clone(), puzzle, None, now);
        assert_eq!(game.started_at, Some(now));
        assert_eq!(dehydrate(&game), payload);
    }

    #[test]
    fn hydrating_an_empty_payload_leaves_the_session_unstarted() {
        let game = hydrate(
            GamePayload::empty(),
            sample_puzzle(6),
            None,
            datetime!(2025-03-01 09:00:00 UTC),
        );
        assert_eq!(game.started_at, None);
        assert_eq!(game.completed_at, None);
    }

    #[test]
    fn decode_inverts_encode() {
        let plain = "MOUNTAIN";
        assert_eq!(decode_block_text(&encode_block_text(plain)), plain);
    }

    #[test]
    fn decode_passes_plain_text_through() {
        for plain in ["APPLE", "ice cream", "naïve", ""] {
            assert_eq!(decode_block_text(plain), plain);
        }
    }

    #[test]
    fn decode_is_idempotent_on_decoded_output() {
        let decoded = decode_block_text(&encode_block_text("SUMMIT"));
        assert_eq!(decode_block_text(&decoded), "SUMMIT");
    }

    #[test]
    fn decode_puzzle_text_touches_every_block() {
        let mut puzzle = sample_puzzle(6);
        for group in &mut puzzle.groups {
            for block in &mut group.blocks {
                block.value = encode_block_text(&block.value);
            }
        }

        decode_puzzle_text(&mut puzzle);
        assert!(puzzle.blocks().all(|block| block.value.starts_with("word ")));
    }
}
