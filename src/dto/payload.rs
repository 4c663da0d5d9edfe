//! The progress snapshot exchanged with both stores.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::dto::validation::{validate_correct_groups, validate_payload_consistency};
use crate::model::Attempt;

/// Minimal serializable snapshot of session progress: the wire and storage
/// form of a game, with no embedded puzzle, user, or live timestamps.
///
/// Boundary rule: `score` must equal `correct.len()`; a payload violating
/// this is rejected as invalid, never silently corrected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[validate(schema(function = validate_payload_consistency))]
pub struct GamePayload {
    /// Number of solved groups, 0..=4.
    #[validate(range(max = 4))]
    pub score: u8,
    /// Every submitted guess of four block ids, in submission order.
    pub attempts: Vec<Attempt>,
    /// Ids of the solved groups.
    #[validate(custom(function = validate_correct_groups))]
    pub correct: Vec<Uuid>,
    /// RFC 3339 timestamp set once the session has ended; absent or null
    /// means "not completed".
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<OffsetDateTime>,
}

impl Default for GamePayload {
    fn default() -> Self {
        Self::empty()
    }
}

impl GamePayload {
    /// Canonical empty payload: no attempts, nothing solved, not completed.
    pub fn empty() -> Self {
        Self {
            score: 0,
            attempts: Vec::new(),
            correct: Vec::new(),
            completed_at: None,
        }
    }

    /// Whether the payload satisfies its own internal schema, independent of
    /// any puzzle it may be paired with.
    pub fn is_schema_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn attempt() -> Attempt {
        [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()]
    }

    #[test]
    fn empty_payload_is_valid() {
        assert!(GamePayload::empty().is_schema_valid());
    }

    #[test]
    fn score_must_match_correct_length() {
        let payload = GamePayload {
            score: 2,
            attempts: vec![attempt(), attempt()],
            correct: vec![Uuid::new_v4()],
            completed_at: None,
        };
        assert!(!payload.is_schema_valid());
    }

    #[test]
    fn score_above_four_is_rejected() {
        let payload = GamePayload {
            score: 5,
            attempts: Vec::new(),
            correct: Vec::new(),
            completed_at: None,
        };
        assert!(!payload.is_schema_valid());
    }

    #[test]
    fn duplicate_correct_group_is_rejected() {
        let group = Uuid::new_v4();
        let payload = GamePayload {
            score: 2,
            attempts: vec![attempt(), attempt()],
            correct: vec![group, group],
            completed_at: None,
        };
        assert!(!payload.is_schema_valid());
    }

    #[test]
    fn completed_at_round_trips_as_rfc3339() {
        let payload = GamePayload {
            score: 0,
            attempts: Vec::new(),
            correct: Vec::new(),
            completed_at: Some(datetime!(2025-03-01 12:30:00 UTC)),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("2025-03-01T12:30:00Z"));

        let back: GamePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn absent_completed_at_stays_absent() {
        let json = r#"{"score":0,"attempts":[],"correct":[]}"#;
        let payload: GamePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.completed_at, None);

        let null_json = r#"{"score":0,"attempts":[],"correct":[],"completed_at":null}"#;
        let payload: GamePayload = serde_json::from_str(null_json).unwrap();
        assert_eq!(payload.completed_at, None);
    }

    #[test]
    fn wrong_length_attempt_fails_deserialization() {
        let json = format!(
            r#"{{"score":0,"attempts":[["{}","{}","{}"]],"correct":[]}}"#,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<GamePayload>(&json).is_err());
    }
}
