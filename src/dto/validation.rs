//! Validation helpers for wire payloads.

use uuid::Uuid;
use validator::ValidationError;

use crate::dto::payload::GamePayload;
use crate::model::puzzle::GROUP_COUNT;

/// Validates the solved-group list: at most [`GROUP_COUNT`] entries, no
/// duplicates.
pub fn validate_correct_groups(correct: &[Uuid]) -> Result<(), ValidationError> {
    if correct.len() > GROUP_COUNT {
        let mut err = ValidationError::new("correct_length");
        err.message = Some(
            format!(
                "at most {GROUP_COUNT} groups can be solved (got {})",
                correct.len()
            )
            .into(),
        );
        return Err(err);
    }

    for (index, group_id) in correct.iter().enumerate() {
        if correct[..index].contains(group_id) {
            let mut err = ValidationError::new("correct_duplicate");
            err.message = Some(format!("group `{group_id}` listed more than once").into());
            return Err(err);
        }
    }

    Ok(())
}

/// Schema-level check tying the payload fields together: the score must
/// equal the number of solved groups.
pub fn validate_payload_consistency(payload: &GamePayload) -> Result<(), ValidationError> {
    if payload.score as usize != payload.correct.len() {
        let mut err = ValidationError::new("score_mismatch");
        err.message = Some(
            format!(
                "score {} does not match {} solved groups",
                payload.score,
                payload.correct.len()
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_up_to_four_distinct_groups() {
        let groups: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        assert!(validate_correct_groups(&groups).is_ok());
        assert!(validate_correct_groups(&[]).is_ok());
    }

    #[test]
    fn rejects_five_groups() {
        let groups: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        assert!(validate_correct_groups(&groups).is_err());
    }

    #[test]
    fn rejects_duplicates() {
        let group = Uuid::new_v4();
        assert!(validate_correct_groups(&[group, group]).is_err());
    }
}
