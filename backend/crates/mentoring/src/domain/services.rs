//! Domain services
//!
//! Rules for deciding a pending mentoring request.

use chrono::{DateTime, Utc};

use crate::domain::entity::{Mentor, MentoringRequest};
use crate::domain::value_object::{Decision, MentorStatus};

/// Name recorded on matches without a named mentor
pub const ADMIN_MATCHED: &str = "Admin Matched";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionError {
    NotPending,
    MentorUnavailable,
}

/// Apply an operator decision.
///
/// A match with `mentor` marks the mentor matched and links it to the
/// request. The mentor name is the mentor's own, else `mentor_name`, else
/// [`ADMIN_MATCHED`]. Nothing is changed on error.
pub fn apply_decision(
    request: &mut MentoringRequest,
    decision: Decision,
    mentor: Option<&mut Mentor>,
    mentor_name: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), DecisionError> {
    if !request.is_pending() {
        return Err(DecisionError::NotPending);
    }

    let supplied = mentor_name.map(str::trim).filter(|n| !n.is_empty());

    match decision {
        Decision::Matched => {
            let name = match mentor {
                Some(mentor) => {
                    if !mentor.is_available() {
                        return Err(DecisionError::MentorUnavailable);
                    }
                    mentor.status = MentorStatus::Matched;
                    mentor.mentoring_request_id = Some(request.request_id);
                    mentor.updated_at = now;
                    request.mentor_id = Some(mentor.mentor_id);
                    mentor.name.clone()
                }
                None => supplied.unwrap_or(ADMIN_MATCHED).to_string(),
            };
            request.mentor_name = Some(name);
        }
        Decision::Rejected => {
            if let Some(name) = supplied {
                request.mentor_name = Some(name.to_string());
            }
        }
    }

    request.status = decision.into();
    request.updated_at = now;
    Ok(())
}
