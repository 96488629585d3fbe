use serde::Deserialize;
use uuid::Uuid;

/// Request payload for casting a vote.
///
/// The vote's day is always server-assigned; clients cannot vote into the
/// past or future. The employee identity would normally come from the
/// authentication layer; it is carried in the payload here because auth is
/// a separate concern.
#[derive(Debug, Deserialize)]
pub struct CastVote {
    pub menu_id: Uuid,
    pub employee_id: Uuid,
}

/// Request payload for moving an existing vote to another menu.
#[derive(Debug, Deserialize)]
pub struct MoveVote {
    pub menu_id: Uuid,
}
