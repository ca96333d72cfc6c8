use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's rating of a movie title.
///
/// Votes are strictly binary. "Not voted" is the absence of a record and is
/// only ever rendered as `0` in listing annotations, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i16)]
pub enum Vote {
    Down = -1,
    Up = 1,
}

impl Vote {
    pub fn value(self) -> i16 {
        self as i16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid vote value {0}, must be -1 or 1")]
pub struct InvalidVoteValue(pub i32);

impl TryFrom<i32> for Vote {
    type Error = InvalidVoteValue;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Vote::Down),
            1 => Ok(Vote::Up),
            other => Err(InvalidVoteValue(other)),
        }
    }
}

impl TryFrom<i16> for Vote {
    type Error = InvalidVoteValue;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Vote::try_from(i32::from(value))
    }
}

impl From<Vote> for i32 {
    fn from(vote: Vote) -> Self {
        i32::from(vote.value())
    }
}

/// One stored rating; unique per `(user_id, title)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: i64,
    pub user_id: Uuid,
    /// Catalog identifier of the movie that received the first vote
    pub movie_id: String,
    pub title: String,
    pub vote: Vote,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /movies/vote/`.
///
/// `user_vote` stays a raw integer on the wire so that out-of-range values
/// reach the service and are reported as an invalid vote rather than as a
/// malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub movie_id: String,
    pub user_vote: i32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plus_and_minus_one_are_votes() {
        assert_eq!(Vote::try_from(1), Ok(Vote::Up));
        assert_eq!(Vote::try_from(-1), Ok(Vote::Down));
        assert_eq!(Vote::try_from(0), Err(InvalidVoteValue(0)));
        assert_eq!(Vote::try_from(2), Err(InvalidVoteValue(2)));
    }

    #[test]
    fn vote_serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&Vote::Down).unwrap(), "-1");
        let parsed: Vote = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Vote::Up);
        assert!(serde_json::from_str::<Vote>("3").is_err());
    }
}
