//! Channel entity.
//!
//! Maps to the `channel` table in the database schema.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validation::NOT_BLANK_REGEX;

/// A group space led by one user.
///
/// Maps to the `channel` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(255) NOT NULL UNIQUE
/// - leader_id: BIGINT NULL REFERENCES "user"(id) ON DELETE SET NULL
/// - description: TEXT NOT NULL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: i64,

    #[validate(
        regex(path = *NOT_BLANK_REGEX, message = "Channel name can not be empty"),
        length(max = 255, message = "Channel name is too long")
    )]
    pub name: String,

    /// Set to the creator on creation; cleared by the store if the leader is deleted
    #[serde(default)]
    pub leader_id: Option<i64>,

    #[validate(regex(path = *NOT_BLANK_REGEX, message = "Channel description can not be empty"))]
    pub description: String,
}

impl Channel {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            leader_id: None,
            description: description.into(),
        }
    }
}
