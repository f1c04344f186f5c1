//! Membership entity.
//!
//! Maps to the `membership` table in the database schema.

use serde::{Deserialize, Serialize};

/// Binds one user to one channel.
///
/// Maps to the `membership` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - channel_id: BIGINT NOT NULL REFERENCES channel(id) ON DELETE CASCADE
/// - user_id: BIGINT NOT NULL REFERENCES "user"(id) ON DELETE CASCADE
/// - is_editor: BOOLEAN NOT NULL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default)]
    pub id: i64,

    pub user_id: i64,

    pub channel_id: i64,

    /// Editors may post on behalf of the channel
    pub is_editor: bool,
}

impl Membership {
    /// The membership a channel leader receives when the channel is created.
    pub fn leader(user_id: i64, channel_id: i64) -> Self {
        Self {
            id: 0,
            user_id,
            channel_id,
            is_editor: true,
        }
    }
}
