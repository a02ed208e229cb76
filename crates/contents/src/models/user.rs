//! User summaries for author selection.

use serde::{Deserialize, Serialize};

/// A user as listed in the author select box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}
