use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Display order is significant.
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
}

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

/// `?skip=&limit=` on the listing endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListParams {
    /// Negative values are treated as zero, `limit` is capped.
    pub fn clamped(self) -> Self {
        Self {
            skip: self.skip.max(0),
            limit: self.limit.clamp(0, MAX_LIMIT),
        }
    }
}
