use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub images: Vec<String>,
    pub category_id: Option<i32>,
    pub release_date: Option<String>,
    pub duration: Option<i32>,
    pub rated: Option<String>,
    pub age_rating: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub prices: Prices,
    pub showtimes: Vec<Showtime>,
    pub position: i32,
    pub status: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Ticket prices in the smallest currency unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prices {
    pub standard: i64,
    pub vip: i64,
    pub couple: i64,
}

impl Default for Prices {
    fn default() -> Self {
        Self {
            standard: 50_000,
            vip: 60_000,
            couple: 110_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Showtime {
    pub cinema_id: i32,
    pub date: String,
    #[serde(default)]
    pub times: Vec<String>,
    pub format: Option<String>,
}

/// Admin listing filter, assembled from query parameters.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    pub status: Option<String>,
    pub created_by: Option<String>,
    /// Inclusive created_at lower bound, already floored to start of day.
    pub created_after: Option<String>,
    /// Inclusive created_at upper bound, already ceiled to end of day.
    pub created_before: Option<String>,
    /// Slugified keyword, substring-matched against the stored slug.
    pub keyword_slug: Option<String>,
}

/// Fields the create pipeline consumes. Everything except `name` is optional
/// and falls back to the documented defaults.
#[derive(Debug, Clone, Default)]
pub struct MovieDraft {
    pub name: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub images: Vec<String>,
    pub category_id: Option<i32>,
    pub release_date: Option<String>,
    pub duration: Option<i32>,
    pub rated: Option<String>,
    pub age_rating: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub price_standard: Option<i64>,
    pub price_vip: Option<i64>,
    pub price_couple: Option<i64>,
    pub showtimes: Option<Vec<Showtime>>,
    pub position: Option<i32>,
    pub status: Option<String>,
}

/// Explicit partial update: only `Some` fields are applied, so an update
/// request can never clobber stored values it did not mention.
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub images: Option<Vec<String>>,
    pub category_id: Option<i32>,
    pub release_date: Option<String>,
    pub duration: Option<i32>,
    pub rated: Option<String>,
    pub age_rating: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub price_standard: Option<i64>,
    pub price_vip: Option<i64>,
    pub price_couple: Option<i64>,
    pub showtimes: Option<Vec<Showtime>>,
    pub position: Option<i32>,
    pub status: Option<String>,
}

/// Batch operation tag for `change-multi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    Activate,
    Deactivate,
    Delete,
}

impl BatchAction {
    pub fn parse(option: &str) -> Option<Self> {
        match option {
            "active" => Some(Self::Activate),
            "inactive" => Some(Self::Deactivate),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub const fn status(self) -> Option<&'static str> {
        match self {
            Self::Activate => Some("active"),
            Self::Deactivate => Some("inactive"),
            Self::Delete => None,
        }
    }
}
