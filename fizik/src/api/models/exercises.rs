use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ExerciseSearchQuery {
    /// Case-insensitive substring to match
    pub q: Option<String>,
    /// Maximum number of suggestions (default 8, capped at 50)
    pub limit: Option<usize>,
}
