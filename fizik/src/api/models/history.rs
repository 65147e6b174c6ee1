use crate::history::HistoryPoint;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Exercise to chart; defaults to the one logged most often
    pub exercise: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    /// Every exercise name the user has logged, sorted
    pub exercises: Vec<String>,
    /// The exercise the rest of the response describes
    pub exercise: Option<String>,
    /// One point per set, oldest first
    pub points: Vec<HistoryPoint>,
    pub personal_best: Option<HistoryPoint>,
    /// Most recent sets, newest first
    pub recent_sets: Vec<HistoryPoint>,
}
