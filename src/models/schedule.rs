use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

/// Body of `POST /create-event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub user_input: String,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl ScheduleRequest {
    pub fn new(user_input: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            time_zone: time_zone.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub ics_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
