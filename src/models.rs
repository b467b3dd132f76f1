use serde::{Deserialize, Serialize};

pub const LOAD_SUCCESS_MESSAGE: &str = "Data loaded successfully";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadDataRequest {
    /// Absent and `null` are both treated as "no data".
    #[serde(default)]
    pub data: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDataResponse {
    pub message: String,
    pub count: usize,
}

impl LoadDataResponse {
    pub fn loaded(count: usize) -> Self {
        Self {
            message: LOAD_SUCCESS_MESSAGE.to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    pub theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    /// `data:image/png;base64,...`
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
