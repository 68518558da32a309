use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SummarizeQuery {
    pub url: Option<String>,
}

#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Success body of the server variant (`GET /summarize`).
#[derive(Serialize)]
pub struct SummarizeResponse {
    pub title: String,
    pub url: String,
    pub summary: String,
}

/// Success body of the function variant (`POST /summarize`).
#[derive(Serialize)]
pub struct FunctionSummary {
    pub summary: String,
}
