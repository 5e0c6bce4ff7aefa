use serde::{Deserialize, Serialize};

// Missing fields default to empty strings so they take the same validation
// path as explicitly empty ones.
#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Deserialize)]
pub struct SayRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct SayResponse {
    pub status: &'static str,
}

#[derive(Deserialize)]
pub struct Esp32Params {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct TtsParams {
    pub text: Option<String>,
}
