use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use crate::error::{Result, AppError};
use crate::scrape::CLIENT;

const SPEAK_URL: &str = "https://api.deepgram.com/v1/speak?model=aura-asteria-en";

#[derive(Serialize)]
struct SpeakRequest<'a> {
    text: &'a str,
}

/// Synthesizes speech for `text` and returns the WAV bytes. Replies are
/// short, so the audio is buffered rather than streamed.
pub async fn synthesize(api_key: &str, text: &str) -> Result<Vec<u8>> {
    let response = CLIENT
        .post(SPEAK_URL)
        .header(AUTHORIZATION, format!("Token {}", api_key))
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "audio/wav")
        .json(&SpeakRequest { text })
        .send()
        .await
        .map_err(|e| AppError::Speech(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        eprintln!("Speech synthesis error: {} {}", status, body);
        return Err(AppError::Speech(format!("upstream returned {}", status)));
    }

    let audio = response
        .bytes()
        .await
        .map_err(|e| AppError::Speech(e.to_string()))?;

    Ok(audio.to_vec())
}
