use axum::{
    routing::{get, post},
    Router,
    extract::{Json, Query, State},
    http::header,
    response::IntoResponse,
};
use tower_http::cors::{CorsLayer, Any};

use crate::error::{Result, AppError};
use crate::api::models::{
    ChatRequest, ChatResponse, Esp32Params, SayRequest, SayResponse, TtsParams,
};
use crate::scrape::{scrape_all, compose_context};
use crate::prompt::build_messages;
use crate::llm::request_completion;
use crate::{notify, speech, AppState};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/esp32", get(esp32_handler))
        .route("/tts", get(tts_handler))
        .route("/say", post(say_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let message = req.message.trim();
    if message.is_empty() {
        // Rejected before any scraping or completion work happens
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    println!("Chat question: {}", message);
    let start = std::time::Instant::now();

    // Scraping never fails the request; dead pages contribute empty slots
    let fragments = scrape_all(&state.config.pages).await;
    let context = compose_context(&fragments, state.config.max_context_chars);
    println!("Context size: {} chars", context.len());

    let messages = build_messages(&context, message);
    let reply = request_completion(
        &state.config.completion_url,
        state.config.openrouter_api_key.as_deref(),
        messages,
    )
    .await?;

    println!("Reply ready in {:?}", start.elapsed());

    // Best-effort speaker relay; the response does not wait for it
    if notify::speak_if_configured(state.config.esp32_addr.as_deref(), &reply) {
        println!("Reply relayed to speaker device");
    }

    Ok(Json(ChatResponse { reply }))
}

async fn esp32_handler(Query(params): Query<Esp32Params>) -> Json<ChatResponse> {
    match params.q {
        Some(question) => {
            println!("ESP32 asked: {}", question);
            Json(ChatResponse {
                reply: "OK".to_string(),
            })
        }
        None => Json(ChatResponse {
            reply: "No question received".to_string(),
        }),
    }
}

async fn tts_handler(
    State(state): State<AppState>,
    Query(params): Query<TtsParams>,
) -> Result<impl IntoResponse> {
    let text = params
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("text query parameter is required".to_string()))?;

    let api_key = state
        .config
        .deepgram_api_key
        .as_deref()
        .ok_or_else(|| AppError::Config("DEEPGRAM_API_KEY is not set".to_string()))?;

    let audio = speech::synthesize(api_key, &text).await?;

    Ok(([(header::CONTENT_TYPE, "audio/wav")], audio))
}

async fn say_handler(
    State(state): State<AppState>,
    Json(req): Json<SayRequest>,
) -> Result<Json<SayResponse>> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }

    let addr = state
        .config
        .esp32_addr
        .as_deref()
        .ok_or_else(|| AppError::Validation("ESP32_IP is not set".to_string()))?;

    notify::send_to_speaker(addr, text).await?;

    Ok(Json(SayResponse {
        status: "sent-to-esp32",
    }))
}
