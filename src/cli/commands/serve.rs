//! HTTP API server for browser front ends.
//!
//! Exposes the transcript proxy route and the notes pipeline as JSON endpoints.

use crate::budget::TokenBudget;
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::{FailureKind, NotesError};
use crate::generation::{NoteGenerator, OpenAIGenerator};
use crate::language::LANGUAGES;
use crate::orchestrator::{GenerationOutcome, GenerationRequest, Orchestrator};
use crate::transcript::{TranscriptProxy, TranscriptSource};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Shared application state.
///
/// Each notes request gets its own orchestrator built from these shared
/// components, so concurrent clients never block each other.
struct AppState {
    settings: Settings,
    prompts: Prompts,
    transcripts: Arc<dyn TranscriptSource>,
    generator: Arc<dyn NoteGenerator>,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let transcripts = Arc::new(TranscriptProxy::from_settings(&settings.transcript)?);
    let generator = Arc::new(OpenAIGenerator::from_settings(&settings.generation)?);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let service_url = settings.transcript.service_url.clone();

    let state = Arc::new(AppState {
        settings,
        prompts,
        transcripts,
        generator,
    });

    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    Output::header("YouNotes API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Transcript service", &service_url);
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Transcript", "POST /api/youtube-transcript");
    Output::kv("Notes", "POST /api/notes");
    Output::kv("Budget", "POST /api/budget");
    Output::kv("Languages", "GET  /api/languages");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/youtube-transcript", post(youtube_transcript))
        .route("/api/notes", post(notes))
        .route("/api/budget", post(budget))
        .route("/api/languages", get(languages))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct TranscriptRequest {
    url: String,
    /// Falls back to `[transcript] default_language`.
    lang: Option<String>,
}

#[derive(Deserialize)]
struct BudgetRequest {
    text: String,
}

#[derive(Serialize)]
struct BudgetResponse {
    ceiling: usize,
    used: usize,
    remaining: i64,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP status for a proxy error. Upstream statuses are forwarded unchanged.
fn status_for_error(err: &NotesError) -> StatusCode {
    match err {
        NotesError::Upstream { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        NotesError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        NotesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// HTTP status for a failed generation.
fn status_for_kind(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidInput | FailureKind::BudgetExceeded | FailureKind::EmptyTranscript => {
            StatusCode::BAD_REQUEST
        }
        FailureKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FailureKind::Upstream | FailureKind::GenerationService => StatusCode::BAD_GATEWAY,
        FailureKind::Busy => StatusCode::CONFLICT,
        FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn youtube_transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscriptRequest>,
) -> impl IntoResponse {
    if req.url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Please enter a valid YouTube URL".to_string(),
            }),
        )
            .into_response();
    }

    let lang = req
        .lang
        .as_deref()
        .unwrap_or(state.settings.transcript.default_language.as_str());

    match state.transcripts.fetch_transcript(&req.url, lang).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            warn!("Transcript request failed: {}", e);
            (
                status_for_error(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn notes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerationRequest>,
) -> impl IntoResponse {
    let orchestrator = Orchestrator::with_components(
        &state.settings,
        state.prompts.clone(),
        state.transcripts.clone(),
        state.generator.clone(),
    );

    let outcome = orchestrator.generate(req).await;
    let status = match &outcome {
        GenerationOutcome::Failure { kind, .. } => status_for_kind(*kind),
        _ => StatusCode::OK,
    };

    (status, Json(outcome)).into_response()
}

async fn budget(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BudgetRequest>,
) -> impl IntoResponse {
    let budget = TokenBudget::for_text(state.settings.budget.max_tokens, &req.text);
    Json(BudgetResponse {
        ceiling: budget.ceiling,
        used: budget.used,
        remaining: budget.remaining(),
    })
}

async fn languages() -> impl IntoResponse {
    Json(LANGUAGES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::transcript::{TranscriptResult, TranscriptStatus};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::time::Duration;

    struct FixedSource(Option<TranscriptResult>);

    #[async_trait]
    impl TranscriptSource for FixedSource {
        async fn fetch_transcript(&self, _url: &str, _lang: &str) -> Result<TranscriptResult> {
            self.0.clone().ok_or(NotesError::Timeout(Duration::from_secs(25)))
        }
    }

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl NoteGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    /// Answers with the language it was asked for.
    struct EchoLangSource;

    #[async_trait]
    impl TranscriptSource for EchoLangSource {
        async fn fetch_transcript(&self, _url: &str, lang: &str) -> Result<TranscriptResult> {
            Ok(TranscriptResult::ok(format!("lang={}", lang)))
        }
    }

    async fn spawn_app(source: Option<TranscriptResult>) -> String {
        spawn_with(Settings::default(), Arc::new(FixedSource(source))).await
    }

    async fn spawn_with(settings: Settings, transcripts: Arc<dyn TranscriptSource>) -> String {
        let state = Arc::new(AppState {
            settings,
            prompts: Prompts::default(),
            transcripts,
            generator: Arc::new(FixedGenerator(" Key point. ")),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn post_json(url: String, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new().post(url).json(&body).send().await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[test]
    fn test_status_mapping() {
        let err = NotesError::Upstream {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(status_for_error(&err), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for_error(&NotesError::Timeout(Duration::from_secs(25))),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(status_for_kind(FailureKind::Busy), StatusCode::CONFLICT);
        assert_eq!(status_for_kind(FailureKind::BudgetExceeded), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_notes_from_youtube() {
        let base = spawn_app(Some(TranscriptResult::ok("Hello world"))).await;

        let (status, body) = post_json(
            format!("{}/api/notes", base),
            json!({"source": "youtube", "url": "https://youtu.be/abcdefghijk"}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["outcome"], "success");
        assert_eq!(body["notes"], "Key point.");
    }

    #[tokio::test]
    async fn test_notes_advisory() {
        let base = spawn_app(Some(TranscriptResult::with_status(
            "Enable captions.",
            TranscriptStatus::NoTranscript,
        )))
        .await;

        let (status, body) = post_json(
            format!("{}/api/notes", base),
            json!({"source": "youtube", "url": "https://youtu.be/abcdefghijk", "lang": "fr"}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["outcome"], "advisory");
        assert_eq!(body["notes"], "Enable captions.");
    }

    #[tokio::test]
    async fn test_notes_over_budget() {
        let base = spawn_app(None).await;
        let text = vec!["w"; 1001].join(" ");

        let (status, body) = post_json(
            format!("{}/api/notes", base),
            json!({"source": "transcript", "text": text}),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["outcome"], "failure");
        assert_eq!(body["kind"], "budget_exceeded");
    }

    #[tokio::test]
    async fn test_transcript_route_timeout() {
        let base = spawn_app(None).await;

        let (status, body) = post_json(
            format!("{}/api/youtube-transcript", base),
            json!({"url": "https://youtu.be/abcdefghijk"}),
        )
        .await;

        assert_eq!(status, 504);
        assert!(body["error"].as_str().unwrap().contains("waking up"));
    }

    #[tokio::test]
    async fn test_transcript_route_blank_url() {
        let base = spawn_app(None).await;
        let (status, body) =
            post_json(format!("{}/api/youtube-transcript", base), json!({"url": " "})).await;

        assert_eq!(status, 400);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_transcript_route_success() {
        let base = spawn_app(Some(TranscriptResult::ok("Hello world"))).await;
        let (status, body) = post_json(
            format!("{}/api/youtube-transcript", base),
            json!({"url": "https://youtu.be/abcdefghijk", "lang": "en"}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["transcript"], "Hello world");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_transcript_route_uses_configured_language() {
        let mut settings = Settings::default();
        settings.transcript.default_language = "fr".to_string();
        let base = spawn_with(settings, Arc::new(EchoLangSource)).await;

        let (status, body) = post_json(
            format!("{}/api/youtube-transcript", base),
            json!({"url": "https://youtu.be/abcdefghijk"}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["transcript"], "lang=fr");

        let (_, body) = post_json(
            format!("{}/api/youtube-transcript", base),
            json!({"url": "https://youtu.be/abcdefghijk", "lang": "de"}),
        )
        .await;
        assert_eq!(body["transcript"], "lang=de");
    }

    #[tokio::test]
    async fn test_budget_route() {
        let base = spawn_app(None).await;
        let (status, body) =
            post_json(format!("{}/api/budget", base), json!({"text": "one two three"})).await;

        assert_eq!(status, 200);
        assert_eq!(body["used"], 3);
        assert_eq!(body["remaining"], 997);
        assert_eq!(body["ceiling"], 1000);
    }

    #[tokio::test]
    async fn test_languages_route() {
        let base = spawn_app(None).await;
        let body: Value = reqwest::get(format!("{}/api/languages", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body[0]["code"], "en");
        assert_eq!(body.as_array().unwrap().len(), LANGUAGES.len());
    }
}
