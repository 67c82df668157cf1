//! HTTP front end for survey-recorder.
//!
//! A single route serves the survey form on `GET /` and records submissions
//! on `POST /`. Errors are reported at this boundary and nowhere else.

mod page;

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::RecordStore;
use crate::submission::{parse_submission, FormFields, ValidationPolicy};

pub use page::{render_form, CONFIRMATION_HTML, MISSING_INPUTS_MESSAGE, SERVER_ERROR_MESSAGE};

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<RecordStore>,
    policy: ValidationPolicy,
    form_html: Arc<str>,
}

impl AppState {
    /// Create handler state around an initialized store.
    #[must_use]
    pub fn new(store: RecordStore, policy: ValidationPolicy) -> Self {
        Self {
            store: Arc::new(store),
            policy,
            form_html: render_form().into(),
        }
    }

    /// The record store submissions are appended to.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/health", get(health))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Initialize the record store and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the store can't be initialized, the listen address
/// can't be bound, or the server fails.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.listen_addr()?;

    let store = RecordStore::new(config.data_path());
    store.ensure_initialized()?;
    let state = AppState::new(store, config.validation_policy());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.to_string(),
            source,
        })?;
    info!(
        "Recording survey responses to {}",
        state.store().path().display()
    );
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn log_request(request: Request, next: Next) -> Response {
    info!(method = %request.method(), path = %request.uri().path(), "Request");
    debug!(headers = ?request.headers(), "Request headers");
    let response = next.run(request).await;
    debug!(status = %response.status(), "Response");
    response
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn show_form(State(state): State<AppState>) -> Html<String> {
    Html(state.form_html.to_string())
}

async fn submit_form(
    State(state): State<AppState>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let fields = match form {
        Ok(Form(pairs)) => FormFields::new(pairs),
        Err(rejection) => {
            warn!(%rejection, "Unreadable form body, treating as empty");
            FormFields::default()
        }
    };
    debug!(?fields, "Form data");

    match record_submission(&state, &fields).await {
        Ok(()) => Html(CONFIRMATION_HTML).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn record_submission(state: &AppState, fields: &FormFields) -> Result<()> {
    let response = parse_submission(fields, state.policy)?;
    let total = response.total_expenses();

    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || store.append(&response))
        .await
        .map_err(|err| Error::internal(format!("record store task failed: {err}")))??;

    info!(total_expenses = total, "Recorded survey response");
    Ok(())
}

fn error_response(err: &Error) -> Response {
    if !err.is_client_error() {
        error!(error = %err, "Exception during form processing");
        return (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response();
    }

    warn!(error = %err, "Rejected survey submission");
    if err.is_missing_field() {
        (StatusCode::BAD_REQUEST, MISSING_INPUTS_MESSAGE).into_response()
    } else {
        (StatusCode::BAD_REQUEST, err.to_string()).into_response()
    }
}
