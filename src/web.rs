//! Local web front-end that shells out to the plexinfo CLI.
//!
//! Each request runs its own subprocess with an upper-bound timeout; there
//! is no shared state between requests. The JSON surface:
//! `GET /api/libraries` probes the CLI for library names and
//! `POST /api/run` translates a form body into one report invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::timeout;
use tower_http::trace::TraceLayer;
use tracing::info;

/// How long one report invocation may run.
const RUN_TIMEOUT: Duration = Duration::from_secs(300);
/// How long the library-listing probe may run.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handler state: where the CLI binary lives.
#[derive(Debug, Clone)]
pub struct AppState {
    pub binary: PathBuf,
}

impl AppState {
    /// Prefer the plexinfo binary next to the current executable, falling
    /// back to a PATH lookup.
    pub fn discover() -> Self {
        let sibling = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("plexinfo")))
            .filter(|path| path.exists());

        Self {
            binary: sibling.unwrap_or_else(|| PathBuf::from("plexinfo")),
        }
    }
}

/// Build the router for the web front-end.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route("/api/libraries", get(list_libraries))
        .route("/api/run", post(run_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /api/run` body. Unknown fields are ignored, absent flags default
/// off.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunRequest {
    pub library: Option<String>,
    pub list_missing: bool,
    pub quality: bool,
    pub stats: bool,
    pub health: bool,
    pub system: bool,
    pub verbose: bool,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

impl RunRequest {
    /// Translate the form body into CLI arguments.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(library) = &self.library {
            args.push("--library".to_string());
            args.push(library.clone());
        }
        if self.list_missing {
            args.push("--list-missing".to_string());
        }
        if self.quality {
            args.push("--quality".to_string());
        }
        if self.stats {
            args.push("--stats".to_string());
        }
        if self.health {
            args.push("--health".to_string());
        }
        if self.system {
            args.push("--system".to_string());
        }
        if self.verbose {
            args.push("--verbose".to_string());
        }
        if let Some(media_type) = &self.media_type {
            args.push("--type".to_string());
            args.push(media_type.clone());
        }
        args
    }
}

#[derive(Debug, Serialize)]
struct RunResponse {
    success: bool,
    output: String,
    command: String,
}

#[derive(Debug, Serialize)]
struct LibrariesResponse {
    success: bool,
    libraries: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

enum CliFailure {
    Timeout,
    Spawn(std::io::Error),
}

/// Run the CLI once, collecting stdout/stderr, killing it past the limit.
async fn run_cli(
    binary: &Path,
    args: &[String],
    limit: Duration,
) -> Result<std::process::Output, CliFailure> {
    let child = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(CliFailure::Spawn)?;

    match timeout(limit, child.wait_with_output()).await {
        Err(_) => Err(CliFailure::Timeout),
        Ok(Err(err)) => Err(CliFailure::Spawn(err)),
        Ok(Ok(output)) => Ok(output),
    }
}

fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Serve the form UI from disk, like the development layout expects.
async fn index() -> Response {
    for path in ["index.html", "web/index.html"] {
        if let Ok(contents) = tokio::fs::read_to_string(path).await {
            return Html(contents).into_response();
        }
    }
    Html(
        "<h1>Error: index.html not found</h1>\
         <p>Run plexinfo-web from the repository root so web/index.html is reachable.</p>"
            .to_string(),
    )
    .into_response()
}

/// `GET /api/libraries`: probe the CLI and parse library names from its
/// overview output.
async fn list_libraries(State(state): State<AppState>) -> Response {
    match run_cli(&state.binary, &[], PROBE_TIMEOUT).await {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Json(LibrariesResponse {
                success: true,
                libraries: parse_library_names(&stdout),
            })
            .into_response()
        }
        Err(CliFailure::Timeout) => {
            error_response(StatusCode::REQUEST_TIMEOUT, "Command timeout (30 seconds)")
        }
        Err(CliFailure::Spawn(err)) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

/// `POST /api/run`: translate the body into a CLI invocation and return the
/// captured text.
async fn run_report(State(state): State<AppState>, body: String) -> Response {
    let request: RunRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid JSON"),
    };

    let args = request.to_args();
    let command = std::iter::once(state.binary.display().to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");
    info!("Running command: {}", command);

    match run_cli(&state.binary, &args, RUN_TIMEOUT).await {
        Ok(output) => {
            let success = output.status.success();
            let text = if success {
                String::from_utf8_lossy(&output.stdout).into_owned()
            } else {
                String::from_utf8_lossy(&output.stderr).into_owned()
            };
            Json(RunResponse {
                success,
                output: text,
                command,
            })
            .into_response()
        }
        Err(CliFailure::Timeout) => {
            error_response(StatusCode::REQUEST_TIMEOUT, "Command timeout (5 minutes)")
        }
        Err(CliFailure::Spawn(err)) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

/// Pull library names out of the overview report.
///
/// Names are the non-indented lines between the AVAILABLE PLEX LIBRARIES
/// banner and the usage footer; indented lines carry type/count detail.
pub fn parse_library_names(output: &str) -> Vec<String> {
    let mut libraries = Vec::new();
    let mut capture = false;

    for line in output.lines() {
        if line.contains("AVAILABLE PLEX LIBRARIES") {
            capture = true;
            continue;
        }
        if !capture {
            continue;
        }
        if line.starts_with('=') {
            continue;
        }
        if line.contains("To analyze") || line.contains("Examples:") {
            break;
        }
        if line.trim().is_empty() || line.starts_with(' ') {
            continue;
        }
        libraries.push(line.trim().to_string());
    }

    libraries
}
