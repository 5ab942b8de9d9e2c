//! HTTP listener for Plex webhooks.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::client::HueClient;
use crate::bridge::Bridge;
use crate::config::Config;
use crate::engine::{Activation, SceneEngine};
use crate::error::AppError;
use crate::models::event::PlaybackEvent;
use crate::snapshot::SnapshotStore;
use crate::webhook::{self, Route, Webhook};

pub const NO_EVENT_BODY: &str = "No event found in the json";

pub struct AppState<B> {
    pub config: Arc<Config>,
    pub engine: Arc<SceneEngine<B>>,
}

impl<B> AppState<B> {
    pub fn new(config: Config, engine: SceneEngine<B>) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            engine: Arc::clone(&self.engine),
        }
    }
}

/// Bridge failures surface to Plex as a bare 500; the detail goes to the log.
pub struct ServerError(AppError);

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, kind = self.0.error_type(), "webhook handling failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

#[derive(Deserialize)]
struct PayloadForm {
    payload: Option<String>,
}

/// The webhook carried in the `payload` form field.
///
/// Plex posts `multipart/form-data` (with a thumbnail part for some events);
/// url-encoded forms are accepted as well. A missing field or invalid JSON is
/// rejected with 400.
pub struct PlexPayload(pub Webhook);

impl<S> FromRequest<S> for PlexPayload
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = payload_field(req, state).await else {
            tracing::error!("no payload in request");
            return Err(StatusCode::BAD_REQUEST);
        };

        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|err| {
            tracing::error!(error = %err, "payload is not valid JSON");
            StatusCode::BAD_REQUEST
        })?;
        tracing::debug!(webhook = %value, "received webhook");

        Ok(Self(Webhook::from_json(&value)))
    }
}

async fn payload_field<S>(req: Request, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    let multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/form-data"));

    if multipart {
        let mut multipart = Multipart::from_request(req, state).await.ok()?;
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() == Some("payload") {
                return field.text().await.ok();
            }
        }
        None
    } else {
        let Form(form) = Form::<PayloadForm>::from_request(req, state).await.ok()?;
        form.payload
    }
}

pub fn router<B>(state: AppState<B>) -> Router
where
    B: Bridge + 'static,
{
    Router::new()
        .route("/", post(handle_webhook::<B>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_webhook<B>(
    State(state): State<AppState<B>>,
    PlexPayload(hook): PlexPayload,
) -> Result<&'static str, ServerError>
where
    B: Bridge + 'static,
{
    match webhook::route(&state.config, &hook) {
        Route::NoEvent => {
            tracing::info!("no event in webhook");
            return Ok(NO_EVENT_BODY);
        }
        Route::Ignore(reason) => {
            tracing::info!(%reason, "webhook ignored");
        }
        Route::Activate { event, scene } => {
            match state.engine.activate_scene(&scene).await? {
                Activation::Applied => tracing::info!(%event, %scene, "scene activated"),
                Activation::LightsOff => {
                    tracing::info!(%event, %scene, "scene skipped, lights are off")
                }
                Activation::SceneNotFound => {
                    tracing::info!(%event, %scene, "scene skipped, not on the bridge")
                }
            }
        }
        Route::Restore { event } => {
            tracing::info!(%event, "no scene configured, restoring light state");
            if !state.engine.restore_snapshot().await? {
                tracing::info!(%event, "no saved light state to restore");
            }
        }
        Route::Nothing { event } => {
            tracing::info!(%event, "no scene configured");
        }
    }
    Ok("ok")
}

/// Run the webhook listener until Ctrl-C.
pub async fn serve(config: Config) -> Result<(), AppError> {
    let client = HueClient::new(&config.bridge.address, &config.bridge.username)?;
    let snapshots = SnapshotStore::new(config.snapshot_path.clone());

    tracing::info!(
        bridge = %client.base_url(),
        backup_file = %snapshots.path().display(),
        local_player_only = config.local_player_only,
        "plexhue starting"
    );
    for event in PlaybackEvent::ALL {
        if let Some(scene) = config.scene_for(event) {
            tracing::info!(%event, scene, "scene configured");
        }
    }
    if config.allowed_players.is_none() {
        tracing::info!("no player allow-list, every player drives the lights");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config, SceneEngine::new(client, snapshots)));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
