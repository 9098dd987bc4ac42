//! HTTP request handlers for the control API
//!
//! Implements the control-message dispatch endpoint and the health check
//! using axum. Every control action is one POST carrying an
//! action-tagged JSON body; the response shape depends on the action.

use crate::messages::{
    ControlRequest, ControlResponse, PinResponse, TabDataResponse, TabEntry,
    UpdateSettingsResponse,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use drowse_domain::{Clock, HostError, ResourceHost, ResourceId, SettingsPatch};
use drowse_store::{SettingsRegistry, StateStore, StoreError};
use serde::Serialize;
use std::sync::Arc;

/// Shared application state
pub struct AppState<H: ResourceHost> {
    /// Durable per-resource bookkeeping
    pub store: Arc<StateStore>,
    /// Live settings registry
    pub settings: Arc<SettingsRegistry>,
    /// Capability interface to the resource manager
    pub host: Arc<H>,
    /// Time source for remaining-idle arithmetic
    pub clock: Arc<dyn Clock>,
}

impl<H: ResourceHost> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            settings: Arc::clone(&self.settings),
            host: Arc::clone(&self.host),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The host could not be queried
    Host(HostError),
    /// The state store rejected a write
    Store(StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Host(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<HostError> for AppError {
    fn from(e: HostError) -> Self {
        AppError::Host(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Number of tracked resource records
    pub tracked: usize,
    /// Number of user-pinned records
    pub protected: usize,
}

/// POST /control - dispatch one control message
async fn control<H: ResourceHost>(
    State(state): State<AppState<H>>,
    Json(request): Json<ControlRequest>,
) -> Result<Json<ControlResponse>, AppError> {
    match request {
        ControlRequest::TogglePin { tab_id } => {
            let pinned = state.store.toggle_protected(ResourceId::from_value(tab_id))?;
            Ok(Json(ControlResponse::Pin(PinResponse { pinned })))
        }
        ControlRequest::IsPinned { tab_id } => {
            let pinned = state.store.is_protected(ResourceId::from_value(tab_id));
            Ok(Json(ControlResponse::Pin(PinResponse { pinned })))
        }
        ControlRequest::UpdateSettings {
            debug,
            timeout,
            whitelist,
        } => {
            state.settings.apply_control_update(SettingsPatch {
                timeout_minutes: timeout,
                allow_list: whitelist,
                debug,
            });
            Ok(Json(ControlResponse::Settings(UpdateSettingsResponse {
                success: true,
            })))
        }
        ControlRequest::GetTabData => {
            let snapshot = build_snapshot(&state)?;
            Ok(Json(ControlResponse::TabData(snapshot)))
        }
    }
}

/// Join live resources with their bookkeeping into the snapshot the
/// presentation layer renders.
fn build_snapshot<H: ResourceHost>(state: &AppState<H>) -> Result<TabDataResponse, AppError> {
    let settings = state.settings.current();
    let resources = state.host.enumerate()?;
    let now_ms = state.clock.now_ms();
    let timeout_ms = settings.timeout_ms();

    let tabs = resources
        .into_iter()
        .map(|resource| {
            let record = state.store.get(resource.id);
            TabEntry {
                id: resource.id.value(),
                title: resource.title,
                url: resource.url,
                fav_icon_url: resource.fav_icon_url,
                discarded: resource.discarded,
                audible: resource.audible,
                ttl: record.map(|r| timeout_ms.saturating_sub(r.idle_for_ms(now_ms))),
                is_pinned: record.map(|r| r.protected).unwrap_or(false),
            }
        })
        .collect();

    Ok(TabDataResponse {
        tabs,
        timeout: settings.timeout_minutes,
        whitelist: settings.allow_list,
    })
}

/// GET /health - liveness and store counters
async fn health<H: ResourceHost>(State(state): State<AppState<H>>) -> Json<HealthResponse> {
    let snapshot = state.store.snapshot();
    let protected = snapshot.iter().filter(|(_, r)| r.protected).count();

    Json(HealthResponse {
        status: "ok".to_string(),
        tracked: snapshot.len(),
        protected,
    })
}

/// Create the axum router with all routes
pub fn create_router<H: ResourceHost + 'static>(state: AppState<H>) -> Router {
    Router::new()
        .route("/control", post(control::<H>))
        .route("/health", get(health::<H>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use drowse_domain::{ManualClock, Resource};
    use drowse_store::{MemoryConfigBackend, MemoryStateBackend};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::RwLock;
    use tower::ServiceExt; // for oneshot

    struct FakeHost {
        resources: RwLock<Vec<Resource>>,
        fail_enumerate: AtomicBool,
    }

    impl FakeHost {
        fn new(resources: Vec<Resource>) -> Self {
            Self {
                resources: RwLock::new(resources),
                fail_enumerate: AtomicBool::new(false),
            }
        }
    }

    impl ResourceHost for FakeHost {
        fn enumerate(&self) -> Result<Vec<Resource>, HostError> {
            if self.fail_enumerate.load(Ordering::SeqCst) {
                return Err(HostError::Failed("browser went away".to_string()));
            }
            Ok(self.resources.read().unwrap().clone())
        }

        fn active_resource(&self) -> Result<Option<Resource>, HostError> {
            Ok(None)
        }

        fn suspend(&self, _id: ResourceId) -> Result<(), HostError> {
            Ok(())
        }

        fn refresh_presentation(&self, _id: ResourceId) -> Result<(), HostError> {
            Ok(())
        }
    }

    fn test_state(resources: Vec<Resource>) -> (AppState<FakeHost>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let store = Arc::new(StateStore::open(
            MemoryStateBackend::new(),
            clock.clone() as Arc<dyn Clock>,
        ));
        let settings = Arc::new(SettingsRegistry::load(MemoryConfigBackend::new()));
        let state = AppState {
            store,
            settings,
            host: Arc::new(FakeHost::new(resources)),
            clock: clock.clone() as Arc<dyn Clock>,
        };
        (state, clock)
    }

    async fn post_control(
        state: &AppState<FakeHost>,
        body: Value,
    ) -> (StatusCode, Value) {
        let app = create_router(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri("/control")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn resource(id: u64) -> Resource {
        Resource::new(ResourceId::from_value(id), "https://example.com/page", "Example")
    }

    #[tokio::test]
    async fn test_toggle_pin_on_an_unknown_id_tracks_and_pins_it() {
        let (state, _) = test_state(vec![]);

        let (status, body) = post_control(&state, json!({"action": "togglePin", "tabId": 42})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"pinned": true}));

        let (_, body) = post_control(&state, json!({"action": "isPinned", "tabId": 42})).await;
        assert_eq!(body, json!({"pinned": true}));

        let (_, body) = post_control(&state, json!({"action": "togglePin", "tabId": 42})).await;
        assert_eq!(body, json!({"pinned": false}));
    }

    #[tokio::test]
    async fn test_is_pinned_on_an_unknown_id_is_false_and_tracks_nothing() {
        let (state, _) = test_state(vec![]);

        let (status, body) = post_control(&state, json!({"action": "isPinned", "tabId": 9})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"pinned": false}));
        assert!(state.store.is_empty());
    }

    #[tokio::test]
    async fn test_update_settings_merges_only_present_fields() {
        let (state, _) = test_state(vec![]);

        let (status, body) =
            post_control(&state, json!({"action": "updateSettings", "timeout": 10})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let settings = state.settings.current();
        assert_eq!(settings.timeout_minutes, 10);
        assert!(settings.allow_list.is_empty());
        assert!(!settings.debug);
    }

    #[tokio::test]
    async fn test_update_settings_applies_explicit_false() {
        let (state, _) = test_state(vec![]);
        post_control(&state, json!({"action": "updateSettings", "debug": true})).await;
        assert!(state.settings.current().debug);

        post_control(&state, json!({"action": "updateSettings", "debug": false})).await;
        assert!(!state.settings.current().debug);
    }

    #[tokio::test]
    async fn test_get_tab_data_joins_live_resources_with_bookkeeping() {
        let mut with_icon = resource(1);
        with_icon.fav_icon_url = Some("https://example.com/favicon.ico".to_string());
        let untracked = resource(2);

        let (state, clock) = test_state(vec![with_icon, untracked]);
        state.store.record_activity(ResourceId::from_value(1)).unwrap();
        state.store.toggle_protected(ResourceId::from_value(1)).unwrap();
        clock.advance(10 * 60_000); // 10 of the default 30 minutes pass

        let (status, body) = post_control(&state, json!({"action": "getTabData"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timeout"], json!(30));
        assert_eq!(body["whitelist"], json!([]));

        let tabs = body["tabs"].as_array().unwrap();
        assert_eq!(tabs.len(), 2);

        let tracked = &tabs[0];
        assert_eq!(tracked["id"], json!(1));
        assert_eq!(tracked["favIconUrl"], json!("https://example.com/favicon.ico"));
        assert_eq!(tracked["ttl"], json!(20 * 60_000));
        assert_eq!(tracked["isPinned"], json!(true));

        let fresh = &tabs[1];
        assert_eq!(fresh["id"], json!(2));
        assert!(fresh.get("favIconUrl").is_none());
        assert_eq!(fresh["ttl"], Value::Null);
        assert_eq!(fresh["isPinned"], json!(false));
    }

    #[tokio::test]
    async fn test_get_tab_data_clamps_overdue_ttl_to_zero() {
        let (state, clock) = test_state(vec![resource(1)]);
        state.store.record_activity(ResourceId::from_value(1)).unwrap();
        clock.advance(90 * 60_000);

        let (_, body) = post_control(&state, json!({"action": "getTabData"})).await;
        assert_eq!(body["tabs"][0]["ttl"], json!(0));
    }

    #[tokio::test]
    async fn test_enumerate_failure_maps_to_bad_gateway() {
        let (state, _) = test_state(vec![]);
        state.host.fail_enumerate.store(true, Ordering::SeqCst);

        let (status, body) = post_control(&state, json!({"action": "getTabData"})).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("browser went away"));
    }

    #[tokio::test]
    async fn test_unknown_action_is_a_client_error() {
        let (state, _) = test_state(vec![]);
        let (status, _) = post_control(&state, json!({"action": "selfDestruct"})).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_health_reports_store_counters() {
        let (state, _) = test_state(vec![]);
        state.store.record_activity(ResourceId::from_value(1)).unwrap();
        state.store.toggle_protected(ResourceId::from_value(2)).unwrap();

        let app = create_router(state.clone());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["tracked"], json!(2));
        assert_eq!(body["protected"], json!(1));
    }
}
