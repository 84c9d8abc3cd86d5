//! In-memory model of the Healthchecks.io API for integration tests.
//!
//! Implements the slice of the upstream service the client exercises:
//! management endpoints under `/api/v1` (gated on `X-Api-Key`) and the
//! ping-submission endpoints under `/ping` (open, as on the real ping
//! host). Check state lives in a shared map so upserts, pauses, pings, and
//! flips behave like the hosted service across a whole test lifecycle.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// The only token the mock accepts on `/api/v1`.
pub const API_TOKEN: &str = "test-token";

/// A check as the API serializes it. The uuid appears only inside the
/// `*_url` fields, as on the real service.
#[derive(Clone, Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub desc: String,
    pub slug: String,
    pub tags: String,
    pub grace: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
    pub manual_resume: bool,
    pub methods: String,
    pub channels: String,
    pub n_pings: u64,
    pub status: String,
    pub ping_url: String,
    pub update_url: String,
    pub pause_url: String,
}

/// Create/upsert payload. Field defaults match the API defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CreateCheck {
    pub name: String,
    pub desc: String,
    pub slug: String,
    pub tags: String,
    pub grace: u64,
    pub timeout: Option<u64>,
    pub schedule: Option<String>,
    pub tz: Option<String>,
    pub manual_resume: bool,
    pub methods: String,
    pub channels: String,
    pub unique: Vec<String>,
}

impl Default for CreateCheck {
    fn default() -> Self {
        Self {
            name: String::new(),
            desc: String::new(),
            slug: String::new(),
            tags: String::new(),
            grace: 3600,
            timeout: None,
            schedule: None,
            tz: None,
            manual_resume: false,
            methods: String::new(),
            channels: String::new(),
            unique: Vec::new(),
        }
    }
}

#[derive(Clone, Serialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub kind: String,
}

struct StoredCheck {
    check: Check,
    pings: Vec<Value>,
    flips: Vec<Value>,
}

pub struct AppState {
    checks: HashMap<String, StoredCheck>,
    channels: Vec<Channel>,
    // Monotonic stand-in for wall-clock time in ping/flip records.
    tick: u64,
}

impl AppState {
    fn new() -> Self {
        Self {
            checks: HashMap::new(),
            channels: vec![
                Channel {
                    id: Uuid::new_v4().to_string(),
                    name: "Ops mailbox".to_string(),
                    kind: "email".to_string(),
                },
                Channel {
                    id: Uuid::new_v4().to_string(),
                    name: "On-call chat".to_string(),
                    kind: "slack".to_string(),
                },
            ],
            tick: 0,
        }
    }
}

pub type Db = Arc<RwLock<AppState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(AppState::new()));
    let api = Router::new()
        .route("/api/v1/checks", get(list_checks))
        .route("/api/v1/checks/", post(create_check))
        .route("/api/v1/checks/{uuid}", get(get_check).delete(delete_check))
        .route("/api/v1/checks/{uuid}/pause", post(pause_check))
        .route("/api/v1/checks/{uuid}/pings", get(list_pings))
        .route("/api/v1/checks/{uuid}/flips", get(list_flips))
        .route("/api/v1/channels", get(list_channels))
        .route("/api/v1/badges", get(list_badges))
        .route_layer(middleware::from_fn(require_api_key));
    // Ping routes are open and registered as GET: axum answers HEAD
    // through GET handlers.
    let pings = Router::new()
        .route("/ping/{uuid}", get(ping_default))
        .route("/ping/{uuid}/{signal}", get(ping_signal));
    api.merge(pings).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_api_key(req: Request, next: Next) -> Result<axum::response::Response, StatusCode> {
    let token = req.headers().get("x-api-key").and_then(|v| v.to_str().ok());
    if token == Some(API_TOKEN) {
        Ok(next.run(req).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn list_checks(State(db): State<Db>, RawQuery(query): RawQuery) -> Json<Value> {
    let tags = tag_filter(query.as_deref());
    let state = db.read().await;
    let checks: Vec<&Check> = state
        .checks
        .values()
        .map(|stored| &stored.check)
        .filter(|check| tags.iter().all(|tag| has_tag(check, tag)))
        .collect();
    Json(json!({ "checks": checks }))
}

async fn create_check(
    State(db): State<Db>,
    Json(input): Json<CreateCheck>,
) -> (StatusCode, Json<Check>) {
    let mut state = db.write().await;
    if let Some(uuid) = unique_match(&state.checks, &input) {
        if let Some(stored) = state.checks.get_mut(&uuid) {
            apply(&mut stored.check, input);
            return (StatusCode::OK, Json(stored.check.clone()));
        }
    }
    let uuid = Uuid::new_v4().to_string();
    let mut check = Check {
        name: String::new(),
        desc: String::new(),
        slug: String::new(),
        tags: String::new(),
        grace: 3600,
        timeout: None,
        schedule: None,
        tz: None,
        manual_resume: false,
        methods: String::new(),
        channels: String::new(),
        n_pings: 0,
        status: "new".to_string(),
        ping_url: format!("https://hc-ping.com/{uuid}"),
        update_url: format!("https://healthchecks.io/api/v1/checks/{uuid}"),
        pause_url: format!("https://healthchecks.io/api/v1/checks/{uuid}/pause"),
    };
    apply(&mut check, input);
    state.checks.insert(
        uuid,
        StoredCheck {
            check: check.clone(),
            pings: Vec::new(),
            flips: Vec::new(),
        },
    );
    (StatusCode::CREATED, Json(check))
}

async fn get_check(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<Check>, StatusCode> {
    let state = db.read().await;
    state
        .checks
        .get(&uuid)
        .map(|stored| Json(stored.check.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_check(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<Check>, StatusCode> {
    let mut state = db.write().await;
    state
        .checks
        .remove(&uuid)
        .map(|stored| Json(stored.check))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn pause_check(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<Check>, StatusCode> {
    let mut state = db.write().await;
    match state.checks.get_mut(&uuid) {
        Some(stored) => {
            stored.check.status = "paused".to_string();
            Ok(Json(stored.check.clone()))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn list_pings(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let state = db.read().await;
    state
        .checks
        .get(&uuid)
        .map(|stored| Json(json!({ "pings": stored.pings })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_flips(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let state = db.read().await;
    state
        .checks
        .get(&uuid)
        .map(|stored| Json(json!({ "flips": stored.flips })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_channels(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({ "channels": state.channels }))
}

async fn list_badges(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    let mut badges = serde_json::Map::new();
    for stored in state.checks.values() {
        for tag in stored.check.tags.split_whitespace() {
            badges.insert(
                tag.to_string(),
                json!({
                    "svg": format!("https://healthchecks.io/badge/{tag}.svg"),
                    "json": format!("https://healthchecks.io/badge/{tag}.json"),
                }),
            );
        }
    }
    Json(json!({ "badges": badges }))
}

async fn ping_default(State(db): State<Db>, Path(uuid): Path<String>) -> StatusCode {
    record_ping(&db, &uuid, "success").await
}

async fn ping_signal(
    State(db): State<Db>,
    Path((uuid, signal)): Path<(String, String)>,
) -> StatusCode {
    if signal != "fail" && signal != "start" {
        return StatusCode::NOT_FOUND;
    }
    record_ping(&db, &uuid, &signal).await
}

async fn record_ping(db: &Db, uuid: &str, signal: &str) -> StatusCode {
    let mut state = db.write().await;
    state.tick += 1;
    let tick = state.tick;
    match state.checks.get_mut(uuid) {
        Some(stored) => {
            stored.pings.push(json!({ "type": signal, "n": tick }));
            stored.check.n_pings += 1;
            let status = match signal {
                "success" => Some("up"),
                "fail" => Some("down"),
                _ => None,
            };
            if let Some(status) = status {
                if stored.check.status != status {
                    stored.check.status = status.to_string();
                    stored.flips.push(json!({
                        "timestamp": tick,
                        "up": u8::from(status == "up"),
                    }));
                }
            }
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

fn apply(check: &mut Check, input: CreateCheck) {
    check.name = input.name;
    check.desc = input.desc;
    check.slug = input.slug;
    check.tags = input.tags;
    check.grace = input.grace;
    check.timeout = input.timeout;
    check.schedule = input.schedule;
    check.tz = input.tz;
    check.manual_resume = input.manual_resume;
    check.methods = input.methods;
    check.channels = input.channels;
}

fn unique_match(checks: &HashMap<String, StoredCheck>, input: &CreateCheck) -> Option<String> {
    if input.unique.is_empty() {
        return None;
    }
    checks
        .iter()
        .find(|(_, stored)| {
            input.unique.iter().all(|field| match field.as_str() {
                "name" => stored.check.name == input.name,
                "tags" => stored.check.tags == input.tags,
                "timeout" => stored.check.timeout == input.timeout,
                "grace" => stored.check.grace == input.grace,
                _ => false,
            })
        })
        .map(|(uuid, _)| uuid.clone())
}

fn tag_filter(query: Option<&str>) -> Vec<String> {
    query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.strip_prefix("tag="))
        .map(str::to_string)
        .collect()
}

fn has_tag(check: &Check, tag: &str) -> bool {
    check.tags.split_whitespace().any(|t| t == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_serializes_without_a_bare_uuid_field() {
        let check = Check {
            name: "t".to_string(),
            desc: String::new(),
            slug: String::new(),
            tags: String::new(),
            grace: 3600,
            timeout: Some(60),
            schedule: None,
            tz: None,
            manual_resume: false,
            methods: String::new(),
            channels: String::new(),
            n_pings: 0,
            status: "new".to_string(),
            ping_url: "https://hc-ping.com/abc".to_string(),
            update_url: String::new(),
            pause_url: String::new(),
        };
        let value = serde_json::to_value(&check).unwrap();
        assert!(value.get("uuid").is_none());
        assert!(value.get("schedule").is_none());
        assert_eq!(value["ping_url"], "https://hc-ping.com/abc");
    }

    #[test]
    fn create_payload_defaults_match_the_api() {
        let input: CreateCheck = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(input.grace, 3600);
        assert!(input.unique.is_empty());
        assert!(!input.manual_resume);
    }

    #[test]
    fn tag_filters_parse_repeated_parameters() {
        assert_eq!(tag_filter(Some("tag=a&tag=b")), vec!["a", "b"]);
        assert!(tag_filter(None).is_empty());
    }
}
