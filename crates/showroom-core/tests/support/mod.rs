// Shared test harness: an in-memory serverless backend for wiremock.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use showroom_api::{Endpoint, ResourceClient, TransportConfig};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Install a test subscriber once; `RUST_LOG=debug` shows controller logs.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

pub fn client_for(server: &MockServer) -> ResourceClient {
    client_with_timeout(server, Duration::from_secs(5))
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> ResourceClient {
    let transport = TransportConfig::default().with_timeout(timeout);
    ResourceClient::new(&server.uri(), &transport).unwrap()
}

pub fn function_path(endpoint: &Endpoint) -> String {
    format!("/functions/v1/{}", endpoint.path)
}

/// Count requests of `method` the server has seen.
pub async fn count_requests(server: &MockServer, method: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == method)
        .count()
}

// ── Fake backend ────────────────────────────────────────────────────

#[derive(Default)]
pub struct BackendState {
    next_id: i64,
    clock: i64,
    pub rows: BTreeMap<i64, Value>,
    pub deleted: BTreeSet<i64>,
}

impl BackendState {
    fn tick(&mut self) -> String {
        self.clock += 1;
        let at: DateTime<Utc> = DateTime::from_timestamp(1_735_689_600 + self.clock, 0).unwrap();
        at.to_rfc3339()
    }
}

/// Stateful stand-in for one `manage-*` function.
///
/// Implements the list / create / update / delete contract plus the
/// bulk variants, with backend defaults and strictly increasing
/// timestamps.
#[derive(Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
    collection_key: &'static str,
    item_key: &'static str,
    status_field: &'static str,
    defaults: Map<String, Value>,
    delay: Duration,
}

impl FakeBackend {
    pub fn new(endpoint: &Endpoint) -> Self {
        let state = BackendState {
            next_id: 1,
            ..BackendState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            collection_key: endpoint.collection_key,
            item_key: endpoint.item_key,
            status_field: "status",
            defaults: Map::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_default(mut self, field: &str, value: Value) -> Self {
        self.defaults.insert(field.to_owned(), value);
        self
    }

    pub fn with_status_field(mut self, field: &'static str) -> Self {
        self.status_field = field;
        self
    }

    /// Delay every response, to observe in-flight states.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Insert a row directly, as if created by another session.
    pub fn seed(&self, fields: Value) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let row = self.materialize(&mut state, id, fields);
        state.rows.insert(id, row);
        id
    }

    /// Delete a row behind the controller's back.
    pub fn remove(&self, id: i64) {
        let mut state = self.state.lock().unwrap();
        state.rows.remove(&id);
        state.deleted.insert(id);
    }

    pub fn row(&self, id: i64) -> Option<Value> {
        self.state.lock().unwrap().rows.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    pub async fn mount(&self, server: &MockServer, endpoint: &Endpoint) {
        Mock::given(path(function_path(endpoint)))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }

    fn materialize(&self, state: &mut BackendState, id: i64, fields: Value) -> Value {
        let mut row = self.defaults.clone();
        if let Value::Object(fields) = fields {
            for (key, value) in fields {
                if !value.is_null() || !row.contains_key(&key) {
                    row.insert(key, value);
                }
            }
        }
        let now = state.tick();
        row.insert("id".into(), json!(id));
        row.insert("created_at".into(), json!(now));
        row.insert("updated_at".into(), json!(now));
        Value::Object(row)
    }

    fn reply(&self, status: u16, body: Value) -> ResponseTemplate {
        ResponseTemplate::new(status)
            .set_body_json(body)
            .set_delay(self.delay)
    }

    fn missing(&self, state: &BackendState, id: i64) -> ResponseTemplate {
        let (status, error, code) = if state.deleted.contains(&id) {
            (410, format!("ID {id} déjà supprimé"), "gone")
        } else {
            (404, format!("ID {id} non trouvé"), "not_found")
        };
        self.reply(status, json!({ "error": error, "code": code }))
    }

    fn list(&self, state: &BackendState) -> ResponseTemplate {
        let items: Vec<Value> = state.rows.values().cloned().collect();
        self.reply(200, json!({ self.collection_key: items }))
    }

    fn create(&self, state: &mut BackendState, body: Value) -> ResponseTemplate {
        let id = state.next_id;
        state.next_id += 1;
        let row = self.materialize(state, id, body);
        state.rows.insert(id, row.clone());
        self.reply(
            200,
            json!({ "success": true, self.item_key: row, "message": "créé avec succès" }),
        )
    }

    fn update(&self, state: &mut BackendState, id: i64, body: Value) -> ResponseTemplate {
        let now = state.tick();
        let Some(Value::Object(row)) = state.rows.get_mut(&id) else {
            return self.missing(state, id);
        };
        if let Value::Object(fields) = body {
            for (key, value) in fields {
                if key != "id" {
                    row.insert(key, value);
                }
            }
        }
        row.insert("updated_at".into(), json!(now));
        let row = Value::Object(row.clone());
        self.reply(200, json!({ "success": true, self.item_key: row }))
    }

    fn delete(&self, state: &mut BackendState, id: i64) -> ResponseTemplate {
        if state.rows.remove(&id).is_none() {
            return self.missing(state, id);
        }
        state.deleted.insert(id);
        self.reply(200, json!({ "success": true, "deleted": true, "id": id }))
    }

    fn bulk(
        &self,
        state: &mut BackendState,
        body: &Value,
        new_status: Option<&Value>,
    ) -> ResponseTemplate {
        let ids: Vec<i64> = body["ids"]
            .as_array()
            .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default();

        let (mut affected, mut missing) = (Vec::new(), Vec::new());
        for id in ids {
            let applied = match new_status {
                Some(status) => {
                    let now = state.tick();
                    match state.rows.get_mut(&id) {
                        Some(Value::Object(row)) => {
                            row.insert(self.status_field.into(), status.clone());
                            row.insert("updated_at".into(), json!(now));
                            true
                        }
                        _ => false,
                    }
                }
                None => {
                    let removed = state.rows.remove(&id).is_some();
                    if removed {
                        state.deleted.insert(id);
                    }
                    removed
                }
            };
            if applied {
                affected.push(id);
            } else {
                missing.push(id);
            }
        }

        self.reply(200, json!({ "success": true, "affected": affected, "missing": missing }))
    }
}

impl Respond for FakeBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let id = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "id")
            .and_then(|(_, v)| v.parse::<i64>().ok());
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);

        match (request.method.as_str(), id) {
            ("GET", _) => self.list(&state),
            ("POST", _) => self.create(&mut state, body),
            ("PUT", Some(id)) => self.update(&mut state, id, body),
            ("PUT", None) => {
                let status = body.get("newStatus").cloned();
                self.bulk(&mut state, &body, status.as_ref())
            }
            ("DELETE", Some(id)) => self.delete(&mut state, id),
            ("DELETE", None) => self.bulk(&mut state, &body, None),
            _ => ResponseTemplate::new(405),
        }
    }
}
