//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use registrar::client::{record_id, ListPage, ListQuery, Record, RecordStore, RestClient};
use registrar::config::ApiConfig;
use registrar::error::RecordError;
use registrar::ui::controller::ViewController;
use registrar::ui::panel::PanelIntent;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

use mock_backend::MockBackend;

/// API settings pointing at `base_url` with short timeouts.
pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

pub fn rest_client(backend: &MockBackend) -> RestClient {
    RestClient::new(&api_config(&backend.base_url())).expect("client should build")
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record must be a JSON object")
}

/// Numbered student records `1..=count`.
pub fn students(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|id| {
            record(serde_json::json!({
                "id": id,
                "firstName": format!("Student{id}"),
                "lastName": "Test",
                "email": format!("s{id}@example.edu"),
            }))
        })
        .collect()
}

/// Which store operation was called, with its entity and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List { entity: String, query: ListQuery },
    Get { entity: String, id: String },
    Create { entity: String },
    Update { entity: String, id: String },
    Patch { entity: String, id: String },
    Remove { entity: String, id: String },
}

/// In-memory [`RecordStore`] that records every call. `list` slices the
/// stored collection like a json-server backend; ids listed in `missing`
/// answer with `NotFound`.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
    calls: Mutex<Vec<StoreCall>>,
    missing: Mutex<Vec<String>>,
    fail_lists: Mutex<bool>,
}

impl MemoryStore {
    pub fn with(entity: &str, records: Vec<Record>) -> Self {
        let store = Self::default();
        store
            .collections
            .lock()
            .unwrap()
            .insert(entity.to_string(), records);
        store
    }

    pub fn mark_missing(&self, id: &str) {
        self.missing.lock().unwrap().push(id.to_string());
    }

    pub fn fail_lists(&self, fail: bool) {
        *self.fail_lists.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn records(&self, entity: &str) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(entity)
            .cloned()
            .unwrap_or_default()
    }

    fn log(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_present(&self, entity: &str, id: &str) -> Result<(), RecordError> {
        if self.missing.lock().unwrap().iter().any(|m| m == id) {
            return Err(RecordError::NotFound {
                entity: entity.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<ListPage, RecordError> {
        self.log(StoreCall::List {
            entity: entity.to_string(),
            query: query.clone(),
        });
        if *self.fail_lists.lock().unwrap() {
            return Err(RecordError::Transport {
                status: 500,
                url: format!("memory://{entity}"),
            });
        }
        let all = self.records(entity);
        let total = all.len() as u64;
        let records = match (query.page, query.limit) {
            (Some(page), Some(limit)) => all
                .into_iter()
                .skip(((page - 1) * limit) as usize)
                .take(limit as usize)
                .collect(),
            _ => all,
        };
        Ok(ListPage {
            records,
            total,
            total_reported: true,
        })
    }

    async fn get_by_id(&self, entity: &str, id: &str) -> Result<Record, RecordError> {
        self.log(StoreCall::Get {
            entity: entity.to_string(),
            id: id.to_string(),
        });
        self.check_present(entity, id)?;
        self.records(entity)
            .into_iter()
            .find(|record| record_id(record).as_deref() == Some(id))
            .ok_or_else(|| RecordError::NotFound {
                entity: entity.to_string(),
                id: id.to_string(),
            })
    }

    async fn create(&self, entity: &str, payload: &Record) -> Result<Record, RecordError> {
        self.log(StoreCall::Create {
            entity: entity.to_string(),
        });
        let mut collections = self.collections.lock().unwrap();
        let records = collections.entry(entity.to_string()).or_default();
        let mut created = payload.clone();
        created.insert("id".into(), Value::from(records.len() as u64 + 1));
        records.push(created.clone());
        Ok(created)
    }

    async fn update(&self, entity: &str, id: &str, payload: &Record) -> Result<Record, RecordError> {
        self.log(StoreCall::Update {
            entity: entity.to_string(),
            id: id.to_string(),
        });
        self.check_present(entity, id)?;
        let mut updated = payload.clone();
        updated.insert("id".into(), Value::from(id));
        Ok(updated)
    }

    async fn patch(&self, entity: &str, id: &str, payload: &Record) -> Result<Record, RecordError> {
        self.log(StoreCall::Patch {
            entity: entity.to_string(),
            id: id.to_string(),
        });
        self.check_present(entity, id)?;
        Ok(payload.clone())
    }

    async fn remove(&self, entity: &str, id: &str) -> Result<(), RecordError> {
        self.log(StoreCall::Remove {
            entity: entity.to_string(),
            id: id.to_string(),
        });
        self.check_present(entity, id)?;
        let mut collections = self.collections.lock().unwrap();
        if let Some(records) = collections.get_mut(entity) {
            records.retain(|record| record_id(record).as_deref() != Some(id));
        }
        Ok(())
    }
}

/// Dispatch `intent` and run every remote call it triggers, feeding each
/// outcome back into the controller until the panel settles.
pub async fn drive(controller: &mut ViewController, store: &dyn RecordStore, intent: PanelIntent) {
    let mut next = controller.dispatch(intent);
    while let Some(command) = next {
        let outcome = command.execute(store).await;
        next = controller.dispatch(outcome);
    }
}

/// Run the initial load.
pub async fn start(controller: &mut ViewController, store: &dyn RecordStore) {
    drive(controller, store, PanelIntent::Refresh).await;
}
