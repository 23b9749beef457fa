//! The live client collection.
//!
//! Mutations go through [`ClientStore`], which persists the new state before
//! committing it in memory and then publishes a snapshot to subscribers.

use crate::errors::AppError;
use crate::models::{AppData, ClientRecord};
use crate::storage::persist_data;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, watch};
use tracing::{debug, info};
use uuid::Uuid;

pub type Snapshot = Arc<Vec<ClientRecord>>;

pub struct ClientStore {
    data_path: PathBuf,
    data: Mutex<AppData>,
    changes: watch::Sender<Snapshot>,
}

impl ClientStore {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        let (changes, _) = watch::channel(Arc::new(data.clients.clone()));
        Self {
            data_path,
            data: Mutex::new(data),
            changes,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Receives the latest snapshot after every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.changes.subscribe()
    }

    pub async fn snapshot(&self) -> Vec<ClientRecord> {
        self.data.lock().await.clients.clone()
    }

    pub async fn get(&self, id: &str) -> Option<ClientRecord> {
        let data = self.data.lock().await;
        data.clients.iter().find(|client| client.id == id).cloned()
    }

    /// Stores a new client under a freshly generated id.
    pub async fn add(&self, fields: BTreeMap<String, String>) -> Result<ClientRecord, AppError> {
        let record = ClientRecord::new(Uuid::now_v7().to_string(), fields);

        let mut data = self.data.lock().await;
        let mut next = data.clone();
        next.clients.push(record.clone());
        self.commit(&mut data, next).await?;

        info!(id = %record.id, "client added");
        Ok(record)
    }

    /// Replaces every field of an existing client.
    pub async fn update(
        &self,
        id: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<ClientRecord, AppError> {
        let mut data = self.data.lock().await;
        let index = position(&data, id)?;

        let record = ClientRecord::new(id, fields);
        let mut next = data.clone();
        next.clients[index] = record.clone();
        self.commit(&mut data, next).await?;

        info!(id, "client updated");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut data = self.data.lock().await;
        let index = position(&data, id)?;

        let mut next = data.clone();
        next.clients.remove(index);
        self.commit(&mut data, next).await?;

        info!(id, "client deleted");
        Ok(())
    }

    /// Case-insensitive substring search over the id and all field values.
    pub async fn search(&self, query: &str) -> Vec<ClientRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let data = self.data.lock().await;
        let found: Vec<ClientRecord> = data
            .clients
            .iter()
            .filter(|client| matches_query(client, &needle))
            .cloned()
            .collect();
        debug!(query = %needle, hits = found.len(), "client search");
        found
    }

    async fn commit(&self, current: &mut MutexGuard<'_, AppData>, next: AppData) -> Result<(), AppError> {
        persist_data(&self.data_path, &next).await?;
        **current = next;
        self.changes.send_replace(Arc::new(current.clients.clone()));
        Ok(())
    }
}

fn position(data: &AppData, id: &str) -> Result<usize, AppError> {
    data.clients
        .iter()
        .position(|client| client.id == id)
        .ok_or_else(|| AppError::not_found(format!("client {id} not found")))
}

fn matches_query(client: &ClientRecord, needle: &str) -> bool {
    std::iter::once(client.id.as_str())
        .chain(client.fields.values().map(String::as_str))
        .any(|value| value.to_lowercase().contains(needle))
}
