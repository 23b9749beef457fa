use crate::errors::AppError;
use crate::models::AppData;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(path = %path.display(), clients = data.clients.len(), "loaded client data");
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

/// Writes a sibling temp file and renames it over `path`, so a failed write
/// never leaves a truncated data file behind.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let tmp = temp_path(path);
    fs::write(&tmp, payload).await.map_err(AppError::internal)?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(AppError::internal(err));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientRecord;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let data = load_data(&temp.path().join("absent.json")).await;
        assert!(data.clients.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clients.json");
        std::fs::write(&path, "{not json").unwrap();

        let data = load_data(&path).await;
        assert!(data.clients.is_empty());
    }

    #[tokio::test]
    async fn persisted_data_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clients.json");
        let data = AppData {
            clients: vec![ClientRecord::new("c1", BTreeMap::new())],
        };

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        assert_eq!(loaded.clients, data.clients);
    }

    #[tokio::test]
    async fn persist_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clients.json");

        persist_data(&path, &AppData::default()).await.unwrap();
        assert!(path.exists());
        assert!(!temp.path().join("clients.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_persist_keeps_previous_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clients.json");
        let original = AppData {
            clients: vec![ClientRecord::new("c1", BTreeMap::new())],
        };
        persist_data(&path, &original).await.unwrap();

        // The temp slot is taken by a directory, so the write cannot start.
        std::fs::create_dir(temp.path().join("clients.json.tmp")).unwrap();
        let err = persist_data(&path, &AppData::default()).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let loaded = load_data(&path).await;
        assert_eq!(loaded.clients, original.clients);
    }
}
