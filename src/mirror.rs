//! Best-effort mirror of the client list into an external spreadsheet.
//!
//! The sync endpoint receives the whole table on every change. Failures are
//! logged and dropped; nothing waits on the push.

use crate::models::ClientRecord;
use crate::store::Snapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Spreadsheet columns, in order. The first is the 1-based row number.
pub const SHEET_HEADERS: [&str; 29] = [
    "ID",
    "Область",
    "Район",
    "Вид населенного пункта",
    "Наименование населенного пункта",
    "Тип улицы",
    "Улица",
    "№ Дома",
    "№ Квартиры",
    "Телефон",
    "ФИО",
    "Копия техпаспорта на жилое помещение",
    "№ Договора",
    "Дата заключения договора",
    "Торговая марка",
    "Серия оборудования",
    "Модель",
    "Дата ввода в эксплуатацию",
    "Серийный номер котла",
    "Вид Работ",
    "Дата ТО",
    "Дата планируемого ТО",
    "Причина отказа",
    "№ Гарантийного талона",
    "Исполнитель",
    "Акт осмотра вент каналов,срок действия",
    "Примечание",
    "Дата ремонта",
    "Замененная запчасть",
];

#[derive(Debug, Serialize)]
struct SyncRequest<'a> {
    action: &'static str,
    headers: &'a [&'static str],
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SyncReply {
    status: Option<String>,
    message: Option<String>,
}

/// One row per client: row number, then each named column or `""`.
pub fn format_rows(clients: &[ClientRecord]) -> Vec<Vec<Value>> {
    clients
        .iter()
        .enumerate()
        .map(|(index, client)| {
            let mut row = Vec::with_capacity(SHEET_HEADERS.len());
            row.push(Value::from(index + 1));
            row.extend(
                SHEET_HEADERS[1..]
                    .iter()
                    .map(|column| Value::from(client.field(column).unwrap_or_default())),
            );
            row
        })
        .collect()
}

/// How long one push may take, connection included.
pub const PUSH_TIMEOUT: Duration = Duration::from_secs(15);

/// What happened to a single push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Synced,
    /// The endpoint answered but did not report success.
    Rejected(String),
    /// Transport error, timeout, non-2xx status or unreadable reply.
    Failed(String),
}

pub struct SheetMirror {
    client: reqwest::Client,
    url: String,
}

impl SheetMirror {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(url, PUSH_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Sends the full table once. The outcome is logged here; callers may ignore it.
    pub async fn push(&self, clients: &[ClientRecord]) -> PushOutcome {
        let body = SyncRequest {
            action: "sync",
            headers: &SHEET_HEADERS,
            values: format_rows(clients),
        };

        let resp = match self.client.post(&self.url).json(&body).send().await {
            Ok(resp) => resp,
            Err(err) => {
                error!("spreadsheet sync request failed: {err}");
                return PushOutcome::Failed(err.to_string());
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            error!(%status, "spreadsheet sync endpoint returned an error: {text}");
            return PushOutcome::Failed(format!("HTTP {status}"));
        }

        match resp.json::<SyncReply>().await {
            Ok(reply) if reply.status.as_deref() == Some("success") => {
                info!(rows = clients.len(), "spreadsheet synced");
                PushOutcome::Synced
            }
            Ok(reply) => {
                let message = reply.message.unwrap_or_default();
                error!(
                    status = reply.status.as_deref().unwrap_or("<none>"),
                    "spreadsheet sync rejected: {message}"
                );
                PushOutcome::Rejected(message)
            }
            Err(err) => {
                error!("unreadable spreadsheet sync reply: {err}");
                PushOutcome::Failed(err.to_string())
            }
        }
    }
}

/// Pushes the current snapshot, then every later one, until the store goes away.
pub fn spawn_mirror(mirror: SheetMirror, mut changes: watch::Receiver<Snapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let snapshot = changes.borrow_and_update().clone();
            mirror.push(&snapshot).await;

            if changes.changed().await.is_err() {
                debug!("client store closed, stopping spreadsheet mirror");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppData;
    use crate::store::ClientStore;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tokio::net::TcpListener;
    use tokio::time::{sleep, timeout, Instant};

    #[derive(Clone)]
    struct Endpoint {
        bodies: Arc<Mutex<Vec<Value>>>,
        status: StatusCode,
        reply: &'static str,
    }

    async fn record(State(endpoint): State<Endpoint>, Json(body): Json<Value>) -> (StatusCode, String) {
        endpoint.bodies.lock().unwrap().push(body);
        (endpoint.status, endpoint.reply.to_string())
    }

    /// Serves a sync endpoint on a random port; returns its URL and the bodies it received.
    async fn serve_endpoint(status: StatusCode, reply: &'static str) -> (String, Arc<Mutex<Vec<Value>>>) {
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let endpoint = Endpoint {
            bodies: Arc::clone(&bodies),
            status,
            reply,
        };
        let app = Router::new().route("/sync", post(record)).with_state(endpoint);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}/sync"), bodies)
    }

    async fn wait_for_bodies(bodies: &Arc<Mutex<Vec<Value>>>, count: usize) -> Vec<Value> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let seen = bodies.lock().unwrap().clone();
            if seen.len() >= count {
                return seen;
            }
            if Instant::now() > deadline {
                panic!("expected {count} sync requests, got {}", seen.len());
            }
            sleep(Duration::from_millis(20)).await;
        }
    }

    fn client(name: &str) -> ClientRecord {
        let mut fields = BTreeMap::new();
        fields.insert("ФИО".to_string(), name.to_string());
        ClientRecord::new(name, fields)
    }

    #[test]
    fn rows_follow_header_order() {
        let mut fields = BTreeMap::new();
        fields.insert("ФИО".to_string(), "Иванов".to_string());
        fields.insert("Дата ТО".to_string(), "2025-03-10".to_string());
        fields.insert("Не в таблице".to_string(), "x".to_string());
        let clients = vec![
            ClientRecord::new("a", fields),
            ClientRecord::new("b", BTreeMap::new()),
        ];

        let rows = format_rows(&clients);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == SHEET_HEADERS.len()));

        let name_col = SHEET_HEADERS.iter().position(|h| *h == "ФИО").unwrap();
        let date_col = SHEET_HEADERS.iter().position(|h| *h == "Дата ТО").unwrap();
        assert_eq!(rows[0][0], Value::from(1));
        assert_eq!(rows[0][name_col], Value::from("Иванов"));
        assert_eq!(rows[0][date_col], Value::from("2025-03-10"));
        assert_eq!(rows[1][0], Value::from(2));
        assert_eq!(rows[1][name_col], Value::from(""));
    }

    #[test]
    fn request_body_shape() {
        let body = SyncRequest {
            action: "sync",
            headers: &SHEET_HEADERS,
            values: format_rows(&[]),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["action"], "sync");
        assert_eq!(json["headers"][0], "ID");
        assert_eq!(json["values"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn push_reports_synced_on_success_reply() {
        let (url, bodies) = serve_endpoint(StatusCode::OK, r#"{"status":"success"}"#).await;
        let mirror = SheetMirror::new(url).unwrap();

        let outcome = mirror.push(&[client("Иванов"), client("Петров")]).await;
        assert_eq!(outcome, PushOutcome::Synced);

        let seen = bodies.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["action"], "sync");
        assert_eq!(seen[0]["headers"][0], "ID");
        assert_eq!(seen[0]["values"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn push_reports_rejection_message() {
        let (url, _) = serve_endpoint(StatusCode::OK, r#"{"status":"error","message":"sheet locked"}"#).await;
        let mirror = SheetMirror::new(url).unwrap();

        let outcome = mirror.push(&[client("Иванов")]).await;
        assert_eq!(outcome, PushOutcome::Rejected("sheet locked".to_string()));
    }

    #[tokio::test]
    async fn push_fails_on_error_status_before_decoding() {
        let (url, _) = serve_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").await;
        let mirror = SheetMirror::new(url).unwrap();

        match mirror.push(&[]).await {
            PushOutcome::Failed(message) => assert!(message.contains("500"), "{message}"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn push_fails_when_endpoint_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let mirror = SheetMirror::new(format!("http://{addr}/sync")).unwrap();

        assert!(matches!(mirror.push(&[]).await, PushOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn push_gives_up_on_silent_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and never answer.
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        let mirror =
            SheetMirror::with_timeout(format!("http://{addr}/sync"), Duration::from_millis(200)).unwrap();

        let outcome = timeout(Duration::from_secs(5), mirror.push(&[client("Иванов")]))
            .await
            .expect("push should time out on its own");
        assert!(matches!(outcome, PushOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn mirror_pushes_initial_and_changed_tables() {
        let (url, bodies) = serve_endpoint(StatusCode::OK, r#"{"status":"success"}"#).await;
        let temp = TempDir::new().unwrap();
        let store = ClientStore::new(temp.path().join("clients.json"), AppData::default());

        let handle = spawn_mirror(SheetMirror::new(url).unwrap(), store.subscribe());

        let seen = wait_for_bodies(&bodies, 1).await;
        assert_eq!(seen[0]["values"], serde_json::json!([]));

        let mut fields = BTreeMap::new();
        fields.insert("ФИО".to_string(), "Иванов".to_string());
        store.add(fields).await.unwrap();

        let seen = wait_for_bodies(&bodies, 2).await;
        let rows = seen.last().unwrap()["values"].as_array().unwrap().clone();
        assert_eq!(rows.len(), 1);
        let name_col = SHEET_HEADERS.iter().position(|h| *h == "ФИО").unwrap();
        assert_eq!(rows[0][0], 1);
        assert_eq!(rows[0][name_col], "Иванов");

        drop(store);
        timeout(Duration::from_secs(5), handle)
            .await
            .expect("mirror task should stop with the store")
            .unwrap();
    }
}
