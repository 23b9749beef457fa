use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PLANNED_SERVICE_DATE: &str = "Дата планируемого ТО";
pub const SERVICE_DATE: &str = "Дата ТО";
pub const FULL_NAME: &str = "ФИО";
pub const PHONE: &str = "Телефон";

/// A client card: a stable id plus an open set of named text fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClientRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl ClientRecord {
    pub fn new(id: impl Into<String>, mut fields: BTreeMap<String, String>) -> Self {
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub clients: Vec<ClientRecord>,
}

/// One entry of the month picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientsResponse {
    pub clients: Vec<ClientRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub clients: Vec<ClientRecord>,
}
