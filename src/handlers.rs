use crate::bucketing::{self, DateGroups};
use crate::errors::AppError;
use crate::models::{ClientRecord, ClientsResponse, MonthOption, SearchQuery, SearchResponse};
use crate::state::AppState;
use crate::ui::render_index;
use crate::validation::{validate_dates, validate_new_client};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Local;
use std::collections::BTreeMap;

type Fields = BTreeMap<String, String>;
type OwnedGroups = BTreeMap<String, Vec<ClientRecord>>;

pub async fn index() -> Html<String> {
    Html(render_index(&today_string()))
}

pub async fn list_clients(State(state): State<AppState>) -> Json<ClientsResponse> {
    Json(ClientsResponse {
        clients: state.store.snapshot().await,
    })
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientRecord>, AppError> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("client {id} not found")))
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> Result<(StatusCode, Json<ClientRecord>), AppError> {
    validate_new_client(&fields)?;
    let record = state.store.add(fields).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Fields>,
) -> Result<Json<ClientRecord>, AppError> {
    validate_dates(&fields)?;
    let record = state.store.update(&id, fields).await?;
    Ok(Json(record))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_upcoming(State(state): State<AppState>) -> Json<OwnedGroups> {
    let clients = state.store.snapshot().await;
    Json(to_owned_groups(bucketing::upcoming(&clients)))
}

pub async fn get_month_counts(State(state): State<AppState>) -> Json<Vec<MonthOption>> {
    let clients = state.store.snapshot().await;
    Json(bucketing::month_counts(&clients))
}

pub async fn get_month_groups(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Json<OwnedGroups> {
    let clients = state.store.snapshot().await;
    Json(to_owned_groups(bucketing::month_groups(&clients, &month)))
}

pub async fn search_clients(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let clients = state.store.search(&params.q).await;
    Json(SearchResponse {
        query: params.q,
        clients,
    })
}

fn to_owned_groups(groups: DateGroups<'_>) -> OwnedGroups {
    groups
        .into_iter()
        .map(|(date, clients)| (date, clients.into_iter().cloned().collect()))
        .collect()
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
