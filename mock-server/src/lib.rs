//! In-memory resource server speaking the Autonym route conventions.
//!
//! Any `{route}` is a collection of JSON objects keyed by a generated `id`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub type Record = Map<String, Value>;

/// Records per route, in insertion order.
pub type Db = Arc<RwLock<HashMap<String, Vec<Record>>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/{route}", get(find).post(create))
        .route(
            "/{route}/{id}",
            get(find_one).patch(find_one_and_update).delete(find_one_and_delete),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn find(
    State(db): State<Db>,
    Path(route): Path<String>,
    RawQuery(query): RawQuery,
) -> Json<Vec<Record>> {
    let filters = parse_filters(query.as_deref().unwrap_or(""));
    let db = db.read().await;
    let records = db
        .get(&route)
        .map(|records| {
            records
                .iter()
                .filter(|r| matches_filters(r, &filters))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(records)
}

async fn create(
    State(db): State<Db>,
    Path(route): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Record>), StatusCode> {
    let Value::Object(mut record) = body else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    record.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    tracing::debug!(%route, id = %record["id"], "created");
    db.write().await.entry(route).or_default().push(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn find_one(
    State(db): State<Db>,
    Path((route, id)): Path<(String, String)>,
) -> Result<Json<Record>, StatusCode> {
    let db = db.read().await;
    db.get(&route)
        .and_then(|records| records.iter().find(|r| has_id(r, &id)))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn find_one_and_update(
    State(db): State<Db>,
    Path((route, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Record>, StatusCode> {
    let Value::Object(changes) = body else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    let mut db = db.write().await;
    let record = db
        .get_mut(&route)
        .and_then(|records| records.iter_mut().find(|r| has_id(r, &id)))
        .ok_or(StatusCode::NOT_FOUND)?;
    for (key, value) in changes {
        if key != "id" {
            record.insert(key, value);
        }
    }
    Ok(Json(record.clone()))
}

async fn find_one_and_delete(
    State(db): State<Db>,
    Path((route, id)): Path<(String, String)>,
) -> Result<Json<Record>, StatusCode> {
    let mut db = db.write().await;
    let records = db.get_mut(&route).ok_or(StatusCode::NOT_FOUND)?;
    let index = records
        .iter()
        .position(|r| has_id(r, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(%route, %id, "deleted");
    Ok(Json(records.remove(index)))
}

fn has_id(record: &Record, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

/// Group query pairs by field. `tags[]=a&tags[]=b` and `tags=a` both land
/// under `tags`.
pub fn parse_filters(query: &str) -> HashMap<String, Vec<String>> {
    let mut filters: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let key: &str = &key;
        let field = key.strip_suffix("[]").unwrap_or(key).to_string();
        filters.entry(field).or_default().push(value.into_owned());
    }
    filters
}

/// A record matches when every filtered field renders as one of its values.
pub fn matches_filters(record: &Record, filters: &HashMap<String, Vec<String>>) -> bool {
    filters.iter().all(|(field, values)| {
        record
            .get(field)
            .map(render)
            .is_some_and(|rendered| values.contains(&rendered))
    })
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
