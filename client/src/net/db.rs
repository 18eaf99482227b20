//! Document database reads and writes.
//!
//! ERROR HANDLING
//! ==============
//! List reads skip documents that fail to decode (logged at `warn`) so one
//! malformed record cannot blank a whole table. Single-document reads and all
//! writes return the error to the caller, which shows it as a toast.

#[cfg(test)]
#[path = "db_test.rs"]
mod db_test;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use super::Remote;
use super::error::ApiError;
use super::firestore::{self, Direction, FilterOp, Query};
use super::http::{Method, send_json};
use super::types::{Booking, ClientAccount, Property, Subscription, Task};

pub const USERS: &str = "users";
pub const PROPERTIES: &str = "properties";
pub const TASKS: &str = "tasks";
pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const BOOKINGS: &str = "bookings";

/// Most values one `in` filter may carry.
pub const IN_FILTER_LIMIT: usize = 30;

/// Deserialize decoded documents, dropping the ones that do not fit `T`.
pub(crate) fn decode_all<T: DeserializeOwned>(docs: Vec<Value>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match serde_json::from_value::<T>(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("skipping undecodable document: {e}");
                None
            }
        })
        .collect()
}

pub(crate) fn decode_one<T: DeserializeOwned>(doc: &Value) -> Result<T, ApiError> {
    let plain = firestore::decode_document(doc).ok_or_else(|| ApiError::Decode("not a document".to_owned()))?;
    serde_json::from_value(plain).map_err(|e| ApiError::Decode(e.to_string()))
}

/// PATCH URL restricted to the given field paths.
pub(crate) fn patch_url(remote: &Remote, collection: &str, id: &str, fields: &Map<String, Value>) -> String {
    let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    format!(
        "{}?{}",
        remote.config.document_url(collection, id),
        firestore::update_mask_query(&keys)
    )
}

/// Fields written when a checklist changes.
pub(crate) fn checklist_patch_fields(task: &Task) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(
        "checklist".to_owned(),
        serde_json::to_value(&task.checklist).unwrap_or_else(|_| json!([])),
    );
    fields.insert("status".to_owned(), serde_json::to_value(task.status).unwrap_or(Value::Null));
    fields.insert("completedAt".to_owned(), task.completed_at.clone().map_or(Value::Null, Value::String));
    fields
}

async fn run_query<T: DeserializeOwned>(remote: &Remote, query: &Query) -> Result<Vec<T>, ApiError> {
    let body = query.to_request_body();
    let resp = send_json(Method::Post, &remote.config.run_query_url(), Some(&remote.id_token), Some(&body)).await?;
    Ok(decode_all(firestore::decode_query_response(&resp)))
}

async fn get_document<T: DeserializeOwned>(remote: &Remote, collection: &str, id: &str) -> Result<T, ApiError> {
    let url = remote.config.document_url(collection, id);
    let resp = send_json(Method::Get, &url, Some(&remote.id_token), None).await?;
    decode_one(&resp)
}

/// Write only `fields`, leaving the rest of the document untouched.
async fn patch_document(remote: &Remote, collection: &str, id: &str, fields: &Map<String, Value>) -> Result<(), ApiError> {
    let url = patch_url(remote, collection, id, fields);
    let body = json!({ "fields": firestore::encode_fields(fields) });
    send_json(Method::Patch, &url, Some(&remote.id_token), Some(&body)).await?;
    Ok(())
}

// =============================================================================
// CLIENTS / PROPERTIES
// =============================================================================

/// All client accounts, newest signup first.
pub async fn list_clients(remote: &Remote) -> Result<Vec<ClientAccount>, ApiError> {
    let query = Query::collection(USERS)
        .where_eq("role", &json!("client"))
        .order_by("createdAt", Direction::Descending);
    run_query(remote, &query).await
}

pub async fn get_client(remote: &Remote, id: &str) -> Result<ClientAccount, ApiError> {
    get_document(remote, USERS, id).await
}

pub async fn list_properties(remote: &Remote, owner_id: &str) -> Result<Vec<Property>, ApiError> {
    let query = Query::collection(PROPERTIES).where_eq("ownerId", &json!(owner_id));
    run_query(remote, &query).await
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

pub async fn list_subscriptions(remote: &Remote) -> Result<Vec<Subscription>, ApiError> {
    let query = Query::collection(SUBSCRIPTIONS).order_by("createdAt", Direction::Descending);
    run_query(remote, &query).await
}

pub async fn subscriptions_for_user(remote: &Remote, user_id: &str) -> Result<Vec<Subscription>, ApiError> {
    let query = Query::collection(SUBSCRIPTIONS).where_eq("userId", &json!(user_id));
    run_query(remote, &query).await
}

// =============================================================================
// TASKS
// =============================================================================

/// Tasks owned by `owner_id`, or every task when `None` (super-admin view).
pub async fn list_tasks(remote: &Remote, owner_id: Option<&str>) -> Result<Vec<Task>, ApiError> {
    let mut query = Query::collection(TASKS);
    if let Some(owner_id) = owner_id {
        query = query.where_eq("ownerId", &json!(owner_id));
    }
    run_query(remote, &query).await
}

pub async fn get_task(remote: &Remote, id: &str) -> Result<Task, ApiError> {
    get_document(remote, TASKS, id).await
}

/// Persist the checklist, derived status and completion time of `task`.
pub async fn save_checklist(remote: &Remote, task: &Task) -> Result<(), ApiError> {
    patch_document(remote, TASKS, &task.id, &checklist_patch_fields(task)).await
}

// =============================================================================
// BOOKINGS
// =============================================================================

/// Bookings on any of `property_ids`, soonest check-in first.
pub async fn bookings_for_properties(remote: &Remote, property_ids: &[String]) -> Result<Vec<Booking>, ApiError> {
    let mut bookings = Vec::new();
    for chunk in property_ids.chunks(IN_FILTER_LIMIT) {
        let query = Query::collection(BOOKINGS).filter("propertyId", FilterOp::In, firestore::encode_value(&json!(chunk)));
        bookings.extend(run_query::<Booking>(remote, &query).await?);
    }
    bookings.sort_by(|a, b| a.check_in.cmp(&b.check_in));
    Ok(bookings)
}

pub async fn get_booking(remote: &Remote, id: &str) -> Result<Booking, ApiError> {
    get_document(remote, BOOKINGS, id).await
}

/// Persist the changed guest fields only.
pub async fn save_booking_fields(remote: &Remote, id: &str, fields: &Map<String, Value>) -> Result<(), ApiError> {
    if fields.is_empty() {
        return Ok(());
    }
    patch_document(remote, BOOKINGS, id, fields).await
}
