//! Proof-photo upload.
//!
//! TRADE-OFFS
//! ==========
//! Photos go straight to the configured upload endpoint as a multipart POST
//! and the endpoint answers with a public `url`. This stands in for a
//! signed-upload flow; the checklist only ever stores the returned URL.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Pull the stored-object URL out of the upload response.
pub(crate) fn url_from_upload_response(body: Value) -> Result<String, ApiError> {
    let resp: UploadResponse = serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if resp.url.trim().is_empty() {
        return Err(ApiError::Decode("upload response has an empty url".to_owned()));
    }
    Ok(resp.url)
}

/// Storage object name: `proofs/{task}/{item}/{unique}.{ext}`.
///
/// The extension comes from the original file name and falls back to `jpg`.
#[must_use]
pub fn proof_object_name(task_id: &str, item_id: &str, file_name: &str, unique: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "jpg".to_owned());
    format!("proofs/{task_id}/{item_id}/{unique}.{ext}")
}

/// Upload one proof photo and return its URL.
///
/// # Errors
///
/// [`ApiError::NotConfigured`] without an upload URL; otherwise the transport
/// failure classes of `http::send_form`.
#[cfg(feature = "hydrate")]
pub async fn upload_proof(
    remote: &super::Remote,
    task_id: &str,
    item_id: &str,
    file: &web_sys::File,
) -> Result<String, ApiError> {
    let url = remote.config.proof_upload_url.clone().ok_or(ApiError::NotConfigured)?;
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Network(format!("{e:?}"));

    let unique = uuid::Uuid::new_v4().to_string();
    let name = proof_object_name(task_id, item_id, &file.name(), &unique);
    let form = web_sys::FormData::new().map_err(js_err)?;
    form.append_with_blob_and_filename("file", file, &name).map_err(js_err)?;
    form.append_with_str("taskId", task_id).map_err(js_err)?;
    form.append_with_str("itemId", item_id).map_err(js_err)?;

    let body = super::http::send_form(&url, Some(&remote.id_token), form).await?;
    url_from_upload_response(body)
}
