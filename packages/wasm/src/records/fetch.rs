//! One-shot remote CSV fetch through the browser `fetch` API.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::DataError;
use super::spreadsheet::parse_csv;
use super::record::Record;

fn js_error(value: JsValue) -> DataError {
    DataError::Fetch(format!("{value:?}"))
}

/// Download the body of `url` as text.
pub async fn fetch_csv(url: &str) -> Result<String, DataError> {
    let window = web_sys::window().ok_or_else(|| DataError::Fetch("no window".into()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?;
    let response: Response = response.dyn_into().map_err(js_error)?;

    if !response.ok() {
        return Err(DataError::Status(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    body.as_string()
        .ok_or_else(|| DataError::Fetch("response body is not text".into()))
}

/// Fetch and parse a spreadsheet export.
///
/// An export with no data rows is an error, so callers can fall back to
/// synthetic data instead of showing an empty scene.
pub async fn load_remote(url: &str) -> Result<Vec<Record>, DataError> {
    let text = fetch_csv(url).await?;
    let records = parse_csv(&text)?;
    if records.is_empty() {
        return Err(DataError::Empty);
    }
    log::info!("Loaded {} records from {url}", records.len());
    Ok(records)
}
