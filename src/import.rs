//! YAML import pipeline: URL → validated screens.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_yaml::Value;

use crate::{error::ImportError, schema::{self, Screen}};

/// Fetch a YAML stream from `url` and map every document to one screen.
///
/// All-or-nothing: the first syntactically or structurally bad document
/// aborts the call and nothing is returned. No retries; the caller decides
/// whether to try again.
pub async fn import_screens(http: &Client, url: &str) -> Result<Vec<Screen>, ImportError> {
    let text = fetch_text(http, url).await?;
    // One timestamp per import call; the document index makes ids unique
    // within the call, the millisecond granularity across calls.
    parse_screens(&text, Utc::now().timestamp_millis())
}

/// GET the document body as text, folding transport errors and non-2xx
/// statuses into `FetchFailed`.
async fn fetch_text(http: &Client, url: &str) -> Result<String, ImportError> {
    let resp = http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ImportError::FetchFailed(e.to_string()))?;
    resp.text()
        .await
        .map_err(|e| ImportError::FetchFailed(e.to_string()))
}

/// Parse a (possibly multi-document) YAML stream into screens. Each document
/// gets the id `{stamp}-{index}`.
pub fn parse_screens(text: &str, stamp: i64) -> Result<Vec<Screen>, ImportError> {
    let mut screens = Vec::new();
    for (index, doc) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = Value::deserialize(doc).map_err(|e| ImportError::Syntax(e.to_string()))?;
        let screen = schema::screen_from_document(&value, index + 1, format!("{stamp}-{index}"))?;
        screens.push(screen);
    }
    Ok(screens)
}
