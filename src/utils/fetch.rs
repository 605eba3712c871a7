//! Network fetching utilities with timeout support.
//!
//! Thin wrappers over the browser Fetch API. Every request is raced against
//! [`FETCH_TIMEOUT_MS`]; non-2xx responses are turned into
//! [`FetchError::HttpError`] carrying the server's `message` when present.

use js_sys::{Array, Promise};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Timeout promise resolves to undefined
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) if result.is_undefined() => RaceResult::TimedOut,
        Ok(result) => RaceResult::Completed(result),
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// Request Body
// =============================================================================

/// Payload of a POST request.
pub enum Body<'a> {
    Json(String),
    Text(&'a str),
}

impl Body<'_> {
    fn content_type(&self) -> &'static str {
        match self {
            Body::Json(_) => "application/json",
            Body::Text(_) => "text/plain",
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Body::Json(json) => json.as_str(),
            Body::Text(text) => *text,
        }
    }
}

// =============================================================================
// Fetch Functions
// =============================================================================

/// GET a URL and parse the JSON response.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let text = send("GET", url, None).await?;
    Ok(serde_json::from_str(&text)?)
}

/// POST a body and parse the JSON response.
pub async fn post_json<T: DeserializeOwned>(url: &str, body: Body<'_>) -> Result<T, FetchError> {
    let text = send("POST", url, Some(body)).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Issue a request and return the response body as text.
async fn send(method: &str, url: &str, body: Option<Body<'_>>) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
    let content_type = body.as_ref().map_or("application/json", Body::content_type);
    headers
        .set("Content-Type", content_type)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    opts.set_headers(&headers);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body.as_str()));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, FETCH_TIMEOUT_MS).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;
            let text = read_text(&resp).await?;

            if !resp.ok() {
                return Err(FetchError::HttpError {
                    status: resp.status(),
                    message: error_message(&text),
                });
            }
            Ok(text)
        }
    }
}

async fn read_text(resp: &Response) -> Result<String, FetchError> {
    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;
    text.as_string().ok_or(FetchError::InvalidContent)
}

/// Pull `message` out of an error envelope, falling back to the raw body.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
