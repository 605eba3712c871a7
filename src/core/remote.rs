//! HTTP implementation of [`ExplorerApi`] for the FileXplore server.
//!
//! Every endpoint answers with an envelope `{ success, message, data }`.
//! The listing endpoint nests its payload as a JSON *string* inside `data`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::endpoints;
use crate::core::api::ExplorerApi;
use crate::core::error::FetchError;
use crate::models::{
    CommandReply, DirectoryListing, Entry, EntryKind, SystemInfo, VirtualPath,
};
use crate::utils::fetch::{self, Body};
use crate::utils::format::parse_timestamp;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    /// Payload of a successful envelope, or the server's message as an error.
    fn into_data(self) -> Result<Value, FetchError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(FetchError::Server(self.message))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireListing {
    current_path: String,
    #[serde(default)]
    parent_path: String,
    #[serde(default)]
    files: Vec<WireFile>,
}

#[derive(Debug, Deserialize)]
struct WireFile {
    name: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    modified: String,
}

impl From<WireFile> for Entry {
    fn from(file: WireFile) -> Self {
        let modified_at = parse_timestamp(&file.modified);
        match file.kind {
            EntryKind::Directory => Entry::directory(file.name, modified_at),
            EntryKind::File => Entry::file(file.name, file.size, modified_at),
        }
    }
}

#[derive(Serialize)]
struct CommandRequest<'a> {
    command: &'a str,
    args: &'a [String],
}

// =============================================================================
// Envelope Decoding
// =============================================================================

fn decode_listing(envelope: Envelope) -> Result<DirectoryListing, FetchError> {
    let data = envelope.into_data()?;
    let raw = data.as_str().ok_or(FetchError::InvalidContent)?;
    let wire: WireListing = serde_json::from_str(raw)?;
    Ok(DirectoryListing {
        current_path: VirtualPath::new(&wire.current_path),
        parent_path: VirtualPath::new(&wire.parent_path),
        entries: wire.files.into_iter().map(Entry::from).collect(),
    })
}

fn decode_system_info(envelope: Envelope) -> Result<SystemInfo, FetchError> {
    Ok(serde_json::from_value(envelope.into_data()?)?)
}

fn decode_content(envelope: Envelope) -> Result<String, FetchError> {
    match envelope.into_data()? {
        Value::String(content) => Ok(content),
        _ => Err(FetchError::InvalidContent),
    }
}

fn decode_command(envelope: Envelope) -> CommandReply {
    CommandReply {
        success: envelope.success,
        message: envelope.message,
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Talks to the FileXplore server over the Fetch API.
#[derive(Clone, Debug, Default)]
pub struct HttpExplorerApi {
    /// Origin prefix, empty for same-origin requests
    base_url: String,
}

impl HttpExplorerApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn file_url(&self, path: &VirtualPath) -> String {
        let encoded: String = js_sys::encode_uri_component(path.as_str()).into();
        format!("{}{}", self.url(endpoints::FILE), encoded)
    }
}

impl ExplorerApi for HttpExplorerApi {
    async fn listing(&self, path: &VirtualPath) -> Result<DirectoryListing, FetchError> {
        let encoded: String = js_sys::encode_uri_component(path.as_str()).into();
        let url = format!("{}?path={}", self.url(endpoints::FILESYSTEM), encoded);
        decode_listing(fetch::get_json(&url).await?)
    }

    async fn system_info(&self) -> Result<SystemInfo, FetchError> {
        decode_system_info(fetch::get_json(&self.url(endpoints::SYSTEM)).await?)
    }

    async fn file_content(&self, path: &VirtualPath) -> Result<String, FetchError> {
        decode_content(fetch::get_json(&self.file_url(path)).await?)
    }

    async fn save_file(&self, path: &VirtualPath, content: &str) -> Result<(), FetchError> {
        let envelope: Envelope = fetch::post_json(&self.file_url(path), Body::Text(content)).await?;
        envelope.into_data().map(|_| ())
    }

    async fn command(&self, verb: &str, args: &[String]) -> Result<CommandReply, FetchError> {
        let body = serde_json::to_string(&CommandRequest {
            command: verb,
            args,
        })?;
        let envelope = fetch::post_json(&self.url(endpoints::COMMAND), Body::Json(body)).await?;
        Ok(decode_command(envelope))
    }

    fn download_url(&self, path: &VirtualPath) -> String {
        self.file_url(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_listing_nested_string() {
        let inner = r#"{"currentPath":"/docs","parentPath":"/","files":[
            {"name":"a.txt","type":"file","size":42,"modified":"1970-01-01T00:01:40Z","permissions":"rw-r--r--"},
            {"name":"sub","type":"directory","size":0,"modified":""}
        ]}"#;
        let outer = serde_json::json!({
            "success": true,
            "message": "File system data retrieved",
            "data": inner,
        });
        let listing = decode_listing(serde_json::from_value(outer).unwrap()).unwrap();

        assert_eq!(listing.current_path, "/docs");
        assert_eq!(listing.parent_path, "/");
        assert_eq!(listing.entries[0], Entry::file("a.txt", 42, Some(100)));
        assert_eq!(listing.entries[1], Entry::directory("sub", None));
    }

    #[test]
    fn test_decode_listing_failure_message() {
        let env = envelope(r#"{"success":false,"message":"Error retrieving file system data","data":""}"#);
        assert_eq!(
            decode_listing(env),
            Err(FetchError::Server("Error retrieving file system data".into()))
        );
    }

    #[test]
    fn test_decode_listing_rejects_non_string_data() {
        let env = envelope(r#"{"success":true,"message":"","data":{"files":[]}}"#);
        assert_eq!(decode_listing(env), Err(FetchError::InvalidContent));
    }

    #[test]
    fn test_decode_system_info() {
        let env = envelope(
            r#"{"success":true,"message":"ok","data":{"disk_usage":{"used":1,"total":4},"file_count":2,"directory_count":1}}"#,
        );
        let info = decode_system_info(env).unwrap();
        assert_eq!(info.disk_usage.total, 4);
        assert_eq!(info.file_count, 2);
    }

    #[test]
    fn test_decode_content() {
        let env = envelope(r#"{"success":true,"message":"File content retrieved","data":"hello\n"}"#);
        assert_eq!(decode_content(env).unwrap(), "hello\n");
    }

    #[test]
    fn test_decode_command_keeps_failure() {
        let env = envelope(r#"{"success":false,"message":"rm: no such file","data":""}"#);
        assert_eq!(
            decode_command(env),
            CommandReply {
                success: false,
                message: "rm: no such file".into()
            }
        );
    }

    #[test]
    fn test_command_request_shape() {
        let args = vec!["/a.txt".to_string()];
        let json = serde_json::to_value(CommandRequest {
            command: "delete",
            args: &args,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"command": "delete", "args": ["/a.txt"]}));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpExplorerApi::new("http://localhost:8080/");
        assert_eq!(api.url(endpoints::SYSTEM), "http://localhost:8080/api/system");
    }
}
