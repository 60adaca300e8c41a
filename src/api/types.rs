//! Wire types for the admin backend responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::persona::PersonaRecord;
use crate::settings::{ConfigValues, Schema};

/// `GET /api/config`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsBundle {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub schema: Schema,
    #[serde(default)]
    pub config: ConfigValues,
}

/// `{success, message?}` as returned by both POST endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// `GET /api/personas`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub personas: Vec<PersonaRecord>,
}

/// `POST /api/upload-image`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Decode a JSON body, falling back to the status when the body is unreadable.
///
/// A parsable body wins even on a non-2xx status, because the backend
/// reports application failures as `{success: false}` with a 4xx/5xx code.
pub fn decode_body<T: DeserializeOwned>(endpoint: &str, status: u16, body: &str) -> Result<T> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if !(200..300).contains(&status) => Err(Error::HttpStatus {
            endpoint: endpoint.to_string(),
            status,
        }),
        Err(e) => Err(Error::malformed(endpoint, e)),
    }
}

/// What a POST answer may say about itself; every field is optional
#[derive(Debug, Default, Deserialize)]
struct PostReply {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret the answer to a whole-state POST.
///
/// Non-2xx is always a failure; a 2xx body of `{success: false}` is a
/// failure too; any other 2xx answer, including an empty body, is success.
pub fn interpret_post(endpoint: &str, status: u16, body: &str) -> Result<ApiResponse> {
    let parsed = serde_json::from_str::<PostReply>(body).ok();
    if (200..300).contains(&status) {
        let reply = parsed.unwrap_or_default();
        return Ok(ApiResponse {
            success: reply.success != Some(false),
            message: reply.message,
        });
    }
    match parsed {
        Some(reply) => Ok(ApiResponse {
            success: false,
            message: reply.message,
        }),
        None => Err(Error::HttpStatus {
            endpoint: endpoint.to_string(),
            status,
        }),
    }
}
