//! Client side of the admin backend's JSON-over-HTTP contract.
//!
//! | Method | Path                | Body                  | Response                         |
//! |--------|---------------------|-----------------------|----------------------------------|
//! | GET    | `/api/config`       | –                     | `{success, schema, config}`      |
//! | POST   | `/api/config`       | flat `{field: value}` | `{success, message?}`            |
//! | GET    | `/api/personas`     | –                     | `{success, personas}`            |
//! | POST   | `/api/personas`     | `[PersonaRecord]`     | `{success, message?}`            |
//! | POST   | `/api/upload-image` | multipart `file`      | `{success, url?, message?}`      |

pub mod http;
#[cfg(test)]
pub mod mock;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::persona::PersonaRecord;
use crate::ui::SelectedFile;

pub use http::HttpClient;
pub use types::{ApiResponse, PersonaListResponse, SettingsBundle, UploadResponse};

use crate::settings::ConfigValues;

pub const CONFIG_PATH: &str = "api/config";
pub const PERSONAS_PATH: &str = "api/personas";
pub const UPLOAD_PATH: &str = "api/upload-image";

/// Backend operations the settings form needs
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// Fetch the schema together with the current values
    async fn fetch_settings(&self) -> Result<SettingsBundle>;

    /// Replace the whole settings map
    async fn save_settings(&self, values: &ConfigValues) -> Result<ApiResponse>;
}

/// Backend operations the persona board needs
#[async_trait]
pub trait PersonaApi: Send + Sync {
    async fn fetch_personas(&self) -> Result<PersonaListResponse>;

    /// Replace the whole persona list
    async fn save_personas(&self, personas: &[PersonaRecord]) -> Result<ApiResponse>;

    async fn upload_image(&self, file: &SelectedFile) -> Result<UploadResponse>;
}
