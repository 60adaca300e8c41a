//! In-memory backend for controller tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::persona::PersonaRecord;
use crate::settings::{ConfigValues, Schema};
use crate::ui::SelectedFile;

use super::{
    ApiResponse, PersonaApi, PersonaListResponse, SettingsApi, SettingsBundle, UploadResponse,
};

#[derive(Debug, Default)]
struct MockState {
    schema: Schema,
    config: ConfigValues,
    personas: Vec<PersonaRecord>,
    offline: bool,
    settings_flag_false: bool,
    persona_flag_false: bool,
    save_rejection: Option<Option<String>>,
    upload_response: Option<UploadResponse>,
    saved_settings: Vec<Value>,
    saved_personas: Vec<Vec<PersonaRecord>>,
    uploads: Vec<String>,
}

/// Records every write and answers reads from configurable state
#[derive(Debug, Default)]
pub struct MockApi {
    state: RwLock<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_settings(&self, schema: Schema, config: Value) {
        let mut state = self.state.write();
        state.schema = schema;
        state.config = config.as_object().cloned().unwrap_or_default();
    }

    pub fn set_personas(&self, personas: Vec<PersonaRecord>) {
        self.state.write().personas = personas;
    }

    /// Every request fails as if the backend were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.state.write().offline = offline;
    }

    /// `GET /api/config` answers `success: false`
    pub fn fail_settings_flag(&self, fail: bool) {
        self.state.write().settings_flag_false = fail;
    }

    /// `GET /api/personas` answers `success: false`
    pub fn fail_persona_flag(&self, fail: bool) {
        self.state.write().persona_flag_false = fail;
    }

    /// Saves answer `{success: false, message}`
    pub fn reject_saves(&self, message: Option<&str>) {
        self.state.write().save_rejection = Some(message.map(str::to_string));
    }

    pub fn set_upload_response(&self, response: UploadResponse) {
        self.state.write().upload_response = Some(response);
    }

    pub fn saved_settings(&self) -> Vec<Value> {
        self.state.read().saved_settings.clone()
    }

    pub fn saved_personas(&self) -> Vec<Vec<PersonaRecord>> {
        self.state.read().saved_personas.clone()
    }

    pub fn last_saved_personas(&self) -> Option<Vec<PersonaRecord>> {
        self.state.read().saved_personas.last().cloned()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.state.read().uploads.clone()
    }

    fn check_online(&self, endpoint: &str) -> Result<()> {
        if self.state.read().offline {
            return Err(Error::HttpStatus {
                endpoint: endpoint.to_string(),
                status: 503,
            });
        }
        Ok(())
    }

    fn save_answer(&self) -> ApiResponse {
        match &self.state.read().save_rejection {
            Some(message) => ApiResponse {
                success: false,
                message: message.clone(),
            },
            None => ApiResponse::ok(),
        }
    }
}

#[async_trait]
impl SettingsApi for MockApi {
    async fn fetch_settings(&self) -> Result<SettingsBundle> {
        self.check_online("/api/config")?;
        let state = self.state.read();
        Ok(SettingsBundle {
            success: !state.settings_flag_false,
            schema: state.schema.clone(),
            config: state.config.clone(),
        })
    }

    async fn save_settings(&self, values: &ConfigValues) -> Result<ApiResponse> {
        self.check_online("/api/config")?;
        let answer = self.save_answer();
        let mut state = self.state.write();
        state.saved_settings.push(Value::Object(values.clone()));
        if answer.success {
            state.config = values.clone();
        }
        Ok(answer)
    }
}

#[async_trait]
impl PersonaApi for MockApi {
    async fn fetch_personas(&self) -> Result<PersonaListResponse> {
        self.check_online("/api/personas")?;
        let state = self.state.read();
        Ok(PersonaListResponse {
            success: !state.persona_flag_false,
            personas: state.personas.clone(),
        })
    }

    async fn save_personas(&self, personas: &[PersonaRecord]) -> Result<ApiResponse> {
        self.check_online("/api/personas")?;
        let answer = self.save_answer();
        let mut state = self.state.write();
        state.saved_personas.push(personas.to_vec());
        if answer.success {
            state.personas = personas.to_vec();
        }
        Ok(answer)
    }

    async fn upload_image(&self, file: &SelectedFile) -> Result<UploadResponse> {
        self.check_online("/api/upload-image")?;
        let mut state = self.state.write();
        state.uploads.push(file.name.clone());
        Ok(state.upload_response.clone().unwrap_or_else(|| UploadResponse {
            success: true,
            url: Some(format!("/img/{}", file.name)),
            message: None,
        }))
    }
}
