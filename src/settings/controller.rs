//! Owns the settings view state and handles its actions.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{ApiResponse, SettingsApi};
use crate::config::UiSettings;
use crate::ui::{Confirm, Document, Notifier};

use super::collect::collect;
use super::render::{render, RenderedForm};
use super::schema::Schema;
use super::ConfigValues;

const RESET_QUESTION: &str = "Discard unsaved changes and reload settings from the server?";

/// Page-view state: what the server declared, what we believe is saved,
/// and what is currently on screen
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub schema: Schema,
    pub values: ConfigValues,
    pub rendered: Option<RenderedForm>,
}

/// Actions bound to the settings page controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Submit,
    Reset,
}

pub struct SettingsController {
    api: Arc<dyn SettingsApi>,
    state: SettingsForm,
    notifier: Notifier,
}

impl SettingsController {
    pub fn new(api: Arc<dyn SettingsApi>, ui: &UiSettings) -> Self {
        Self {
            api,
            state: SettingsForm::default(),
            notifier: Notifier::new(ui),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SettingsForm {
        &self.state
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn rendered(&self) -> Option<&RenderedForm> {
        self.state.rendered.as_ref()
    }

    /// The on-screen inputs, for editing before submit
    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.state.rendered.as_mut().map(|r| &mut r.document)
    }

    /// Fetch schema and values; on any failure the current form stays as it is
    pub async fn load(&mut self) -> bool {
        match self.api.fetch_settings().await {
            Ok(bundle) if bundle.success => {
                info!(fields = bundle.schema.len(), "Settings loaded");
                self.state.schema = bundle.schema;
                self.state.values = bundle.config;
                self.render();
                true
            }
            Ok(_) => {
                self.notifier.error("Failed to load settings");
                false
            }
            Err(e) => {
                warn!(error = %e.format_for_log(), "Settings load failed");
                if e.is_transport() {
                    self.notifier.error("Could not reach server");
                } else {
                    self.notifier.error("Failed to load settings");
                }
                false
            }
        }
    }

    pub fn render(&mut self) {
        self.state.rendered = Some(render(&self.state.schema, &self.state.values));
    }

    /// Typed payload from the on-screen inputs
    pub fn collect(&self) -> ConfigValues {
        match &self.state.rendered {
            Some(form) => collect(&self.state.schema, &form.document),
            None => ConfigValues::new(),
        }
    }

    /// POST the payload; transport errors come back as `{success: false}`
    pub async fn save(&self, payload: &ConfigValues) -> ApiResponse {
        debug!(fields = payload.len(), "Saving settings");
        match self.api.save_settings(payload).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e.format_for_log(), "Settings save failed");
                ApiResponse::failed(e.to_string())
            }
        }
    }

    /// Collect, save, and on success adopt the payload as the saved values
    pub async fn submit(&mut self) -> bool {
        let payload = self.collect();
        let result = self.save(&payload).await;
        if result.success {
            self.state.values = payload;
            self.notifier.success("Settings saved");
            true
        } else {
            let reason = result.message.unwrap_or_else(|| "unknown error".to_string());
            self.notifier.error(format!("Save failed: {}", reason));
            false
        }
    }

    /// Reload from the server after confirmation, dropping local edits
    pub async fn reset(&mut self, guard: &mut dyn Confirm) -> bool {
        if !guard.confirm(RESET_QUESTION) {
            debug!("Reset declined");
            return false;
        }
        if self.load().await {
            self.notifier.success("Settings reset");
            true
        } else {
            false
        }
    }

    pub async fn handle(&mut self, action: SettingsAction, guard: &mut dyn Confirm) -> bool {
        match action {
            SettingsAction::Submit => self.submit().await,
            SettingsAction::Reset => self.reset(guard).await,
        }
    }
}
