//! Persona board actions: load, edit, upload, add, delete, persist.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::PersonaApi;
use crate::config::{PersonaSettings, UiSettings};
use crate::error::{Error, Result};
use crate::ui::{Confirm, Document, Notifier, SelectedFile};

use super::board::{polish_time_now, PersonaBoard};
use super::render::{render_board, upload_input_id, RenderedBoard};

/// What a control on the rendered board asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaAction {
    Add,
    Toggle(String),
    Save(String),
    Delete(String),
    Upload(String),
    EditId { persona_id: String, value: String },
    EditImagePath { persona_id: String, value: String },
    EditPrompt { persona_id: String, value: String },
}

pub struct PersonaController {
    api: Arc<dyn PersonaApi>,
    board: PersonaBoard,
    rendered: Option<RenderedBoard>,
    notifier: Notifier,
    settings: PersonaSettings,
}

impl PersonaController {
    pub fn new(api: Arc<dyn PersonaApi>, ui: &UiSettings, settings: PersonaSettings) -> Self {
        Self {
            api,
            board: PersonaBoard::default(),
            rendered: None,
            notifier: Notifier::new(ui),
            settings,
        }
    }

    pub fn board(&self) -> &PersonaBoard {
        &self.board
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn rendered(&self) -> Option<&RenderedBoard> {
        self.rendered.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.rendered.as_mut().map(|r| &mut r.document)
    }

    /// Replace the list with the server's copy
    pub async fn load(&mut self) -> bool {
        match self.api.fetch_personas().await {
            Ok(resp) if resp.success => {
                info!(count = resp.personas.len(), "Personas loaded");
                self.board.replace(resp.personas);
                self.render();
                true
            }
            Ok(_) => {
                self.notifier.error("Failed to load personas");
                false
            }
            Err(e) => {
                warn!(error = %e.format_for_log(), "Persona load failed");
                self.notifier.error("Failed to load personas");
                false
            }
        }
    }

    pub fn render(&mut self) {
        self.rendered = Some(render_board(&self.board, &self.settings));
    }

    /// POST the whole list; re-render on success, toast on failure
    pub async fn persist(&mut self) -> bool {
        debug!(count = self.board.len(), "Saving personas");
        match self.api.save_personas(self.board.records()).await {
            Ok(resp) if resp.success => {
                self.render();
                true
            }
            Ok(resp) => {
                warn!(message = ?resp.message, "Persona save rejected");
                self.notifier.error("Save failed");
                false
            }
            Err(e) => {
                warn!(error = %e.format_for_log(), "Persona save failed");
                self.notifier.error("Save failed");
                false
            }
        }
    }

    pub fn toggle(&mut self, persona_id: &str) {
        self.board.toggle(persona_id);
        self.render();
    }

    pub async fn update_persona_id(&mut self, old_id: &str, new_id: &str) -> bool {
        match self.board.rename(old_id, new_id, &polish_time_now()) {
            Ok(true) => self.persist().await,
            Ok(false) => false,
            Err(e) => {
                warn!(error = %e.format_for_log(), "Rename refused");
                self.notifier.error(e.to_string());
                false
            }
        }
    }

    pub async fn update_image_path(&mut self, persona_id: &str, path: &str) -> bool {
        if !self.board.set_image_path(persona_id, path, &polish_time_now()) {
            return false;
        }
        self.persist().await
    }

    pub async fn update_prompt(&mut self, persona_id: &str, prompt: &str) -> bool {
        if !self.board.set_prompt(persona_id, prompt, &polish_time_now()) {
            return false;
        }
        self.persist().await
    }

    /// Put a file into a card's upload picker
    pub fn select_image(&mut self, persona_id: &str, file: SelectedFile) -> Result<()> {
        let input_id = upload_input_id(persona_id);
        let input = self
            .rendered
            .as_mut()
            .and_then(|r| r.document.file_input_mut(&input_id))
            .ok_or_else(|| Error::PersonaNotFound {
                id: persona_id.to_string(),
            })?;
        if !input.accepts(&file) {
            return Err(Error::UnsupportedImage { name: file.name });
        }
        input.select(vec![file]);
        Ok(())
    }

    /// Upload the file selected in the card's picker and point the record at it
    pub async fn upload_image(&mut self, persona_id: &str) -> bool {
        let input_id = upload_input_id(persona_id);
        let Some(input) = self
            .rendered
            .as_mut()
            .and_then(|r| r.document.file_input_mut(&input_id))
        else {
            return false;
        };
        let file = input.first().cloned();
        input.clear();
        let Some(file) = file else {
            return false;
        };

        self.notifier.info("Uploading...");
        let resp = match self.api.upload_image(&file).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e.format_for_log(), file = %file.name, "Upload failed");
                self.notifier.error("Upload failed");
                return false;
            }
        };

        let url = match (resp.success, resp.url) {
            (true, Some(url)) => url,
            (true, None) => {
                warn!(file = %file.name, "Upload response carried no url");
                self.notifier.error("Upload failed");
                return false;
            }
            (false, _) => {
                self.notifier
                    .error(resp.message.unwrap_or_else(|| "Upload failed".to_string()));
                return false;
            }
        };

        info!(persona = persona_id, url = %url, "Image uploaded");
        if !self.board.set_image_path(persona_id, &url, &polish_time_now()) {
            warn!(persona = persona_id, "Persona vanished during upload");
            return false;
        }
        if !self.persist().await {
            return false;
        }
        self.notifier.success("Upload succeeded");
        true
    }

    pub async fn save(&mut self, persona_id: &str) -> bool {
        if self.board.find(persona_id).is_none() {
            return false;
        }
        if !self.persist().await {
            return false;
        }
        self.notifier.success("Saved");
        true
    }

    /// Append a placeholder persona and expand its card; returns the new id
    pub async fn add(&mut self) -> String {
        let id = self.board.add(
            Utc::now().timestamp_millis(),
            &self.settings.placeholder_prompt,
            &polish_time_now(),
        );
        self.board.expand(id.clone());
        if self.persist().await {
            self.notifier.success("Persona created");
        }
        id
    }

    pub async fn delete(&mut self, persona_id: &str, guard: &mut dyn Confirm) -> bool {
        if !guard.confirm(&format!("Delete persona \"{}\"?", persona_id)) {
            debug!(persona = persona_id, "Delete declined");
            return false;
        }
        if self.board.delete(persona_id).is_none() {
            return false;
        }
        if !self.persist().await {
            return false;
        }
        self.notifier.success("Persona deleted");
        true
    }

    pub async fn handle(&mut self, action: PersonaAction, guard: &mut dyn Confirm) -> bool {
        match action {
            PersonaAction::Add => {
                self.add().await;
                true
            }
            PersonaAction::Toggle(id) => {
                self.toggle(&id);
                true
            }
            PersonaAction::Save(id) => self.save(&id).await,
            PersonaAction::Delete(id) => self.delete(&id, guard).await,
            PersonaAction::Upload(id) => self.upload_image(&id).await,
            PersonaAction::EditId { persona_id, value } => {
                self.update_persona_id(&persona_id, &value).await
            }
            PersonaAction::EditImagePath { persona_id, value } => {
                self.update_image_path(&persona_id, &value).await
            }
            PersonaAction::EditPrompt { persona_id, value } => {
                self.update_prompt(&persona_id, &value).await
            }
        }
    }
}
