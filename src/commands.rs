//! Command handlers behind the `settings` and `persona` subcommands.
//!
//! Each handler builds a controller over the HTTP client, loads, applies
//! the requested edit and reports the toast the page would have shown.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::api::HttpClient;
use crate::cli::{parse_assignment, PersonaSubcommand, SettingsSubcommand};
use crate::config::ConsoleConfig;
use crate::persona::{PersonaAction, PersonaController};
use crate::settings::{SettingsAction, SettingsController};
use crate::ui::{AssumeYes, Confirm, Notifier, Prompt, SelectedFile, Toast};

/// Whether the command did what was asked, and the toast left on screen
#[derive(Debug)]
pub struct Outcome {
    pub ok: bool,
    pub toast: Option<Toast>,
}

impl Outcome {
    fn from(ok: bool, notifier: &Notifier) -> Self {
        Self {
            ok,
            toast: notifier.current_at(Instant::now()).cloned(),
        }
    }
}

fn client(config: &ConsoleConfig) -> Result<Arc<HttpClient>> {
    let client = HttpClient::new(&config.server)
        .with_context(|| format!("Failed to set up client for {}", config.server.base_url))?;
    Ok(Arc::new(client))
}

fn guard(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(Prompt)
    }
}

/// Write markup, plus any toast still on screen, to a file or stdout
fn emit_html(html: &str, notifier: &Notifier, output: Option<&str>) -> Result<()> {
    let mut html = html.to_string();
    if let Some(toast) = notifier.render_at(Instant::now()) {
        html.push('\n');
        html.push_str(&toast);
    }
    let html = html.as_str();
    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("Failed to write {}", path))?;
            debug!(path, bytes = html.len(), "Markup written");
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

pub async fn run_settings(config: &ConsoleConfig, subcommand: SettingsSubcommand) -> Result<Outcome> {
    let mut ctl = SettingsController::new(client(config)?, &config.ui);
    if !ctl.load().await {
        return Ok(Outcome::from(false, ctl.notifier()));
    }

    let ok = match subcommand {
        SettingsSubcommand::Render { output } => {
            if let Some(form) = ctl.rendered() {
                emit_html(&form.html, ctl.notifier(), output.as_deref())?;
            }
            true
        }
        SettingsSubcommand::Set { assignments } => {
            let document = ctl
                .document_mut()
                .context("Settings form was not rendered")?;
            for arg in &assignments {
                let Some((key, value)) = parse_assignment(arg) else {
                    bail!("Expected KEY=VALUE, got '{}'", arg);
                };
                if document.checked(key).is_some() {
                    let Some(on) = parse_switch(value) else {
                        bail!("'{}' is a switch; use true or false, not '{}'", key, value);
                    };
                    document.set_checked(key, on);
                } else if !document.set_value(key, value) {
                    bail!("No settings field named '{}'", key);
                }
            }
            ctl.handle(SettingsAction::Submit, &mut AssumeYes).await
        }
        SettingsSubcommand::Reset { yes } => {
            ctl.handle(SettingsAction::Reset, guard(yes).as_mut()).await
        }
    };

    Ok(Outcome::from(ok, ctl.notifier()))
}

pub async fn run_persona(config: &ConsoleConfig, subcommand: PersonaSubcommand) -> Result<Outcome> {
    let mut ctl = PersonaController::new(client(config)?, &config.ui, config.persona.clone());
    if !ctl.load().await {
        return Ok(Outcome::from(false, ctl.notifier()));
    }

    let ok = match subcommand {
        PersonaSubcommand::List => {
            for record in ctl.board().records() {
                let time = if record.polish_time.is_empty() {
                    "-"
                } else {
                    record.polish_time.as_str()
                };
                println!("{}\t{}", record.persona_id, time);
            }
            true
        }
        PersonaSubcommand::Render { expand, output } => {
            if let Some(id) = expand {
                require_persona(&ctl, &id)?;
                ctl.handle(PersonaAction::Toggle(id), &mut AssumeYes).await;
            }
            if let Some(board) = ctl.rendered() {
                emit_html(&board.html, ctl.notifier(), output.as_deref())?;
            }
            true
        }
        PersonaSubcommand::Add => {
            let before = ctl.board().len();
            ctl.handle(PersonaAction::Add, &mut AssumeYes).await;
            if let Some(id) = ctl.board().expanded() {
                println!("{}", id);
            }
            ctl.board().len() > before
        }
        PersonaSubcommand::Save { id } => {
            require_persona(&ctl, &id)?;
            ctl.handle(PersonaAction::Save(id), &mut AssumeYes).await
        }
        PersonaSubcommand::Delete { id, yes } => {
            require_persona(&ctl, &id)?;
            ctl.handle(PersonaAction::Delete(id), guard(yes).as_mut()).await
        }
        PersonaSubcommand::Rename { old, new } => {
            require_persona(&ctl, &old)?;
            let action = PersonaAction::EditId { persona_id: old, value: new };
            ctl.handle(action, &mut AssumeYes).await
        }
        PersonaSubcommand::SetPrompt { id, text } => {
            require_persona(&ctl, &id)?;
            let action = PersonaAction::EditPrompt { persona_id: id, value: text };
            ctl.handle(action, &mut AssumeYes).await
        }
        PersonaSubcommand::SetImage { id, path } => {
            require_persona(&ctl, &id)?;
            let action = PersonaAction::EditImagePath { persona_id: id, value: path };
            ctl.handle(action, &mut AssumeYes).await
        }
        PersonaSubcommand::Upload { id, file } => {
            require_persona(&ctl, &id)?;
            let selected = SelectedFile::from_path(Path::new(&file))?;
            ctl.select_image(&id, selected)?;
            ctl.handle(PersonaAction::Upload(id), &mut AssumeYes).await
        }
    };

    Ok(Outcome::from(ok, ctl.notifier()))
}

fn require_persona(ctl: &PersonaController, id: &str) -> Result<()> {
    if ctl.board().find(id).is_none() {
        return Err(crate::error::Error::PersonaNotFound { id: id.to_string() }.into());
    }
    Ok(())
}
