//! Persona cards → HTML.
//!
//! Controls carry `data-action` and `data-persona-id` attributes instead of
//! inline handlers; [`PersonaAction::from_attrs`](super::PersonaAction::from_attrs)
//! maps them back to controller calls.

use crate::config::PersonaSettings;
use crate::ui::html::escape_html;
use crate::ui::{Document, Element, FileInput};

use super::avatar::image_url;
use super::board::PersonaBoard;
use super::record::PersonaRecord;

/// Extensions the upload picker offers
pub const ACCEPTED_IMAGES: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

pub const EMPTY_MARKUP: &str = r#"<div class="empty-personas">
    <i class="fas fa-user-slash"></i>
    <p>No persona data</p>
    <button class="btn btn-primary" data-action="add"><i class="fas fa-plus"></i> Create the first persona</button>
</div>"#;

pub fn upload_input_id(persona_id: &str) -> String {
    format!("upload-{}", persona_id)
}

pub fn image_path_input_id(persona_id: &str) -> String {
    format!("image-path-{}", persona_id)
}

pub fn persona_id_input_id(persona_id: &str) -> String {
    format!("persona-id-{}", persona_id)
}

pub fn prompt_input_id(persona_id: &str) -> String {
    format!("prompt-{}", persona_id)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedBoard {
    pub html: String,
    pub document: Document,
}

pub fn render_board(board: &PersonaBoard, settings: &PersonaSettings) -> RenderedBoard {
    if board.is_empty() {
        return RenderedBoard {
            html: EMPTY_MARKUP.to_string(),
            document: Document::new(),
        };
    }

    let mut html = String::new();
    let mut document = Document::new();
    for record in board.records() {
        html.push_str(&render_card(record, board.is_expanded(&record.persona_id), settings));
        register_inputs(&mut document, record);
    }

    RenderedBoard { html, document }
}

fn register_inputs(document: &mut Document, record: &PersonaRecord) {
    let id = &record.persona_id;
    document.insert(upload_input_id(id), Element::File(FileInput::accepting(&ACCEPTED_IMAGES)));
    document.insert(image_path_input_id(id), Element::Text(record.png_path.clone()));
    document.insert(persona_id_input_id(id), Element::Text(id.clone()));
    document.insert(prompt_input_id(id), Element::Text(record.polished_prompt.clone()));
}

fn render_card(record: &PersonaRecord, expanded: bool, settings: &PersonaSettings) -> String {
    let id = escape_html(&record.persona_id);
    let image = escape_html(&image_url(&settings.avatar_service, record));
    let time = if record.polish_time.is_empty() {
        "Not recorded".to_string()
    } else {
        escape_html(&record.polish_time)
    };
    let overlay = if record.png_path.is_empty() {
        "Default avatar".to_string()
    } else {
        escape_html(&record.png_path)
    };

    format!(
        r#"<div class="persona-card{expanded}">
    <div class="persona-header" data-action="toggle" data-persona-id="{id}">
        <div class="persona-info">
            <div class="persona-avatar"><img src="{image}" alt="{id}"></div>
            <div>
                <h3>{id}</h3>
                <p class="persona-time">{time}</p>
            </div>
        </div>
        <div class="persona-actions"><i class="fas fa-chevron-down expand-icon"></i></div>
    </div>
    <div class="persona-content">
        <div class="persona-main-content">
            <div class="persona-image-section">
                <div class="current-image">
                    <img src="{image}" alt="{id}" class="persona-image">
                    <div class="image-overlay"><span>{overlay}</span></div>
                </div>
                <div class="image-controls">
                    <input type="file" id="upload-{id}" class="file-input" accept="{accept}" style="display: none;" data-action="upload" data-persona-id="{id}">
                    <div class="upload-buttons">
                        <button class="btn btn-small" data-action="pick-image" data-persona-id="{id}"><i class="fas fa-upload"></i> Upload image</button>
                        <input type="text" id="image-path-{id}" class="form-control image-path" value="{path}" placeholder="/img/xxx.png" data-action="edit-image-path" data-persona-id="{id}">
                    </div>
                </div>
            </div>
            <div class="persona-details">
                <div class="detail-group">
                    <label for="persona-id-{id}"><i class="fas fa-id-card"></i> Persona ID</label>
                    <input type="text" id="persona-id-{id}" class="form-control" value="{id}" data-action="edit-id" data-persona-id="{id}">
                </div>
                <div class="detail-group">
                    <label for="prompt-{id}"><i class="fas fa-comment-dots"></i> Prompt</label>
                    <textarea id="prompt-{id}" class="form-control textarea" rows="4" data-action="edit-prompt" data-persona-id="{id}">{prompt}</textarea>
                </div>
                <div class="persona-footer">
                    <button class="btn btn-primary" data-action="save" data-persona-id="{id}"><i class="fas fa-save"></i> Save</button>
                    <button class="btn btn-danger" data-action="delete" data-persona-id="{id}"><i class="fas fa-trash"></i> Delete</button>
                </div>
            </div>
        </div>
    </div>
</div>
"#,
        expanded = if expanded { " expanded" } else { "" },
        id = id,
        image = image,
        time = time,
        overlay = overlay,
        accept = FileInput::accepting(&ACCEPTED_IMAGES).accept_attr(),
        path = escape_html(&record.png_path),
        prompt = escape_html(&record.polished_prompt),
    )
}
