//! Deterministic placeholder avatars for personas without an image.

use crate::ui::html::encode_uri_component;

use super::record::PersonaRecord;

pub const AVATAR_PALETTE: [&str; 5] = ["9DCC9E", "6C8EBF", "D2B48C", "FFB6C1", "9370DB"];

/// Background colour picked from the sum of the id's UTF-16 code units
pub fn avatar_color(persona_id: &str) -> &'static str {
    let sum: u64 = persona_id.encode_utf16().map(u64::from).sum();
    AVATAR_PALETTE[(sum % AVATAR_PALETTE.len() as u64) as usize]
}

pub fn placeholder_avatar(service: &str, persona_id: &str) -> String {
    format!(
        "{}?name={}&background={}&color=fff&bold=true&size=150",
        service,
        encode_uri_component(persona_id),
        avatar_color(persona_id)
    )
}

/// The record's own image, or its placeholder
pub fn image_url(service: &str, record: &PersonaRecord) -> String {
    if record.has_image() {
        record.png_path.clone()
    } else {
        placeholder_avatar(service, &record.persona_id)
    }
}
