//! In-memory persona list plus the single expanded card.

use chrono::{DateTime, Local, TimeZone};

use crate::error::{Error, Result};

use super::record::PersonaRecord;

/// `polish_time` layout, e.g. `2024/3/9 08:05:01`
pub const POLISH_TIME_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

pub fn format_polish_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(POLISH_TIME_FORMAT).to_string()
}

/// Stamp for an edit made right now
pub fn polish_time_now() -> String {
    format_polish_time(&Local::now())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonaBoard {
    records: Vec<PersonaRecord>,
    expanded: Option<String>,
}

impl PersonaBoard {
    pub fn new(records: Vec<PersonaRecord>) -> Self {
        Self {
            records,
            expanded: None,
        }
    }

    pub fn records(&self) -> &[PersonaRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swap in a freshly loaded list; the expanded id is kept as is
    pub fn replace(&mut self, records: Vec<PersonaRecord>) {
        self.records = records;
    }

    pub fn find(&self, persona_id: &str) -> Option<&PersonaRecord> {
        self.records.iter().find(|r| r.persona_id == persona_id)
    }

    fn position(&self, persona_id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.persona_id == persona_id)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, persona_id: &str) -> bool {
        self.expanded.as_deref() == Some(persona_id)
    }

    pub fn expand(&mut self, persona_id: impl Into<String>) {
        self.expanded = Some(persona_id.into());
    }

    /// Collapse the expanded card, or expand another one in its place
    pub fn toggle(&mut self, persona_id: &str) {
        if self.is_expanded(persona_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(persona_id.to_string());
        }
    }

    /// Change a record's id.
    ///
    /// Returns `Ok(false)` when nothing changed: the new id is blank or the
    /// old id is unknown. A new id held by a different record is an error.
    pub fn rename(&mut self, old_id: &str, new_id: &str, stamp: &str) -> Result<bool> {
        if new_id.is_empty() {
            return Ok(false);
        }
        let Some(index) = self.position(old_id) else {
            return Ok(false);
        };
        let taken = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| i != index && r.persona_id == new_id);
        if taken {
            return Err(Error::DuplicatePersonaId {
                id: new_id.to_string(),
            });
        }

        let record = &mut self.records[index];
        record.persona_id = new_id.to_string();
        record.polish_time = stamp.to_string();
        self.expanded = Some(new_id.to_string());
        Ok(true)
    }

    /// Set the image path, trimmed. Returns false for an unknown id.
    pub fn set_image_path(&mut self, persona_id: &str, path: &str, stamp: &str) -> bool {
        self.edit(persona_id, stamp, |r| r.png_path = path.trim().to_string())
    }

    pub fn set_prompt(&mut self, persona_id: &str, prompt: &str, stamp: &str) -> bool {
        self.edit(persona_id, stamp, |r| r.polished_prompt = prompt.to_string())
    }

    fn edit(&mut self, persona_id: &str, stamp: &str, apply: impl FnOnce(&mut PersonaRecord)) -> bool {
        match self.position(persona_id) {
            Some(index) => {
                let record = &mut self.records[index];
                apply(record);
                record.polish_time = stamp.to_string();
                true
            }
            None => false,
        }
    }

    /// First free `character_<millis>` id at or after `millis`
    pub fn next_id(&self, mut millis: i64) -> String {
        loop {
            let candidate = format!("character_{}", millis);
            if self.find(&candidate).is_none() {
                return candidate;
            }
            millis += 1;
        }
    }

    /// Append a fresh record and return its id
    pub fn add(&mut self, millis: i64, prompt: &str, stamp: &str) -> String {
        let id = self.next_id(millis);
        self.records.push(PersonaRecord {
            persona_id: id.clone(),
            png_path: String::new(),
            polished_prompt: prompt.to_string(),
            polish_time: stamp.to_string(),
            ..PersonaRecord::default()
        });
        id
    }

    /// Remove the first record with this id and collapse every card
    pub fn delete(&mut self, persona_id: &str) -> Option<PersonaRecord> {
        let index = self.position(persona_id)?;
        self.expanded = None;
        Some(self.records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    const STAMP: &str = "2024/3/9 08:05:01";

    fn board(ids: &[&str]) -> PersonaBoard {
        PersonaBoard::new(ids.iter().map(|id| PersonaRecord::new(*id)).collect())
    }

    fn ids(board: &PersonaBoard) -> Vec<&str> {
        board.records().iter().map(|r| r.persona_id.as_str()).collect()
    }

    #[test]
    fn test_polish_time_format() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let at = tz.with_ymd_and_hms(2024, 3, 9, 8, 5, 1).unwrap();
        assert_eq!(format_polish_time(&at), STAMP);
    }

    #[test]
    fn test_toggle_tracks_one_card() {
        let mut b = board(&["a", "b"]);
        b.toggle("a");
        assert_eq!(b.expanded(), Some("a"));
        b.toggle("b");
        assert_eq!(b.expanded(), Some("b"));
        b.toggle("b");
        assert_eq!(b.expanded(), None);
    }

    #[test]
    fn test_rename_moves_tracker_and_stamps() {
        let mut b = board(&["a", "b"]);
        assert!(b.rename("a", "c", STAMP).unwrap());
        assert_eq!(ids(&b), vec!["c", "b"]);
        assert_eq!(b.expanded(), Some("c"));
        assert_eq!(b.find("c").unwrap().polish_time, STAMP);
    }

    #[test]
    fn test_rename_ignores_blank_and_unknown() {
        let mut b = board(&["a"]);
        assert!(!b.rename("a", "", STAMP).unwrap());
        assert!(!b.rename("zzz", "c", STAMP).unwrap());
        assert_eq!(ids(&b), vec!["a"]);
        assert_eq!(b.expanded(), None);
    }

    #[test]
    fn test_rename_rejects_collision() {
        let mut b = board(&["a", "b"]);
        let err = b.rename("a", "b", STAMP).unwrap_err();
        assert!(matches!(err, Error::DuplicatePersonaId { ref id } if id == "b"));
        assert_eq!(ids(&b), vec!["a", "b"]);
        assert!(b.find("a").unwrap().polish_time.is_empty());
    }

    #[test]
    fn test_image_path_is_trimmed() {
        let mut b = board(&["a"]);
        assert!(b.set_image_path("a", "  /img/a.png \n", STAMP));
        assert_eq!(b.find("a").unwrap().png_path, "/img/a.png");
        assert!(!b.set_image_path("missing", "/x.png", STAMP));
    }

    #[test]
    fn test_prompt_edit_stamps() {
        let mut b = board(&["a"]);
        assert!(b.set_prompt("a", "  keeps spacing ", STAMP));
        let record = b.find("a").unwrap();
        assert_eq!(record.polished_prompt, "  keeps spacing ");
        assert_eq!(record.polish_time, STAMP);
    }

    #[test]
    fn test_add_appends_one_unique_record() {
        let mut b = board(&["character_1000", "character_1001"]);
        let id = b.add(1000, "Please enter a persona description...", STAMP);

        assert_eq!(id, "character_1002");
        assert_eq!(b.len(), 3);
        let added = b.records().last().unwrap();
        assert_eq!(added.persona_id, id);
        assert!(added.png_path.is_empty());
        assert_eq!(added.polished_prompt, "Please enter a persona description...");
        assert_eq!(added.polish_time, STAMP);
    }

    #[test]
    fn test_delete_removes_first_match_and_clears_tracker() {
        let mut b = board(&["a", "dup", "dup"]);
        b.toggle("a");

        let removed = b.delete("dup").unwrap();
        assert_eq!(removed.persona_id, "dup");
        assert_eq!(ids(&b), vec!["a", "dup"]);
        assert_eq!(b.expanded(), None);
    }

    #[test]
    fn test_delete_unknown_keeps_tracker() {
        let mut b = board(&["a"]);
        b.toggle("a");
        assert!(b.delete("zzz").is_none());
        assert_eq!(b.expanded(), Some("a"));
    }
}
