//! Persisted form-submission state.
//!
//! A single boolean "submitted" flag per form id, stored in a small JSON
//! file so the before/after page state survives restarts. The store is
//! decorative infrastructure: a missing, unreadable, or unwritable file
//! degrades to an empty in-memory store with a log line, never an error
//! surfaced to the user.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::page::{FormRole, Page};

/// Key prefix inside the store file, namespacing submission flags.
const STORAGE_KEY_PREFIX: &str = "form_submitted_";

/// On-disk shape of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    flags: HashMap<String, bool>,
}

/// Form-submission flag store with JSON persistence.
pub struct FormStateStore {
    path: Option<PathBuf>,
    flags: HashMap<String, bool>,
}

impl FormStateStore {
    /// In-memory store with no backing file (used by tests and the
    /// `validate` path).
    pub fn in_memory() -> Self {
        Self {
            path: None,
            flags: HashMap::new(),
        }
    }

    /// Load the store from `path`, or start empty when the file is missing
    /// or unreadable.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let flags = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<StoreFile>(&content) {
                Ok(file) => file.flags,
                Err(e) => {
                    warn!("form state file {:?} unparseable: {}", path, e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        debug!(flags = flags.len(), "loaded form state");
        Self {
            path: Some(path),
            flags,
        }
    }

    /// Default store location under the user state directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_dir)
            .map(|dir| dir.join("statdeck").join("form-state.json"))
    }

    /// Whether the given form has been submitted.
    pub fn is_submitted(&self, form_id: &str) -> bool {
        self.flags
            .get(&storage_key(form_id))
            .copied()
            .unwrap_or(false)
    }

    /// Record a submission and persist. Write failures are logged and
    /// swallowed; the in-memory flag stays set either way.
    pub fn mark_submitted(&mut self, form_id: &str) {
        self.flags.insert(storage_key(form_id), true);
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let file = StoreFile {
            flags: self.flags.clone(),
        };
        let result = serde_json::to_string_pretty(&file).map(|json| {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            fs::write(path, json)
        });
        match result {
            Ok(Ok(())) => debug!("form state persisted to {:?}", path),
            Ok(Err(e)) => warn!("failed to write form state {:?}: {}", path, e),
            Err(e) => warn!("failed to serialize form state: {}", e),
        }
    }

    /// Apply the submission flags to the page: `before` elements are visible
    /// until their form is submitted, `after` elements only afterwards.
    pub fn apply(&self, page: &mut Page) {
        let updates: Vec<(crate::page::ElementId, bool)> = page
            .elements()
            .filter_map(|(id, element)| {
                let role = element.form_role?;
                let form_id = element.form_id.as_deref()?;
                let submitted = self.is_submitted(form_id);
                let visible = match role {
                    FormRole::Before => !submitted,
                    FormRole::After => submitted,
                };
                Some((id, visible))
            })
            .collect();

        for (id, visible) in updates {
            if let Some(element) = page.element_mut(id) {
                element.visible = visible;
            }
        }
    }
}

fn storage_key(form_id: &str) -> String {
    format!("{}{}", STORAGE_KEY_PREFIX, form_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Element, Section};

    fn page_with_form() -> Page {
        let mut page = Page::default();
        page.title = "t".to_string();
        page.sections.push(Section {
            title: "s".to_string(),
            elements: vec![
                Element {
                    form_id: Some("news".to_string()),
                    form_role: Some(FormRole::Before),
                    ..Element::text("subscribe now")
                },
                Element {
                    visible: false,
                    form_id: Some("news".to_string()),
                    form_role: Some(FormRole::After),
                    ..Element::text("thanks!")
                },
            ],
        });
        page
    }

    #[test]
    fn test_unsubmitted_shows_before_state() {
        let mut page = page_with_form();
        let store = FormStateStore::in_memory();
        store.apply(&mut page);
        assert!(page.element(crate::page::ElementId(0)).unwrap().visible);
        assert!(!page.element(crate::page::ElementId(1)).unwrap().visible);
    }

    #[test]
    fn test_submission_flips_visibility() {
        let mut page = page_with_form();
        let mut store = FormStateStore::in_memory();
        store.mark_submitted("news");
        store.apply(&mut page);
        assert!(!page.element(crate::page::ElementId(0)).unwrap().visible);
        assert!(page.element(crate::page::ElementId(1)).unwrap().visible);
    }

    #[test]
    fn test_other_form_ids_are_untouched() {
        let mut page = page_with_form();
        let mut store = FormStateStore::in_memory();
        store.mark_submitted("some-other-form");
        store.apply(&mut page);
        assert!(page.element(crate::page::ElementId(0)).unwrap().visible);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = FormStateStore::load("/nonexistent/path/form-state.json");
        assert!(!store.is_submitted("news"));
    }
}
