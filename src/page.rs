//! Page document model.
//!
//! A [`Page`] is the host document the animation engines operate on: a
//! navigation header, a scrollable stack of sections, and an optional modal.
//! Elements carry their animation attributes as raw strings, mirroring how a
//! markup document would; parsing happens leniently at bind time so a
//! malformed attribute degrades to a fallback instead of an error.
//!
//! Pages load from TOML files; [`Page::demo`] provides a built-in document so
//! the binary runs with no arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Stable handle for an element, assigned in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

/// What an element is, for styling purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Text,
    Stat,
}

impl Default for ElementKind {
    fn default() -> Self {
        Self::Text
    }
}

/// Role of an element in the before/after form-state toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormRole {
    /// Shown until the associated form has been submitted.
    Before,
    /// Shown once the associated form has been submitted.
    After,
}

/// A single displayable unit inside a section.
///
/// Attribute fields are kept as the raw strings found in the document. The
/// engines parse them on demand with fallback semantics: an absent or
/// malformed attribute never fails an animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    /// Optional name for programmatic lookup (manual counter triggers).
    pub name: Option<String>,
    pub kind: ElementKind,
    pub text: String,
    /// Height in rows this element occupies in the layout.
    pub height: u16,
    /// Hidden elements take no layout space and never animate.
    pub visible: bool,

    /// Marks this element as an animated counter.
    pub counter: bool,
    /// Explicit target value override (raw string, parsed leniently).
    pub counter_value: Option<String>,
    /// Explicit decimal-places override.
    pub counter_decimals: Option<String>,
    /// Per-element animation duration override in milliseconds.
    pub counter_duration: Option<String>,

    /// Marks this element for the scroll-reveal engine.
    pub reveal: bool,
    pub reveal_offset: Option<String>,
    pub reveal_duration: Option<String>,
    pub reveal_delay: Option<String>,
    pub reveal_ease: Option<String>,
    /// Trigger start position, e.g. "top 80%".
    pub reveal_start: Option<String>,
    /// "false" re-arms the reveal when the element scrolls back out.
    pub reveal_once: Option<String>,

    /// Form id this element's visibility is keyed to.
    pub form_id: Option<String>,
    pub form_role: Option<FormRole>,

    /// Text present before any counter animation, captured once at bind
    /// time and preserved for reset. Never serialized.
    #[serde(skip)]
    pub captured_original: Option<String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            name: None,
            kind: ElementKind::Text,
            text: String::new(),
            height: 1,
            visible: true,
            counter: false,
            counter_value: None,
            counter_decimals: None,
            counter_duration: None,
            reveal: false,
            reveal_offset: None,
            reveal_duration: None,
            reveal_delay: None,
            reveal_ease: None,
            reveal_start: None,
            reveal_once: None,
            form_id: None,
            form_role: None,
            captured_original: None,
        }
    }
}

impl Element {
    /// Plain text element.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Stat element carrying the counter marker.
    pub fn stat(text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Stat,
            text: text.into(),
            counter: true,
            ..Self::default()
        }
    }
}

/// A titled group of elements, stacked vertically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: String,
    pub elements: Vec<Element>,
}

/// One item in the navigation header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    pub label: String,
    /// Entrance ordering attribute (raw string; missing or zero sorts last).
    pub order: Option<String>,
    /// Activating this item opens the page modal.
    pub opens_modal: bool,
}

impl Default for NavItem {
    fn default() -> Self {
        Self {
            label: String::new(),
            order: None,
            opens_modal: false,
        }
    }
}

/// Modal dialog content, hosting the subscribe prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalSpec {
    pub title: String,
    pub body: Vec<String>,
    pub prompt: String,
    /// Form id reported when the prompt is submitted.
    pub form_id: String,
}

impl Default for ModalSpec {
    fn default() -> Self {
        Self {
            title: "Newsletter".to_string(),
            body: Vec::new(),
            prompt: "Press Enter to subscribe".to_string(),
            form_id: String::new(),
        }
    }
}

/// The host document: nav header, sections, optional modal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub title: String,
    pub nav: Vec<NavItem>,
    pub sections: Vec<Section>,
    pub modal: Option<ModalSpec>,
}

impl Page {
    /// Load a page document from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read page from {:?}", path.as_ref()))?;

        let page: Self = toml::from_str(&content).context("Failed to parse page TOML")?;

        Ok(page)
    }

    /// Validate the page structure.
    ///
    /// The runtime itself degrades silently on bad attributes; this check
    /// exists for the `validate` CLI subcommand so authors get feedback.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            anyhow::bail!("Page title must be specified");
        }

        for (i, section) in self.sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                anyhow::bail!("Section {} has no title", i + 1);
            }
            if section.elements.is_empty() {
                anyhow::bail!("Section '{}' has no elements", section.title);
            }
        }

        for (id, element) in self.elements() {
            if element.counter {
                let resolvable = element
                    .counter_value
                    .as_deref()
                    .and_then(crate::animate::counter::extract_numeric)
                    .or_else(|| crate::animate::counter::extract_numeric(&element.text));
                if resolvable.is_none() {
                    anyhow::bail!(
                        "Counter element {} ({:?}) has no parseable numeric target",
                        id.0,
                        element.name.as_deref().unwrap_or(&element.text)
                    );
                }
            }
            if element.form_role.is_some() && element.form_id.is_none() {
                anyhow::bail!("Element {} has a form role but no form id", id.0);
            }
        }

        Ok(())
    }

    /// Iterate all elements in document order with their ids.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.sections
            .iter()
            .flat_map(|s| s.elements.iter())
            .enumerate()
            .map(|(i, e)| (ElementId(i), e))
    }

    /// Total number of elements across all sections.
    pub fn element_count(&self) -> usize {
        self.sections.iter().map(|s| s.elements.len()).sum()
    }

    /// Look up an element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.sections
            .iter()
            .flat_map(|s| s.elements.iter())
            .nth(id.0)
    }

    /// Look up an element by id, mutably.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.elements.iter_mut())
            .nth(id.0)
    }

    /// Find an element by its `name` attribute.
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.elements()
            .find(|(_, e)| e.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    /// Rewrite an element's displayed text. Silent no-op for unknown ids.
    pub fn set_text(&mut self, id: ElementId, text: String) {
        if let Some(element) = self.element_mut(id) {
            element.text = text;
        }
    }

    /// Compute the vertical layout of all visible elements.
    ///
    /// Each section contributes a title row, its visible elements (stacked by
    /// their `height`), and a trailing blank row. Hidden elements take no
    /// space and get no rect.
    pub fn layout(&self) -> PageLayout {
        let mut rects = Vec::with_capacity(self.element_count());
        let mut section_tops = Vec::with_capacity(self.sections.len());
        let mut cursor = 0.0_f64;

        for section in &self.sections {
            // Section title row plus a blank line under it.
            section_tops.push(cursor);
            cursor += 2.0;
            for element in &section.elements {
                if element.visible {
                    let top = cursor;
                    let bottom = cursor + f64::from(element.height);
                    rects.push(Some((top, bottom)));
                    cursor = bottom;
                } else {
                    rects.push(None);
                }
            }
            // Gap between sections.
            cursor += 1.0;
        }

        PageLayout {
            rects,
            section_tops,
            content_height: cursor,
        }
    }

    /// Built-in demo document.
    pub fn demo() -> Self {
        Self {
            title: "statdeck".to_string(),
            nav: vec![
                NavItem {
                    label: "Overview".to_string(),
                    order: Some("1".to_string()),
                    opens_modal: false,
                },
                NavItem {
                    label: "Metrics".to_string(),
                    order: Some("2".to_string()),
                    opens_modal: false,
                },
                NavItem {
                    label: "Changelog".to_string(),
                    order: Some("3".to_string()),
                    opens_modal: false,
                },
                NavItem {
                    label: "Newsletter".to_string(),
                    order: Some("4".to_string()),
                    opens_modal: true,
                },
            ],
            sections: vec![
                Section {
                    title: "Overview".to_string(),
                    elements: vec![
                        Element {
                            kind: ElementKind::Heading,
                            text: "Ship dashboards straight to the terminal".to_string(),
                            reveal: true,
                            ..Element::default()
                        },
                        Element {
                            text: "Scroll down to watch the stats count up.".to_string(),
                            reveal: true,
                            reveal_delay: Some("150".to_string()),
                            ..Element::default()
                        },
                    ],
                },
                Section {
                    title: "Metrics".to_string(),
                    elements: vec![
                        Element {
                            name: Some("deploys".to_string()),
                            counter_value: Some("1234".to_string()),
                            ..Element::stat("Deploys this quarter: 1234")
                        },
                        Element {
                            name: Some("uptime".to_string()),
                            counter_decimals: Some("1".to_string()),
                            counter_value: Some("99,9".to_string()),
                            ..Element::stat("Uptime: 99,9%")
                        },
                        Element {
                            name: Some("requests".to_string()),
                            counter_value: Some("2500000".to_string()),
                            counter_duration: Some("2600".to_string()),
                            ..Element::stat("Requests served: 2500000")
                        },
                    ],
                },
                Section {
                    title: "Changelog".to_string(),
                    elements: vec![
                        Element {
                            text: "1.0.0 - entrance, reveal, and counter engines".to_string(),
                            reveal: true,
                            ..Element::default()
                        },
                        Element {
                            text: "0.9.0 - page documents load from TOML".to_string(),
                            reveal: true,
                            reveal_delay: Some("100".to_string()),
                            ..Element::default()
                        },
                        Element {
                            text: "0.8.0 - first public build".to_string(),
                            reveal: true,
                            reveal_delay: Some("200".to_string()),
                            reveal_once: Some("false".to_string()),
                            ..Element::default()
                        },
                    ],
                },
                Section {
                    title: "Stay in touch".to_string(),
                    elements: vec![
                        Element {
                            text: "Press n to open the newsletter signup.".to_string(),
                            form_id: Some("newsletter".to_string()),
                            form_role: Some(FormRole::Before),
                            ..Element::default()
                        },
                        Element {
                            text: "Thanks for subscribing - see you in the next issue!".to_string(),
                            visible: false,
                            form_id: Some("newsletter".to_string()),
                            form_role: Some(FormRole::After),
                            ..Element::default()
                        },
                    ],
                },
            ],
            modal: Some(ModalSpec {
                title: "Newsletter".to_string(),
                body: vec![
                    "Monthly notes on terminal dashboards,".to_string(),
                    "no tracking, unsubscribe anytime.".to_string(),
                ],
                prompt: "Press Enter to subscribe, Esc to close".to_string(),
                form_id: "newsletter".to_string(),
            }),
        }
    }
}

/// Result of a layout pass: absolute (top, bottom) rows per element.
#[derive(Debug, Clone)]
pub struct PageLayout {
    rects: Vec<Option<(f64, f64)>>,
    section_tops: Vec<f64>,
    content_height: f64,
}

impl PageLayout {
    /// Absolute (top, bottom) of an element; `None` when hidden or unknown.
    pub fn rect(&self, id: ElementId) -> Option<(f64, f64)> {
        self.rects.get(id.0).copied().flatten()
    }

    /// Absolute top row of a section's title.
    pub fn section_top(&self, index: usize) -> Option<f64> {
        self.section_tops.get(index).copied()
    }

    /// Total content height in rows.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }
}

/// The visible window onto the page content.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Height of the content area in rows.
    pub height: f64,
    /// Current scroll offset in rows.
    pub scroll: f64,
}

impl Viewport {
    pub fn new(height: f64, scroll: f64) -> Self {
        Self { height, scroll }
    }

    /// Translate an absolute rect into viewport-relative coordinates.
    pub fn relative(&self, rect: (f64, f64)) -> (f64, f64) {
        (rect.0 - self.scroll, rect.1 - self.scroll)
    }
}
