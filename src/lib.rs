//! statdeck library
//!
//! Animated terminal dashboards: a page document model plus three
//! independent animation engines (staggered entrance, scroll reveal,
//! progressive counters) driven by a single-threaded frame loop.

pub mod animate;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod forms;
pub mod page;
pub mod scrolling;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use animate::{
    ease_out_quart, CounterAnimator, CounterConfig, Easing, EntranceConfig, EntranceSequencer,
    ItemStyle, RevealAnimator, RevealDefaults, RevealStyle,
};
pub use app::{App, AppMode, AppState};
pub use config::DeckConfig;
pub use error::{DeckError, Result};
pub use forms::FormStateStore;
pub use page::{Element, ElementId, ElementKind, FormRole, ModalSpec, NavItem, Page, Viewport};
pub use scrolling::ScrollState;
