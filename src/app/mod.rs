//! Application module
//!
//! The main event loop and input handling. Each loop iteration is one
//! animation frame: advance the engines with the current clock, draw, then
//! poll input with a short timeout that doubles as the frame interval.
//!
//! Everything runs on one thread. Scroll and resize events are forwarded to
//! the counter engine as notifications; its leading-edge throttle collapses
//! any burst into a single visibility check on the next frame.

mod state;

pub use state::{AppMode, AppState};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::animate::{CounterAnimator, EntranceSequencer, RevealAnimator};
use crate::components::help_overlay::HelpOverlay;
use crate::components::modal::ModalController;
use crate::config::DeckConfig;
use crate::error::Result;
use crate::forms::FormStateStore;
use crate::page::{Page, Viewport};
use crate::theme::UiConstants;
use crate::ui::UiRenderer;

/// Poll timeout per loop iteration; doubles as the frame interval (~30 fps).
const FRAME_INTERVAL_MS: u64 = 33;

/// Main application struct
pub struct App {
    state: AppState,
    page: Page,
    config: DeckConfig,
    counters: CounterAnimator,
    reveals: RevealAnimator,
    entrance: EntranceSequencer,
    forms: FormStateStore,
    modal: ModalController,
    /// Monotonic clock origin; all engine times are milliseconds from here.
    epoch: Instant,
    /// Last known terminal size.
    cols: u16,
    rows: u16,
    /// Whether the last known width cleared the entrance threshold.
    wide: bool,
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(page: Page, config: DeckConfig, forms: FormStateStore) -> Self {
        info!("Creating new App instance");
        let counters = CounterAnimator::new(config.counter);
        let reveals = RevealAnimator::new(config.reveal.clone());
        let entrance = EntranceSequencer::new(config.entrance);

        Self {
            state: AppState::default(),
            page,
            config,
            counters,
            reveals,
            entrance,
            forms,
            modal: ModalController::new(),
            epoch: Instant::now(),
            cols: 0,
            rows: 0,
            wide: false,
            should_quit: false,
        }
    }

    /// A copy of the active configuration, not a live reference.
    pub fn get_config(&self) -> DeckConfig {
        self.config.clone()
    }

    /// Force-trigger one counter by element name; silent no-op when the
    /// name does not resolve to a counter element.
    pub fn animate_counter(&mut self, name: &str) {
        let now = self.now_ms();
        self.counters.animate_counter(&mut self.page, name, now);
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn content_rows(&self) -> usize {
        usize::from(
            self.rows
                .saturating_sub(UiConstants::HEADER_HEIGHT + UiConstants::STATUS_BAR_HEIGHT),
        )
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.content_rows() as f64, self.state.scroll.offset() as f64)
    }

    /// First-time setup once the terminal size is known: apply persisted
    /// form state, bind + watch counters (with the eager visibility check so
    /// already-visible counters animate immediately), and start the reveal
    /// and entrance engines.
    fn init_view(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;

        self.forms.apply(&mut self.page);

        let layout = self.page.layout();
        self.state.scroll = crate::scrolling::ScrollState::new(
            layout.content_height() as usize,
            self.content_rows(),
        );

        let now = self.now_ms();
        let view = self.viewport();
        self.counters.bind(&mut self.page);
        self.counters.start_watching();
        self.counters
            .check_and_animate(&mut self.page, &layout, view, now);

        self.reveals.rebuild(&self.page);
        self.entrance.init(&self.page, cols, now);
        self.wide = self.entrance.wide_enough(cols);
        debug!(cols, rows, "view initialized");
    }

    /// Advance all engines by one frame.
    fn advance(&mut self, now_ms: f64) {
        let layout = self.page.layout();
        let view = self.viewport();
        self.counters
            .on_frame(&mut self.page, &layout, view, now_ms);
        self.reveals.on_frame(&layout, view, now_ms);
    }

    /// Full restart of every animation: counters reset + rebind, reveals
    /// rebuilt, entrance timeline re-run.
    fn restart(&mut self) {
        let now = self.now_ms();
        let layout = self.page.layout();
        let view = self.viewport();
        self.counters
            .restart(&mut self.page, &layout, view, now);
        self.reveals.rebuild(&self.page);
        self.entrance.init(&self.page, self.cols, now);
        self.state.status_message = "Animations restarted".to_string();
        info!("animations restarted");
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!("Starting main application loop");

        let size = terminal.size()?;
        self.init_view(size.width, size.height);

        loop {
            let now = self.now_ms();
            self.advance(now);

            terminal.draw(|f| {
                UiRenderer::render(
                    f,
                    &self.page,
                    &self.entrance,
                    &self.reveals,
                    self.state.scroll.offset(),
                    &self.state.status_message,
                    now,
                );
                if self.modal.is_visible() {
                    if let Some(spec) = self.page.modal.clone() {
                        let submitted = self.forms.is_submitted(&spec.form_id);
                        self.modal.render(f, &spec, submitted);
                    }
                }
                if self.state.help_visible {
                    HelpOverlay::render(f);
                }
            })?;

            if event::poll(Duration::from_millis(FRAME_INTERVAL_MS))? {
                match event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event) {
                            break;
                        }
                    }
                    Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events. Returns true to exit.
    fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        // Help overlay swallows everything; ? or Esc dismisses it.
        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_visible = false;
            }
            return false;
        }

        if key_event.code == KeyCode::Char('?') {
            self.state.help_visible = true;
            return false;
        }

        if self.modal.is_visible() {
            self.handle_modal_key(key_event);
            return false;
        }

        match key_event.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('n') => self.open_modal(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Up => self.scroll_moved(|s| s.scroll_up()),
            KeyCode::Down => self.scroll_moved(|s| s.scroll_down()),
            KeyCode::PageUp => self.scroll_moved(|s| s.page_up()),
            KeyCode::PageDown => self.scroll_moved(|s| s.page_down()),
            KeyCode::Home => self.scroll_moved(|s| s.home()),
            KeyCode::End => self.scroll_moved(|s| s.end()),
            _ => {}
        }
        false
    }

    fn handle_modal_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.modal.close();
                self.state.mode = AppMode::Viewing;
            }
            KeyCode::Enter => self.submit_modal_form(),
            _ => {}
        }
    }

    /// Submit the modal's form: set + persist the flag, flip the page's
    /// before/after elements, and re-clamp the scroll since visibility
    /// changes alter the content height.
    fn submit_modal_form(&mut self) {
        let Some(form_id) = self.page.modal.as_ref().map(|m| m.form_id.clone()) else {
            return;
        };
        if self.forms.is_submitted(&form_id) {
            return;
        }
        self.forms.mark_submitted(&form_id);
        self.forms.apply(&mut self.page);

        let layout = self.page.layout();
        self.state
            .scroll
            .resize(layout.content_height() as usize, self.content_rows());
        self.state.status_message = "Subscribed to the newsletter".to_string();
        info!(%form_id, "form submitted");
    }

    /// Open the modal; silent no-op when the page defines none.
    fn open_modal(&mut self) {
        if self.page.modal.is_none() {
            debug!("no modal on this page, ignoring open request");
            return;
        }
        self.modal.open();
        self.state.mode = AppMode::Modal;
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::Down(_) => {
                if self
                    .modal
                    .click_dismisses(mouse_event.column, mouse_event.row)
                {
                    self.modal.close();
                    self.state.mode = AppMode::Viewing;
                }
            }
            MouseEventKind::ScrollUp => self.scroll_moved(|s| s.scroll_up()),
            MouseEventKind::ScrollDown => self.scroll_moved(|s| s.scroll_down()),
            _ => {}
        }
    }

    /// Apply a scroll movement and notify the counter engine when the
    /// offset actually changed.
    fn scroll_moved<F>(&mut self, movement: F)
    where
        F: FnOnce(&mut crate::scrolling::ScrollState) -> bool,
    {
        if movement(&mut self.state.scroll) {
            self.counters.notify_scroll();
        }
    }

    /// Handle window resize: re-clamp the scroll, notify the counter
    /// engine, and re-run the full init path when the width crosses the
    /// entrance threshold (matching the media-query change behavior).
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.cols = width;
        self.rows = height;

        let layout = self.page.layout();
        self.state
            .scroll
            .resize(layout.content_height() as usize, self.content_rows());
        self.counters.notify_resize();

        let wide_now = self.entrance.wide_enough(width);
        if wide_now != self.wide {
            self.wide = wide_now;
            self.restart();
        }
    }
}
