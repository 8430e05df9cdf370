//! TUI rendering and terminal management (impure shell)

mod cloud_widget;
pub mod constants;
pub mod headless;
mod styles;
pub mod surface;

pub use cloud_widget::CloudWidget;
pub use headless::{lay_out, FailedLabel, LayoutDump, PlacedLabel};
pub use styles::{appearance, label_style, Appearance};
pub use surface::{Label, LabelLook, TerminalSurface};

use crate::cloud::{CloudEvent, WordCloud};
use crate::layout::{LayoutConfig, PassState};
use crate::model::{Canvas, CloudError, WordEntry};
use constants::{FRAME_INTERVAL, STATUS_BAR_HEIGHT};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    Terminal,
};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Engine rejected its configuration
    #[error("Layout error: {0}")]
    Cloud(#[from] CloudError),
}

/// Counters fed by engine events, shown in the status bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PassStats {
    failed: usize,
    passes: usize,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    cloud: WordCloud<TerminalSurface>,
    stats: Rc<RefCell<PassStats>>,
    last_step: Instant,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        config: LayoutConfig,
        seed: Option<u64>,
        words: Vec<WordEntry>,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, config, seed, words)
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Esc or Ctrl+C). Draws one frame per
    /// [`FRAME_INTERVAL`] unless input arrives sooner.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(FRAME_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            self.step();
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app on an existing terminal and submit `words`.
    pub fn with_terminal(
        terminal: Terminal<B>,
        config: LayoutConfig,
        seed: Option<u64>,
        words: Vec<WordEntry>,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let canvas = canvas_for(size.width, size.height);
        let surface = TerminalSurface::new();
        let mut cloud = match seed {
            Some(seed) => WordCloud::seeded(config, canvas, surface, seed)?,
            None => WordCloud::new(config, canvas, surface)?,
        };

        let stats = Rc::new(RefCell::new(PassStats::default()));
        let sink = Rc::clone(&stats);
        cloud.on_event(move |event| {
            let mut stats = sink.borrow_mut();
            match event {
                CloudEvent::PrePopulate => stats.failed = 0,
                CloudEvent::PlacementFailed { .. } => stats.failed += 1,
                CloudEvent::PostPopulate => stats.passes += 1,
            }
        });

        info!(words = words.len(), ?canvas, "Starting word cloud");
        cloud.submit(words);

        Ok(Self {
            terminal,
            cloud,
            stats,
            last_step: Instant::now(),
        })
    }

    /// Advance virtual time by the real time elapsed since the last step.
    fn step(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_step);
        self.last_step = now;
        self.advance(elapsed);
    }

    fn advance(&mut self, dt: Duration) {
        self.cloud.advance(dt);
        let end = self.cloud.now();
        self.cloud.surface_mut().set_time(end);
    }

    /// Handle a key press. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('r') => {
                debug!("Relayout requested");
                self.cloud.relayout();
                false
            }
            _ => false,
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        if let Err(err) = self.cloud.set_canvas(canvas_for(width, height)) {
            warn!(error = %err, "Ignoring resize");
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let status = self.status_line();
        let cloud = &self.cloud;
        self.terminal.draw(|frame| {
            let [cloud_area, status_area] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(frame.area());
            frame.render_widget(CloudWidget::new(cloud.surface()), cloud_area);
            frame.render_widget(status, status_area);
        })?;
        Ok(())
    }

    fn status_line(&self) -> Line<'static> {
        let stats = *self.stats.borrow();
        let total = self.cloud.scheduler().active_words().count();
        let placed = self.cloud.placements().len();
        let phase = match self.cloud.state() {
            PassState::Idle => "idle",
            PassState::Debouncing => "settling",
            PassState::Running(_) => "placing",
            PassState::Drained(_) => "done",
        };
        let text = format!(
            " {phase} | {placed}/{total} placed | {failed} failed | r relayout | q quit",
            failed = stats.failed
        );
        Line::styled(text, Style::default().fg(Color::DarkGray))
    }
}

/// Cloud area for a terminal of `width` x `height` cells.
fn canvas_for(width: u16, height: u16) -> Canvas {
    Canvas::new(
        f64::from(width),
        f64::from(height.saturating_sub(STATUS_BAR_HEIGHT)),
    )
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including after errors.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(config: LayoutConfig, seed: Option<u64>, words: Vec<WordEntry>) -> Result<(), TuiError> {
    let result = TuiApp::new(config, seed, words).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
