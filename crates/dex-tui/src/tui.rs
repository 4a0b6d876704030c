//! Terminal wrapper with async event streaming.
//!
//! [`Tui`] owns the Ratatui terminal and a single event channel. A spawned
//! task multiplexes crossterm's [`EventStream`] with the tick and render
//! timers and forwards everything into the channel; background work (the
//! catalog load, detail fetches) sends into the same channel through
//! [`Tui::event_sender`].
//!
//! ```text
//!  EventStream ─┐
//!  tick timer  ─┼─► event task ─► mpsc ─► Tui::next_event ─► App
//!  render timer ┘                  ▲
//!  background tasks ───────────────┘
//! ```

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::layout::Size;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use crate::error::TuiError;
use crate::event::Event;

/// Event channel capacity.
const EVENT_CHANNEL_CAPACITY: usize = 128;

/// Default frames per second.
const DEFAULT_FRAME_RATE: u32 = 30;

/// Terminal wrapper with async event streaming.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
    tick_interval: Duration,
    frame_rate: u32,
    entered: bool,
}

impl Tui {
    /// Creates a TUI that emits [`Event::Tick`] every `tick_interval`.
    ///
    /// The terminal is not touched until [`enter`](Self::enter).
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Config`] for a zero interval, or a terminal error
    /// if the backend cannot be created.
    pub fn new(tick_interval: Duration) -> Result<Self, TuiError> {
        if tick_interval.is_zero() {
            return Err(TuiError::config("tick interval must be positive"));
        }

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        debug!(tick_ms = tick_interval.as_millis(), "Created TUI");

        Ok(Self {
            terminal,
            event_rx,
            event_tx,
            task: None,
            cancellation_token: CancellationToken::new(),
            tick_interval,
            frame_rate: DEFAULT_FRAME_RATE,
            entered: false,
        })
    }

    /// Sets the render rate in frames per second. Zero is ignored.
    #[must_use]
    pub const fn with_frame_rate(mut self, fps: u32) -> Self {
        if fps > 0 {
            self.frame_rate = fps;
        }
        self
    }

    /// Returns a sender for injecting events from background tasks.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<Event> {
        self.event_tx.clone()
    }

    /// Enables raw mode and the alternate screen, then starts the event task.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal mode cannot be changed.
    pub fn enter(&mut self) -> Result<(), TuiError> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        io::stdout().execute(EnableMouseCapture)?;
        self.entered = true;

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.start_event_loop();

        debug!("Terminal entered");
        Ok(())
    }

    /// Stops the event task and restores the terminal.
    ///
    /// Calling this more than once is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal mode cannot be restored.
    pub fn exit(&mut self) -> Result<(), TuiError> {
        self.stop_event_loop();
        if !self.entered {
            return Ok(());
        }
        self.entered = false;

        self.terminal.show_cursor()?;
        io::stdout().execute(DisableMouseCapture)?;
        io::stdout().execute(LeaveAlternateScreen)?;
        disable_raw_mode()?;

        debug!("Terminal exited");
        Ok(())
    }

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn draw<F>(&mut self, f: F) -> Result<(), TuiError>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Current terminal size.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn size(&self) -> Result<Size, TuiError> {
        Ok(self.terminal.size()?)
    }

    /// Waits for the next event. Returns `None` once every sender is gone.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    fn start_event_loop(&mut self) {
        let tick_delay = self.tick_interval;
        let render_delay = Duration::from_secs(1) / self.frame_rate;
        let event_tx = self.event_tx.clone();
        let cancellation_token = self.cancellation_token.clone();

        debug!(
            tick_ms = tick_delay.as_millis(),
            render_ms = render_delay.as_millis(),
            "Starting event loop"
        );

        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            render_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = cancellation_token.cancelled() => break,
                    _ = tick_interval.tick() => Some(Event::Tick),
                    _ = render_interval.tick() => Some(Event::Render),
                    event = reader.next() => match event {
                        Some(Ok(event)) => convert_crossterm_event(&event),
                        Some(Err(e)) => {
                            warn!(error = %e, "Error reading terminal event");
                            None
                        }
                        None => break,
                    },
                };

                if let Some(event) = event {
                    trace!(?event, "Sending event");
                    if event_tx.send(event).await.is_err() {
                        error!("Event channel closed");
                        break;
                    }
                }
            }

            debug!("Event loop ended");
        });

        self.task = Some(task);
    }

    fn stop_event_loop(&mut self) {
        self.cancellation_token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!(error = %e, "Failed to restore terminal on drop");
        }
    }
}

/// Maps a crossterm event to an [`Event`], dropping key releases and pastes.
fn convert_crossterm_event(event: &crossterm::event::Event) -> Option<Event> {
    use crossterm::event::Event as CrosstermEvent;

    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(*key)),
        CrosstermEvent::Key(_) | CrosstermEvent::Paste(_) => None,
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(*mouse)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize {
            width: *width,
            height: *height,
        }),
        CrosstermEvent::FocusGained => Some(Event::FocusGained),
        CrosstermEvent::FocusLost => Some(Event::FocusLost),
    }
}
