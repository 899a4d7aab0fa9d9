//! Terminal I/O.
//!
//! [`Tui`] owns the crossterm terminal and its event stream for the whole
//! session. [`StoryDriver`] borrows it to implement the story runtime's
//! [`Driver`] trait.

use std::{
    collections::VecDeque,
    io::{self, Stdout, stdout},
    time::Instant,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use glance_app::{Driver, StoryEvent, StoryViewer, TapZone, Theme};
use glance_core::{Environment, StoryId, SystemEnv};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{
    KeyInput,
    ui::{self, Overlay, StoryFrame},
};

/// Terminal errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal stopped delivering input.
    #[error("terminal input closed")]
    InputClosed,
}

/// The terminal for the lifetime of the program.
///
/// Raw mode and the alternate screen are restored on drop.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
}

impl Tui {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, events: EventStream::new() })
    }

    /// Wait for the next key press.
    ///
    /// Returns `Ok(None)` for anything that is not a key Glance handles.
    pub async fn next_key(&mut self) -> Result<Option<KeyInput>, TerminalError> {
        match self.events.next().await {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                Ok(KeyInput::from_code(key.code))
            },
            Some(Err(e)) => Err(TerminalError::Io(e)),
            Some(Ok(_)) => Ok(None),
            None => Err(TerminalError::InputClosed),
        }
    }

    /// Draw one frame.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<(), TerminalError> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Map a key to story viewer events.
///
/// Arrow keys are instant taps, so they produce a press and a release.
/// Space toggles a hold; `holding` tracks which half of the toggle is next.
pub fn story_events(key: KeyInput, now: Instant, holding: &mut bool) -> Vec<StoryEvent<Instant>> {
    match key {
        KeyInput::Left | KeyInput::Char('h') => tap(now, TapZone::Left),
        KeyInput::Right | KeyInput::Char('l') => tap(now, TapZone::Right),
        KeyInput::Char(' ') => {
            *holding = !*holding;
            if *holding {
                vec![StoryEvent::PointerDown { now }]
            } else {
                vec![StoryEvent::PointerLeave]
            }
        },
        KeyInput::Char('d') => vec![StoryEvent::DeletePressed],
        KeyInput::Esc | KeyInput::Char('q') => vec![StoryEvent::ClosePressed],
        _ => Vec::new(),
    }
}

fn tap(now: Instant, zone: TapZone) -> Vec<StoryEvent<Instant>> {
    vec![StoryEvent::PointerDown { now }, StoryEvent::PointerUp { now, zone }]
}

/// [`Driver`] for story playback in the terminal.
pub struct StoryDriver<'a> {
    tui: &'a mut Tui,
    env: SystemEnv,
    palette: ui::Palette,
    queued: VecDeque<StoryEvent<Instant>>,
    holding: bool,
    last: Option<StoryFrame>,
    overlay: Option<Overlay>,
    deleted: Vec<StoryId>,
}

impl<'a> StoryDriver<'a> {
    /// Borrow the terminal for one viewing session.
    pub fn new(tui: &'a mut Tui, theme: Theme) -> Self {
        Self {
            tui,
            env: SystemEnv::new(),
            palette: ui::Palette::for_theme(theme),
            queued: VecDeque::new(),
            holding: false,
            last: None,
            overlay: None,
            deleted: Vec::new(),
        }
    }

    /// Stories deleted during this session.
    pub fn deleted(&self) -> &[StoryId] {
        &self.deleted
    }

    fn redraw(&mut self) -> Result<(), TerminalError> {
        let Some(story) = &self.last else {
            return Ok(());
        };
        let overlay = self.overlay.as_ref();
        let palette = self.palette;
        self.tui.draw(|frame| {
            let area = frame.area();
            ui::story::render(frame, story, overlay, palette, area);
        })
    }
}

impl Driver for StoryDriver<'_> {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(&mut self) -> Result<Option<StoryEvent<Instant>>, Self::Error> {
        if let Some(event) = self.queued.pop_front() {
            return Ok(Some(event));
        }

        let Some(key) = self.tui.next_key().await? else {
            return Ok(None);
        };

        if self.overlay.take().is_some() {
            // The key only dismisses the alert
            self.redraw()?;
            return Ok(None);
        }

        let mut events = story_events(key, self.env.now(), &mut self.holding).into_iter();
        let first = events.next();
        self.queued.extend(events);
        Ok(first)
    }

    async fn confirm(&mut self, prompt: &str) -> Result<bool, Self::Error> {
        self.holding = false;
        self.overlay = Some(Overlay::Confirm(prompt.to_owned()));
        self.redraw()?;

        let answer = loop {
            match self.tui.next_key().await? {
                Some(KeyInput::Char('y' | 'Y') | KeyInput::Enter) => break true,
                Some(KeyInput::Char('n' | 'N') | KeyInput::Esc) => break false,
                _ => {},
            }
        };

        self.overlay = None;
        self.redraw()?;
        Ok(answer)
    }

    fn alert(&mut self, message: &str) -> Result<(), Self::Error> {
        tracing::warn!(message, "story alert");
        self.overlay = Some(Overlay::Alert(message.to_owned()));
        self.redraw()
    }

    fn story_deleted(&mut self, story_id: &StoryId) {
        tracing::info!(story_id = %story_id, "story deleted");
        self.deleted.push(story_id.clone());
    }

    fn render(&mut self, viewer: &StoryViewer<Instant>) -> Result<(), Self::Error> {
        self.last = StoryFrame::capture(viewer, self.env.wall_clock_secs());
        self.redraw()
    }

    fn stop(&mut self) {
        self.queued.clear();
        self.overlay = None;
        self.holding = false;
    }
}
