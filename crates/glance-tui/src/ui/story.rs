//! Full-screen story viewer.
//!
//! [`StoryFrame`] captures what the viewer shows so the terminal driver can
//! redraw the last frame under a prompt without holding the viewer.

use std::{ops::Sub, time::Duration};

use glance_app::StoryViewer;
use glance_core::relative_time;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Palette, render_popup};

const FILLED: &str = "━";
const EMPTY: &str = "─";

/// Everything the story screen draws.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryFrame {
    /// Author handle.
    pub author: String,
    /// Age label ("5 minutes ago").
    pub age: String,
    /// Image object name, or the full URL if it has none.
    pub image: String,
    /// Progress bar fill per story of the group.
    pub segments: Vec<f64>,
    /// Pause indicator shown.
    pub paused: bool,
    /// Delete in flight.
    pub deleting: bool,
    /// Delete control offered.
    pub can_delete: bool,
}

impl StoryFrame {
    /// Capture the viewer's current story. `None` once closed.
    pub fn capture<I>(viewer: &StoryViewer<I>, now_secs: u64) -> Option<Self>
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        if viewer.is_closed() {
            return None;
        }
        let story = viewer.current_story()?;
        Some(Self {
            author: story.author_name().to_owned(),
            age: relative_time(now_secs, story.created_at_secs),
            image: story.blob_file_name().unwrap_or(&story.image_url).to_owned(),
            segments: viewer.segments(),
            paused: viewer.pause_indicator_visible(),
            deleting: viewer.is_deleting(),
            can_delete: viewer.delete_control_visible(),
        })
    }
}

/// A modal drawn over the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Yes/no question.
    Confirm(String),
    /// Message acknowledged by any key.
    Alert(String),
}

/// Render the story screen.
pub fn render(
    frame: &mut Frame,
    story: &StoryFrame,
    overlay: Option<&Overlay>,
    palette: Palette,
    area: Rect,
) {
    const BAR_HEIGHT: u16 = 1;
    const HEADER_HEIGHT: u16 = 1;
    const HINT_HEIGHT: u16 = 1;

    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BAR_HEIGHT),
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(HINT_HEIGHT),
        ])
        .split(area);

    let [bar_area, header_area, image_area, hint_area] = chunks.as_ref() else {
        return;
    };

    let bar = segment_line(&story.segments, bar_area.width, palette);
    frame.render_widget(Paragraph::new(bar), *bar_area);

    let mut header = vec![
        Span::styled(story.author.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", story.age), Style::default().fg(palette.muted)),
    ];
    if story.paused {
        header.push(Span::styled("  ❚❚ paused", Style::default().fg(palette.accent)));
    }
    if story.deleting {
        header.push(Span::styled("  Deleting...", Style::default().fg(palette.danger)));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), *header_area);

    let image = Paragraph::new(story.image.clone())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(image, *image_area);

    let mut hints = String::from("←/→ tap  space hold  esc close");
    if story.can_delete {
        hints.push_str("  d delete");
    }
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(palette.muted))),
        *hint_area,
    );

    match overlay {
        Some(Overlay::Confirm(prompt)) => {
            let lines = vec![Line::from(prompt.clone()), Line::default(), Line::from("[y]es  [n]o")];
            render_popup(frame, "Confirm", lines, palette, area);
        },
        Some(Overlay::Alert(message)) => {
            let lines = vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(palette.danger))),
                Line::default(),
                Line::from("Press any key"),
            ];
            render_popup(frame, "Error", lines, palette, area);
        },
        None => {},
    }
}

/// One progress bar per story, separated by a space.
pub fn segment_line(segments: &[f64], width: u16, palette: Palette) -> Line<'static> {
    let count = segments.len();
    if count == 0 {
        return Line::default();
    }

    let gaps = count - 1;
    let each = usize::from(width).saturating_sub(gaps) / count;

    let mut spans = Vec::with_capacity(count * 3);
    for (i, fill) in segments.iter().enumerate() {
        let filled = ((each as f64) * fill.clamp(0.0, 100.0) / 100.0).round() as usize;
        spans.push(Span::styled(FILLED.repeat(filled), Style::default().fg(palette.fg)));
        spans.push(Span::styled(EMPTY.repeat(each - filled), Style::default().fg(palette.muted)));
        if i < gaps {
            spans.push(Span::raw(" "));
        }
    }
    Line::from(spans)
}
