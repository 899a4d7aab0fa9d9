//! UI rendering
//!
//! Rendering functions that convert shell and viewer state into terminal
//! output using ratatui widgets. All functions are pure (no I/O), taking
//! state and drawing into a frame.

mod feed;
mod search;
mod status;
pub mod story;

use glance_app::Theme;
use glance_core::Badge;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{InputState, Screen, Shell};

pub use story::{Overlay, StoryFrame};

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Background.
    pub bg: Color,
    /// Body text.
    pub fg: Color,
    /// Secondary text.
    pub muted: Color,
    /// Highlights and selection.
    pub accent: Color,
    /// Destructive controls and errors.
    pub danger: Color,
}

impl Palette {
    /// Palette for `theme`.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                danger: Color::LightRed,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                danger: Color::Red,
            },
        }
    }

    /// Base style for a surface.
    pub fn base(self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    /// Style for the selected row.
    pub fn selected(self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}

/// Render the whole shell.
pub fn render(frame: &mut Frame, shell: &Shell, theme: Theme, now_secs: u64) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let palette = Palette::for_theme(theme);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    match shell.screen() {
        Screen::SignIn => render_sign_in(frame, palette, *main_area),
        Screen::Feed => feed::render(frame, shell, palette, now_secs, *main_area),
        Screen::Search => search::render(frame, shell, palette, *main_area),
    }

    if let Some(input) = shell.input() {
        render_search_box(frame, input, palette, *main_area);
    }

    status::render(frame, shell, theme, palette, *status_area);
}

/// Shown when the session guard redirected.
pub fn render_sign_in(frame: &mut Frame, palette: Palette, area: Rect) {
    let text = vec![
        Line::from("Sign in required."),
        Line::from(Span::styled("Redirected to /auth", Style::default().fg(palette.muted))),
        Line::from("Press q to quit."),
    ];
    let block = Block::default().borders(Borders::ALL).title(" Glance ");
    frame.render_widget(Paragraph::new(text).block(block).style(palette.base()), area);
}

fn render_search_box(frame: &mut Frame, input: &InputState, palette: Palette, area: Rect) {
    const BOX_HEIGHT: u16 = 3;

    let area = Rect { height: BOX_HEIGHT.min(area.height), ..area };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .border_style(Style::default().fg(palette.accent));
    let paragraph = Paragraph::new(input.buffer()).block(block).style(palette.base());

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);

    let cursor_x = area.x + 1 + u16::try_from(input.cursor()).unwrap_or(u16::MAX);
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

/// Draw a bordered popup with wrapped text in the middle of `area`.
pub(crate) fn render_popup(
    frame: &mut Frame,
    title: &str,
    lines: Vec<Line<'_>>,
    palette: Palette,
    area: Rect,
) {
    let popup = centered(area, 60, 40);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(palette.accent));
    let paragraph =
        Paragraph::new(lines).block(block).style(palette.base()).wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// Rect covering `percent_x` by `percent_y` of `area`, centered.
pub(crate) fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let [_, middle, _] = vertical.as_ref() else {
        return area;
    };

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(*middle);
    let [_, center, _] = horizontal.as_ref() else {
        return *middle;
    };
    *center
}

/// Glyph shown next to an author's name.
pub(crate) fn badge_mark(badge: Badge) -> &'static str {
    match badge {
        Badge::Verified => "✔",
        Badge::Admin => "★",
        Badge::Pro => "◆",
    }
}
