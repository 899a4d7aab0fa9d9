//! Status bar
//!
//! Displays who is signed in, where the router points, the theme, and the
//! last status message.

use glance_app::Theme;
use glance_core::UserId;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Palette;
use crate::Shell;

/// Render the status bar.
pub fn render(frame: &mut Frame, shell: &Shell, theme: Theme, palette: Palette, area: Rect) {
    let user = shell.user().map_or_else(|| "guest".to_owned(), |u: &UserId| format!("@{u}"));
    let route = shell.router().current().unwrap_or("/");

    let mut spans = vec![
        Span::styled(user, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" | {route} | {}", theme.as_str())),
    ];
    if let Some(status) = shell.status() {
        spans.push(Span::styled(format!(" | {status}"), Style::default().fg(palette.accent)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(palette.muted).fg(palette.fg));

    frame.render_widget(paragraph, area);
}
