//! Search results page.

use glance_app::{NO_RESULTS_TEXT, SearchState};
use glance_core::Badge;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Palette, badge_mark, render_popup};
use crate::{ResultRow, Shell};

/// Render the search page.
pub fn render(frame: &mut Frame, shell: &Shell, palette: Palette, area: Rect) {
    let Some(view) = shell.search() else {
        return;
    };

    let heading = Style::default().fg(palette.muted).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    match view.state() {
        SearchState::Loading => lines.push(Line::from("Searching...")),
        SearchState::Empty => {
            lines.push(Line::from(Span::styled(NO_RESULTS_TEXT, Style::default().fg(palette.muted))));
        },
        SearchState::Results(_) => {
            for (row_index, row) in shell.result_rows().into_iter().enumerate() {
                let selected = row_index == shell.result();
                let prefix = if selected { "> " } else { "  " };
                let style =
                    if selected { palette.selected() } else { Style::default().fg(palette.fg) };

                match row {
                    ResultRow::Person(i) => {
                        if i == 0 && view.show_people_heading() {
                            lines.push(Line::from(Span::styled("People", heading)));
                        }
                        let Some(person) = view.people().get(i) else {
                            continue;
                        };
                        let badge = person.badge.as_deref().and_then(Badge::parse);
                        lines.push(Line::from(vec![
                            Span::raw(prefix),
                            Span::styled(person.display_name().to_owned(), style),
                            Span::styled(
                                badge.map_or(String::new(), |b| format!(" {}", badge_mark(b))),
                                Style::default().fg(palette.accent),
                            ),
                            Span::styled(
                                format!(" {}", person.handle()),
                                Style::default().fg(palette.muted),
                            ),
                        ]));
                    },
                    ResultRow::Post(i) => {
                        if i == 0 && view.show_posts_heading() {
                            lines.push(Line::default());
                            lines.push(Line::from(Span::styled("Posts", heading)));
                        }
                        let Some(post) = view.posts().get(i) else {
                            continue;
                        };
                        let summary = post.title.as_deref().unwrap_or(&post.content);
                        lines.push(Line::from(vec![
                            Span::raw(prefix),
                            Span::styled(summary.to_owned(), style),
                            Span::styled(
                                format!(" by {}", post.display_name()),
                                Style::default().fg(palette.muted),
                            ),
                        ]));
                    },
                }
            }
        },
    }

    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", view.title()));
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if let Some(detail) = view.detail() {
        let post = detail.post();
        let mut lines = Vec::new();
        if let Some(title) = &post.title {
            lines.push(Line::from(Span::styled(
                title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(post.content.clone()));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "[l]ike  [c]omment  Esc close",
            Style::default().fg(palette.muted),
        )));
        render_popup(frame, post.display_name(), lines, palette, area);
    }
}

#[cfg(test)]
mod tests {
    use glance_app::{SearchResults, Theme};
    use glance_core::{HistoryRouter, Post, Profile};

    use super::*;
    use crate::ui::testing::draw;

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.into(),
            title: Some(title.into()),
            content: "body".into(),
            image_url: None,
            author_id: "ben".into(),
            created_at_secs: 0,
            author: None,
        }
    }

    fn profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.into(),
            username: id.into(),
            full_name: Some(name.into()),
            avatar_url: None,
            badge: Some("pro".into()),
        }
    }

    fn render_results(results: SearchResults) -> String {
        let mut shell = Shell::new(None, HistoryRouter::new("/"));
        shell.show_search("lake", results);

        let palette = Palette::for_theme(Theme::Dark);
        draw(40, 10, |f, area| render(f, &shell, palette, area))
    }

    #[test]
    fn no_results_message() {
        let text = render_results(SearchResults::default());

        insta::assert_snapshot!(text, @r#"
        ┌ Results for: "lake" ─────────────────┐
        │No results found.                     │
        │                                      │
        │                                      │
        │                                      │
        │                                      │
        │                                      │
        │                                      │
        │                                      │
        └──────────────────────────────────────┘
        "#);
    }

    #[test]
    fn people_then_posts_with_headings() {
        let text = render_results(SearchResults {
            posts: vec![post("p1", "Lake day")],
            people: vec![profile("cleo", "Cleo Marsh")],
        });

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "│People                                │");
        assert_eq!(lines[2], "│> Cleo Marsh ◆ @cleo                  │");
        assert_eq!(lines[4], "│Posts                                 │");
        assert_eq!(lines[5], "│  Lake day by User                    │");
    }

    #[test]
    fn posts_only_has_no_headings() {
        let text =
            render_results(SearchResults { posts: vec![post("p1", "Lake day")], people: vec![] });

        assert!(!text.contains("Posts"));
        assert!(text.contains("> Lake day by User"));
    }
}
