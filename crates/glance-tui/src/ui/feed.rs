//! Feed page: story tray on top, post cards below.

use glance_app::PostCard;
use glance_core::relative_time;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{Palette, badge_mark, render_popup};
use crate::Shell;

const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";
const MENU_MARKER: &str = " ⋯";
const MENU_OPTIONS: &str = "[e]dit [x]delete";

/// Render the feed page.
pub fn render(frame: &mut Frame, shell: &Shell, palette: Palette, now_secs: u64, area: Rect) {
    const TRAY_HEIGHT: u16 = 3;
    const POSTS_MIN_HEIGHT: u16 = 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TRAY_HEIGHT), Constraint::Min(POSTS_MIN_HEIGHT)])
        .split(area);

    let [tray_area, posts_area] = chunks.as_ref() else {
        return;
    };

    render_tray(frame, shell, palette, *tray_area);
    render_posts(frame, shell, palette, now_secs, *posts_area);

    if let Some(modal) = shell.cards().get(shell.selected()).and_then(PostCard::modal) {
        let post = modal.post();
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
        render_popup(frame, post.display_name(), lines, palette, *posts_area);
    }
}

fn render_tray(frame: &mut Frame, shell: &Shell, palette: Palette, area: Rect) {
    let mut spans = Vec::new();
    for (i, group) in shell.groups().iter().enumerate() {
        let name = group.get(0).map_or("user", |s| s.author_name());
        let label = format!(" {name} ({}) ", group.len());
        let style =
            if i == shell.tray() { palette.selected() } else { Style::default().fg(palette.fg) };
        spans.push(Span::styled(label, style));
    }
    if spans.is_empty() {
        spans.push(Span::styled("No stories", Style::default().fg(palette.muted)));
    }

    let block = Block::default().borders(Borders::ALL).title(" Stories [s] ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_posts(frame: &mut Frame, shell: &Shell, palette: Palette, now_secs: u64, area: Rect) {
    let items: Vec<ListItem> = shell
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| card_item(card, i == shell.selected(), palette, now_secs))
        .collect();

    let title = if items.is_empty() { " Feed (empty) " } else { " Feed " };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(List::new(items).block(block), area);
}

fn card_item(
    card: &PostCard,
    selected: bool,
    palette: Palette,
    now_secs: u64,
) -> ListItem<'static> {
    let post = card.post();
    let prefix = if selected { SELECTED_PREFIX } else { UNSELECTED_PREFIX };
    let name_style = if selected { palette.selected() } else { Style::default().fg(palette.fg) };

    let mut header = vec![
        Span::raw(prefix),
        Span::styled(format!("{} ", card.display_initial()), Style::default().fg(palette.accent)),
        Span::styled(card.display_name().to_owned(), name_style),
    ];
    if let Some(badge) = card.badge() {
        let mark = format!(" {}", badge_mark(badge));
        header.push(Span::styled(mark, Style::default().fg(palette.accent)));
    }
    if card.author_tag_visible() {
        header.push(Span::styled(" [Author]", Style::default().fg(palette.muted)));
    }
    header.push(Span::styled(
        format!(" · {}", relative_time(now_secs, post.created_at_secs)),
        Style::default().fg(palette.muted),
    ));
    if card.owner_menu_visible() {
        header.push(Span::raw(MENU_MARKER));
    }

    let body = post.title.clone().unwrap_or_else(|| post.content.clone());
    let mut lines = vec![
        Line::from(header),
        Line::from(vec![Span::raw(UNSELECTED_PREFIX), Span::raw(body)]),
    ];
    // Own line so narrow terminals don't clip the options off the header.
    if card.is_menu_open() {
        lines.push(Line::from(vec![
            Span::raw(UNSELECTED_PREFIX),
            Span::styled(MENU_OPTIONS, Style::default().fg(palette.danger)),
        ]));
    }
    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use glance_app::Theme;
    use glance_core::{HistoryRouter, Post, PostAuthor, Story, StoryAuthor, StoryGroup, UserId};

    use super::*;
    use crate::{KeyInput, ui::testing::draw};

    fn post(id: &str, author: &str, name: &str, badge: Option<&str>) -> Post {
        Post {
            id: id.into(),
            title: Some(format!("Title {id}")),
            content: format!("Content {id}"),
            image_url: None,
            author_id: author.into(),
            created_at_secs: 0,
            author: Some(PostAuthor {
                username: None,
                full_name: Some(name.into()),
                avatar_url: None,
                border_variant: None,
                badge: badge.map(Into::into),
            }),
        }
    }

    fn shell() -> Shell {
        let mut shell = Shell::new(Some(UserId::new("ana")), HistoryRouter::new("/"));
        shell.set_posts(vec![
            post("p1", "ana", "Ana Kovac", Some("verified")),
            post("p2", "ben", "Ben Ortiz", None),
        ]);
        shell.set_stories(vec![StoryGroup::new(
            "ben".into(),
            vec![Story {
                id: "s1".into(),
                author_id: "ben".into(),
                image_url: "https://cdn.example/s1.jpg".into(),
                created_at_secs: 0,
                author: Some(StoryAuthor { username: Some("benji".into()), avatar_url: None }),
            }],
        )]);
        shell
    }

    fn render_shell(shell: &Shell) -> String {
        let palette = Palette::for_theme(Theme::Dark);
        draw(50, 24, |f, area| render(f, shell, palette, 120, area))
    }

    #[test]
    fn cards_show_author_badge_and_age() {
        let text = render_shell(&shell());

        assert!(text.contains("> A Ana Kovac ✔ [Author] · 2 minutes ago ⋯"));
        assert!(text.contains("  B Ben Ortiz · 2 minutes ago"));
        assert!(text.contains("Title p1"));
        assert!(text.contains(" benji (1) "));
    }

    #[test]
    fn open_menu_lists_owner_actions() {
        let mut shell = shell();
        shell.handle_key(KeyInput::Char('m'));

        let text = render_shell(&shell);
        let lines: Vec<&str> = text.lines().collect();
        let title = lines.iter().position(|l| l.contains("Title p1")).unwrap();
        assert!(lines[title + 1].contains("  [e]dit [x]delete"));
        assert!(text.contains("Title p2"));
    }

    #[test]
    fn modal_shows_full_content() {
        let mut shell = shell();
        shell.handle_key(KeyInput::Enter);

        let text = render_shell(&shell);
        assert!(text.contains("Content p1"));
        assert!(text.contains("Ana Kovac"));
    }

    #[test]
    fn empty_feed() {
        let shell = Shell::new(None, HistoryRouter::new("/"));
        let text = render_shell(&shell);

        assert!(text.contains("Feed (empty)"));
        assert!(text.contains("No stories"));
    }
}
