//! Glance terminal client.
//!
//! # Usage
//!
//! ```bash
//! # Browse as a signed-in demo user
//! glance-tui --user ana
//!
//! # Without --user the session guard redirects to sign-in
//! glance-tui --prefs ~/.glance-prefs.redb --log-level debug
//! ```

use std::{error::Error, fs::OpenOptions, path::PathBuf, sync::Arc};

use clap::Parser;
use glance_app::{Runtime, SearchAggregator, SessionGuard, StoryViewer, Theme, ThemeService};
use glance_core::{
    DataGateway, Environment, HistoryRouter, MemoryGateway, SystemEnv, Table, group_stories,
};
use glance_tui::{Effect, RedbPreferences, Shell, StoryDriver, Tui, demo, ui};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Glance terminal client
#[derive(Parser, Debug)]
#[command(name = "glance-tui")]
#[command(about = "Browse posts, people, and stories from the terminal")]
#[command(version)]
struct Args {
    /// Preference database (theme)
    #[arg(long, default_value = "glance-prefs.redb")]
    prefs: PathBuf,

    /// Signed-in demo user. Omit to browse signed out.
    #[arg(short, long)]
    user: Option<String>,

    /// Log file; the terminal itself is used for the UI
    #[arg(long, default_value = "glance-tui.log")]
    log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let log_file = OpenOptions::new().create(true).append(true).open(&args.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    tracing::info!("Glance starting");

    let env = SystemEnv::new();
    let gateway = demo::seed(args.user.as_deref(), env.wall_clock_secs());

    let mut theme = ThemeService::load(RedbPreferences::open(&args.prefs)?);
    let theme_rx = theme.subscribe();

    let mut router = HistoryRouter::new("/");
    let mut guard = SessionGuard::new();
    guard.check(&gateway, &mut router).await;

    let mut shell = Shell::new(guard.identity().map(|i| i.id.clone()), router);
    reload(&mut shell, &gateway).await;

    let aggregator = SearchAggregator::new(gateway.clone());
    let mut tui = Tui::new()?;

    loop {
        let current = *theme_rx.borrow();
        let now_secs = env.wall_clock_secs();
        tui.draw(|frame| ui::render(frame, &shell, current, now_secs))?;

        let Some(key) = tui.next_key().await? else {
            continue;
        };

        match shell.handle_key(key) {
            None => {},
            Some(Effect::Quit) => break,
            Some(Effect::ToggleTheme) => {
                if let Err(error) = theme.toggle() {
                    shell.set_status(format!("Theme not saved: {error}"));
                }
            },
            Some(Effect::DeletePost(id)) => {
                match gateway.delete_row(Table::Posts, id.as_str()).await {
                    Ok(()) => {
                        tracing::info!(post_id = %id, "post deleted");
                        shell.set_status("Post deleted");
                        reload(&mut shell, &gateway).await;
                    },
                    Err(error) => {
                        tracing::error!(post_id = %id, %error, "post delete failed");
                        shell.set_status(format!("Delete failed: {error}"));
                    },
                }
            },
            Some(Effect::Search(query)) => {
                let results = aggregator.search(&query).await;
                shell.show_search(query, results);
            },
            Some(Effect::OpenStories { group }) => {
                let deleted = play_stories(&mut tui, &gateway, &shell, group, current).await?;
                if deleted > 0 {
                    shell.set_status(format!("Deleted {deleted} stor{}", plural(deleted)));
                }
                reload(&mut shell, &gateway).await;
            },
        }
    }

    tracing::info!("Glance exiting");
    Ok(())
}

/// Refresh the feed and story tray from the backend.
async fn reload(shell: &mut Shell, gateway: &MemoryGateway) {
    let (posts, stories) = tokio::join!(gateway.list_posts(), gateway.list_stories());

    match posts {
        Ok(posts) => shell.set_posts(posts),
        Err(error) => tracing::error!(%error, "feed load failed"),
    }
    match stories {
        Ok(stories) => shell.set_stories(group_stories(stories)),
        Err(error) => tracing::error!(%error, "story load failed"),
    }
}

/// Play stories from `group` until the viewer closes.
///
/// Returns how many stories were deleted.
async fn play_stories(
    tui: &mut Tui,
    gateway: &MemoryGateway,
    shell: &Shell,
    group: usize,
    theme: Theme,
) -> Result<usize, Box<dyn Error>> {
    let viewer = StoryViewer::new(shell.groups().to_vec(), group, shell.user().cloned())?;
    let _scroll = shell.scroll().lock();

    let mut driver = StoryDriver::new(tui, theme);
    let runtime = Runtime::new(&mut driver, gateway.clone(), SystemEnv::new(), viewer);
    runtime.run().await?;

    Ok(driver.deleted().len())
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "y" } else { "ies" }
}
