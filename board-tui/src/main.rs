use anyhow::Context;
use board_tui::board::{BoardController, PositionState};
use board_tui::config::{self, Cli, Preferences, Settings};
use board_tui::context::{AppContext, Viewer};
use board_tui::ui::{run_app, App, AppOptions};
use chess::CozyOracle;
use chess_client::{BackoffSchedule, Channel, ReplayTransport};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let prefs_path = config::get_preferences_path();
    let prefs = Preferences::load_from(&prefs_path)?;
    let settings = Settings::resolve(cli, prefs);

    // Set up tracing with file output; the terminal belongs to the TUI
    std::fs::create_dir_all(&settings.log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&settings.log_dir, "board-tui");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(prefs = %prefs_path.display(), "board-tui starting up");

    let position = PositionState::new(CozyOracle::new(), &settings.fen)
        .with_context(|| format!("Invalid starting position: {}", settings.fen))?;
    let controller = BoardController::new(position, settings.board);

    let channel = settings.replay.as_ref().map(|path| {
        Channel::new(
            ReplayTransport::new(path, settings.replay_interval),
            BackoffSchedule::default(),
        )
    });

    let viewer = settings.viewer.clone().map(|name| Viewer { name, side: None });
    let mut ctx = AppContext::new(viewer);
    let mut app = App::new(
        controller,
        AppOptions {
            orientation: settings.orientation,
            locked: settings.locked,
            theme: settings.theme,
        },
        channel,
    );

    run_app(&mut app, &mut ctx)?;
    ctx.logout();

    let prefs = Preferences {
        orientation: app.orientation(),
        ..prefs
    };
    if let Err(e) = prefs.save_to(&prefs_path) {
        tracing::warn!(error = %e, "Failed to save preferences");
    }

    tracing::info!(moves = app.moves().len(), "board-tui shutting down");
    Ok(())
}
