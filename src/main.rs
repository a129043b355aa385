use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use path_os::config::DesktopConfig;
use path_os::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, HOME_URL};
use path_os::drivers::console::ConsoleDriver;
use path_os::drivers::with_session;
use path_os::error::ConfigError;
use path_os::protocol::{DesktopHost, load_script};
use path_os::runner::{App, run_app, start_view_router};
use path_os::tracing_sub;
use path_os::window::{Desktop, Placement};

#[derive(Parser, Debug)]
#[command(
    name = "path-os",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop of browser windows, drawn in the terminal"
)]
struct Cli {
    /// Page opened in the first window and in every new window.
    #[arg(long = "home", value_name = "URL", default_value = HOME_URL)]
    home_url: String,

    /// Width of new windows, in pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_WINDOW_WIDTH)]
    window_width: i32,

    /// Height of new windows, in pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_WINDOW_HEIGHT)]
    window_height: i32,

    /// Origin allowed to talk to the desktop. Repeat for more than one.
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    allowed_origins: Vec<String>,

    /// JSON-lines file of inbound messages to deliver at start-up.
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Origin the replayed messages are treated as coming from. Defaults to
    /// the first allowed origin.
    #[arg(long, value_name = "ORIGIN", requires = "replay")]
    replay_origin: Option<String>,

    /// Start-up view as a URL hash: `#/` for the desktop, `#/help` for the
    /// key help.
    #[arg(long, value_name = "HASH", default_value = "#/")]
    route: String,

    /// Write logs here. Without it nothing is logged, since stderr shares
    /// the screen.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: tracing::Level,
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let mut config = DesktopConfig {
            home_url: cli.home_url.clone(),
            window_width: cli.window_width,
            window_height: cli.window_height,
            ..DesktopConfig::default()
        };
        if !cli.allowed_origins.is_empty() {
            config.allowed_origins = cli.allowed_origins.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = DesktopConfig::try_from(&cli).map_err(io::Error::other)?;

    if let Some(path) = &cli.log_file {
        tracing_sub::set_log_file(path)?;
        tracing_sub::init_default(cli.log_level);
    }

    let mut app = App::new(DesktopHost::new(Desktop::new(config)));
    app.open_home_window(Placement::Default);
    app.show(start_view_router().route(&cli.route));

    if let Some(path) = &cli.replay {
        let messages = load_script(path).map_err(io::Error::other)?;
        let origin = cli
            .replay_origin
            .clone()
            .or_else(|| app.host().desktop().config().allowed_origins.first().cloned())
            .unwrap_or_default();
        tracing::info!(count = messages.len(), path = %path.display(), %origin, "replaying messages");
        for message in messages {
            let routed = app.host_mut().receive_from(&origin, message);
            tracing::debug!(?routed, "replayed");
        }
    }

    let mut driver = ConsoleDriver::new();
    with_session(&mut driver, |driver| {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        let result = run_app(&mut terminal, driver, &mut app, Duration::from_millis(16));
        terminal.show_cursor()?;
        result
    })
}
