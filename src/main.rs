use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
};

use flyfish::app::App;
use flyfish::config::{self, Config};
use flyfish::error::FlyfishError;

/// How long to wait for input before running background work again
const TICK_RATE: Duration = Duration::from_millis(50);

/// Terminal chat assistant for Sui wallets
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/flyfish/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Wallet address used for suggestions and the status bar
    #[arg(long, value_name = "ADDRESS")]
    wallet: Option<String>,

    /// Chat backend endpoint
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Where to write logs (level set with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_file.clone()) {
        // Still on the normal screen, so stderr is visible
        eprintln!("Logging disabled: {}", e);
    }

    let config = load_config(&cli)?;

    let mut app = App::new(&config);
    if let Err(e) = app.start_workers(&config) {
        log::warn!("{}", e);
    }

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    let _ = execute!(std::io::stdout(), EnableBracketedPaste);

    let result = run(terminal, app);

    let _ = execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}

fn load_config(cli: &Cli) -> Result<Config, FlyfishError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };

    if let Some(address) = &cli.wallet {
        config.wallet.address = Some(address.clone());
    }
    if let Some(endpoint) = &cli.endpoint {
        config.chat.endpoint = endpoint.clone();
    }
    Ok(config)
}

/// Send logs to a file so they never draw over the UI
fn init_logging(log_file: Option<PathBuf>) -> Result<(), FlyfishError> {
    let Some(path) = log_file.or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("flyfish").join("flyfish.log"))
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| app.render(frame, now))?;

        if event::poll(TICK_RATE)? {
            app.handle_event(event::read()?, Instant::now());
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
