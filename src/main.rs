use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keyrace::{
    app::App,
    app_dirs::AppDirs,
    celebration::{Celebration, ChannelCelebration, NoCelebration},
    config::{Config, ConfigStore, FileConfigStore},
    language::Language,
    logging::init_tracing_to_file,
    passage::PassageGenerator,
    runtime::{AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    session::Session,
    timer::ThreadScheduler,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// beat a fifty second countdown by typing a random passage exactly
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A single-screen typing TUI. The countdown starts with your first keystroke; letters turn green or red as you type, and finishing the passage before time runs out earns you confetti."
)]
pub struct Cli {
    /// number of words in the passage
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// word list to draw the passage from
    #[clap(short = 'l', long, value_enum)]
    language: Option<SupportedLanguage>,

    /// skip the confetti when a passage is completed
    #[clap(long)]
    no_celebration: bool,

    /// write logs to a file (defaults to the state directory when no path is given)
    #[clap(long)]
    log_file: Option<Option<PathBuf>>,

    /// store the resulting settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SupportedLanguage {
    English,
    EnglishExtended,
}

impl Cli {
    fn resolve_config(&self, stored: Config) -> Config {
        stored.with_overrides(
            self.number_of_words,
            self.language.map(|l| l.to_string()),
            self.no_celebration,
        )
    }

    fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .map(|path| path.unwrap_or_else(AppDirs::log_path))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_path() {
        init_tracing_to_file(&path)?;
    }

    let store = FileConfigStore::new();
    let config = cli.resolve_config(store.load());
    if cli.save_config {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "settings saved");
    }

    // fail on a bad word list before touching the terminal
    let language = Language::new(&config.language)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let celebration: Box<dyn Celebration> = if config.celebrate {
        Box::new(ChannelCelebration::new(events.sender()))
    } else {
        Box::new(NoCelebration)
    };
    let session = Session::new(
        PassageGenerator::new(Box::new(language), config.number_of_words),
        Box::new(ThreadScheduler::new(events.sender())),
        celebration,
    );
    let size = terminal.size()?;
    let mut app = App::new(session, (size.width, size.height));
    let runner = Runner::new(events, FixedTicker::default());

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit {
        if app.handle_event(runner.step()) {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
