mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use dingding::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    input::{InputMode, PointerEvent},
    logging,
    runtime::{CrosstermEventSource, DingEvent, FixedTicker, Runner},
    session::TICK_RATE_MS,
    Game,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

/// ring the bell when the countdown hits zero
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A tiny terminal timing game: start the countdown, then launch the striker so it rings the bell as close to 0.00 as you can. The clock disappears once five seconds are left."
)]
pub struct Cli {
    /// how to move the striker (defaults to the saved preference)
    #[clap(short = 'm', long, value_enum)]
    input_mode: Option<InputMode>,

    /// remember the chosen input mode as the default
    #[clap(long)]
    save_config: bool,

    /// hide the key legend for this run
    #[clap(long)]
    no_legend: bool,

    /// write logs to the default log file
    #[clap(long)]
    log: bool,

    /// write logs to this file (implies --log)
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Merge command line flags over the saved preferences
    fn settings(&self, saved: &Config) -> Config {
        Config {
            input_mode: self.input_mode.unwrap_or(saved.input_mode),
            show_legend: saved.show_legend && !self.no_legend,
        }
    }

    /// What `--save-config` writes: only the input mode changes, the other
    /// saved preferences are kept as they were
    fn preferences_to_save(&self, saved: &Config) -> Config {
        Config {
            input_mode: self.input_mode.unwrap_or(saved.input_mode),
            ..saved.clone()
        }
    }

    fn log_target(&self) -> Option<PathBuf> {
        match (&self.log_file, self.log) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => AppDirs::log_path(),
            (None, false) => None,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub settings: Config,
    /// Play field area from the last draw, used to map mouse cells to the world
    pub field: Rect,
}

impl App {
    pub fn new(settings: Config) -> Self {
        Self {
            game: Game::new(settings.input_mode),
            settings,
            field: Rect::default(),
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let Some(at) = ui::viewport::cell_to_world(self.field, mouse.column, mouse.row) else {
            return;
        };

        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerEvent::Down(at),
            MouseEventKind::Drag(MouseButton::Left) => PointerEvent::Drag(at),
            MouseEventKind::Up(MouseButton::Left) => PointerEvent::Up(at),
            MouseEventKind::Moved => PointerEvent::Moved(at),
            _ => return,
        };

        self.game.on_pointer(event);
    }

    pub fn toggle_input_mode(&mut self) {
        let mode = self.game.input.mode().toggled();
        self.game.set_input_mode(mode);
        self.settings.input_mode = mode;
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Quit
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let session = &self.game.session;
                if !session.started() || session.ended() {
                    self.game.start();
                    return KeyOutcome::Started;
                }
            }
            KeyCode::Char('r') => {
                self.game.start();
                return KeyOutcome::Started;
            }
            KeyCode::Char('m') => self.toggle_input_mode(),
            _ => {}
        }

        KeyOutcome::Continue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    /// A new session began, so the tick schedule starts over
    Started,
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_target() {
        logging::init_file_logging(&path)?;
    }

    let store = FileConfigStore::new();
    let saved = store.load();
    let settings = cli.settings(&saved);
    if cli.save_config {
        store.save(&cli.preferences_to_save(&saved))?;
    }
    tracing::info!(input_mode = %settings.input_mode, "starting dingding");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step()? {
            DingEvent::Tick => app.game.on_tick(),
            DingEvent::Resize => {}
            DingEvent::Mouse(mouse) => app.on_mouse(mouse),
            DingEvent::Key(key) => match app.on_key(key) {
                KeyOutcome::Quit => break,
                KeyOutcome::Started => runner.restart_ticks(),
                KeyOutcome::Continue => {}
            },
        }
    }

    Ok(())
}
