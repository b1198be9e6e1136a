pub mod board;
pub mod config;
pub mod player;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;

use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::runtime::{CrosstermEventSource, FixedTicker, HarfEvent, Runner};
use crate::session::GameSession;
use crate::timer::{MAX_MINUTES, MIN_MINUTES};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};

const TICK_RATE_MS: u64 = 1000;

/// shared terminal board for arabic letter games
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A shared terminal board for Arabic letter games: one to four players, each with their own letter wheel, score, and countdown timer."
)]
pub struct Cli {
    /// number of players seated at launch (1-4)
    #[clap(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=4))]
    players: Option<u8>,

    /// countdown minutes for the players seated at launch (1-5)
    #[clap(short = 'm', long, value_parser = clap::value_parser!(u8).range(1..=5))]
    minutes: Option<u8>,
}

/// Keyboard focus target. `Rename` routes keys into the name buffer instead
/// of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum InputMode {
    Normal,
    Rename,
}

#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    /// Slot receiving keyboard input, always within 1..=player_count.
    pub focus: usize,
    pub input_mode: InputMode,
    pub name_input: String,
    /// Per-slot one-frame flags for timers that ran out on the last
    /// observation.
    pub expired: Vec<bool>,
    /// Instant of the last `observe`; the next draw is rendered against it.
    pub observed_at: Instant,
    pub should_quit: bool,
    startup_minutes: u8,
}

impl App {
    pub fn new(players: usize, minutes: u8) -> Self {
        let minutes = minutes.clamp(MIN_MINUTES, MAX_MINUTES);
        let mut session = GameSession::new(players);
        for slot in 1..=session.player_count() {
            if let Some(player) = session.player_mut(slot) {
                player.set_timer_minutes(minutes);
            }
        }
        Self {
            expired: vec![false; session.player_count()],
            session,
            focus: 1,
            input_mode: InputMode::Normal,
            name_input: String::new(),
            observed_at: Instant::now(),
            should_quit: false,
            startup_minutes: minutes,
        }
    }

    pub fn startup_minutes(&self) -> u8 {
        self.startup_minutes
    }

    /// Runs the lazy expiry pass against `now` and remembers the instant so
    /// the next draw shows remainders as of this observation.
    pub fn observe(&mut self, now: Instant) {
        self.expired = self.session.refresh_timers(now);
        self.observed_at = now;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus % self.session.player_count() + 1;
    }

    pub fn focus_previous(&mut self) {
        let count = self.session.player_count();
        self.focus = (self.focus + count - 2) % count + 1;
    }

    fn set_player_count(&mut self, count: usize) {
        self.session.set_player_count(count);
        let count = self.session.player_count();
        self.focus = self.focus.min(count);
        self.expired.resize(count, false);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.input_mode {
            InputMode::Normal => self.handle_board_key(key, now),
            InputMode::Rename => self.handle_rename_key(key),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            KeyCode::Char(c @ '1'..='4') => {
                self.set_player_count(c as usize - '0' as usize);
            }
            KeyCode::Right => {
                if let Some(player) = self.session.player_mut(self.focus) {
                    player.select_next();
                }
            }
            KeyCode::Left => {
                if let Some(player) = self.session.player_mut(self.focus) {
                    player.select_previous();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(player) = self.session.player_mut(self.focus) {
                    player.cycle_selected();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.adjust_score(self.focus, 1);
            }
            KeyCode::Char('-') => {
                self.session.adjust_score(self.focus, -1);
            }
            KeyCode::Char('s') => {
                if let Some(player) = self.session.player_mut(self.focus) {
                    if player.timer.is_running() {
                        player.stop_timer(now);
                    } else {
                        player.start_timer(now);
                    }
                }
            }
            KeyCode::Char('[') => {
                if let Some(player) = self.session.player_mut(self.focus) {
                    let minutes = player.timer_minutes().saturating_sub(1);
                    player.set_timer_minutes(minutes);
                }
            }
            KeyCode::Char(']') => {
                if let Some(player) = self.session.player_mut(self.focus) {
                    let minutes = player.timer_minutes() + 1;
                    player.set_timer_minutes(minutes);
                }
            }
            KeyCode::Char('r') => {
                if let Some(player) = self.session.player(self.focus) {
                    self.name_input = player.name.clone();
                    self.input_mode = InputMode::Rename;
                }
            }
            KeyCode::Char('R') => {
                self.session.reset_all();
                self.expired = vec![false; self.session.player_count()];
            }
            _ => {}
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let name = self.name_input.trim().to_string();
                if !name.is_empty() {
                    self.session.rename(self.focus, name);
                }
                self.name_input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.name_input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                self.name_input.push(c);
            }
            _ => {}
        }
    }
}

/// Launch settings: explicit flags win, the saved config fills the gaps.
fn launch_settings(cli: &Cli, saved: &Config) -> (usize, u8) {
    (
        cli.players.map(usize::from).unwrap_or(saved.players),
        cli.minutes.unwrap_or(saved.timer_minutes),
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let (players, minutes) = launch_settings(&cli, &store.load());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(players, minutes);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    let _ = store.save(&Config {
        players: app.session.player_count(),
        timer_minutes: app.startup_minutes(),
    });

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    loop {
        // timers are refreshed before every draw, so an expiry is picked up
        // on the tick after its deadline even with no keyboard activity
        app.observe(Instant::now());
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            HarfEvent::Tick | HarfEvent::Resize => {}
            HarfEvent::Key(key) => app.handle_key(key, Instant::now()),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
