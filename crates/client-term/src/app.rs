use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};
use onam_core::{
    engine::{Effect, GameState},
    leaderboard::Entry,
    types::Direction,
};
use rand::rngs::ThreadRng;
use ratatui::DefaultTerminal;

use crate::{api::LeaderboardClient, local::LocalSlots, ui};

const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
    Leaderboard,
}

#[derive(Default)]
pub struct LeaderboardView {
    pub entries: Vec<Entry>,
    pub from_server: bool,
}

/// The outer driver: owns the pure engine, runs the tick timer, executes the
/// effects the engine hands back, and talks to the leaderboard service.
pub struct App {
    pub game: GameState,
    pub screen: Screen,
    pub name: String,
    pub show_name_input: bool,
    /// Some(true) when the last submission reached the server's KV,
    /// Some(false) when it landed in a local mirror instead.
    pub submitted: Option<bool>,
    pub board_view: LeaderboardView,
    pub slots: LocalSlots,
    slots_path: PathBuf,
    client: LeaderboardClient,
    rng: ThreadRng,
    should_exit: bool,
}

impl App {
    pub fn new(base: String) -> App {
        Self::with_slots_path(base, LocalSlots::default_path())
    }

    pub(crate) fn with_slots_path(base: String, slots_path: PathBuf) -> App {
        let slots = LocalSlots::load(&slots_path);
        let mut game = GameState::default();
        game.high_score = slots.high_score;

        App {
            game,
            screen: Screen::Menu,
            name: slots.name.clone(),
            show_name_input: false,
            submitted: None,
            board_view: LeaderboardView::default(),
            slots,
            slots_path,
            client: LeaderboardClient::new(base),
            rng: rand::rng(),
            should_exit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.do_run(&mut terminal);
        ratatui::restore();
        result
    }

    fn do_run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut last_tick = Instant::now();
        while !self.should_exit {
            terminal.draw(|f| ui::render(f, self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key.code);
                    }
                }
            }

            if self.screen == Screen::Playing
                && last_tick.elapsed() >= Duration::from_millis(self.game.period_ms)
            {
                let effects = self.game.tick(&mut self.rng);
                self.apply(effects);
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match self.screen {
            Screen::Menu => match code {
                KeyCode::Esc => self.should_exit = true,
                KeyCode::Enter => self.start_game(),
                KeyCode::Tab => self.open_leaderboard(),
                KeyCode::Backspace => {
                    self.name.pop();
                }
                KeyCode::Char(c) => self.type_name(c),
                _ => {}
            },
            Screen::Playing => match code {
                KeyCode::Up => {
                    self.game.steer(Direction::Up);
                }
                KeyCode::Down => {
                    self.game.steer(Direction::Down);
                }
                KeyCode::Left => {
                    self.game.steer(Direction::Left);
                }
                KeyCode::Right => {
                    self.game.steer(Direction::Right);
                }
                KeyCode::Esc | KeyCode::Char('q') => self.back_to_menu(),
                _ => {}
            },
            Screen::GameOver => {
                if self.show_name_input {
                    // Same flow as the original's post-game name prompt.
                    match code {
                        KeyCode::Enter => self.save_name_and_submit(),
                        KeyCode::Esc => self.show_name_input = false,
                        KeyCode::Backspace => {
                            self.name.pop();
                        }
                        KeyCode::Char(c) => self.type_name(c),
                        _ => {}
                    }
                } else {
                    match code {
                        KeyCode::Enter => self.start_game(),
                        KeyCode::Tab => self.open_leaderboard(),
                        KeyCode::Esc | KeyCode::Char('q') => self.back_to_menu(),
                        _ => {}
                    }
                }
            }
            Screen::Leaderboard => match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    self.screen = Screen::Menu;
                }
                _ => {}
            },
        }
    }

    fn type_name(&mut self, c: char) {
        if self.name.chars().count() < MAX_NAME_LEN {
            self.name.push(c);
        }
    }

    fn start_game(&mut self) {
        if !self.name.trim().is_empty() {
            self.slots.name = self.name.trim().to_owned();
            self.slots.save(&self.slots_path);
        }
        self.submitted = None;
        self.show_name_input = false;
        self.game.start(&mut self.rng);
        self.screen = Screen::Playing;
    }

    fn back_to_menu(&mut self) {
        self.game = GameState::default();
        self.game.high_score = self.slots.high_score;
        self.show_name_input = false;
        self.screen = Screen::Menu;
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FoodEaten(kind) => {
                    ui::bell();
                    info!("Ate a {kind:?}, score {}", self.game.score);
                }
                Effect::NewHighScore(score) => {
                    // Written through right away so leaving the run early
                    // (Esc back to the menu) keeps the record.
                    self.slots.high_score = score;
                    self.slots.save(&self.slots_path);
                }
                Effect::GameOver { score } => {
                    info!("Game over at {score}");
                    self.slots.save(&self.slots_path);
                    self.screen = Screen::GameOver;
                    if score > 0 && !self.name.trim().is_empty() {
                        self.submit_score(score);
                    } else if score > 0 {
                        self.show_name_input = true;
                    }
                }
            }
        }
    }

    fn save_name_and_submit(&mut self) {
        if self.name.trim().is_empty() {
            return;
        }
        self.slots.name = self.name.trim().to_owned();
        self.slots.save(&self.slots_path);
        self.show_name_input = false;
        if self.game.score > 0 {
            self.submit_score(self.game.score);
        }
    }

    fn submit_score(&mut self, score: u32) {
        let name = self.name.trim().to_owned();
        match self.client.submit(&name, score) {
            Ok(response) if response.kv_available => {
                self.submitted = Some(true);
            }
            Ok(_) => {
                // Server answered but its KV is down: mirror locally, the
                // same move the original made with localStorage.
                self.slots.merge_score(&name, score);
                self.slots.save(&self.slots_path);
                self.submitted = Some(false);
            }
            Err(e) => {
                warn!("Could not reach the leaderboard service: {e:#}");
                self.slots.merge_score(&name, score);
                self.slots.save(&self.slots_path);
                self.submitted = Some(false);
            }
        }
    }

    fn open_leaderboard(&mut self) {
        self.board_view = match self.client.fetch() {
            Ok(entries) if !entries.is_empty() => LeaderboardView {
                entries,
                from_server: true,
            },
            Ok(_) => LeaderboardView {
                entries: self.slots.leaderboard.clone(),
                from_server: false,
            },
            Err(e) => {
                warn!("Could not fetch the leaderboard: {e:#}");
                LeaderboardView {
                    entries: self.slots.leaderboard.clone(),
                    from_server: false,
                }
            }
        };
        self.screen = Screen::Leaderboard;
    }
}
