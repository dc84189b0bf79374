mod config;
mod controls;
mod food;
mod geometry;
mod particles;
mod render;
mod score;
mod session;
mod snake;
mod timestep;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crate::config::{Cli, Settings};
use crate::controls::{command_for, Command};
use crate::geometry::Direction;
use crate::render::{Hit, HitAreas};
use crate::score::{FileStore, HighScore, KeyValueStore, MemoryStore};
use crate::session::{Cue, Frame as Tick, Session, Summary};

fn main() -> Result<()> {
    let settings = Settings::from(Cli::parse());

    // Set up logging before anything else
    let level = if settings.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&settings.log_file)
        .with_context(|| format!("creating log file {}", settings.log_file.display()))?;
    WriteLogger::init(level, Config::default(), log_file).context("initializing logger")?;

    info!("Starting snake-rs with {:?}", settings);

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;
    terminal.hide_cursor()?;

    let mut app = App::new(settings);
    let result = app.run(&mut terminal);

    // Cleanup terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Exiting");
    result
}

struct App {
    session: Session,
    summary: Option<Summary>,
    hits: HitAreas,
    frame_interval: Duration,
    bell: bool,
}

impl App {
    fn new(settings: Settings) -> Self {
        let store: Box<dyn KeyValueStore> = match &settings.score_file {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let frame_interval = Duration::from_secs(1) / settings.frame_rate.max(1);
        let bell = settings.bell;

        App {
            session: Session::new(settings, HighScore::load(store), rng),
            summary: None,
            hits: HitAreas::default(),
            frame_interval,
            bell,
        }
    }

    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_frame = Instant::now();

        while self.session.is_running() {
            let timeout = self.frame_interval.saturating_sub(last_frame.elapsed());
            if event::poll(timeout)? {
                self.handle_event(event::read()?);
            }

            let elapsed = last_frame.elapsed();
            if elapsed < self.frame_interval {
                continue;
            }
            last_frame = Instant::now();

            match self.session.advance(elapsed) {
                Tick::Render => {
                    self.draw(terminal)?;
                    self.session.animate();
                }
                Tick::GameOver(summary) => {
                    self.summary = Some(summary);
                    self.draw(terminal)?;
                }
                Tick::Halted if self.summary.is_some() => self.draw(terminal)?,
                Tick::Halted => {}
            }

            let cues = self.session.drain_cues();
            self.play(terminal, &cues)?;
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let session = &self.session;
        let summary = self.summary.as_ref();
        let mut hits = HitAreas::default();
        terminal.draw(|frame| hits = render::draw(frame, session, summary))?;
        self.hits = hits;
        Ok(())
    }

    /// Audio cues become terminal bells when enabled.
    fn play(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>, cues: &[Cue]) -> Result<()> {
        if !self.bell {
            return Ok(());
        }
        for cue in cues {
            debug!("Playing {:?}", cue);
            execute!(terminal.backend_mut(), Print('\x07'))?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(command) = command_for(key) {
                    self.handle_command(command);
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                match self.hits.hit(mouse.column, mouse.row) {
                    Some(Hit::Steer(direction)) => self.handle_command(Command::Steer(direction)),
                    Some(Hit::Restart) => self.handle_command(Command::Restart),
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Steer(direction) => self.steer(direction),
            Command::Restart => {
                if self.session.is_game_over() {
                    self.restart();
                }
            }
            Command::Quit => self.session.stop(),
        }
    }

    fn steer(&mut self, direction: Direction) {
        if !self.session.press(direction) {
            debug!("Ignored reversal to {:?}", direction);
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.summary = None;
        self.hits = HitAreas::default();
    }
}
