use crate::config::Settings;
use crate::controls::Controls;
use crate::food::Food;
use crate::geometry::{is_collision, Direction, Grid};
use crate::particles::ParticleSystem;
use crate::score::HighScore;
use crate::snake::Snake;
use crate::timestep::FixedStep;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

/// Alpha lost by the background flash on every rendered frame.
pub const FLASH_FADE: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub color: [u8; 3],
    pub alpha: f32,
}

/// One-shot sounds requested by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Eat,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u32,
    pub max_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Steps drained, draw the board.
    Render,
    /// The snake just died. Carries the final tally; reported once.
    GameOver(Summary),
    /// Nothing more to simulate: the game is over or the loop was stopped.
    Halted,
}

/// Everything one game needs, in one place: entities, score, timing and the
/// game-over latch.
pub struct Session {
    settings: Settings,
    grid: Grid,
    snake: Snake,
    food: Food,
    particles: ParticleSystem,
    controls: Controls,
    clock: FixedStep,
    high_score: HighScore,
    rng: StdRng,
    score: u32,
    game_over: bool,
    finished: bool,
    running: bool,
    flash: Option<Flash>,
    cues: Vec<Cue>,
}

impl Session {
    pub fn new(settings: Settings, high_score: HighScore, mut rng: StdRng) -> Self {
        let grid = Grid::new(settings.cells, settings.field);
        let snake = Snake::new(&grid, settings.move_delay);
        let food = Food::new(&grid, &mut rng);
        let clock = FixedStep::new(settings.steps_per_second);
        info!(
            "New session: {0}x{0} grid, cell {1}, step {2:?}, max score {3}",
            grid.cells,
            grid.cell_size,
            clock.step(),
            high_score.best()
        );

        Session {
            settings,
            grid,
            snake,
            food,
            particles: ParticleSystem::new(),
            controls: Controls::new(),
            clock,
            high_score,
            rng,
            score: 0,
            game_over: false,
            finished: false,
            running: true,
            flash: None,
            cues: Vec::new(),
        }
    }

    /// Starts a fresh game in place, keeping settings, the score store and
    /// rng. Clears the game-over latch.
    pub fn restart(&mut self) {
        info!("Restarting after score {}", self.score);
        self.snake = Snake::new(&self.grid, self.settings.move_delay);
        self.food.spawn(&self.grid, &mut self.rng);
        self.particles = ParticleSystem::new();
        self.controls.reset();
        self.clock = FixedStep::new(self.settings.steps_per_second);
        self.score = 0;
        self.game_over = false;
        self.finished = false;
        self.running = true;
        self.flash = None;
        self.cues.clear();
    }

    pub fn press(&mut self, direction: Direction) -> bool {
        self.controls.press(direction, self.snake.travel())
    }

    /// Feeds real elapsed time in and runs every whole step it covers.
    pub fn advance(&mut self, elapsed: Duration) -> Frame {
        if !self.running || self.game_over {
            return Frame::Halted;
        }

        self.clock.accumulate(elapsed);
        while self.clock.take() {
            self.step();
            if self.game_over {
                return Frame::GameOver(self.finish());
            }
        }
        Frame::Render
    }

    /// Per-frame visual aging, run after each render.
    pub fn animate(&mut self) {
        if let Some(flash) = &mut self.flash {
            flash.alpha -= FLASH_FADE;
            if flash.alpha <= 0.0 {
                self.flash = None;
            }
        }
        if !self.particles.is_empty() {
            self.particles.update();
            self.particles.collect_garbage();
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("Stopping session");
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn flash(&self) -> Option<Flash> {
        self.flash
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.high_score.best()
    }

    /// One simulation step.
    fn step(&mut self) {
        self.snake.wrap(&self.grid);
        if let Some(direction) = self.controls.intent() {
            self.snake.steer(direction);
        }
        if !self.snake.tick_delay() {
            return;
        }

        if is_collision(self.snake.head(), self.food.pos()) {
            self.eat();
        }
        self.snake.advance();

        if self.snake.bites_itself() {
            self.game_over = true;
            self.cue(Cue::GameOver);
        }
    }

    fn eat(&mut self) {
        self.score += 1;
        debug!("Ate food at {:?}, score {}", self.food.pos(), self.score);

        self.particles.burst(
            self.food.pos(),
            self.food.size(),
            self.settings.burst,
            &mut self.rng,
        );
        debug!("{} particles live", self.particles.len());
        self.food.spawn(&self.grid, &mut self.rng);
        self.snake.grow();
        self.cue(Cue::Eat);

        let palette = &self.settings.flash_palette;
        if !palette.is_empty() {
            let color = palette[self.rng.gen_range(0..palette.len())];
            self.flash = Some(Flash { color, alpha: 1.0 });
        }
    }

    /// Terminal sequence: fold the score into the persisted max.
    fn finish(&mut self) -> Summary {
        debug_assert!(!self.finished, "terminal sequence ran twice");
        self.finished = true;
        let max_score = self.high_score.submit(self.score);
        info!(
            "Game over: score {}, length {}, max score {}",
            self.score,
            self.snake.total(),
            max_score
        );
        Summary {
            score: self.score,
            max_score,
        }
    }

    /// A cue replaces a pending one of the same kind, so a sound restarts
    /// rather than queueing.
    fn cue(&mut self, cue: Cue) {
        self.cues.retain(|c| *c != cue);
        self.cues.push(cue);
    }
}
