use crate::geometry::{is_collision, Direction, Grid, Vec2};
use std::collections::VecDeque;

/// Self-collision is only checked once the snake is longer than this.
const SELF_COLLISION_MIN_TOTAL: usize = 3;

#[derive(Debug, Clone)]
pub struct Snake {
    head: Vec2<i32>,
    heading: Direction,
    travel: Direction,
    cell: i32,
    /// Pre-move head positions, oldest first. Always `total - 1` long.
    history: VecDeque<Vec2<i32>>,
    total: usize,
    delay: u32,
    move_delay: u32,
}

impl Snake {
    pub fn new(grid: &Grid, move_delay: u32) -> Self {
        Snake {
            head: grid.center(),
            heading: Direction::Right,
            travel: Direction::Right,
            cell: grid.cell_size,
            history: VecDeque::new(),
            total: 1,
            delay: move_delay,
            move_delay,
        }
    }

    pub fn head(&self) -> Vec2<i32> {
        self.head
    }

    /// Direction the head is facing now.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Direction of the most recent grid advance.
    pub fn travel(&self) -> Direction {
        self.travel
    }

    pub fn direction(&self) -> Vec2<i32> {
        self.heading.step(self.cell)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn history(&self) -> &VecDeque<Vec2<i32>> {
        &self.history
    }

    pub fn wrap(&mut self, grid: &Grid) {
        self.head = grid.wrap(self.head);
    }

    /// Turns the head. Reversal filtering is the caller's job.
    pub fn steer(&mut self, direction: Direction) {
        self.heading = direction;
    }

    /// Counts one simulation step off the movement delay. Returns true on the
    /// step where the snake should advance, and rearms the delay.
    pub fn tick_delay(&mut self) -> bool {
        if self.delay == 0 {
            self.delay = self.move_delay;
            true
        } else {
            self.delay -= 1;
            false
        }
    }

    pub fn grow(&mut self) {
        self.total += 1;
    }

    /// Records the current head in the history and moves one cell.
    pub fn advance(&mut self) {
        self.history.push_back(self.head);
        while self.history.len() > self.total - 1 {
            self.history.pop_front();
        }
        self.head.add(self.direction());
        self.travel = self.heading;
    }

    pub fn bites_itself(&self) -> bool {
        self.total > SELF_COLLISION_MIN_TOTAL
            && self.history.iter().any(|&p| is_collision(self.head, p))
    }
}
