use crate::geometry::{Grid, Vec2};
use rand::Rng;

/// The single pickup on the field. It is moved, never recreated, when eaten.
///
/// Spawning does not avoid the snake, so food may land under the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pos: Vec2<i32>,
    size: i32,
}

impl Food {
    pub fn new(grid: &Grid, rng: &mut impl Rng) -> Self {
        let mut food = Food {
            pos: Vec2::default(),
            size: grid.cell_size,
        };
        food.spawn(grid, rng);
        food
    }

    pub fn spawn(&mut self, grid: &Grid, rng: &mut impl Rng) {
        self.pos = grid.random_cell(rng);
    }

    pub fn pos(&self) -> Vec2<i32> {
        self.pos
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    #[cfg(test)]
    pub fn place(&mut self, pos: Vec2<i32>) {
        self.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_food_is_cell_sized_and_aligned() {
        let grid = Grid::new(10, 800);
        let mut rng = StdRng::seed_from_u64(1);
        let food = Food::new(&grid, &mut rng);
        assert_eq!(food.size(), 80);
        assert_eq!(food.pos().x % 80, 0);
        assert_eq!(food.pos().y % 80, 0);
    }

    #[test]
    fn test_spawn_covers_the_grid() {
        let grid = Grid::new(4, 400);
        let mut rng = StdRng::seed_from_u64(99);
        let mut food = Food::new(&grid, &mut rng);
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            food.spawn(&grid, &mut rng);
            seen.insert((food.pos().x, food.pos().y));
        }
        assert_eq!(seen.len(), 16);
    }
}
