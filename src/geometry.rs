use rand::Rng;
use std::ops::AddAssign;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Vec2 { x, y }
    }
}

impl<T: AddAssign + Copy> Vec2<T> {
    /// Adds `other` in place and hands back `self` so calls can be chained.
    pub fn add(&mut self, other: Vec2<T>) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }
}

impl<T: AddAssign + Copy> AddAssign for Vec2<T> {
    fn add_assign(&mut self, other: Vec2<T>) {
        self.add(other);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in field coordinates (y grows downwards), scaled by `cell`.
    pub fn step(&self, cell: i32) -> Vec2<i32> {
        match self {
            Direction::Up => Vec2::new(0, -cell),
            Direction::Down => Vec2::new(0, cell),
            Direction::Left => Vec2::new(-cell, 0),
            Direction::Right => Vec2::new(cell, 0),
        }
    }
}

/// Exact positional equality. Everything that collides lives on grid
/// multiples, so no tolerance is needed.
pub fn is_collision(a: Vec2<i32>, b: Vec2<i32>) -> bool {
    a.x == b.x && a.y == b.y
}

/// The square playing field: `cells` x `cells` squares of `cell_size` units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub cells: i32,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(cells: i32, field: i32) -> Self {
        let cells = cells.max(1);
        Grid {
            cells,
            cell_size: (field / cells).max(1),
        }
    }

    /// Width and height of the field in logical units.
    pub fn extent(&self) -> i32 {
        self.cells * self.cell_size
    }

    pub fn center(&self) -> Vec2<i32> {
        let mid = (self.cells / 2) * self.cell_size;
        Vec2::new(mid, mid)
    }

    /// Toroidal wrap of a cell-sized rectangle whose top-left corner is `pos`.
    /// Any edge that leaves the field re-enters from the opposite side.
    pub fn wrap(&self, pos: Vec2<i32>) -> Vec2<i32> {
        let extent = self.extent();
        let mut wrapped = pos;
        if wrapped.x + self.cell_size > extent {
            wrapped.x = 0;
        }
        if wrapped.y + self.cell_size > extent {
            wrapped.y = 0;
        }
        if wrapped.y < 0 {
            wrapped.y = extent - self.cell_size;
        }
        if wrapped.x < 0 {
            wrapped.x = extent - self.cell_size;
        }
        wrapped
    }

    /// Uniformly random cell, x and y drawn independently, in field units.
    pub fn random_cell(&self, rng: &mut impl Rng) -> Vec2<i32> {
        Vec2::new(
            rng.gen_range(0..self.cells) * self.cell_size,
            rng.gen_range(0..self.cells) * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);

        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_in_place_add_chains() {
        let mut v = Vec2::new(1, 2);
        v.add(Vec2::new(3, 4)).add(Vec2::new(-1, -1));
        assert_eq!(v, Vec2::new(3, 5));

        let mut f = Vec2::new(0.5_f32, 0.5);
        f += Vec2::new(1.0, -1.0);
        assert_eq!(f, Vec2::new(1.5, -0.5));
    }

    #[test]
    fn test_steps_are_scaled() {
        assert_eq!(Direction::Up.step(80), Vec2::new(0, -80));
        assert_eq!(Direction::Down.step(80), Vec2::new(0, 80));
        assert_eq!(Direction::Left.step(80), Vec2::new(-80, 0));
        assert_eq!(Direction::Right.step(80), Vec2::new(80, 0));
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::new(10, 800);
        assert_eq!(grid.cell_size, 80);
        assert_eq!(grid.extent(), 800);
        assert_eq!(grid.center(), Vec2::new(400, 400));

        // Field is rounded down to a whole number of cells
        let grid = Grid::new(7, 800);
        assert_eq!(grid.cell_size, 114);
        assert_eq!(grid.extent(), 798);
    }

    #[test]
    fn test_wrap_inside_field_is_identity() {
        let grid = Grid::new(10, 800);
        for pos in [Vec2::new(0, 0), Vec2::new(720, 720), Vec2::new(400, 80)] {
            assert_eq!(grid.wrap(pos), pos);
        }
    }

    #[test]
    fn test_wrap_overflow() {
        let grid = Grid::new(10, 800);
        assert_eq!(grid.wrap(Vec2::new(800, 400)), Vec2::new(0, 400));
        assert_eq!(grid.wrap(Vec2::new(400, 800)), Vec2::new(400, 0));
    }

    #[test]
    fn test_wrap_underflow() {
        let grid = Grid::new(10, 800);
        assert_eq!(grid.wrap(Vec2::new(-80, 400)), Vec2::new(720, 400));
        assert_eq!(grid.wrap(Vec2::new(400, -80)), Vec2::new(400, 720));
        assert_eq!(grid.wrap(Vec2::new(-80, -80)), Vec2::new(720, 720));
    }

    #[test]
    fn test_random_cell_is_grid_aligned() {
        let grid = Grid::new(10, 800);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let cell = grid.random_cell(&mut rng);
            assert_eq!(cell.x % grid.cell_size, 0);
            assert_eq!(cell.y % grid.cell_size, 0);
            assert!((0..grid.extent()).contains(&cell.x));
            assert!((0..grid.extent()).contains(&cell.y));
        }
    }

    #[test]
    fn test_collision_is_exact() {
        assert!(is_collision(Vec2::new(80, 160), Vec2::new(80, 160)));
        assert!(!is_collision(Vec2::new(80, 160), Vec2::new(81, 160)));
        assert!(!is_collision(Vec2::new(80, 160), Vec2::new(160, 80)));
    }
}
