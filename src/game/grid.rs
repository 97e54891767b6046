use super::{action::Direction, error::GameError, state::Snake};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move coordinate by delta
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// The neighbouring cell in a direction, which may lie off the grid
    pub fn step(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.offset(d_row, d_col)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Fixed-size rectangular board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 || rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(GameError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if a coordinate is within the grid bounds
    pub fn in_bounds(&self, c: Coordinate) -> bool {
        c.row >= 0 && (c.row as usize) < self.rows && c.col >= 0 && (c.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds coordinate
    pub fn index_of(&self, c: Coordinate) -> Option<usize> {
        self.in_bounds(c)
            .then(|| c.row as usize * self.cols + c.col as usize)
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows as i32)
            .flat_map(move |row| (0..self.cols as i32).map(move |col| Coordinate::new(row, col)))
    }

    /// Cells not covered by the snake, in row-major order
    pub fn empty_cells(&self, snake: &Snake) -> Vec<Coordinate> {
        self.cells().filter(|c| !snake.is_occupied(*c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_step() {
        let c = Coordinate::new(5, 5);
        assert_eq!(c.step(Direction::Up), Coordinate::new(4, 5));
        assert_eq!(c.step(Direction::Down), Coordinate::new(6, 5));
        assert_eq!(c.step(Direction::Left), Coordinate::new(5, 4));
        assert_eq!(c.step(Direction::Right), Coordinate::new(5, 6));
        assert_eq!(Coordinate::new(0, 0).step(Direction::Up), Coordinate::new(-1, 0));
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert_eq!(
            Grid::new(0, 10),
            Err(GameError::InvalidGrid { rows: 0, cols: 10 })
        );
        assert!(Grid::new(10, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 15).unwrap();

        assert!(grid.in_bounds(Coordinate::new(0, 0)));
        assert!(grid.in_bounds(Coordinate::new(19, 14)));
        assert!(!grid.in_bounds(Coordinate::new(-1, 0)));
        assert!(!grid.in_bounds(Coordinate::new(0, -1)));
        assert!(!grid.in_bounds(Coordinate::new(20, 0)));
        assert!(!grid.in_bounds(Coordinate::new(0, 15)));
    }

    #[test]
    fn test_in_bounds_count_matches_area() {
        for (rows, cols) in [(1, 1), (3, 7), (10, 10), (6, 2)] {
            let grid = Grid::new(rows, cols).unwrap();
            let inside = (-2..rows as i32 + 2)
                .flat_map(|r| (-2..cols as i32 + 2).map(move |c| Coordinate::new(r, c)))
                .filter(|c| grid.in_bounds(*c))
                .count();
            assert_eq!(inside, rows * cols);
        }
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::new(2, 3).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(0, 2),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1),
                Coordinate::new(1, 2),
            ]
        );
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(grid.index_of(*c), Some(i));
        }
        assert_eq!(grid.index_of(Coordinate::new(2, 0)), None);
    }

    #[test]
    fn test_empty_cells_skip_snake() {
        let grid = Grid::new(2, 2).unwrap();
        let mut snake = Snake::new(grid, Coordinate::new(0, 1)).unwrap();
        snake.add_head(Coordinate::new(1, 1)).unwrap();

        assert_eq!(
            grid.empty_cells(&snake),
            vec![Coordinate::new(0, 0), Coordinate::new(1, 0)]
        );
    }
}
