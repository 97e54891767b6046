use log::debug;
use rand::Rng;

use super::{
    error::GameError,
    grid::{Coordinate, Grid},
    state::Snake,
};

/// Pick a vacant cell uniformly at random
pub fn place<R: Rng + ?Sized>(
    grid: &Grid,
    snake: &Snake,
    rng: &mut R,
) -> Result<Coordinate, GameError> {
    let empty = grid.empty_cells(snake);
    if empty.is_empty() {
        return Err(GameError::AllCellsOccupied);
    }
    let food = empty[rng.gen_range(0..empty.len())];
    debug!("placed food at {:?} ({} free cells)", food, empty.len());
    Ok(food)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::mock::StepRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_never_lands_on_snake() {
        let grid = Grid::new(4, 4).unwrap();
        let snake =
            Snake::from_segments(grid, [c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let food = place(&grid, &snake, &mut rng).unwrap();
            assert!(grid.in_bounds(food));
            assert!(!snake.is_occupied(food));
        }
    }

    #[test]
    fn test_reaches_every_free_cell() {
        let grid = Grid::new(3, 3).unwrap();
        let snake = Snake::new(grid, c(1, 1)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let seen: HashSet<_> = (0..500)
            .map(|_| place(&grid, &snake, &mut rng).unwrap())
            .collect();
        assert_eq!(seen.len(), 8);
        assert!(!seen.contains(&c(1, 1)));
    }

    #[test]
    fn test_stub_rng_picks_first_free_cell() {
        let grid = Grid::new(2, 2).unwrap();
        let snake = Snake::new(grid, c(0, 0)).unwrap();
        let mut rng = StepRng::new(0, 0);

        assert_eq!(place(&grid, &snake, &mut rng), Ok(c(0, 1)));
    }

    #[test]
    fn test_full_grid_has_no_room() {
        let grid = Grid::new(2, 2).unwrap();
        let snake = Snake::from_segments(grid, [c(0, 0), c(0, 1), c(1, 1), c(1, 0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(snake.len(), grid.cell_count());
        assert_eq!(
            place(&grid, &snake, &mut rng),
            Err(GameError::AllCellsOccupied)
        );
    }

    #[test]
    fn test_single_free_cell_is_chosen() {
        let grid = Grid::new(2, 2).unwrap();
        let snake = Snake::from_segments(grid, [c(0, 0), c(0, 1), c(1, 1)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(place(&grid, &snake, &mut rng), Ok(c(1, 0)));
    }
}
