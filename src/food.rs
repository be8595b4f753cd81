use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use crate::Coords;
use crate::snake::Snake;

/// Random draws allowed per board cell before falling back to a full scan.
const ATTEMPTS_PER_CELL: usize = 4;

/// Puts the next food item on a random free cell and records it on the
/// snake. Returns `None` when the snake covers the whole board.
pub fn place<R: Rng>(snake: &mut Snake, rng: &mut R) -> Option<Coords> {
    let bounds = snake.bounds();
    if bounds.area() == 0 {
        return None;
    }

    let max_attempts = bounds.area() * ATTEMPTS_PER_CELL;
    let mut food = None;

    for _ in 0..max_attempts {
        let pos = (rng.gen_range(0..bounds.max_x), rng.gen_range(0..bounds.max_y));
        if !snake.occupies(pos) {
            food = Some(pos);
            break;
        }
    }

    if food.is_none() {
        warn!("No free cell after {} random draws, scanning the board", max_attempts);
        food = free_cells(snake).choose(rng).copied();
    }

    let food = food?;
    snake.set_food(food);
    debug!("Placed food at {:?}, {} steps from the head", food, snake.stats().food_dist);

    Some(food)
}

fn free_cells(snake: &Snake) -> Vec<Coords> {
    let bounds = snake.bounds();
    let mut cells = Vec::with_capacity(bounds.area());

    for y in 0..bounds.max_y {
        for x in 0..bounds.max_x {
            if !snake.occupies((x, y)) {
                cells.push((x, y));
            }
        }
    }

    cells
}
