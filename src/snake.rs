use std::collections::{HashSet, TryReserveError};

use crate::Coords;
use crate::chain::{Segment, SegmentChain};
use crate::config::{Bounds, ColorMode, SnakeConfig, INITIAL_SNAKE_LENGTH};
use crate::direction::Direction::{self, *};

/// Distance bookkeeping across the food items of one round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Steps taken since the current food was placed
    pub dist: u32,
    /// Manhattan distance from the head to the current food when it was placed
    pub food_dist: u32,
    pub total_dist: u32,
    pub min_dist: u32,
    /// Food items reached along a shortest path
    pub bonus: u32,
}

pub struct Snake {
    body: SegmentChain,
    length: usize,
    direction: Direction,
    ate: bool,
    food: Coords,
    stats: Stats,
    color: ColorMode,
    bounds: Bounds,
}

impl Snake {
    /// Lays the body out horizontally from the center of the board, head
    /// first, heading west.
    pub fn new(config: SnakeConfig) -> Result<Self, TryReserveError> {
        let start = (config.bounds.max_x / 2, config.bounds.max_y / 2);
        let mut body = SegmentChain::new(Segment::new(start, West))?;

        for i in 1..INITIAL_SNAKE_LENGTH as i32 {
            body.append(Segment::new((start.0 + i, start.1), West))?;
        }

        Ok(Snake {
            length: body.len(),
            body,
            direction: West,
            ate: false,
            food: start,
            stats: Stats::default(),
            color: config.color,
            bounds: config.bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    pub fn head(&self) -> Coords {
        self.body.head().pos()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn ate(&self) -> bool {
        self.ate
    }

    pub fn clear_ate(&mut self) {
        self.ate = false;
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(pos)
    }

    /// Moves every segment one cell along its own heading and flags the
    /// snake as fed if the head lands on the food.
    pub fn advance(&mut self) {
        self.body.for_each_mut(|seg| {
            let (dx, dy) = seg.direction.offset();
            seg.x += dx;
            seg.y += dy;
        });

        if self.head() == self.food {
            self.ate = true;
        }

        self.stats.dist += 1;
    }

    /// Hands the commanded heading to the head and shifts every segment's
    /// previous heading one link down the chain.
    pub fn propagate_turn(&mut self) {
        let mut incoming = self.direction;

        self.body.for_each_mut(|seg| {
            seg.prev_direction = seg.direction;
            seg.direction = incoming;
            incoming = seg.prev_direction;
        });
    }

    /// Adds one segment behind the tail and books the distance travelled for
    /// the food just eaten.
    pub fn grow(&mut self) -> Result<(), TryReserveError> {
        let tail = self.body.tail();
        let (dx, dy) = tail.direction.offset();
        let pos = (tail.x - dx, tail.y - dy);
        let direction = tail.prev_direction;

        self.body.append(Segment::new(pos, direction))?;
        self.length += 1;
        debug_assert_eq!(self.length, self.body.len());

        self.stats.total_dist += self.stats.dist;
        self.stats.min_dist += self.stats.food_dist;
        if self.stats.dist == self.stats.food_dist {
            self.stats.bonus += 1;
        }

        Ok(())
    }

    /// True if any segment is off the board or shares a cell with another.
    pub fn check_collision(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.length);

        for seg in self.body.iter() {
            if !self.bounds.contains(seg.pos()) || !seen.insert(seg.pos()) {
                return true;
            }
        }

        false
    }

    /// Ignores a request to turn straight back into the body.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.direction = requested;
        }
    }

    /// Records a freshly placed food item and restarts the step counter.
    pub fn set_food(&mut self, food: Coords) {
        let head = self.head();
        self.food = food;
        self.stats.food_dist = ((head.0 - food.0).abs() + (head.1 - food.1).abs()) as u32;
        self.stats.dist = 0;
    }

    #[cfg(test)]
    pub(crate) fn body_mut(&mut self) -> &mut SegmentChain {
        &mut self.body
    }
}
