use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Board dimensions in grid cells. The original board was a square canvas
/// divided into 20px cells; here the cell count is explicit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

pub const DEFAULT_BOARD: Board = Board {
    width: 20,
    height: 20,
};

impl Board {
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    pub fn center(&self) -> Position {
        Position {
            x: self.width / 2,
            y: self.height / 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position { x, y }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, offset: Offset) -> Self::Output {
        Position {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn offset(&self) -> Offset {
        let (x, y) = match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        };
        Offset { x, y }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }
}

/// The three Onam feast foods, each with a fixed point value and spawn
/// probability.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum FoodKind {
    Papadam,
    Payasam,
    Banana,
}

impl FoodKind {
    pub const fn points(self) -> u32 {
        match self {
            FoodKind::Papadam => 1,
            FoodKind::Payasam => 5,
            FoodKind::Banana => 3,
        }
    }

    pub const fn probability(self) -> f64 {
        match self {
            FoodKind::Papadam => 0.6,
            FoodKind::Payasam => 0.25,
            FoodKind::Banana => 0.15,
        }
    }

    /// Draws a variant from one uniform sample, partitioned against the
    /// cumulative probability thresholds: banana first, then payasam,
    /// else papadam.
    pub fn draw(sample: f64) -> FoodKind {
        if sample < FoodKind::Banana.probability() {
            FoodKind::Banana
        } else if sample < FoodKind::Banana.probability() + FoodKind::Payasam.probability() {
            FoodKind::Payasam
        } else {
            FoodKind::Papadam
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

/// Per-run counters, reset on every start.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub papadams_eaten: u32,
    pub payasams_eaten: u32,
    pub bananas_eaten: u32,
    pub total_eaten: u32,
}

impl GameStats {
    pub fn record(&mut self, kind: FoodKind) {
        match kind {
            FoodKind::Papadam => self.papadams_eaten += 1,
            FoodKind::Payasam => self.payasams_eaten += 1,
            FoodKind::Banana => self.bananas_eaten += 1,
        }
        self.total_eaten += 1;
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_partitions_the_unit_interval() {
        assert_eq!(FoodKind::draw(0.0), FoodKind::Banana);
        assert_eq!(FoodKind::draw(0.149), FoodKind::Banana);
        assert_eq!(FoodKind::draw(0.15), FoodKind::Payasam);
        assert_eq!(FoodKind::draw(0.399), FoodKind::Payasam);
        assert_eq!(FoodKind::draw(0.4), FoodKind::Papadam);
        assert_eq!(FoodKind::draw(0.999), FoodKind::Papadam);
    }

    #[test]
    fn stats_record_by_kind() {
        let mut stats = GameStats::default();
        stats.record(FoodKind::Banana);
        stats.record(FoodKind::Banana);
        stats.record(FoodKind::Papadam);
        assert_eq!(stats.bananas_eaten, 2);
        assert_eq!(stats.papadams_eaten, 1);
        assert_eq!(stats.payasams_eaten, 0);
        assert_eq!(stats.total_eaten, 3);
    }
}
