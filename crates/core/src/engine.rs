use std::collections::VecDeque;

use rand::Rng;

use crate::types::{Board, DEFAULT_BOARD, Direction, Food, FoodKind, GameStats, Phase, Position};

/// Starting tick period. A banana shaves off [`SPEEDUP_MS`], never below
/// [`MIN_PERIOD_MS`].
pub const INITIAL_PERIOD_MS: u64 = 200;
pub const MIN_PERIOD_MS: u64 = 100;
pub const SPEEDUP_MS: u64 = 15;

/// Food placement resamples at most this many times before giving up on
/// avoiding the snake (best effort, not an exhaustive search).
const MAX_SPAWN_ATTEMPTS: u32 = 50;

/// Side effects a tick asks the outer driver to perform. The engine itself
/// never touches I/O.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Effect {
    /// Play the chenda beat, or whatever stands in for it.
    FoodEaten(FoodKind),
    /// The session high score was beaten; worth persisting and submitting.
    NewHighScore(u32),
    GameOver { score: u32 },
}

/// The whole game in one value, advanced by [`GameState::tick`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    /// Head-first. Never empty while running.
    pub snake: VecDeque<Position>,
    pub direction: Direction,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub stats: GameStats,
    pub phase: Phase,
    pub period_ms: u64,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        GameState {
            board,
            snake: VecDeque::from([board.center()]),
            direction: Direction::Up,
            food: Food {
                position: Position { x: 15, y: 15 },
                kind: FoodKind::Papadam,
            },
            score: 0,
            high_score: 0,
            stats: GameStats::default(),
            phase: Phase::NotStarted,
            period_ms: INITIAL_PERIOD_MS,
        }
    }

    /// Starts a fresh run. Also serves as restart from game over; the high
    /// score carries over.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.snake = VecDeque::from([self.board.center()]);
        self.direction = Direction::Up;
        self.score = 0;
        self.stats = GameStats::default();
        self.period_ms = INITIAL_PERIOD_MS;
        self.food = spawn_food(rng, self.board, &self.snake);
        self.phase = Phase::Running;
    }

    /// Requested turns are accepted only across axes, so the snake can never
    /// reverse into its own neck.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running || direction.axis() == self.direction.axis() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// One fixed-period advance. Returns the effects the driver must run.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Vec<Effect> {
        if self.phase != Phase::Running {
            return vec![];
        }
        let Some(&head) = self.snake.front() else {
            return vec![];
        };
        let next = head + self.direction.offset();

        if !self.board.contains(next) || self.snake.iter().any(|&segment| segment == next) {
            self.phase = Phase::GameOver;
            return vec![Effect::GameOver { score: self.score }];
        }

        self.snake.push_front(next);

        if next != self.food.position {
            self.snake.pop_back();
            return vec![];
        }

        let kind = self.food.kind;
        let mut effects = vec![Effect::FoodEaten(kind)];

        self.stats.record(kind);
        self.score += kind.points();
        if self.score > self.high_score {
            self.high_score = self.score;
            effects.push(Effect::NewHighScore(self.score));
        }
        if kind == FoodKind::Banana {
            self.period_ms = self.period_ms.saturating_sub(SPEEDUP_MS).max(MIN_PERIOD_MS);
        }
        self.food = spawn_food(rng, self.board, &self.snake);

        effects
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD)
    }
}

/// Picks a random cell off the snake (up to [`MAX_SPAWN_ATTEMPTS`] tries),
/// then a variant by probability.
pub fn spawn_food<R: Rng>(rng: &mut R, board: Board, snake: &VecDeque<Position>) -> Food {
    let mut position = random_cell(rng, board);
    let mut attempts = 1;
    while attempts < MAX_SPAWN_ATTEMPTS && snake.iter().any(|&segment| segment == position) {
        position = random_cell(rng, board);
        attempts += 1;
    }

    Food {
        position,
        kind: FoodKind::draw(rng.random::<f64>()),
    }
}

fn random_cell<R: Rng>(rng: &mut R, board: Board) -> Position {
    Position {
        x: rng.random_range(0..board.width),
        y: rng.random_range(0..board.height),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn running_game() -> GameState {
        let mut game = GameState::default();
        game.start(&mut rng());
        // Park the food well away from the starting head.
        game.food.position = Position { x: 0, y: 0 };
        game
    }

    #[test]
    fn steer_moves_head_one_cell_along_each_cross_axis_direction() {
        for (direction, dx, dy) in [
            (Direction::Left, -1, 0),
            (Direction::Right, 1, 0),
            (Direction::Up, 0, -1),
            (Direction::Down, 0, 1),
        ] {
            let mut game = running_game();
            if direction.axis() == game.direction.axis() {
                game.direction = Direction::Right;
            }
            let head = *game.snake.front().unwrap();
            assert!(game.steer(direction));
            game.tick(&mut rng());
            let new_head = *game.snake.front().unwrap();
            assert_eq!((new_head.x - head.x, new_head.y - head.y), (dx, dy));
        }
    }

    #[test]
    fn steer_rejects_same_axis() {
        let mut game = running_game();
        // Moving up: down is a 180° reversal, up is a no-op.
        assert!(!game.steer(Direction::Down));
        assert!(!game.steer(Direction::Up));
        assert_eq!(game.direction, Direction::Up);
    }

    #[test]
    fn wall_hit_ends_the_game_and_leaves_the_snake_unchanged() {
        let mut game = running_game();
        game.snake = VecDeque::from([Position { x: 5, y: 0 }]);
        let before = game.snake.clone();

        let effects = game.tick(&mut rng());

        assert_eq!(game.phase, Phase::GameOver);
        assert_eq!(game.snake, before);
        assert_eq!(effects, vec![Effect::GameOver { score: 0 }]);
    }

    #[test]
    fn self_collision_ends_the_game() {
        let mut game = running_game();
        // A C-shaped body whose next cell up is occupied.
        game.snake = VecDeque::from([
            Position { x: 5, y: 5 },
            Position { x: 6, y: 5 },
            Position { x: 6, y: 4 },
            Position { x: 5, y: 4 },
        ]);
        let before = game.snake.clone();

        game.tick(&mut rng());

        assert_eq!(game.phase, Phase::GameOver);
        assert_eq!(game.snake, before);
    }

    #[test]
    fn eating_scores_grows_and_counts_in_that_tick_only() {
        let mut game = running_game();
        let head = *game.snake.front().unwrap();
        game.food = Food {
            position: head + Direction::Up.offset(),
            kind: FoodKind::Payasam,
        };

        let effects = game.tick(&mut rng());

        assert_eq!(game.score, 5);
        assert_eq!(game.stats.payasams_eaten, 1);
        assert_eq!(game.stats.total_eaten, 1);
        assert_eq!(game.snake.len(), 2);
        assert!(effects.contains(&Effect::FoodEaten(FoodKind::Payasam)));
        assert!(effects.contains(&Effect::NewHighScore(5)));

        // No food on the next tick: length stays put.
        game.food.position = Position { x: 0, y: 0 };
        game.tick(&mut rng());
        assert_eq!(game.snake.len(), 2);
    }

    #[test]
    fn banana_speeds_up_with_a_floor() {
        let mut game = running_game();
        for expected in [185, 170, 155, 140, 125, 110, 100, 100] {
            let head = *game.snake.front().unwrap();
            game.food = Food {
                position: head + game.direction.offset(),
                kind: FoodKind::Banana,
            };
            game.tick(&mut rng());
            assert_eq!(game.period_ms, expected);
        }
    }

    #[test]
    fn high_score_survives_restart() {
        let mut game = running_game();
        game.score = 40;
        game.high_score = 40;
        game.phase = Phase::GameOver;

        game.start(&mut rng());

        assert_eq!(game.phase, Phase::Running);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 40);
        assert_eq!(game.period_ms, INITIAL_PERIOD_MS);
        assert_eq!(game.stats, GameStats::default());
        assert_eq!(game.snake.len(), 1);
    }

    #[test]
    fn no_ticks_before_start_or_after_game_over() {
        let mut game = GameState::default();
        assert!(game.tick(&mut rng()).is_empty());
        assert_eq!(game.phase, Phase::NotStarted);

        game.start(&mut rng());
        game.phase = Phase::GameOver;
        assert!(game.tick(&mut rng()).is_empty());
    }

    #[test]
    fn spawned_food_avoids_the_snake() {
        let mut rng = rng();
        let board = Board {
            width: 2,
            height: 2,
        };
        // Leave a single free cell.
        let snake: VecDeque<Position> = (0..2)
            .flat_map(|x| (0..2).map(move |y| Position { x, y }))
            .filter(|p| *p != (Position { x: 1, y: 1 }))
            .collect();

        for _ in 0..20 {
            let food = spawn_food(&mut rng, board, &snake);
            assert_eq!(food.position, Position { x: 1, y: 1 });
        }
    }
}
