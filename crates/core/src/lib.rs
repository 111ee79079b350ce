pub mod api;
pub mod engine;
pub mod leaderboard;
pub mod types;

pub use engine::{Effect, GameState};
pub use types::Direction;
