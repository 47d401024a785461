mod ball;
mod field;
mod robot;

// EXPORTS
pub use ball::BallState;
pub use field::FieldGeometry;
pub use robot::{RobotId, RobotState};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Referee command code. Carried through untouched, nothing in this crate
/// interprets it.
#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct RefereeState(pub char);

impl fmt::Display for RefereeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One snapshot of the match, rebuilt from the wire every cycle.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct GameFrame {
    pub counter: u64,
    pub timestamp: f32,
    pub referee_state: RefereeState,
    pub referee_time_left: f32,
    pub score_player: i32,
    pub score_opponent: i32,
    pub goalkeeper_id_player: i32,
    pub goalkeeper_id_opponent: i32,
    pub ball: BallState,
    /// in the order they were received, commands are answered in that same order
    pub team: Vec<RobotState>,
    pub ennemies: Vec<RobotState>,
}

impl GameFrame {
    pub fn own_robot_count(&self) -> usize {
        self.team.len()
    }

    pub fn opponent_robot_count(&self) -> usize {
        self.ennemies.len()
    }
}
