use serde::{Deserialize, Serialize};

/// Velocities are in the robot's frame: tangential is forward, normal is sideways.
#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct RobotCommand {
    pub v_tangent: f32,
    pub v_normal: f32,
    pub v_angular: f32,
    pub kick_speed_x: f32,
    pub kick_speed_z: f32,
    pub spin: bool,
}

/// What the host makes of a command's kick fields.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RobotAction {
    Normal,
    Dribble,
    Kick(f32),
    ChipKick(f32),
}

impl RobotCommand {
    /// stand still, no kick, no spin
    pub fn idle() -> Self {
        Self::default()
    }

    /// a straight kick wins over a chip kick, which wins over dribbling
    pub fn action(&self) -> RobotAction {
        if self.kick_speed_x > 0. {
            RobotAction::Kick(self.kick_speed_x)
        } else if self.kick_speed_z > 0. {
            RobotAction::ChipKick(self.kick_speed_z)
        } else if self.spin {
            RobotAction::Dribble
        } else {
            RobotAction::Normal
        }
    }
}
