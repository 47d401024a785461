use crate::math::{Point2, Pose, Vec2};
use serde::{Deserialize, Serialize};

pub type RobotId = i32;

/// Pose and velocities of one robot as seen in a frame. Allies and ennemies
/// share this shape.
#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct RobotState {
    pub id: RobotId,
    pub pos: Point2,
    /// heading in radians
    pub orientation: f32,
    pub vel: Vec2,
    pub angular_vel: f32,
}

impl RobotState {
    pub fn new(id: RobotId, pos: Point2, orientation: f32) -> Self {
        Self {
            id,
            pos,
            orientation,
            ..Default::default()
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.pos, self.orientation)
    }
}
