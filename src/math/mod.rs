mod point;
mod vec;

pub use point::Point2;
pub use vec::Vec2;

use serde::{Deserialize, Serialize};

/// A position on the field together with a heading in radians.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug, Default)]
pub struct Pose {
    pub pos: Point2,
    pub orientation: f32,
}

impl Pose {
    pub fn new(pos: Point2, orientation: f32) -> Self {
        Self { pos, orientation }
    }

    /// world frame vector from this pose's position to `target`'s position
    pub fn to(&self, target: &Pose) -> Vec2 {
        self.pos.to(target.pos)
    }
}
