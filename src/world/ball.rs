use crate::math::{Point2, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Debug, Default)]
pub struct BallState {
    pub pos: Point2,
    pub vel: Vec2,
}

impl BallState {
    pub fn new(pos: Point2, vel: Vec2) -> Self {
        Self { pos, vel }
    }
}
