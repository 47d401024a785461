use crate::{protocol::RobotCommand, world::GameFrame};

pub mod ball_chaser;

pub use ball_chaser::{BallChaser, ChaserConfig};

pub trait RobotController {
    /// One command per ally of `frame`, in the order `frame.team` lists them.
    fn commands_for(&mut self, frame: &GameFrame) -> Vec<RobotCommand>;
}
