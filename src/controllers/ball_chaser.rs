use super::RobotController;
use crate::{
    math::{Point2, Pose},
    protocol::RobotCommand,
    world::{GameFrame, RobotId},
};

/// Gains and kick settings of [`BallChaser`]. Defaults are the reference values.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ChaserConfig {
    pub linear_gain: f32,
    pub angular_gain: f32,
    pub kick_speed_x: f32,
    pub kick_speed_z: f32,
    pub spin: bool,
    /// the only robot that moves, every other ally is left idle
    pub controlled_id: RobotId,
    pub target_heading: f32,
}

impl Default for ChaserConfig {
    fn default() -> Self {
        Self {
            linear_gain: 0.40,
            angular_gain: 0.80,
            kick_speed_x: 4.0,
            kick_speed_z: 0.0,
            spin: true,
            controlled_id: 0,
            target_heading: 0.,
        }
    }
}

/// Drives one robot straight at the ball while turning to a fixed heading.
/// Keeps no state between frames.
#[derive(Clone, Debug, Default)]
pub struct BallChaser {
    config: ChaserConfig,
}

impl BallChaser {
    pub fn new(config: ChaserConfig) -> Self {
        Self { config }
    }

    /// Proportional command taking `pose` to `target`.
    ///
    /// The position error is projected on the robot's axes with
    /// `t = dx*cos(w) + dy*sin(w)` and `n = dy*cos(w) + dx*sin(w)`. The normal
    /// term is not a proper rotation into the robot frame (that would be
    /// `dy*cos(w) - dx*sin(w)`) but hosts speaking version 1 expect exactly this.
    pub fn goto(&self, pose: Pose, target: Pose) -> RobotCommand {
        let ChaserConfig {
            linear_gain,
            angular_gain,
            ..
        } = self.config;
        let to_target = pose.to(&target);
        // projections are evaluated in f64 and rounded once, the angular term stays in f32
        let (dx, dy) = (to_target.x as f64, to_target.y as f64);
        let (sin_w, cos_w) = (pose.orientation as f64).sin_cos();
        let linear_gain = linear_gain as f64;

        RobotCommand {
            v_tangent: (linear_gain * (dx * cos_w + dy * sin_w)) as f32,
            v_normal: (linear_gain * (dy * cos_w + dx * sin_w)) as f32,
            v_angular: angular_gain * (target.orientation - pose.orientation),
            kick_speed_x: self.config.kick_speed_x,
            kick_speed_z: self.config.kick_speed_z,
            spin: self.config.spin,
        }
    }

    fn target(&self, ball: Point2) -> Pose {
        Pose::new(ball, self.config.target_heading)
    }
}

impl RobotController for BallChaser {
    fn commands_for(&mut self, frame: &GameFrame) -> Vec<RobotCommand> {
        let target = self.target(frame.ball.pos);
        frame
            .team
            .iter()
            .map(|robot| {
                if robot.id == self.config.controlled_id {
                    self.goto(robot.pose(), target)
                } else {
                    RobotCommand::idle()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        math::Vec2,
        protocol::encode_commands,
        world::{BallState, RefereeState, RobotState},
    };
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    fn frame_with(ball: Point2, team: Vec<RobotState>) -> GameFrame {
        GameFrame {
            counter: 1,
            timestamp: 0.,
            referee_state: RefereeState('N'),
            referee_time_left: -1.,
            score_player: 0,
            score_opponent: 0,
            goalkeeper_id_player: 0,
            goalkeeper_id_opponent: 0,
            ball: BallState::new(ball, Vec2::zero()),
            team,
            ennemies: vec![RobotState::new(0, Point2::new(-1., -1.), 2.)],
        }
    }

    #[test]
    fn straight_ahead() {
        let chaser = BallChaser::default();
        let command = chaser.goto(
            Pose::new(Point2::zero(), 0.),
            Pose::new(Point2::new(1., 0.), 0.),
        );
        assert!((command.v_tangent - 0.40).abs() < EPSILON);
        assert!(command.v_normal.abs() < EPSILON);
        assert_eq!(command.v_angular, 0.);
        assert_eq!(command.kick_speed_x, 4.0);
        assert_eq!(command.kick_speed_z, 0.0);
        assert!(command.spin);
    }

    #[test]
    fn facing_up_towards_a_ball_above() {
        let chaser = BallChaser::default();
        let command = chaser.goto(
            Pose::new(Point2::zero(), FRAC_PI_2),
            Pose::new(Point2::new(0., 1.), 0.),
        );
        assert!((command.v_tangent - 0.40).abs() < EPSILON);
        assert!(command.v_normal.abs() < EPSILON);
        assert!((command.v_angular - 0.80 * -FRAC_PI_2).abs() < EPSILON);
    }

    // Pins the version 1 normal projection. A proper rotation would give -0.4
    // here, changing it means bumping the protocol version.
    #[test]
    fn normal_projection_adds_the_sine_term() {
        let chaser = BallChaser::default();
        let command = chaser.goto(
            Pose::new(Point2::zero(), FRAC_PI_2),
            Pose::new(Point2::new(1., 0.), 0.),
        );
        assert!(command.v_tangent.abs() < EPSILON);
        assert!((command.v_normal - 0.40).abs() < EPSILON);
    }

    #[test]
    fn heading_error_is_not_wrapped() {
        let chaser = BallChaser::default();
        let command = chaser.goto(
            Pose::new(Point2::zero(), 6.),
            Pose::new(Point2::zero(), 0.),
        );
        assert!((command.v_angular - 0.80 * -6.).abs() < EPSILON);
    }

    #[test]
    fn only_the_controlled_robot_moves() {
        let mut chaser = BallChaser::default();
        let frame = frame_with(
            Point2::new(1., 0.),
            vec![
                RobotState::new(4, Point2::new(3., 3.), 1.),
                RobotState::new(0, Point2::zero(), 0.),
                RobotState::new(1, Point2::new(-2., 0.5), -1.),
            ],
        );
        let commands = chaser.commands_for(&frame);
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], RobotCommand::idle());
        assert!((commands[1].v_tangent - 0.40).abs() < EPSILON);
        assert!(commands[1].spin);
        assert_eq!(commands[2], RobotCommand::idle());
    }

    #[test]
    fn no_controlled_robot_means_all_idle() {
        let mut chaser = BallChaser::default();
        let frame = frame_with(
            Point2::new(1., 0.),
            vec![RobotState::new(2, Point2::zero(), 0.); 2],
        );
        assert_eq!(chaser.commands_for(&frame), vec![RobotCommand::idle(); 2]);
    }

    #[test]
    fn same_frame_same_commands() {
        let mut chaser = BallChaser::default();
        let frame = frame_with(
            Point2::new(0.3, -1.2),
            vec![RobotState::new(0, Point2::new(0.1, 0.7), 0.9)],
        );
        let first = chaser.commands_for(&frame);
        let _ = chaser.commands_for(&frame_with(Point2::new(5., 5.), vec![]));
        assert_eq!(chaser.commands_for(&frame), first);
    }

    #[test]
    fn rounds_like_the_c_client() {
        let mut chaser = BallChaser::default();
        let frame = frame_with(
            Point2::new(1.2502, -0.7656),
            vec![RobotState::new(0, Point2::new(0.4297, -2.6233), -2.7671)],
        );
        let commands = chaser.commands_for(&frame);
        assert_eq!(
            encode_commands(frame.counter, &commands),
            "1\n-0.577272 -0.811635 2.213680 4.000000 0.000000 1\n"
        );
    }

    #[test]
    fn custom_gains_and_kicks() {
        let chaser = BallChaser::new(ChaserConfig {
            linear_gain: 1.,
            angular_gain: 2.,
            kick_speed_x: 0.,
            kick_speed_z: 3.,
            spin: false,
            controlled_id: 5,
            target_heading: 1.,
        });
        let command = chaser.goto(
            Pose::new(Point2::zero(), 0.),
            chaser.target(Point2::new(2., -1.)),
        );
        assert_eq!(command.v_tangent, 2.);
        assert_eq!(command.v_normal, -1.);
        assert_eq!(command.v_angular, 2.);
        assert_eq!(command.kick_speed_z, 3.);
        assert!(!command.spin);
    }
}
