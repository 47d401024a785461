use crate::{math::Vec2, protocol::RobotCommand, world::RobotState};

/// Moves `robot` as if it followed `command` for `dt` seconds. No inertia, no
/// collisions, kicks are ignored.
pub fn step(robot: &mut RobotState, command: &RobotCommand, dt: f32) {
    let d_tangent = dt * command.v_tangent;
    let d_normal = dt * command.v_normal;
    let d_angular = dt * command.v_angular;

    let (sin_w, cos_w) = robot.orientation.sin_cos();
    let delta = Vec2::new(
        d_normal * sin_w + d_tangent * cos_w,
        d_normal * cos_w - d_tangent * sin_w,
    );

    robot.pos = robot.pos + delta;
    robot.orientation += d_angular;
    robot.vel = delta * (1. / dt);
    robot.angular_vel = command.v_angular;
}
