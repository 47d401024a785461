use super::RobotCommand;
use std::fmt::Write;

/// Renders the answer to one frame: the counter, then one line per command in
/// the given order.
pub fn encode_commands(counter: u64, commands: &[RobotCommand]) -> String {
    let mut out = String::with_capacity(16 + commands.len() * 64);
    // writing into a String never fails
    let _ = writeln!(out, "{}", counter);
    for command in commands {
        let _ = writeln!(
            out,
            "{:.6} {:.6} {:.6} {:.6} {:.6} {}",
            command.v_tangent,
            command.v_normal,
            command.v_angular,
            command.kick_speed_x,
            command.kick_speed_z,
            command.spin as u8,
        );
    }
    out
}
