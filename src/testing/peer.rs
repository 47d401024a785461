use crate::{
    protocol::{HandshakeReply, RobotCommand},
    world::{FieldGeometry, GameFrame, RobotState},
};
use std::{fmt, io};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

#[derive(Debug)]
pub enum PeerError {
    Io(io::Error),
    MissingLine { expected: &'static str },
    UnexpectedReply(String),
    WrongCounter { expected: u64, got: u64 },
    WrongFieldCount(usize),
    Parse { token: String },
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerError::Io(e) => write!(f, "i/o error: {}", e),
            PeerError::MissingLine { expected } => write!(f, "expected a line with {}", expected),
            PeerError::UnexpectedReply(line) => {
                write!(f, "protocol compatibility error, output was '{}'", line)
            }
            PeerError::WrongCounter { expected, got } => {
                write!(f, "wrong command counter, expected {} got {}", expected, got)
            }
            PeerError::WrongFieldCount(count) => {
                write!(f, "expected 6 values for robot command, got {}", count)
            }
            PeerError::Parse { token } => write!(f, "couldn't parse '{}'", token),
        }
    }
}

impl std::error::Error for PeerError {}

/// Plays the simulator: writes handshake, geometry and frames, reads back and
/// checks the client's answers.
pub struct HostPeer<W, R> {
    to_client: W,
    from_client: Lines<R>,
}

impl<W, R> HostPeer<W, R>
where
    W: AsyncWrite + Unpin,
    R: AsyncBufRead + Unpin,
{
    pub fn new(to_client: W, from_client: R) -> Self {
        Self {
            to_client,
            from_client: from_client.lines(),
        }
    }

    /// Closes the host's side of the stream, the client sees an end of stream.
    pub async fn hang_up(mut self) -> Result<(), PeerError> {
        self.to_client.shutdown().await.map_err(PeerError::Io)
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<(), PeerError> {
        self.to_client
            .write_all(text.as_bytes())
            .await
            .map_err(PeerError::Io)?;
        self.to_client.flush().await.map_err(PeerError::Io)
    }

    pub async fn offer(&mut self, name: &str, version: i64) -> Result<HandshakeReply, PeerError> {
        self.send_raw(&format!("{} {}\n", name, version)).await?;
        let line = self.next_line("a handshake reply").await?;
        let mut words = line.split_whitespace();
        let reply = match (words.next(), words.next().map(str::parse), words.next()) {
            (Some("COMPATIBLE"), Some(Ok(version)), None) => HandshakeReply::Compatible(version),
            (Some("NOT_COMPATIBLE"), Some(Ok(version)), None) => {
                HandshakeReply::NotCompatible(version)
            }
            _ => return Err(PeerError::UnexpectedReply(line)),
        };
        Ok(reply)
    }

    pub async fn send_geometry(&mut self, geometry: &FieldGeometry) -> Result<(), PeerError> {
        let values = geometry
            .to_array()
            .iter()
            .map(|v| format!("{:.03}", v))
            .collect::<Vec<_>>()
            .join(" ");
        self.send_raw(&format!("{}\n", values)).await
    }

    pub async fn send_frame(&mut self, frame: &GameFrame) -> Result<(), PeerError> {
        self.send_raw(&encode_frame(frame)).await
    }

    /// Reads the answer to `frame`: the echoed counter then one command per ally.
    pub async fn receive_commands(
        &mut self,
        frame: &GameFrame,
    ) -> Result<Vec<RobotCommand>, PeerError> {
        let line = self.next_line("the command counter").await?;
        let counter: u64 = parse(line.trim())?;
        if counter != frame.counter {
            return Err(PeerError::WrongCounter {
                expected: frame.counter,
                got: counter,
            });
        }

        let mut commands = Vec::with_capacity(frame.own_robot_count());
        for _ in 0..frame.own_robot_count() {
            let line = self.next_line("a robot command").await?;
            commands.push(parse_command(&line)?);
        }
        Ok(commands)
    }

    pub async fn exchange(&mut self, frame: &GameFrame) -> Result<Vec<RobotCommand>, PeerError> {
        self.send_frame(frame).await?;
        self.receive_commands(frame).await
    }

    /// `Ok(None)` once the client closed its output
    pub async fn try_next_line(&mut self) -> Result<Option<String>, PeerError> {
        self.from_client.next_line().await.map_err(PeerError::Io)
    }

    async fn next_line(&mut self, expected: &'static str) -> Result<String, PeerError> {
        self.try_next_line()
            .await?
            .ok_or(PeerError::MissingLine { expected })
    }
}

fn parse<T: std::str::FromStr>(token: &str) -> Result<T, PeerError> {
    token.parse().map_err(|_| PeerError::Parse {
        token: token.to_string(),
    })
}

fn parse_command(line: &str) -> Result<RobotCommand, PeerError> {
    let vars: Vec<&str> = line.split_whitespace().collect();
    if vars.len() != 6 {
        return Err(PeerError::WrongFieldCount(vars.len()));
    }
    Ok(RobotCommand {
        v_tangent: parse(vars[0])?,
        v_normal: parse(vars[1])?,
        v_angular: parse(vars[2])?,
        kick_speed_x: parse(vars[3])?,
        kick_speed_z: parse(vars[4])?,
        spin: parse::<i32>(vars[5])? == 1,
    })
}

fn encode_robot(out: &mut String, robot: &RobotState) {
    out.push_str(&format!(
        "{} {:.04} {:.04} {:.04} {:.04} {:.04} {:.04}\n",
        robot.id,
        robot.pos.x,
        robot.pos.y,
        robot.orientation,
        robot.vel.x,
        robot.vel.y,
        robot.angular_vel,
    ));
}

/// A frame as the simulator writes it.
pub fn encode_frame(frame: &GameFrame) -> String {
    let mut out = format!(
        "{} {} {} {} {} {} {} {} {} {}\n",
        frame.counter,
        frame.timestamp,
        frame.referee_state,
        frame.referee_time_left,
        frame.score_player,
        frame.score_opponent,
        frame.goalkeeper_id_player,
        frame.goalkeeper_id_opponent,
        frame.own_robot_count(),
        frame.opponent_robot_count(),
    );
    out.push_str(&format!(
        "{:.04} {:.04} {:.04} {:.04}\n",
        frame.ball.pos.x, frame.ball.pos.y, frame.ball.vel.x, frame.ball.vel.y,
    ));
    for robot in frame.team.iter().chain(&frame.ennemies) {
        encode_robot(&mut out, robot);
    }
    out
}
