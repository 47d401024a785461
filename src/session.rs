//! Protocol state machine tying the decoder, a [`RobotController`] and the
//! encoder together.
//!
//! The phases only ever move forward:
//! `AwaitingHandshake -> AwaitingGeometry -> FrameLoop`. The frame loop runs
//! until the host closes the stream or sends something that cannot be decoded.

use crate::{
    controllers::RobotController,
    protocol::{self, DecodeError, HandshakeReply, TokenReader},
    world::FieldGeometry,
};
use std::{fmt, io};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, trace, warn};

enum Phase {
    AwaitingHandshake,
    AwaitingGeometry,
    FrameLoop(FieldGeometry),
}

impl Phase {
    fn kind(&self) -> PhaseKind {
        match self {
            Phase::AwaitingHandshake => PhaseKind::AwaitingHandshake,
            Phase::AwaitingGeometry => PhaseKind::AwaitingGeometry,
            Phase::FrameLoop(_) => PhaseKind::FrameLoop,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PhaseKind {
    AwaitingHandshake,
    AwaitingGeometry,
    FrameLoop,
}

/// How a session ended without an error.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SessionOutcome {
    /// the host offered another protocol or version and was told so
    Rejected,
    /// the host closed the stream between two records
    EndOfStream {
        phase: PhaseKind,
        frames: u64,
        geometry: Option<FieldGeometry>,
    },
}

#[derive(Debug)]
pub enum SessionError {
    Decode(DecodeError),
    Write(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Decode(e) => write!(f, "decode error: {}", e),
            SessionError::Write(e) => write!(f, "failed to write to the host: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Decode(e) => Some(e),
            SessionError::Write(e) => Some(e),
        }
    }
}

enum Step {
    Next(Phase),
    Done(SessionOutcome),
}

pub struct Session<R, W, C> {
    tokens: TokenReader<R>,
    writer: W,
    controller: C,
    frames: u64,
}

impl<R, W, C> Session<R, W, C>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: RobotController,
{
    pub fn new(reader: R, writer: W, controller: C) -> Self {
        Self {
            tokens: TokenReader::new(reader),
            writer,
            controller,
            frames: 0,
        }
    }

    /// number of frames answered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_parts(self) -> (R, W, C) {
        (self.tokens.into_inner(), self.writer, self.controller)
    }

    pub async fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        let mut phase = Phase::AwaitingHandshake;
        loop {
            let kind = phase.kind();
            let step = match phase {
                Phase::AwaitingHandshake => self.handshake().await,
                Phase::AwaitingGeometry => self.geometry().await,
                Phase::FrameLoop(geometry) => self.frame(geometry).await,
            };
            phase = match step {
                Ok(Step::Next(next)) => next,
                Ok(Step::Done(outcome)) => {
                    info!(?outcome, "session over");
                    return Ok(outcome);
                }
                Err(e) => {
                    error!(phase = ?kind, frames = self.frames, "closing session: {}", e);
                    return Err(e);
                }
            };
        }
    }

    async fn handshake(&mut self) -> Result<Step, SessionError> {
        let Some(request) = protocol::read_handshake(&mut self.tokens)
            .await
            .map_err(SessionError::Decode)?
        else {
            return Ok(self.end_of_stream(PhaseKind::AwaitingHandshake, None));
        };

        let reply = request.reply();
        self.send(&format!("{}\n", reply)).await?;
        match reply {
            HandshakeReply::Compatible(_) => {
                info!("compatible");
                Ok(Step::Next(Phase::AwaitingGeometry))
            }
            HandshakeReply::NotCompatible(_) => {
                warn!(
                    offered_name = %request.protocol_name,
                    offered_version = request.protocol_version,
                    "host is not compatible"
                );
                Ok(Step::Done(SessionOutcome::Rejected))
            }
        }
    }

    async fn geometry(&mut self) -> Result<Step, SessionError> {
        match protocol::read_geometry(&mut self.tokens)
            .await
            .map_err(SessionError::Decode)?
        {
            Some(geometry) => {
                info!("initialized");
                debug!(?geometry);
                Ok(Step::Next(Phase::FrameLoop(geometry)))
            }
            None => Ok(self.end_of_stream(PhaseKind::AwaitingGeometry, None)),
        }
    }

    async fn frame(&mut self, geometry: FieldGeometry) -> Result<Step, SessionError> {
        let Some(frame) = protocol::read_frame(&mut self.tokens)
            .await
            .map_err(SessionError::Decode)?
        else {
            return Ok(self.end_of_stream(PhaseKind::FrameLoop, Some(geometry)));
        };
        if tracing::enabled!(tracing::Level::TRACE) {
            if let Ok(dump) = serde_json::to_string(&frame) {
                trace!(frame = %dump);
            }
        }

        let commands = self.controller.commands_for(&frame);
        debug_assert_eq!(commands.len(), frame.own_robot_count());
        self.send(&protocol::encode_commands(frame.counter, &commands))
            .await?;
        self.frames += 1;
        debug!(
            counter = frame.counter,
            allies = frame.own_robot_count(),
            ennemies = frame.opponent_robot_count(),
            "answered frame"
        );
        Ok(Step::Next(Phase::FrameLoop(geometry)))
    }

    /// writes and flushes right away, the host waits on every answer
    async fn send(&mut self, message: &str) -> Result<(), SessionError> {
        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(SessionError::Write)?;
        self.writer.flush().await.map_err(SessionError::Write)
    }

    fn end_of_stream(&self, phase: PhaseKind, geometry: Option<FieldGeometry>) -> Step {
        Step::Done(SessionOutcome::EndOfStream {
            phase,
            frames: self.frames,
            geometry,
        })
    }
}
