use super::{DecodeError, TokenReader};
use crate::{
    math::{Point2, Vec2},
    world::{BallState, FieldGeometry, GameFrame, RefereeState, RobotState},
};
use tokio::io::AsyncBufRead;

const GEOMETRY_FIELDS: [&str; FieldGeometry::FIELD_COUNT] = [
    "field length",
    "field width",
    "goal width",
    "center circle radius",
    "defense radius",
    "defense stretch",
    "free kick from defense distance",
    "penalty spot from field line distance",
    "penalty line from spot distance",
];

/// Reads the nine geometry values. `Ok(None)` if the stream ended before the first one.
pub async fn read_geometry<R: AsyncBufRead + Unpin>(
    tokens: &mut TokenReader<R>,
) -> Result<Option<FieldGeometry>, DecodeError> {
    let Some(first) = tokens.first::<f32>(GEOMETRY_FIELDS[0]).await? else {
        return Ok(None);
    };
    let mut values = [first; FieldGeometry::FIELD_COUNT];
    for (value, expected) in values.iter_mut().zip(GEOMETRY_FIELDS).skip(1) {
        *value = tokens.expect(expected).await?;
    }
    Ok(Some(FieldGeometry::from_array(values)))
}

/// `<id> <x> <y> <w> <vx> <vy> <vw>`
pub async fn read_robot<R: AsyncBufRead + Unpin>(
    tokens: &mut TokenReader<R>,
) -> Result<RobotState, DecodeError> {
    let id = tokens.expect("robot id").await?;
    let x = tokens.expect("robot x").await?;
    let y = tokens.expect("robot y").await?;
    let orientation = tokens.expect("robot orientation").await?;
    let vx = tokens.expect("robot vx").await?;
    let vy = tokens.expect("robot vy").await?;
    let angular_vel = tokens.expect("robot angular velocity").await?;
    Ok(RobotState {
        id,
        pos: Point2::new(x, y),
        orientation,
        vel: Vec2::new(vx, vy),
        angular_vel,
    })
}

async fn read_robots<R: AsyncBufRead + Unpin>(
    tokens: &mut TokenReader<R>,
    count: usize,
) -> Result<Vec<RobotState>, DecodeError> {
    // the count comes from the peer, don't preallocate on its word
    let mut robots = Vec::new();
    for _ in 0..count {
        robots.push(read_robot(tokens).await?);
    }
    Ok(robots)
}

/// Reads a whole frame: header, ball, allies then ennemies.
///
/// `Ok(None)` if the stream ended cleanly between two frames. Any other short
/// or malformed read fails the whole frame, there is no resynchronization.
pub async fn read_frame<R: AsyncBufRead + Unpin>(
    tokens: &mut TokenReader<R>,
) -> Result<Option<GameFrame>, DecodeError> {
    let Some(counter) = tokens.first::<u64>("frame counter").await? else {
        return Ok(None);
    };
    let timestamp = tokens.expect("timestamp").await?;
    let referee_state = RefereeState(tokens.expect_char("referee state").await?);
    let referee_time_left = tokens.expect("referee time left").await?;
    let score_player = tokens.expect("player score").await?;
    let score_opponent = tokens.expect("opponent score").await?;
    let goalkeeper_id_player = tokens.expect("player goalkeeper id").await?;
    let goalkeeper_id_opponent = tokens.expect("opponent goalkeeper id").await?;
    let own_robot_count = tokens.expect("player robot count").await?;
    let opponent_robot_count = tokens.expect("opponent robot count").await?;

    let ball = BallState::new(
        Point2::new(
            tokens.expect("ball x").await?,
            tokens.expect("ball y").await?,
        ),
        Vec2::new(
            tokens.expect("ball vx").await?,
            tokens.expect("ball vy").await?,
        ),
    );

    let team = read_robots(tokens, own_robot_count).await?;
    let ennemies = read_robots(tokens, opponent_robot_count).await?;

    Ok(Some(GameFrame {
        counter,
        timestamp,
        referee_state,
        referee_time_left,
        score_player,
        score_opponent,
        goalkeeper_id_player,
        goalkeeper_id_opponent,
        ball,
        team,
        ennemies,
    }))
}
