use crate::constants::MOVE_DURATION_MS;
use crate::error::Result;
use crate::imou::ImouCam;
use async_trait::async_trait;
use serde_json::json;
use strum_macros::{Display, EnumString};
use tokio::time::Duration;

/// Pan/tilt directions the `controlMovePTZ` method accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Vendor operation code, sent as a string on the wire.
    pub fn operation(self) -> &'static str {
        match self {
            Direction::Up => "1",
            Direction::Down => "2",
            Direction::Left => "3",
            Direction::Right => "4",
        }
    }
}

#[async_trait]
pub trait Ptz: Send + Sync {
    /// Move in a direction for the given duration
    async fn move_ptz(&self, direction: Direction, duration: Duration) -> Result<()>;

    /// Move in a direction for the default step duration (1 second)
    async fn move_step(&self, direction: Direction) -> Result<()>;
}

#[async_trait]
impl Ptz for ImouCam {
    async fn move_ptz(&self, direction: Direction, duration: Duration) -> Result<()> {
        let params = self
            .control_params(json!({
                "operation": direction.operation(),
                "duration": duration.as_millis().to_string(),
            }))
            .await?;

        self.send_request("controlMovePTZ", params).await?;
        tracing::debug!(%direction, ms = duration.as_millis() as u64, "moved");
        Ok(())
    }

    async fn move_step(&self, direction: Direction) -> Result<()> {
        self.move_ptz(direction, Duration::from_millis(MOVE_DURATION_MS))
            .await
    }
}
