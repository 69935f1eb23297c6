use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::hex::AxialCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    Player1,
    Player2,
}

impl PlayerSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerSlot::Player1 => "player1",
            PlayerSlot::Player2 => "player2",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PlayerSlot::Player1 => "#F44336",
            PlayerSlot::Player2 => "#2196F3",
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerSlot {
    type Err = RenderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "player1" => Ok(PlayerSlot::Player1),
            "player2" => Ok(PlayerSlot::Player2),
            other => Err(RenderError::UnknownPlayer {
                player_id: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankType {
    #[default]
    Regular,
    Enhanced,
}

/// One tank in a game-state snapshot. Owned by the server; the client only
/// reads it.
///
/// `player_id` stays a raw string on the wire and is resolved through
/// [`Tank::player`] at draw time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tank {
    pub id: u32,
    pub player_id: String,
    pub position: AxialCoord,
    #[serde(default)]
    pub has_reached_end: bool,
    #[serde(default, rename = "type")]
    pub tank_type: TankType,
    #[serde(default)]
    pub destroyed: bool,
    #[serde(default)]
    pub movement_points: Option<u32>,
}

impl Tank {
    pub fn new(id: u32, player: PlayerSlot, position: AxialCoord) -> Self {
        Self {
            id,
            player_id: player.as_str().to_string(),
            position,
            has_reached_end: false,
            tank_type: TankType::Regular,
            destroyed: false,
            movement_points: None,
        }
    }

    pub fn player(&self) -> Result<PlayerSlot, RenderError> {
        self.player_id.parse()
    }
}
