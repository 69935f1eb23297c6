use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::hex::AxialCoord;

/// Terrain snapshot as it arrives on the wire: `"q,r"` key to terrain name.
///
/// Values stay raw strings so an unrecognised kind can be reported against
/// its key instead of failing the whole event decode.
pub type TerrainMap = BTreeMap<String, String>;

pub const UNSTYLED_COLOR: &str = "#9E9E9E";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    Grass,
    Water,
    Mountain,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 3] = [TerrainKind::Grass, TerrainKind::Water, TerrainKind::Mountain];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainKind::Grass => "grass",
            TerrainKind::Water => "water",
            TerrainKind::Mountain => "mountain",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TerrainKind::Grass => "#4CAF50",
            TerrainKind::Water => "#2196F3",
            TerrainKind::Mountain => "#795548",
        }
    }

    /// Tanks may only enter grass; water and mountain block movement.
    pub fn is_passable(&self) -> bool {
        match self {
            TerrainKind::Grass => true,
            TerrainKind::Water | TerrainKind::Mountain => false,
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name that failed to match any [`TerrainKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedTerrain(pub String);

impl FromStr for TerrainKind {
    type Err = UnrecognizedTerrain;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "grass" => Ok(TerrainKind::Grass),
            "water" => Ok(TerrainKind::Water),
            "mountain" => Ok(TerrainKind::Mountain),
            other => Err(UnrecognizedTerrain(other.to_string())),
        }
    }
}

/// What to do with a cell whose terrain name is not a known kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTerrainPolicy {
    /// Fail the snapshot with [`RenderError::UnknownTerrain`].
    #[default]
    Reject,
    /// Draw the cell with [`UNSTYLED_COLOR`].
    Unstyled,
}

/// One validated terrain cell. `kind` is `None` only for unrecognised
/// terrain accepted under [`UnknownTerrainPolicy::Unstyled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainCell {
    pub coord: AxialCoord,
    pub kind: Option<TerrainKind>,
}

impl TerrainCell {
    pub fn color(&self) -> &'static str {
        self.kind.map(|kind| kind.color()).unwrap_or(UNSTYLED_COLOR)
    }
}

/// Validate a wire snapshot in key order. The first bad entry aborts the
/// whole parse.
pub fn parse_cells(map: &TerrainMap, policy: UnknownTerrainPolicy) -> Result<Vec<TerrainCell>, RenderError> {
    map.iter()
        .map(|(key, terrain)| {
            let coord = key.parse::<AxialCoord>()?;
            let kind = match (terrain.parse::<TerrainKind>(), policy) {
                (Ok(kind), _) => Some(kind),
                (Err(_), UnknownTerrainPolicy::Unstyled) => None,
                (Err(UnrecognizedTerrain(terrain)), UnknownTerrainPolicy::Reject) => {
                    return Err(RenderError::UnknownTerrain {
                        key: key.clone(),
                        terrain,
                    });
                }
            };
            Ok(TerrainCell { coord, kind })
        })
        .collect()
}
