use thiserror::Error;

/// Precondition violations on a render snapshot or surface binding.
///
/// None of these are retried: the caller that supplied the bad input gets
/// the error back and nothing is drawn for the offending frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("cannot configure render surface: {0}")]
    Configuration(String),

    #[error("malformed hex coordinate key {key:?}, expected \"q,r\"")]
    MalformedCoordinate { key: String },

    #[error("unknown player id {player_id:?}")]
    UnknownPlayer { player_id: String },

    #[error("unknown terrain kind {terrain:?} at {key:?}")]
    UnknownTerrain { key: String, terrain: String },
}
