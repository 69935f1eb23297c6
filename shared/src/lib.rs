pub mod error;
pub mod events;
pub mod hex;
pub mod tank;
pub mod terrain;

pub use error::RenderError;
pub use events::*;
pub use hex::{AxialCoord, HexLayout, Point};
pub use tank::{PlayerSlot, Tank, TankType};
pub use terrain::{TerrainCell, TerrainKind, TerrainMap, UnknownTerrainPolicy};
