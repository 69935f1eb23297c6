use hextanks_shared::hex::star_points;
use hextanks_shared::terrain::parse_cells;
use hextanks_shared::{
    GameSnapshot, HexLayout, PlayerSlot, Point, RenderError, Tank, TerrainCell, TerrainMap,
    UnknownTerrainPolicy,
};

pub const HEX_OUTLINE_COLOR: &str = "#000";
pub const UNIT_TEXT_COLOR: &str = "#FFF";
pub const STAR_COLOR: &str = "#FFD700";

/// Unit circle radius as a fraction of the hex radius.
pub const UNIT_RADIUS_FACTOR: f64 = 0.4;

// Star size is fixed in pixels and does not follow hex_size.
pub const STAR_SPIKES: usize = 5;
pub const STAR_OUTER_RADIUS: f64 = 15.0;
pub const STAR_INNER_RADIUS: f64 = 7.0;

/// One primitive issued against a [`DrawSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillPolygon {
        points: Vec<Point>,
        color: &'static str,
    },
    StrokePolygon {
        points: Vec<Point>,
        color: &'static str,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: &'static str,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        color: &'static str,
    },
    Text {
        text: String,
        at: Point,
        color: &'static str,
    },
}

/// A 2-D drawing target with a fixed pixel size.
pub trait DrawSurface {
    fn size(&self) -> (f64, f64);
    fn draw(&mut self, command: &DrawCommand);
}

/// Draws terrain and tanks onto a surface. Layers are painted in call order,
/// so terrain has to go down before units within a frame.
pub struct HexGridRenderer<S> {
    surface: S,
    layout: HexLayout,
    terrain_policy: UnknownTerrainPolicy,
}

impl<S: DrawSurface> HexGridRenderer<S> {
    pub fn new(surface: S, hex_size: f64) -> Result<Self, RenderError> {
        if !hex_size.is_finite() || hex_size <= 0.0 {
            return Err(RenderError::Configuration(format!(
                "hex size must be a positive number of pixels, got {hex_size}"
            )));
        }
        let (width, height) = surface.size();
        Ok(Self {
            surface,
            layout: HexLayout::new(hex_size, width, height),
            terrain_policy: UnknownTerrainPolicy::default(),
        })
    }

    pub fn with_terrain_policy(mut self, policy: UnknownTerrainPolicy) -> Self {
        self.terrain_policy = policy;
        self
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Clear the surface and paint every cell. Nothing is drawn, and the
    /// previous frame is left as is, if any entry fails validation.
    pub fn render_terrain(&mut self, map: &TerrainMap) -> Result<(), RenderError> {
        let cells = parse_cells(map, self.terrain_policy)?;
        self.paint_terrain(&cells);
        Ok(())
    }

    pub fn render_units(&mut self, units: &[Tank]) -> Result<(), RenderError> {
        let players = resolve_players(units)?;
        self.paint_units(units, &players);
        Ok(())
    }

    /// Terrain then units, with the whole snapshot validated up front.
    pub fn render_frame(&mut self, snapshot: &GameSnapshot) -> Result<(), RenderError> {
        let cells = parse_cells(&snapshot.map, self.terrain_policy)?;
        let players = resolve_players(&snapshot.tanks)?;
        self.paint_terrain(&cells);
        self.paint_units(&snapshot.tanks, &players);
        Ok(())
    }

    fn paint_terrain(&mut self, cells: &[TerrainCell]) {
        self.surface.draw(&DrawCommand::Clear);
        for cell in cells {
            let center = self.layout.axial_to_pixel(cell.coord);
            let points = self.layout.hex_corners(center).to_vec();
            self.surface.draw(&DrawCommand::FillPolygon {
                points: points.clone(),
                color: cell.color(),
            });
            self.surface.draw(&DrawCommand::StrokePolygon {
                points,
                color: HEX_OUTLINE_COLOR,
            });
        }
    }

    fn paint_units(&mut self, units: &[Tank], players: &[PlayerSlot]) {
        let radius = self.layout.hex_size * UNIT_RADIUS_FACTOR;
        for (tank, player) in units.iter().zip(players) {
            let center = self.layout.axial_to_pixel(tank.position);
            self.surface.draw(&DrawCommand::FillCircle {
                center,
                radius,
                color: player.color(),
            });
            self.surface.draw(&DrawCommand::StrokeCircle {
                center,
                radius,
                color: HEX_OUTLINE_COLOR,
            });
            self.surface.draw(&DrawCommand::Text {
                text: tank.id.to_string(),
                at: center,
                color: UNIT_TEXT_COLOR,
            });
            if tank.has_reached_end {
                self.surface.draw(&DrawCommand::FillPolygon {
                    points: star_points(center, STAR_SPIKES, STAR_OUTER_RADIUS, STAR_INNER_RADIUS),
                    color: STAR_COLOR,
                });
            }
        }
    }
}

fn resolve_players(units: &[Tank]) -> Result<Vec<PlayerSlot>, RenderError> {
    units.iter().map(Tank::player).collect()
}
