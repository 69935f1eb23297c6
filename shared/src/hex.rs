use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial hex coordinate. Game state is keyed by these; pixel positions are
/// always derived through a [`HexLayout`] and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate `s`, derived so that `q + r + s == 0`.
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s() - other.s()).unsigned_abs();
        (dq + dr + ds) / 2
    }

    /// Adjacent cells, starting east and walking counter-clockwise.
    pub fn neighbors(&self) -> [AxialCoord; 6] {
        [
            AxialCoord::new(self.q + 1, self.r),
            AxialCoord::new(self.q + 1, self.r - 1),
            AxialCoord::new(self.q, self.r - 1),
            AxialCoord::new(self.q - 1, self.r),
            AxialCoord::new(self.q - 1, self.r + 1),
            AxialCoord::new(self.q, self.r + 1),
        ]
    }

    /// Every cell within `radius` steps of `self`, including `self`.
    pub fn within(&self, radius: u32) -> Vec<AxialCoord> {
        let radius = radius as i32;
        let mut out = Vec::with_capacity((3 * radius * (radius + 1) + 1) as usize);
        for dq in -radius..=radius {
            for dr in (-radius).max(-dq - radius)..=radius.min(-dq + radius) {
                out.push(AxialCoord::new(self.q + dq, self.r + dr));
            }
        }
        out
    }

    /// Round fractional axial coordinates to the containing cell.
    pub fn round(q: f64, r: f64) -> Self {
        let s = -q - r;
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// Wire key form, `"q,r"`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl FromStr for AxialCoord {
    type Err = RenderError;

    /// Parses a `"q,r"` key. Whitespace, missing parts and extra parts are
    /// all rejected.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || RenderError::MalformedCoordinate {
            key: key.to_string(),
        };
        let mut parts = key.split(',');
        let (Some(q), Some(r), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let q = parse_component(q).ok_or_else(malformed)?;
        let r = parse_component(r).ok_or_else(malformed)?;
        Ok(Self::new(q, r))
    }
}

fn parse_component(raw: &str) -> Option<i32> {
    // i32::from_str accepts a leading '+'; the wire form never carries one.
    if raw.starts_with('+') {
        return None;
    }
    raw.parse::<i32>().ok()
}

/// Screen-space point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Projection between axial cells and pixels on a surface of fixed size,
/// with the origin cell at the surface centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    pub hex_size: f64,
    pub width: f64,
    pub height: f64,
}

impl HexLayout {
    pub const fn new(hex_size: f64, width: f64, height: f64) -> Self {
        Self {
            hex_size,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn axial_to_pixel(&self, coord: AxialCoord) -> Point {
        let q = coord.q as f64;
        let r = coord.r as f64;
        let x = self.hex_size * 1.5 * q;
        let y = self.hex_size * SQRT_3 * (r + q / 2.0);
        Point::new(x + self.width / 2.0, y + self.height / 2.0)
    }

    /// Fractional axial position of a pixel, before rounding.
    pub fn pixel_to_fractional(&self, point: Point) -> (f64, f64) {
        let x = point.x - self.width / 2.0;
        let y = point.y - self.height / 2.0;
        let q = (2.0 / 3.0 * x) / self.hex_size;
        let r = (-1.0 / 3.0 * x + SQRT_3 / 3.0 * y) / self.hex_size;
        (q, r)
    }

    pub fn pixel_to_axial(&self, point: Point) -> AxialCoord {
        let (q, r) = self.pixel_to_fractional(point);
        AxialCoord::round(q, r)
    }

    /// Outline of the cell at `center`: six vertices at `i * 60° + 30°`.
    pub fn hex_corners(&self, center: Point) -> [Point; 6] {
        std::array::from_fn(|i| {
            let angle = std::f64::consts::FRAC_PI_3 * i as f64 + std::f64::consts::FRAC_PI_6;
            Point::new(
                center.x + self.hex_size * angle.cos(),
                center.y + self.hex_size * angle.sin(),
            )
        })
    }
}

/// Vertices of a star with `spikes` points, alternating outer and inner
/// radius, starting straight up.
pub fn star_points(center: Point, spikes: usize, outer_radius: f64, inner_radius: f64) -> Vec<Point> {
    let step = std::f64::consts::PI / spikes as f64;
    let mut rot = std::f64::consts::FRAC_PI_2 * 3.0;
    let mut points = Vec::with_capacity(spikes * 2);
    for _ in 0..spikes {
        points.push(Point::new(
            center.x + rot.cos() * outer_radius,
            center.y + rot.sin() * outer_radius,
        ));
        rot += step;
        points.push(Point::new(
            center.x + rot.cos() * inner_radius,
            center.y + rot.sin() * inner_radius,
        ));
        rot += step;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::{AxialCoord, HexLayout, Point, star_points};
    use crate::error::RenderError;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn origin_maps_to_surface_center() {
        for (size, w, h) in [(40.0, 400.0, 400.0), (12.5, 1024.0, 768.0), (1.0, 3.0, 7.0)] {
            let layout = HexLayout::new(size, w, h);
            let p = layout.axial_to_pixel(AxialCoord::new(0, 0));
            assert_close(p.x, w / 2.0);
            assert_close(p.y, h / 2.0);
        }
    }

    #[test]
    fn east_neighbor_is_one_and_a_half_sizes_right() {
        let layout = HexLayout::new(40.0, 400.0, 400.0);
        let p = layout.axial_to_pixel(AxialCoord::new(1, 0));
        assert_close(p.x, 260.0);
        assert_close(p.y, 200.0 + 40.0 * 3f64.sqrt() * 0.5);
    }

    #[test]
    fn odd_q_uses_true_division() {
        let layout = HexLayout::new(10.0, 0.0, 0.0);
        let p = layout.axial_to_pixel(AxialCoord::new(-3, 1));
        assert_close(p.x, -45.0);
        assert_close(p.y, 10.0 * 3f64.sqrt() * (1.0 - 1.5));
    }

    #[test]
    fn projection_round_trips() {
        let layouts = [
            HexLayout::new(40.0, 400.0, 400.0),
            HexLayout::new(7.25, 333.0, 91.0),
        ];
        for layout in layouts {
            for coord in AxialCoord::new(0, 0).within(6) {
                let pixel = layout.axial_to_pixel(coord);
                let (q, r) = layout.pixel_to_fractional(pixel);
                assert!((q - coord.q as f64).abs() < 1e-9, "{coord}: q={q}");
                assert!((r - coord.r as f64).abs() < 1e-9, "{coord}: r={r}");
                assert_eq!(layout.pixel_to_axial(pixel), coord);
            }
        }
    }

    #[test]
    fn pixel_near_center_rounds_to_cell() {
        let layout = HexLayout::new(40.0, 400.0, 400.0);
        let center = layout.axial_to_pixel(AxialCoord::new(2, -1));
        let nudged = Point::new(center.x + 10.0, center.y - 8.0);
        assert_eq!(layout.pixel_to_axial(nudged), AxialCoord::new(2, -1));
    }

    #[test]
    fn parses_wire_keys() {
        assert_eq!("0,0".parse::<AxialCoord>().unwrap(), AxialCoord::new(0, 0));
        assert_eq!("-3,5".parse::<AxialCoord>().unwrap(), AxialCoord::new(-3, 5));
        assert_eq!(AxialCoord::new(-3, 5).key(), "-3,5");
    }

    #[test]
    fn rejects_malformed_keys() {
        for key in ["abc", "1", "1,2,3", "1, 2", " 1,2", "1,", ",1", "1.5,2", "+1,2", ""] {
            match key.parse::<AxialCoord>() {
                Err(RenderError::MalformedCoordinate { key: reported }) => assert_eq!(reported, key),
                other => panic!("{key:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn distance_and_neighbors() {
        let origin = AxialCoord::new(0, 0);
        for n in origin.neighbors() {
            assert_eq!(origin.distance(&n), 1);
        }
        assert_eq!(origin.distance(&AxialCoord::new(3, -1)), 3);
        assert_eq!(AxialCoord::new(-2, 2).distance(&AxialCoord::new(2, -2)), 4);
    }

    #[test]
    fn within_radius_count() {
        for radius in 0..6u32 {
            let cells = AxialCoord::new(1, -1).within(radius);
            let r = radius as usize;
            assert_eq!(cells.len(), 3 * r * (r + 1) + 1);
            assert!(cells.iter().all(|c| c.distance(&AxialCoord::new(1, -1)) <= radius));
        }
    }

    #[test]
    fn hex_corners_start_at_thirty_degrees() {
        let layout = HexLayout::new(40.0, 400.0, 400.0);
        let corners = layout.hex_corners(Point::new(0.0, 0.0));
        assert_close(corners[0].x, 40.0 * 3f64.sqrt() / 2.0);
        assert_close(corners[0].y, 20.0);
        for c in corners {
            assert_close((c.x * c.x + c.y * c.y).sqrt(), 40.0);
        }
    }

    #[test]
    fn star_alternates_radii_and_points_up() {
        let pts = star_points(Point::new(100.0, 100.0), 5, 15.0, 7.0);
        assert_eq!(pts.len(), 10);
        assert_close(pts[0].x, 100.0);
        assert_close(pts[0].y, 85.0);
        for (i, p) in pts.iter().enumerate() {
            let d = ((p.x - 100.0).powi(2) + (p.y - 100.0).powi(2)).sqrt();
            assert_close(d, if i % 2 == 0 { 15.0 } else { 7.0 });
        }
    }
}
