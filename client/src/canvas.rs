use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use hextanks_shared::{Point, RenderError, UnknownTerrainPolicy};

use crate::renderer::{DrawCommand, DrawSurface, HexGridRenderer};

/// `<canvas>` 2-D context bound as a [`DrawSurface`].
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_element_id(surface_handle: &str) -> Result<Self, RenderError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| RenderError::Configuration("no document".into()))?;
        let canvas = document
            .get_element_by_id(surface_handle)
            .ok_or_else(|| {
                RenderError::Configuration(format!("no element with id {surface_handle:?}"))
            })?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| {
                RenderError::Configuration(format!("element {surface_handle:?} is not a canvas"))
            })?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| {
                RenderError::Configuration(format!("canvas {surface_handle:?} has no 2d context"))
            })?;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        Ok(Self { canvas, ctx })
    }

    fn trace_polygon(&self, points: &[Point]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        ctx.move_to(first.x, first.y);
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
        ctx.close_path();
    }

    fn trace_circle(&self, center: Point, radius: f64) {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .ok();
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn draw(&mut self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear => {
                let (w, h) = self.size();
                ctx.clear_rect(0.0, 0.0, w, h);
            }
            DrawCommand::FillPolygon { points, color } => {
                self.trace_polygon(points);
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
            DrawCommand::StrokePolygon { points, color } => {
                self.trace_polygon(points);
                ctx.set_stroke_style_str(color);
                ctx.stroke();
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                self.trace_circle(*center, *radius);
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
            } => {
                self.trace_circle(*center, *radius);
                ctx.set_stroke_style_str(color);
                ctx.stroke();
            }
            DrawCommand::Text { text, at, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_text(text, at.x, at.y).ok();
            }
        }
    }
}

/// Bind a renderer to the canvas with DOM id `surface_handle`.
pub fn configure(
    surface_handle: &str,
    hex_size: f64,
    terrain_policy: UnknownTerrainPolicy,
) -> Result<HexGridRenderer<CanvasSurface>, RenderError> {
    let surface = CanvasSurface::from_element_id(surface_handle)?;
    let renderer = HexGridRenderer::new(surface, hex_size)?.with_terrain_policy(terrain_policy);
    let layout = renderer.layout();
    tracing::debug!(
        surface_handle,
        hex_size,
        width = layout.width,
        height = layout.height,
        "hex renderer configured"
    );
    Ok(renderer)
}
