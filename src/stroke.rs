// Stroke recorder: pointer events in, round-capped segments out.
// Visual: while the button (or finger) is down, every move paints a thick line from
// the previous point to the new one; lifting or leaving the surface ends the stroke.

use tracing::trace;

use crate::raster::RasterBuffer;
use crate::types::{ClientPoint, Color, DrawingConfig, Point};

/// Where a pointer event is in its gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,  // mousedown / touchstart
    Move,  // mousemove / touchmove
    Up,    // mouseup / touchend
    Leave, // mouseleave / touchcancel
}

/// The two input families the surface accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
    Mouse(ClientPoint),
    /// Active touch points, first one wins. Empty on touchend.
    Touch(Vec<ClientPoint>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub input: PointerInput,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, input: PointerInput::Mouse(ClientPoint::new(x, y)) }
    }

    pub fn touch(phase: PointerPhase, touches: Vec<ClientPoint>) -> Self {
        Self { phase, input: PointerInput::Touch(touches) }
    }

    /// Client-space position, or None for a touch event with no active touches.
    pub fn client_position(&self) -> Option<ClientPoint> {
        match &self.input {
            PointerInput::Mouse(p) => Some(*p),
            PointerInput::Touch(touches) => touches.first().copied(),
        }
    }
}

/// What happened to an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    /// The host should suppress its default handling (scroll, selection).
    pub prevent_default: bool,
    /// A segment was stroked into the raster.
    pub stroked: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing { last: Point },
}

/// Undo the on-screen zoom: client offset from the surface's top-left, divided by zoom.
#[inline]
pub fn to_buffer_space(client: ClientPoint, surface_origin: ClientPoint, zoom: f32) -> Point {
    Point::new((client.x - surface_origin.x) / zoom, (client.y - surface_origin.y) / zoom)
}

#[derive(Debug, Default)]
pub struct StrokeRecorder {
    state: StrokeState,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Abandon any gesture in progress (e.g. the raster was swapped out).
    pub fn reset(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// Feed one event. `config` is read now, so a tool/color/size/zoom change in the
    /// middle of a gesture applies to the very next segment.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        config: &DrawingConfig,
        surface_origin: ClientPoint,
        raster: &mut RasterBuffer,
    ) -> PointerOutcome {
        let mut outcome = PointerOutcome { prevent_default: true, stroked: false };
        match event.phase {
            PointerPhase::Down => {
                let Some(client) = event.client_position() else { return outcome };
                let at = to_buffer_space(client, surface_origin, config.zoom);
                self.state = StrokeState::Drawing { last: at };
            }
            PointerPhase::Move => {
                // A stray move with no preceding down draws nothing.
                let StrokeState::Drawing { last } = self.state else { return outcome };
                let Some(client) = event.client_position() else { return outcome };
                let to = to_buffer_space(client, surface_origin, config.zoom);
                stroke_segment(raster, last, to, config.brush_size as f32, config.stroke_color());
                trace!(x0 = last.x, y0 = last.y, x1 = to.x, y1 = to.y, "segment");
                self.state = StrokeState::Drawing { last: to };
                outcome.stroked = true;
            }
            PointerPhase::Up | PointerPhase::Leave => {
                self.state = StrokeState::Idle;
            }
        }
        outcome
    }
}

/// Paint the segment a->b with round caps: every pixel whose center lies within
/// width/2 of the segment takes `color`. Consecutive segments share an endpoint,
/// so their caps overlap into round joins.
pub fn stroke_segment(raster: &mut RasterBuffer, a: Point, b: Point, width: f32, color: Color) {
    if raster.is_empty() || width <= 0.0 {
        return;
    }
    let r = width / 2.0;
    let r2 = r * r;
    let argb = color.to_argb();

    // Bounding box of the capsule, clipped to the raster.
    let x_min = ((a.x.min(b.x) - r).floor() as i64).max(0);
    let y_min = ((a.y.min(b.y) - r).floor() as i64).max(0);
    let x_max = ((a.x.max(b.x) + r).ceil() as i64).min(raster.width as i64 - 1);
    let y_max = ((a.y.max(b.y) + r).ceil() as i64).min(raster.height as i64 - 1);
    if x_min > x_max || y_min > y_max {
        return;
    }

    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;

    for y in y_min..=y_max {
        let py = y as f32 + 0.5;
        for x in x_min..=x_max {
            let px = x as f32 + 0.5;
            // Closest point on the segment (a point if the segment has no length).
            let t = if len2 > 0.0 {
                (((px - a.x) * dx + (py - a.y) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (cx, cy) = (a.x + t * dx, a.y + t * dy);
            let (ex, ey) = (px - cx, py - cy);
            if ex * ex + ey * ey <= r2 {
                raster.put_pixel(x, y, argb);
            }
        }
    }
}
