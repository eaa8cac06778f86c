// Where the zoomed surface sits in the window, and how the window frame is built.
// Visual: a grey backdrop with the white drawing surface on it, scaled by zoom;
// centered while it fits, pinned to the top-left once it overflows.

use crate::raster::RasterBuffer;
use crate::types::{ClientPoint, Color};

/// Backdrop around the surface.
pub const BACKDROP: Color = Color::rgb(0x1F, 0x29, 0x37);

/// On-screen top-left of the surface, per axis: centered if the zoomed size fits,
/// otherwise 0.
pub fn surface_origin(window_w: usize, window_h: usize, raster: &RasterBuffer, zoom: f32) -> ClientPoint {
    let place = |window: usize, len: usize| {
        let shown = len as f32 * zoom;
        let free = window as f32 - shown;
        if free > 0.0 { (free / 2.0).floor() } else { 0.0 }
    };
    ClientPoint::new(place(window_w, raster.width), place(window_h, raster.height))
}

/// Paint `frame` (the window buffer): backdrop, then the raster scaled by `zoom`
/// (nearest neighbour) with its top-left at `origin`.
pub fn compose(frame: &mut RasterBuffer, raster: &RasterBuffer, zoom: f32, origin: ClientPoint) {
    frame.fill(BACKDROP);
    if raster.is_empty() || zoom <= 0.0 {
        return;
    }
    let x0 = origin.x as i64;
    let y0 = origin.y as i64;
    let shown_w = (raster.width as f32 * zoom).round() as i64;
    let shown_h = (raster.height as f32 * zoom).round() as i64;

    let x_end = (x0 + shown_w).min(frame.width as i64);
    let y_end = (y0 + shown_h).min(frame.height as i64);
    for sy in y0.max(0)..y_end {
        // Map the screen row back into the raster, same math as pointer input.
        let ry = ((((sy - y0) as f32) + 0.5) / zoom) as usize;
        if ry >= raster.height {
            continue;
        }
        let src_row = ry * raster.width;
        let dst_row = sy as usize * frame.width;
        for sx in x0.max(0)..x_end {
            let rx = ((((sx - x0) as f32) + 0.5) / zoom) as usize;
            if rx >= raster.width {
                continue;
            }
            frame.pixels[dst_row + sx as usize] = raster.pixels[src_row + rx];
        }
    }
}
