// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the composed frame (backdrop + zoomed surface).
// 2) Mouse polling turned into pointer events for the stroke recorder.
// 3) A crosshair that follows your mouse.
// 4) A tiny 5x7 bitmap font to render the HUD line on top.

use crate::error::Error;
use crate::raster::RasterBuffer;
use crate::stroke::{PointerEvent, PointerPhase};
use crate::types::{ClientPoint, Color};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, frame: &RasterBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Current inner size; this is what the surface fits itself to.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixels, None while the cursor is outside the window.
    pub fn mouse_pos(&self) -> Option<ClientPoint> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| ClientPoint::new(x, y))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Keys that went down since the last frame (no auto-repeat).
    pub fn keys_pressed_once(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }
}

/* ---------- Polled mouse state -> pointer events ---------- */

/// minifb only tells us "where is the mouse" and "is the button held" each frame.
/// This turns that into down/move/up/leave the way a browser would deliver them
/// for an element: `pos` must be None whenever the cursor is off the surface.
#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    last: Option<ClientPoint>,
}

impl PointerTracker {
    pub fn poll(&mut self, pos: Option<ClientPoint>, down: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        match pos {
            None => {
                if let Some(p) = self.last.take() {
                    events.push(PointerEvent::mouse(PointerPhase::Leave, p.x, p.y));
                }
            }
            Some(p) => {
                let moved = self.last != Some(p);
                let phase = match (self.was_down, down) {
                    (false, true) => Some(PointerPhase::Down),
                    (true, false) => Some(PointerPhase::Up),
                    _ if moved => Some(PointerPhase::Move),
                    _ => None,
                };
                if let Some(phase) = phase {
                    events.push(PointerEvent::mouse(phase, p.x, p.y));
                }
                self.last = Some(p);
            }
        }
        self.was_down = down;
        events
    }
}

/* ---------- Software drawing: rects, crosshair, tiny bitmap font ---------- */

/// Solid rectangle, clipped to the frame.
/// Visual: used for the HUD strip and the color swatch.
pub fn fill_rect(fb: &mut RasterBuffer, x: i64, y: i64, w: i64, h: i64, color: Color) {
    let argb = color.to_argb();
    for yy in y..y + h {
        for xx in x..x + w {
            fb.put_pixel(xx, yy, argb);
        }
    }
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut RasterBuffer, x0: i64, y0: i64, x1: i64, y1: i64, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        fb.put_pixel(x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) follows your mouse.
pub fn draw_crosshair(fb: &mut RasterBuffer, cx: i64, cy: i64, size: i64, color: Color) {
    let c = color.to_argb();
    draw_line(fb, cx - size, cy, cx - 2, cy, c);
    draw_line(fb, cx + 2, cy, cx + size, cy, c);
    draw_line(fb, cx, cy - size, cx, cy - 2, c);
    draw_line(fb, cx, cy + 2, cx, cy + size, c);
    fb.put_pixel(cx, cy, c);
}

/* ---------- 5x7 bitmap font (upper case, digits, HUD punctuation) ---------- */

/// Return a 5x7 glyph bitmap.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '%' => g!(0b11001,0b11001,0b00010,0b00100,0b01000,0b10011,0b10011),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut RasterBuffer, x: i64, y: i64, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch.to_ascii_uppercase()) else { return };
    // Shadow first, then the glyph on top.
    for (dx, dy, c) in [(1, 1, 0xFF00_0000u32), (0, 0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    fb.put_pixel(x + rx as i64 + dx, y + ry as i64 + dy, c);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; returns the x just past the last glyph.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut RasterBuffer, mut x: i64, y: i64, text: &str, color: Color) -> i64 {
    let c = color.to_argb();
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, c);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
    x
}
