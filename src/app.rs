// The desktop host: plays the toolbar (keyboard), the layout (window + HUD) and the
// download primitive (export directory) around the drawing surface.
//
// What you SEE:
// • A grey window with a white drawing surface; HUD line across the top.
// • Hold Left Mouse to paint. B brush, E eraser, 1..0 / Tab colors, [ ] size.
// • - / = zoom, R reset zoom, P cycle canvas size, C clear, S save drawing.png, ESC quits.

use minifb::Key;
use tracing::info;

use crate::config::{self, Settings};
use crate::draw::{draw_crosshair, draw_text_5x7, fill_rect, Drawer, PointerTracker};
use crate::error::Error;
use crate::export::DirectorySink;
use crate::raster::RasterBuffer;
use crate::sizer::ResizeNotifier;
use crate::surface::SurfaceController;
use crate::types::{CanvasSize, ClientPoint, Color, DrawingConfig, Extent, Tool};
use crate::viewport::{compose, surface_origin, BACKDROP};

/// Height of the HUD strip; the surface's container is the window below it.
pub const HUD_HEIGHT: usize = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectTool(Tool),
    SelectColor(usize),
    NextColor,
    BrushSmaller,
    BrushLarger,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    NextCanvasSize,
    Clear,
    Export,
    Quit,
}

/// What the loop has to do after a command updated the host state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAction {
    Reconfigure,
    Clear,
    Export,
    Quit,
}

pub fn command_for_key(key: Key) -> Option<Command> {
    let digit = |n: usize| Some(Command::SelectColor(n));
    match key {
        Key::B => Some(Command::SelectTool(Tool::Brush)),
        Key::E => Some(Command::SelectTool(Tool::Eraser)),
        Key::Key1 => digit(0),
        Key::Key2 => digit(1),
        Key::Key3 => digit(2),
        Key::Key4 => digit(3),
        Key::Key5 => digit(4),
        Key::Key6 => digit(5),
        Key::Key7 => digit(6),
        Key::Key8 => digit(7),
        Key::Key9 => digit(8),
        Key::Key0 => digit(9),
        Key::Tab => Some(Command::NextColor),
        Key::LeftBracket => Some(Command::BrushSmaller),
        Key::RightBracket => Some(Command::BrushLarger),
        Key::Equal => Some(Command::ZoomIn),
        Key::Minus => Some(Command::ZoomOut),
        Key::R => Some(Command::ZoomReset),
        Key::P => Some(Command::NextCanvasSize),
        Key::C => Some(Command::Clear),
        Key::S => Some(Command::Export),
        Key::Escape => Some(Command::Quit),
        _ => None,
    }
}

/// Toolbar state: the current configuration plus where we are in the palette and
/// size cycle. The surface only ever sees `config`.
pub struct HostState {
    pub config: DrawingConfig,
    palette: Vec<Color>,
    sizes: Vec<CanvasSize>,
    color_index: usize,
    size_index: usize,
}

impl HostState {
    pub fn new(settings: &Settings) -> Self {
        let config = settings.drawing;
        let palette = settings.palette.clone();
        let sizes = settings.size_cycle();
        let color_index = palette.iter().position(|c| *c == config.color).unwrap_or(0);
        let size_index = sizes.iter().position(|s| *s == config.canvas_size).unwrap_or(0);
        Self { config, palette, sizes, color_index, size_index }
    }

    pub fn apply(&mut self, cmd: Command) -> Option<HostAction> {
        let c = &mut self.config;
        match cmd {
            Command::SelectTool(tool) => c.tool = tool,
            Command::SelectColor(i) => {
                let color = *self.palette.get(i)?;
                self.color_index = i;
                c.color = color;
            }
            Command::NextColor => {
                self.color_index = (self.color_index + 1) % self.palette.len();
                c.color = self.palette[self.color_index];
            }
            Command::BrushSmaller => c.brush_size = config::clamp_brush(c.brush_size as i64 - 1),
            Command::BrushLarger => c.brush_size = config::clamp_brush(c.brush_size as i64 + 1),
            Command::ZoomIn => c.zoom = config::zoom_in(c.zoom),
            Command::ZoomOut => c.zoom = config::zoom_out(c.zoom),
            Command::ZoomReset => c.zoom = 1.0,
            Command::NextCanvasSize => {
                self.size_index = (self.size_index + 1) % self.sizes.len();
                c.canvas_size = self.sizes[self.size_index];
            }
            Command::Clear => return Some(HostAction::Clear),
            Command::Export => return Some(HostAction::Export),
            Command::Quit => return Some(HostAction::Quit),
        }
        Some(HostAction::Reconfigure)
    }
}

/// The surface's container: the window minus the HUD strip.
fn content_extent(window_w: usize, window_h: usize) -> Extent {
    Extent::new(window_w as i64, window_h.saturating_sub(HUD_HEIGHT) as i64)
}

/// HUD line, e.g. "BRUSH | #EF4444 | SIZE 5 | ZOOM 100% | FIT 800X600".
pub fn hud_text(config: &DrawingConfig, raster: &RasterBuffer, status: &str) -> String {
    let size = match config.canvas_size {
        CanvasSize::FitScreen => format!("FIT {}X{}", raster.width, raster.height),
        fixed => fixed.label(),
    };
    let mut line = format!(
        "{} | {} | SIZE {} | ZOOM {:.0}% | {}",
        config.tool.label(),
        config.color.to_hex(),
        config.brush_size,
        config.zoom * 100.0,
        size
    );
    if !status.is_empty() {
        line.push_str(" | ");
        line.push_str(status);
    }
    line
}

/// Run until the window closes or ESC.
pub fn run(settings: &Settings) -> Result<(), Error> {
    let mut drawer = Drawer::new(&settings.window_title, settings.window_width, settings.window_height)?;
    let mut state = HostState::new(settings);

    let (w, h) = drawer.size();
    let container = ResizeNotifier::new(content_extent(w, h));
    let mut surface = SurfaceController::new(state.config);
    surface.mount(&container);

    let mut sink = DirectorySink::new(&settings.export_dir);
    let mut tracker = PointerTracker::default();
    let mut frame = RasterBuffer::filled(w, h, BACKDROP);
    let mut status = String::new();

    'frames: while drawer.is_open() {
        /* 1) Container size: the window may have been resized since last frame. */
        let (w, h) = drawer.size();
        container.set_size(content_extent(w, h));

        /* 2) Toolbar keys */
        for key in drawer.keys_pressed_once() {
            let Some(action) = command_for_key(key).and_then(|cmd| state.apply(cmd)) else {
                continue;
            };
            match action {
                HostAction::Reconfigure => {
                    surface.configure(state.config, &container);
                    status.clear();
                }
                HostAction::Clear => {
                    if surface.clear() {
                        status = "CLEARED".to_string();
                    }
                }
                HostAction::Export => {
                    status = if surface.export(&mut sink) { "SAVED" } else { "SAVE FAILED" }.to_string();
                }
                HostAction::Quit => break 'frames,
            }
        }
        surface.sync();

        /* 3) Mouse -> pointer events, only while over the surface */
        let zoom = surface.config().zoom;
        let raster = surface.raster();
        let mut origin = surface_origin(w, h.saturating_sub(HUD_HEIGHT), raster, zoom);
        origin.y += HUD_HEIGHT as f32;
        let (shown_w, shown_h) = (raster.width as f32 * zoom, raster.height as f32 * zoom);
        let over_surface = |p: &ClientPoint| {
            p.x >= origin.x && p.y >= origin.y && p.x < origin.x + shown_w && p.y < origin.y + shown_h
        };
        let mouse = drawer.mouse_pos();
        for event in tracker.poll(mouse.filter(over_surface), drawer.left_mouse_down()) {
            surface.handle_pointer(&event, origin);
        }

        /* 4) Compose the frame: backdrop, zoomed surface, crosshair, HUD */
        if frame.width != w || frame.height != h {
            frame = RasterBuffer::filled(w, h, BACKDROP);
        }
        compose(&mut frame, surface.raster(), zoom, origin);
        if let Some(p) = mouse.filter(over_surface) {
            draw_crosshair(&mut frame, p.x as i64, p.y as i64, 8, Color::rgb(0x38, 0xBD, 0xF8));
        }
        fill_rect(&mut frame, 0, 0, w as i64, HUD_HEIGHT as i64, Color::rgb(0x11, 0x18, 0x27));
        let hud = hud_text(surface.config(), surface.raster(), &status);
        let end = draw_text_5x7(&mut frame, 4, 3, &hud, Color::WHITE);
        fill_rect(&mut frame, end + 4, 3, 7, 7, surface.config().stroke_color());

        /* 5) Present */
        drawer.present(&frame)?;
    }

    surface.teardown();
    info!("window closed");
    Ok(())
}
