//! End-to-end behaviour of the drawing surface through its public API:
//! resize preservation, zoom mapping, strokes, clear and export.

use doodle_pad::SurfaceController;
use doodle_pad::export::{DownloadSink, EXPORT_FILE_NAME};
use doodle_pad::sizer::ResizeNotifier;
use doodle_pad::stroke::{PointerEvent, PointerPhase};
use doodle_pad::types::{BACKGROUND, CanvasSize, ClientPoint, Color, DrawingConfig, Extent, Tool};
use doodle_pad::{Error, config};

const RED: Color = Color::rgb(0xFF, 0x00, 0x00);

fn red_brush(size: u32) -> DrawingConfig {
    DrawingConfig { color: "#FF0000".parse().unwrap(), brush_size: size, ..Default::default() }
}

fn drag(surface: &mut SurfaceController, origin: ClientPoint, points: &[(f32, f32)]) {
    let (x, y) = points[0];
    surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Down, x, y), origin);
    for &(x, y) in &points[1..] {
        surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Move, x, y), origin);
    }
    let (x, y) = points[points.len() - 1];
    surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Up, x, y), origin);
}

fn mounted(config: DrawingConfig, container: Extent) -> (SurfaceController, ResizeNotifier) {
    let notifier = ResizeNotifier::new(container);
    let mut surface = SurfaceController::new(config);
    surface.mount(&notifier);
    (surface, notifier)
}

#[derive(Default)]
struct Downloads(Vec<(String, Vec<u8>)>);

impl DownloadSink for Downloads {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), Error> {
        self.0.push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

struct BrokenSink;

impl DownloadSink for BrokenSink {
    fn offer(&mut self, _: &str, _: &[u8]) -> Result<(), Error> {
        Err(Error::Io(std::io::Error::other("disk full")))
    }
}

#[test]
fn red_stroke_on_fresh_800_by_600() {
    let (mut surface, _container) = mounted(red_brush(10), Extent::new(800, 600));
    let raster = surface.raster();
    assert_eq!((raster.width, raster.height), (800, 600));
    assert!(raster.pixels.iter().all(|&p| p == BACKGROUND.to_argb()));

    drag(&mut surface, ClientPoint::default(), &[(10.0, 10.0), (100.0, 10.0)]);
    let raster = surface.raster();

    // ~10px band centered on y=10 between the endpoints
    for x in [10, 55, 100] {
        assert_eq!(raster.get(x, 10), Some(RED), "x={x}");
        assert_eq!(raster.get(x, 6), Some(RED), "x={x}");
        assert_eq!(raster.get(x, 14), Some(RED), "x={x}");
        assert_eq!(raster.get(x, 16), Some(BACKGROUND), "x={x}");
        assert_eq!(raster.get(x, 3), Some(BACKGROUND), "x={x}");
    }
    // round caps poke out along the axis, not at the corners
    assert_eq!(raster.get(6, 10), Some(RED));
    assert_eq!(raster.get(103, 10), Some(RED));
    assert_eq!(raster.get(5, 5), Some(BACKGROUND));
    assert_eq!(raster.get(200, 10), Some(BACKGROUND));
}

#[test]
fn strokes_land_under_the_cursor_at_any_zoom() {
    for zoom in [0.5_f32, 1.0, 2.0, 3.0] {
        let config = DrawingConfig {
            zoom,
            canvas_size: CanvasSize::Fixed { width: 200, height: 200 },
            ..red_brush(3)
        };
        let (mut surface, _c) = mounted(config, Extent::ZERO);
        let origin = ClientPoint::new(40.0, 25.0);

        // Screen offset (dx, dy) from the surface's corner must hit buffer (dx/z, dy/z).
        let (dx, dy) = (60.0, 30.0);
        let p = (origin.x + dx, origin.y + dy);
        drag(&mut surface, origin, &[p, p]);

        let (bx, by) = ((dx / zoom) as usize, (dy / zoom) as usize);
        assert_eq!(surface.raster().get(bx, by), Some(RED), "zoom={zoom}");
    }
}

#[test]
fn drawing_survives_a_resize_sequence() {
    let (mut surface, container) = mounted(red_brush(4), Extent::new(100, 100));
    drag(&mut surface, ClientPoint::default(), &[(10.0, 10.0), (90.0, 90.0)]);
    let before = surface.raster().clone();

    container.set_size(Extent::new(150, 60));
    surface.sync();
    let grown = surface.raster().clone();
    assert_eq!(grown.extent(), Extent::new(150, 60));
    for y in 0..60 {
        for x in 0..150 {
            let expected = if x < 100 { before.get(x, y) } else { Some(BACKGROUND) };
            assert_eq!(grown.get(x, y), expected, "({x},{y})");
        }
    }

    // A collapsed container is "not measurable": nothing changes.
    container.set_size(Extent::new(0, 0));
    surface.sync();
    assert_eq!(surface.raster(), &grown);

    container.set_size(Extent::new(100, 100));
    surface.sync();
    let back = surface.raster();
    for y in 0..100 {
        for x in 0..100 {
            let expected = if y < 60 { before.get(x, y) } else { Some(BACKGROUND) };
            assert_eq!(back.get(x, y), expected, "({x},{y})");
        }
    }
}

#[test]
fn switching_to_fixed_size_keeps_content() {
    let (mut surface, container) = mounted(red_brush(6), Extent::new(300, 200));
    drag(&mut surface, ClientPoint::default(), &[(20.0, 20.0), (60.0, 20.0)]);

    let fixed = DrawingConfig { canvas_size: CanvasSize::Fixed { width: 1024, height: 768 }, ..red_brush(6) };
    surface.configure(fixed, &container);
    assert_eq!(surface.raster().extent(), Extent::new(1024, 768));
    assert_eq!(surface.raster().get(40, 20), Some(RED));
    assert_eq!(surface.raster().get(900, 700), Some(BACKGROUND));

    // Container changes no longer matter.
    container.set_size(Extent::new(50, 50));
    surface.sync();
    assert_eq!(surface.raster().extent(), Extent::new(1024, 768));
}

#[test]
fn eraser_equals_background_brush() {
    let base = {
        let (mut s, _c) = mounted(red_brush(20), Extent::new(120, 80));
        drag(&mut s, ClientPoint::default(), &[(10.0, 40.0), (110.0, 40.0)]);
        s
    };
    let erase_with = |config: DrawingConfig| {
        let notifier = ResizeNotifier::new(Extent::new(120, 80));
        let mut s = SurfaceController::new(red_brush(20));
        s.mount(&notifier);
        drag(&mut s, ClientPoint::default(), &[(10.0, 40.0), (110.0, 40.0)]);
        s.configure(config, &notifier);
        drag(&mut s, ClientPoint::default(), &[(60.0, 0.0), (60.0, 80.0), (20.0, 70.0)]);
        s.raster().clone()
    };

    let eraser = erase_with(DrawingConfig { tool: Tool::Eraser, color: Color::rgb(9, 99, 199), ..red_brush(8) });
    let white = erase_with(DrawingConfig { color: BACKGROUND, ..red_brush(8) });
    assert_eq!(eraser, white);
    assert_ne!(&eraser, base.raster());
    assert_eq!(eraser.get(60, 40), Some(BACKGROUND));
}

#[test]
fn clear_twice_equals_clear_once() {
    let (mut surface, _c) = mounted(red_brush(7), Extent::new(64, 64));
    drag(&mut surface, ClientPoint::default(), &[(0.0, 0.0), (64.0, 64.0)]);
    assert!(surface.clear());
    let once = surface.raster().clone();
    assert!(surface.clear());
    assert_eq!(surface.raster(), &once);
    assert!(once.pixels.iter().all(|&p| p == BACKGROUND.to_argb()));
}

#[test]
fn export_is_opaque_and_repeatable() {
    let (mut surface, _c) = mounted(red_brush(10), Extent::new(120, 40));
    drag(&mut surface, ClientPoint::default(), &[(10.0, 20.0), (100.0, 20.0)]);

    let mut downloads = Downloads::default();
    assert!(surface.export(&mut downloads));
    assert!(surface.export(&mut downloads));
    assert_eq!(downloads.0.len(), 2);
    assert_eq!(downloads.0[0].0, EXPORT_FILE_NAME);
    assert_eq!(downloads.0[0].1, downloads.0[1].1, "re-export must be byte-identical");

    let decoded = image::load_from_memory(&downloads.0[0].1).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (120, 40));
    assert_eq!(decoded.get_pixel(2, 2).0, [255, 255, 255, 255]);
    assert_eq!(decoded.get_pixel(50, 20).0, [255, 0, 0, 255]);
    assert!(decoded.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn export_failures_degrade_to_false() {
    let mut unmounted = SurfaceController::new(DrawingConfig::default());
    let mut downloads = Downloads::default();
    assert!(!unmounted.export(&mut downloads));
    assert!(downloads.0.is_empty());

    let (mut surface, _c) = mounted(DrawingConfig::default(), Extent::new(10, 10));
    assert!(!surface.export(&mut BrokenSink));
}

#[test]
fn stray_moves_and_taps_leave_no_marks() {
    let (mut surface, _c) = mounted(red_brush(10), Extent::new(50, 50));
    let o = ClientPoint::default();
    surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Move, 10.0, 10.0), o);
    surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Move, 40.0, 40.0), o);
    surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Down, 25.0, 25.0), o);
    surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Up, 25.0, 25.0), o);
    assert!(!surface.is_drawing());
    assert!(surface.raster().pixels.iter().all(|&p| p == BACKGROUND.to_argb()));
}

#[test]
fn settings_validation_guards_fixed_sizes() {
    assert!(config::validate_size(CanvasSize::Fixed { width: 0, height: 5 }).is_err());
    assert!(config::validate_size(CanvasSize::Fixed { width: 1, height: 1 }).is_ok());
    assert!(config::validate_size(CanvasSize::FitScreen).is_ok());
}
