//! The surface controller: owns the raster and hands it to the sizer, the stroke
//! recorder and clear/export. Everything the host does goes through here.
//!
//! A zero-area raster means "not ready": pointer events, clear and export are
//! silent no-ops until the first successful reconcile.

use tracing::{debug, info, warn};

use crate::export::{self, DownloadSink, EXPORT_FILE_NAME};
use crate::raster::RasterBuffer;
use crate::sizer::{ContainerObserver, SurfaceSizer};
use crate::stroke::{PointerEvent, PointerOutcome, StrokeRecorder};
use crate::types::{BACKGROUND, ClientPoint, Color, DrawingConfig};

pub struct SurfaceController {
    raster: RasterBuffer,
    config: DrawingConfig,
    sizer: SurfaceSizer,
    recorder: StrokeRecorder,
    background: Color,
}

impl SurfaceController {
    /// Unmounted surface: no raster yet.
    pub fn new(config: DrawingConfig) -> Self {
        Self {
            raster: RasterBuffer::empty(),
            config,
            sizer: SurfaceSizer::new(BACKGROUND),
            recorder: StrokeRecorder::new(),
            background: BACKGROUND,
        }
    }

    /// Attach to the host's container and apply the configured target size.
    pub fn mount(&mut self, container: &dyn ContainerObserver) {
        self.sizer.apply_target(self.config.canvas_size, container, &mut self.raster);
        info!(width = self.raster.width, height = self.raster.height, "surface mounted");
    }

    /// Replace the drawing configuration. Tool, color, size and zoom apply to the
    /// next segment; a different target size is applied right away.
    pub fn configure(&mut self, config: DrawingConfig, container: &dyn ContainerObserver) {
        let size_changed = config.canvas_size != self.config.canvas_size;
        self.config = config;
        if size_changed {
            self.sync();
            self.sizer.apply_target(config.canvas_size, container, &mut self.raster);
        }
    }

    /// Apply container notifications that arrived since the last call.
    pub fn sync(&mut self) -> usize {
        let applied = self.sizer.flush(&mut self.raster);
        if applied > 0 {
            debug!(applied, width = self.raster.width, height = self.raster.height, "container resize");
        }
        applied
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent, surface_origin: ClientPoint) -> PointerOutcome {
        self.sync();
        if self.raster.is_empty() {
            return PointerOutcome::default();
        }
        self.recorder.handle(event, &self.config, surface_origin, &mut self.raster)
    }

    /// Fill the raster with background. False while not ready.
    pub fn clear(&mut self) -> bool {
        self.sync();
        export::clear(&mut self.raster, self.background)
    }

    /// PNG bytes of the flattened surface, or None while not ready.
    pub fn export_png(&mut self) -> Option<Vec<u8>> {
        self.sync();
        export::export_png(&self.raster, self.background)
    }

    /// Export and offer the result to `sink` as `drawing.png`.
    pub fn export(&mut self, sink: &mut dyn DownloadSink) -> bool {
        let Some(bytes) = self.export_png() else { return false };
        match sink.offer(EXPORT_FILE_NAME, &bytes) {
            Ok(()) => true,
            Err(e) => {
                warn!("export not delivered: {e}");
                false
            }
        }
    }

    /// Stop observing the container and abandon any gesture. The raster is kept.
    pub fn teardown(&mut self) {
        self.sizer.release();
        self.recorder.reset();
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        !self.raster.is_empty()
    }

    pub fn is_drawing(&self) -> bool {
        self.recorder.is_drawing()
    }

    pub fn is_observing_container(&self) -> bool {
        self.sizer.is_observing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizer::ResizeNotifier;
    use crate::stroke::PointerPhase;
    use crate::types::{CanvasSize, Extent, Tool};

    fn fixed(w: u32, h: u32) -> DrawingConfig {
        DrawingConfig { canvas_size: CanvasSize::Fixed { width: w, height: h }, ..Default::default() }
    }

    #[test]
    fn unmounted_surface_ignores_everything() {
        let mut surface = SurfaceController::new(DrawingConfig::default());
        assert!(!surface.is_ready());
        let out = surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Down, 1.0, 1.0), ClientPoint::default());
        assert_eq!(out, PointerOutcome::default());
        assert!(!surface.is_drawing());
        assert!(!surface.clear());
        assert!(surface.export_png().is_none());
    }

    #[test]
    fn resize_is_applied_before_drawing() {
        let notifier = ResizeNotifier::new(Extent::new(20, 20));
        let mut surface = SurfaceController::new(DrawingConfig::default());
        surface.mount(&notifier);
        notifier.set_size(Extent::new(40, 20));

        let o = ClientPoint::default();
        surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Down, 30.0, 10.0), o);
        surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Move, 35.0, 10.0), o);
        assert_eq!(surface.raster().width, 40);
        assert_eq!(surface.raster().get(32, 10), Some(Color::BLACK));
    }

    #[test]
    fn switching_to_fixed_releases_observation() {
        let notifier = ResizeNotifier::new(Extent::new(50, 50));
        let mut surface = SurfaceController::new(DrawingConfig::default());
        surface.mount(&notifier);
        assert!(surface.is_observing_container());

        surface.configure(fixed(10, 10), &notifier);
        assert!(!surface.is_observing_container());
        assert_eq!(notifier.listener_count(), 0);
        assert_eq!(surface.raster().extent(), Extent::new(10, 10));

        surface.configure(DrawingConfig::default(), &notifier);
        assert!(surface.is_observing_container());
        assert_eq!(surface.raster().extent(), Extent::new(50, 50));

        surface.teardown();
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn dropping_the_surface_releases_observation() {
        let notifier = ResizeNotifier::new(Extent::new(50, 50));
        {
            let mut surface = SurfaceController::new(DrawingConfig::default());
            surface.mount(&notifier);
            assert_eq!(notifier.listener_count(), 1);
        }
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn tool_change_mid_gesture_applies_to_next_segment() {
        let notifier = ResizeNotifier::default();
        let mut surface = SurfaceController::new(fixed(60, 20));
        surface.mount(&notifier);
        let o = ClientPoint::default();
        surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Down, 5.0, 10.0), o);
        surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Move, 55.0, 10.0), o);
        assert_eq!(surface.raster().get(30, 10), Some(Color::BLACK));

        let eraser = DrawingConfig { tool: Tool::Eraser, ..fixed(60, 20) };
        surface.configure(eraser, &notifier);
        assert!(surface.is_drawing());
        surface.handle_pointer(&PointerEvent::mouse(PointerPhase::Move, 5.0, 10.0), o);
        assert_eq!(surface.raster().get(30, 10), Some(BACKGROUND));
    }
}
