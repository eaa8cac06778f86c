//! Surface sizing: keeps the raster's physical size in step with the requested
//! target (follow the container, or a fixed W x H) without losing what was drawn.
//!
//! Container observation is modelled as `observe(callback) -> Subscription`.
//! Notifications are queued by the callback and applied, in arrival order, by
//! [`SurfaceSizer::flush`]; each one is a complete [`reconcile`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, info};

use crate::raster::RasterBuffer;
use crate::types::{CanvasSize, Color, Extent};

pub type ResizeCallback = Box<dyn FnMut(Extent)>;

/// Something with a content box whose size can change under us (a window, a pane).
pub trait ContainerObserver {
    /// Current content-box size. (0,0) while it is not laid out yet.
    fn measure(&self) -> Extent;

    /// Deliver every later size change to `callback` until the handle is dropped.
    fn observe(&self, callback: ResizeCallback) -> Subscription;
}

/// Scoped observation handle. Dropping it (or calling `cancel`) stops delivery.
#[must_use = "dropping a Subscription immediately stops the observation"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Release now instead of at end of scope.
    pub fn cancel(mut self) {
        if let Some(f) = self.cancel.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.cancel.take() {
            f();
        }
    }
}

#[derive(Default)]
struct NotifierState {
    size: Extent,
    next_id: u64,
    listeners: Vec<(u64, ResizeCallback)>,
}

/// In-process [`ContainerObserver`]: the owner pushes sizes in with `set_size`,
/// listeners hear about every change. The desktop host feeds it the window size.
///
/// Callbacks run while the listener list is borrowed, so they must not
/// subscribe or unsubscribe from inside the callback.
#[derive(Clone, Default)]
pub struct ResizeNotifier {
    inner: Rc<RefCell<NotifierState>>,
}

impl ResizeNotifier {
    pub fn new(initial: Extent) -> Self {
        let notifier = Self::default();
        notifier.inner.borrow_mut().size = initial;
        notifier
    }

    /// Record a new measured size; listeners are told only when it actually changed.
    pub fn set_size(&self, size: Extent) {
        let mut state = self.inner.borrow_mut();
        if state.size == size {
            return;
        }
        state.size = size;
        for (_, cb) in state.listeners.iter_mut() {
            cb(size);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl ContainerObserver for ResizeNotifier {
    fn measure(&self) -> Extent {
        self.inner.borrow().size
    }

    fn observe(&self, callback: ResizeCallback) -> Subscription {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, callback));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

/// Resize `raster` to `size`, keeping content in the overlap and painting new area
/// with `background`. Non-measurable sizes are skipped. Returns whether it resized.
pub fn reconcile(raster: &mut RasterBuffer, size: Extent, background: Color) -> bool {
    if !size.is_measurable() {
        debug!(width = size.width, height = size.height, "reconcile skipped: not measurable");
        return false;
    }
    let (w, h) = (size.width as usize, size.height as usize);

    // First use: nothing to carry over.
    if raster.is_empty() {
        *raster = RasterBuffer::filled(w, h, background);
        debug!(width = w, height = h, "raster allocated");
        return true;
    }

    // Swap in a fresh buffer: fill first, then restore the old pixels at (0,0).
    let previous = std::mem::replace(raster, RasterBuffer::empty());
    *raster = previous.resized(w, h, background);
    debug!(
        from_w = previous.width,
        from_h = previous.height,
        width = w,
        height = h,
        "raster resized"
    );
    true
}

/// Applies the target size mode and owns the container subscription while in
/// fit-container mode.
pub struct SurfaceSizer {
    mode: Option<CanvasSize>,
    subscription: Option<Subscription>,
    pending: Rc<RefCell<VecDeque<Extent>>>,
    background: Color,
}

impl SurfaceSizer {
    pub fn new(background: Color) -> Self {
        Self { mode: None, subscription: None, pending: Rc::default(), background }
    }

    /// The target last applied, if any.
    pub fn mode(&self) -> Option<CanvasSize> {
        self.mode
    }

    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// Switch to `target`. Re-applying the current target is a no-op; any other
    /// change first tears down the container observation.
    pub fn apply_target(
        &mut self,
        target: CanvasSize,
        container: &dyn ContainerObserver,
        raster: &mut RasterBuffer,
    ) {
        if self.mode == Some(target) {
            return;
        }
        self.release();
        info!(size = %target.label(), "canvas size mode");

        match target {
            CanvasSize::FitScreen => {
                let queue = Rc::clone(&self.pending);
                self.subscription = Some(container.observe(Box::new(move |size| {
                    if size.is_measurable() {
                        queue.borrow_mut().push_back(size);
                    }
                })));
                // Initial mount: take the container's size right away.
                reconcile(raster, container.measure(), self.background);
            }
            CanvasSize::Fixed { width, height } => {
                reconcile(raster, Extent::new(width as i64, height as i64), self.background);
            }
        }
        self.mode = Some(target);
    }

    /// Apply queued container notifications in order. Returns how many resized.
    pub fn flush(&mut self, raster: &mut RasterBuffer) -> usize {
        let mut applied = 0;
        loop {
            // Pop in its own statement so the queue is not borrowed during reconcile.
            let next = self.pending.borrow_mut().pop_front();
            let Some(size) = next else { break };
            if reconcile(raster, size, self.background) {
                applied += 1;
            }
        }
        applied
    }

    /// Drop the container observation and forget queued notifications.
    /// The next `apply_target` re-applies whatever it is given.
    pub fn release(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
            debug!("container observation released");
        }
        self.pending.borrow_mut().clear();
        self.mode = None;
    }
}
