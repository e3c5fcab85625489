use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::geometry::Cell;

/// One display layer: the snake and the food each get their own.
pub trait RenderSurface {
    fn add(&mut self, cells: &[Cell]);
    fn remove(&mut self, cells: &[Cell]);
    fn clear(&mut self);
    fn request_redraw(&mut self);
}

impl<T: RenderSurface + ?Sized> RenderSurface for Box<T> {
    fn add(&mut self, cells: &[Cell]) {
        (**self).add(cells)
    }

    fn remove(&mut self, cells: &[Cell]) {
        (**self).remove(cells)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw()
    }
}

/// Whatever runs the game: polled for cancellation, told about progress.
pub trait TaskHost {
    fn is_cancelled(&self) -> bool;
    fn report_progress(&mut self, percent: f64);
}

/// Cloneable host handle: a cancel switch plus the last reported progress.
#[derive(Clone, Debug, Default)]
pub struct SharedTaskHost {
    cancelled: Arc<AtomicBool>,
    progress_bits: Arc<AtomicU64>,
}

impl SharedTaskHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn progress(&self) -> f64 {
        f64::from_bits(self.progress_bits.load(Ordering::SeqCst))
    }
}

impl TaskHost for SharedTaskHost {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn report_progress(&mut self, percent: f64) {
        self.progress_bits.store(percent.to_bits(), Ordering::SeqCst);
    }
}
