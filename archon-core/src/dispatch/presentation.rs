use super::view::DerivedView;
use crate::record::RejectedLine;

/// The rendering side of the pipeline.
///
/// Implementations are driven from a single loop and need not be thread
/// safe. All methods except `update` default to doing nothing.
pub trait Presentation {
    /// A new view replaces the previous one.
    fn update(&mut self, view: &DerivedView);

    /// A line was rejected by the parser. The current view is unchanged.
    fn diagnostic(&mut self, _rejected: &RejectedLine) {}

    /// Called once per dispatch tick, after the queue has been drained.
    fn tick(&mut self) {}

    /// Called once when the dispatcher stops.
    fn close(&mut self) {}
}

impl<P: Presentation + ?Sized> Presentation for Box<P> {
    fn update(&mut self, view: &DerivedView) {
        (**self).update(view)
    }

    fn diagnostic(&mut self, rejected: &RejectedLine) {
        (**self).diagnostic(rejected)
    }

    fn tick(&mut self) {
        (**self).tick()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
