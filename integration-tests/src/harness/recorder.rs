use archon_core::dispatch::{DerivedView, Presentation};
use archon_core::record::RejectedLine;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Recorded {
    pub views: Vec<DerivedView>,
    pub rejected: Vec<RejectedLine>,
    pub ticks: u64,
    pub closed: bool,
}

impl Recorded {
    pub fn cycles(&self) -> Vec<u64> {
        self.views.iter().map(|v| v.record.cycle).collect()
    }
}

/// A presentation whose observations stay readable while the pipeline
/// owns it.
#[derive(Clone, Default)]
pub struct SharedRecorder {
    inner: Arc<Mutex<Recorded>>,
    update_delay: Duration,
}

impl SharedRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep on every update to simulate a slow renderer.
    pub fn slow(update_delay: Duration) -> Self {
        Self {
            inner: Arc::default(),
            update_delay,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap()
    }

    pub fn snapshot(&self) -> Recorded {
        self.lock().clone()
    }
}

impl Presentation for SharedRecorder {
    fn update(&mut self, view: &DerivedView) {
        if !self.update_delay.is_zero() {
            thread::sleep(self.update_delay);
        }
        self.lock().views.push(view.clone());
    }

    fn diagnostic(&mut self, rejected: &RejectedLine) {
        self.lock().rejected.push(rejected.clone());
    }

    fn tick(&mut self) {
        self.lock().ticks += 1;
    }

    fn close(&mut self) {
        self.lock().closed = true;
    }
}
