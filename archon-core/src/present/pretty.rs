use crate::dispatch::{DerivedView, Presentation};
use crate::record::RejectedLine;
use std::io::Write;

pub fn format_view(view: &DerivedView) -> String {
    let r = &view.record;
    format!(
        "[cycle {}] {} entropy={} ({:?}) p_stall={}% ({:?}) trigger={}",
        r.cycle,
        r.state,
        r.entropy,
        view.entropy_level,
        view.stall_probability,
        view.stall_risk,
        r.trigger
    )
}

pub fn format_rejected(rejected: &RejectedLine) -> String {
    format!("[rejected] {}: {}", rejected.reason, rejected.line)
}

pub struct PrettyPresentation<W: Write> {
    out: W,
}

impl<W: Write> PrettyPresentation<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: String) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "failed to write pretty output");
        }
    }
}

impl<W: Write> Presentation for PrettyPresentation<W> {
    fn update(&mut self, view: &DerivedView) {
        self.emit(format_view(view));
    }

    fn diagnostic(&mut self, rejected: &RejectedLine) {
        self.emit(format_rejected(rejected));
    }

    fn tick(&mut self) {
        let _ = self.out.flush();
    }
}
