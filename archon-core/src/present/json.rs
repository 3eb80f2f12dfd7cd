use crate::dispatch::{DerivedView, Presentation};
use crate::record::{RejectReason, RejectedLine};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonEvent<'a> {
    View {
        #[serde(flatten)]
        view: &'a DerivedView,
    },
    Rejected {
        reason: RejectReason,
        line: &'a str,
    },
}

/// Newline-delimited JSON, one object per update or rejection.
pub struct JsonPresentation<W: Write> {
    out: W,
}

impl<W: Write> JsonPresentation<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &JsonEvent<'_>) {
        let written = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));

        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write json output");
        }
    }
}

impl<W: Write> Presentation for JsonPresentation<W> {
    fn update(&mut self, view: &DerivedView) {
        self.emit(&JsonEvent::View { view });
    }

    fn diagnostic(&mut self, rejected: &RejectedLine) {
        self.emit(&JsonEvent::Rejected {
            reason: rejected.reason,
            line: &rejected.line,
        });
    }

    fn tick(&mut self) {
        let _ = self.out.flush();
    }
}
