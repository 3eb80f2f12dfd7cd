use super::tally::IngestTally;
use crate::dispatch::{DerivedView, EntropyLevel, Presentation, StallRisk};
use crate::record::{RejectedLine, StateSeverity};
use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use std::io::Write;
use std::time::{Duration, Instant};

const METER_WIDTH: usize = 32;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub colored: bool,
    /// Show a stale banner when no record arrived for this long.
    pub stale_after: Option<Duration>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            colored: true,
            stale_after: None,
        }
    }
}

#[derive(Debug, Default)]
struct DashboardState {
    latest: Option<DerivedView>,
    last_update: Option<Instant>,
    last_update_wall: Option<DateTime<Local>>,
    last_rejected: Option<RejectedLine>,
    tally: IngestTally,
}

impl DashboardState {
    fn is_stale(&self, stale_after: Option<Duration>, now: Instant) -> bool {
        match (stale_after, self.last_update) {
            (Some(limit), Some(at)) => now.duration_since(at) > limit,
            _ => false,
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Warn,
    Bad,
    Info,
    Muted,
}

fn paint(text: &str, tone: Tone, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().bold().to_string(),
        Tone::Warn => text.yellow().bold().to_string(),
        Tone::Bad => text.red().bold().to_string(),
        Tone::Info => text.blue().bold().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

fn severity_tone(severity: StateSeverity) -> Tone {
    match severity {
        StateSeverity::Nominal => Tone::Good,
        StateSeverity::Warning => Tone::Warn,
        StateSeverity::Critical => Tone::Bad,
        StateSeverity::Indeterminate => Tone::Muted,
    }
}

fn entropy_tone(level: EntropyLevel) -> Tone {
    match level {
        EntropyLevel::Normal => Tone::Good,
        EntropyLevel::Elevated => Tone::Warn,
        EntropyLevel::High => Tone::Bad,
    }
}

fn risk_tone(risk: StallRisk) -> Tone {
    match risk {
        StallRisk::Low => Tone::Info,
        StallRisk::Medium => Tone::Warn,
        StallRisk::High => Tone::Bad,
    }
}

fn meter(value: u32, max: u32) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value.min(max) as usize) * METER_WIDTH + max as usize / 2) / max as usize
    };
    format!("[{}{}]", "█".repeat(filled), "░".repeat(METER_WIDTH - filled))
}

/// Render the whole screen as a string. Pure, so it can be tested.
pub fn render_dashboard(
    view: Option<&DerivedView>,
    tally: &IngestTally,
    last_rejected: Option<&RejectedLine>,
    last_update: Option<DateTime<Local>>,
    stale: bool,
    colored: bool,
) -> String {
    let mut out = String::new();

    out.push_str("ARCHON Hazard Monitoring\n");
    out.push_str("========================\n\n");

    if stale {
        out.push_str(&paint(
            "!! STALE: no telemetry received recently",
            Tone::Bad,
            colored,
        ));
        out.push_str("\n\n");
    }

    match view {
        None => {
            out.push_str("FSM State        Waiting for data...\n");
            out.push_str("Cycle            Waiting...\n\n");
            out.push_str("Entropy Score    Waiting...\n");
            out.push_str("Override Source  Waiting...\n");
            out.push_str("Prob. of STALL   Waiting...\n");
        }
        Some(view) => {
            let r = &view.record;
            out.push_str(&format!(
                "FSM State        {}\n",
                paint(r.state.as_str(), severity_tone(view.severity), colored)
            ));
            out.push_str(&format!("Cycle            {}\n\n", r.cycle));

            let level_tone = entropy_tone(view.entropy_level);
            out.push_str(&format!(
                "Entropy Score    {:>3}  {}  {}\n",
                r.entropy,
                paint(&meter(u32::from(r.entropy), 255), level_tone, colored),
                paint(view.entropy_level.label(), level_tone, colored)
            ));
            out.push_str(&format!("Override Source  {}\n", r.trigger));

            let stall_tone = risk_tone(view.stall_risk);
            out.push_str(&format!(
                "Prob. of STALL   {:>3}%  {}  {:?} risk\n",
                view.stall_probability,
                paint(
                    &meter(u32::from(view.stall_probability), 100),
                    stall_tone,
                    colored
                ),
                view.stall_risk
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "Records: {} | Rejected: {}",
        tally.records,
        tally.rejected_total()
    ));
    if !tally.rejected.is_empty() {
        let breakdown: Vec<String> = tally
            .rejected
            .iter()
            .map(|(reason, count)| format!("{reason}={count}"))
            .collect();
        out.push_str(&format!(" ({})", breakdown.join(" ")));
    }
    out.push('\n');

    if let Some(rejected) = last_rejected {
        out.push_str(&paint(
            &format!("Last rejected: {} {:?}", rejected.reason, rejected.line),
            Tone::Muted,
            colored,
        ));
        out.push('\n');
    }

    if let Some(at) = last_update {
        out.push_str(&format!("Last update: {}\n", at.format("%H:%M:%S")));
    }

    out
}

/// Full-screen dashboard that redraws only when something changed.
pub struct DashboardPresentation<W: Write> {
    out: W,
    options: DashboardOptions,
    state: DashboardState,
    dirty: bool,
    was_stale: bool,
    cursor_hidden: bool,
}

impl<W: Write> DashboardPresentation<W> {
    pub fn new(out: W, options: DashboardOptions) -> Self {
        Self {
            out,
            options,
            state: DashboardState::default(),
            // Draw the waiting screen on the first tick.
            dirty: true,
            was_stale: false,
            cursor_hidden: false,
        }
    }

    pub fn tally(&self) -> &IngestTally {
        &self.state.tally
    }

    pub fn latest(&self) -> Option<&DerivedView> {
        self.state.latest.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&self, now: Instant) -> String {
        render_dashboard(
            self.state.latest.as_ref(),
            &self.state.tally,
            self.state.last_rejected.as_ref(),
            self.state.last_update_wall,
            self.state.is_stale(self.options.stale_after, now),
            self.options.colored,
        )
    }

    fn redraw(&mut self, now: Instant) {
        let screen = self.render(now);
        let mut frame = String::new();
        if !self.cursor_hidden {
            frame.push_str(HIDE_CURSOR);
            self.cursor_hidden = true;
        }
        frame.push_str(CLEAR_SCREEN);
        frame.push_str(&screen);

        let written = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to draw dashboard");
        }
    }
}

impl<W: Write> Presentation for DashboardPresentation<W> {
    fn update(&mut self, view: &DerivedView) {
        self.state.latest = Some(view.clone());
        self.state.last_update = Some(Instant::now());
        self.state.last_update_wall = Some(Local::now());
        self.state.tally.record();
        self.dirty = true;
    }

    fn diagnostic(&mut self, rejected: &RejectedLine) {
        self.state.tally.reject(rejected.reason);
        self.state.last_rejected = Some(rejected.clone());
        self.dirty = true;
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let stale = self.state.is_stale(self.options.stale_after, now);
        if self.dirty || stale != self.was_stale {
            self.redraw(now);
            self.dirty = false;
            self.was_stale = stale;
        }
    }

    fn close(&mut self) {
        if self.cursor_hidden {
            let _ = self.out.write_all(SHOW_CURSOR.as_bytes());
            let _ = self.out.flush();
            self.cursor_hidden = false;
        }
    }
}
