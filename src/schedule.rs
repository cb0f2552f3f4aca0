//! Cancellable timers driven by the UI clock.
//!
//! egui has no timer API of its own: every frame the app polls these handles
//! with the current input time (seconds since start) and acts on whatever
//! fired. All handles are owned by the app state and cancelled on exit.

// ---------------------------------------------------------------------------
// Interval – fixed-period repeating timer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period: f64,
    next_due: Option<f64>,
}

impl Interval {
    /// First firing is one `period` after `now`.
    pub fn start(period: f64, now: f64) -> Self {
        Self {
            period,
            next_due: Some(now + period),
        }
    }

    /// Returns `true` at most once per call. Missed periods are dropped, not
    /// replayed, so a slow frame never triggers a burst of firings.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// Seconds until the next firing, for `request_repaint_after`.
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.next_due.map(|due| (due - now).max(0.0))
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }
}

// ---------------------------------------------------------------------------
// Delay – one-shot timer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delay {
    due: Option<f64>,
}

impl Delay {
    pub fn after(delay: f64, now: f64) -> Self {
        Self {
            due: Some(now + delay),
        }
    }

    /// (Re)arm the delay; an already pending firing is replaced.
    pub fn arm(&mut self, delay: f64, now: f64) {
        self.due = Some(now + delay);
    }

    /// Fires once, then stays idle until re-armed.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.due.map(|due| (due - now).max(0.0))
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }
}

// ---------------------------------------------------------------------------
// FrameLoop – per-frame callback handle
// ---------------------------------------------------------------------------

/// Tracks the per-frame animation callback. While running, each frame yields
/// the elapsed time since the loop started and a repaint should be requested;
/// once cancelled, frames yield nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLoop {
    started: Option<f64>,
    frames: u64,
}

impl FrameLoop {
    pub fn start(now: f64) -> Self {
        Self {
            started: Some(now),
            frames: 0,
        }
    }

    /// Elapsed seconds for this frame, or `None` after cancellation.
    pub fn frame(&mut self, now: f64) -> Option<f64> {
        let started = self.started?;
        self.frames += 1;
        Some(now - started)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cancel(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}
