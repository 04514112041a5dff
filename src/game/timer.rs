use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(u32),
    Expired,
}

/// One-second countdown driven by external ticks. The host owns the actual
/// clock and calls [`RoundTimer::tick`] once per interval.
#[derive(Clone, Debug, Default)]
pub struct RoundTimer {
    remaining: Option<u32>,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a countdown, replacing any running one.
    pub fn start(&mut self, seconds: u32) {
        if self.remaining.is_some() {
            debug!("restarting running countdown");
        }
        self.remaining = Some(seconds);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Advances one second. Returns `None` while stopped.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        let remaining = self.remaining?.saturating_sub(1);
        if remaining == 0 {
            self.remaining = None;
            Some(TimerEvent::Expired)
        } else {
            self.remaining = Some(remaining);
            Some(TimerEvent::Tick(remaining))
        }
    }
}
