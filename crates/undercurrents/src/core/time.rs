/// Turns monotonic millisecond timestamps into per-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call. The first call returns 0, and a
    /// timestamp that goes backwards is treated as no time passing.
    pub fn delta(&mut self, now_ms: u64) -> u32 {
        let delta = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_ms = Some(now_ms.max(self.last_ms.unwrap_or(0)));
        delta.min(u32::MAX as u64) as u32
    }
}

/// Countdown that fires at most once per frame.
///
/// The countdown starts at 0 so the first frame fires. When it reaches zero
/// the period is added back until it is positive again; every period beyond
/// the first is a missed tick and is only counted, never replayed.
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    /// Period in milliseconds; 0 disables the timer.
    period: i64,
    remaining: i64,
}

impl PeriodicTimer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period: period_ms as i64,
            remaining: 0,
        }
    }

    /// Subtract `delta_ms`. Returns `Some(missed)` when the timer fires.
    pub fn tick(&mut self, delta_ms: u32) -> Option<u32> {
        if self.period <= 0 {
            return None;
        }

        self.remaining -= delta_ms as i64;
        if self.remaining > 0 {
            return None;
        }

        let overdue = -self.remaining;
        let missed = overdue / self.period;
        self.remaining += (missed + 1) * self.period;
        Some(missed.min(u32::MAX as i64) as u32)
    }

    /// Change the period. The current countdown is kept.
    pub fn set_period(&mut self, period_ms: u32) {
        self.period = period_ms as i64;
    }

    pub fn period(&self) -> u32 {
        self.period as u32
    }

    /// Milliseconds until the next fire.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }
}
