//! Rotation and hour state, advanced on three independent schedules.
//!
//! All three schedules run off one monotonic millisecond clock. Each keeps its
//! own next-fire time and fires as many times as it is due, so a stalled
//! host catches up instead of drifting further. The seed comes from the wall
//! clock once; after that the state free-runs and slowly drifts from true
//! time in long sessions.

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;

use crate::dial::TICK_ANGLE_STEP_DEG;
use crate::error::ClockError;

/// Fine sweep of the seconds dial: 62.5 ticks × 0.096° ≈ 6° per second.
pub const FINE_SWEEP_PERIOD_MS: u64 = 16;
pub const FINE_SWEEP_DELTA_DEG: f64 = 0.096;
/// The minutes dial moves one 6° step per 60 of these.
pub const PER_SECOND_PERIOD_MS: u64 = 1_000;
pub const PER_SECOND_DELTA_DEG: f64 = 0.1;
pub const HOURLY_PERIOD_MS: u64 = 3_600_000;

/// Wall-clock reading used to seed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour: hour as u8,
                minute: minute as u8,
                second: second as u8,
            })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for WallTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClockError::InvalidTime(s.to_string());
        let mut parts = s.trim().split(':').map(|part| part.parse::<u32>());
        let (Some(Ok(hour)), Some(Ok(minute)), Some(Ok(second)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        WallTime::from_hms(hour, minute, second).ok_or_else(invalid)
    }
}

/// Source of the current time of day.
pub trait WallClock {
    fn now(&self) -> WallTime;
}

/// Local time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> WallTime {
        let now = chrono::Local::now();
        WallTime {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        }
    }
}

/// Always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub WallTime);

impl WallClock for FixedClock {
    fn now(&self) -> WallTime {
        self.0
    }
}

/// Snapshot read by the composer on every redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub second_rotation_deg: f64,
    pub minute_rotation_deg: f64,
    /// Always in `0..24`.
    pub hour: u8,
}

impl AnimationState {
    /// Negative rotation turns the dials clockwise on screen.
    pub fn seeded(time: WallTime) -> Self {
        Self {
            second_rotation_deg: -(time.second as f64) * TICK_ANGLE_STEP_DEG,
            minute_rotation_deg: -(time.minute as f64) * TICK_ANGLE_STEP_DEG,
            hour: time.hour,
        }
    }
}

/// Which fields an [`AnimationClock::advance`] call touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Updated {
    pub second_rotation: bool,
    pub minute_rotation: bool,
    pub hour: bool,
}

impl Updated {
    pub fn any(&self) -> bool {
        self.second_rotation || self.minute_rotation || self.hour
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PeriodicTask {
    period_ms: u64,
    next_due_ms: u64,
}

impl PeriodicTask {
    fn new(period_ms: u64, started_ms: u64) -> Self {
        Self {
            period_ms,
            next_due_ms: started_ms + period_ms,
        }
    }

    /// Number of ticks due by `now_ms`; moves the schedule past them.
    fn take_due(&mut self, now_ms: u64) -> u64 {
        if now_ms < self.next_due_ms {
            return 0;
        }
        let due = (now_ms - self.next_due_ms) / self.period_ms + 1;
        self.next_due_ms += due * self.period_ms;
        due
    }
}

/// Keeps a monotonically decreasing rotation bounded without changing its
/// sine or cosine.
fn wrap_degrees(deg: f64) -> f64 {
    deg % 360.0
}

type RedrawHook = Box<dyn FnMut(&AnimationState)>;

/// Single-writer owner of [`AnimationState`].
pub struct AnimationClock {
    state: AnimationState,
    fine_sweep: PeriodicTask,
    per_second: PeriodicTask,
    hourly: PeriodicTask,
    redraw_hook: Option<RedrawHook>,
}

impl fmt::Debug for AnimationClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationClock")
            .field("state", &self.state)
            .field("fine_sweep", &self.fine_sweep)
            .field("per_second", &self.per_second)
            .field("hourly", &self.hourly)
            .field("redraw_hook", &self.redraw_hook.is_some())
            .finish()
    }
}

impl AnimationClock {
    /// Seeds from `wall` and starts all three schedules at `now_ms`.
    pub fn new<W: WallClock + ?Sized>(wall: &W, now_ms: u64) -> Self {
        let time = wall.now();
        log::info!("seeding clock at {time}");
        Self {
            state: AnimationState::seeded(time),
            fine_sweep: PeriodicTask::new(FINE_SWEEP_PERIOD_MS, now_ms),
            per_second: PeriodicTask::new(PER_SECOND_PERIOD_MS, now_ms),
            hourly: PeriodicTask::new(HOURLY_PERIOD_MS, now_ms),
            redraw_hook: None,
        }
    }

    /// Reseeds the state and restarts every schedule from `now_ms`.
    pub fn reset<W: WallClock + ?Sized>(&mut self, wall: &W, now_ms: u64) {
        let time = wall.now();
        log::debug!("reseeding clock at {time}");
        self.state = AnimationState::seeded(time);
        self.fine_sweep = PeriodicTask::new(FINE_SWEEP_PERIOD_MS, now_ms);
        self.per_second = PeriodicTask::new(PER_SECOND_PERIOD_MS, now_ms);
        self.hourly = PeriodicTask::new(HOURLY_PERIOD_MS, now_ms);
        self.notify();
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Called with the new state after every advance that changed something.
    pub fn set_redraw_hook(&mut self, hook: impl FnMut(&AnimationState) + 'static) {
        self.redraw_hook = Some(Box::new(hook));
    }

    pub fn clear_redraw_hook(&mut self) {
        self.redraw_hook = None;
    }

    /// Earliest time any schedule fires next.
    pub fn next_due_ms(&self) -> u64 {
        self.fine_sweep
            .next_due_ms
            .min(self.per_second.next_due_ms)
            .min(self.hourly.next_due_ms)
    }

    /// Fires every tick due by `now_ms` and notifies the redraw hook once.
    pub fn advance(&mut self, now_ms: u64) -> Updated {
        let sweeps = self.fine_sweep.take_due(now_ms);
        let seconds = self.per_second.take_due(now_ms);
        let hours = self.hourly.take_due(now_ms);
        if sweeps > 1 {
            log::debug!("catching up {sweeps} fine-sweep ticks at {now_ms} ms");
        }

        for _ in 0..sweeps {
            self.tick_fine_sweep();
        }
        for _ in 0..seconds {
            self.tick_per_second();
        }
        if hours > 0 {
            self.state.hour = ((self.state.hour as u64 + hours) % 24) as u8;
        }

        let updated = Updated {
            second_rotation: sweeps > 0,
            minute_rotation: seconds > 0,
            hour: hours > 0,
        };
        if updated.any() {
            self.notify();
        }
        updated
    }

    pub fn tick_fine_sweep(&mut self) {
        self.state.second_rotation_deg =
            wrap_degrees(self.state.second_rotation_deg - FINE_SWEEP_DELTA_DEG);
    }

    pub fn tick_per_second(&mut self) {
        self.state.minute_rotation_deg =
            wrap_degrees(self.state.minute_rotation_deg - PER_SECOND_DELTA_DEG);
    }

    pub fn tick_hourly(&mut self) {
        self.state.hour = (self.state.hour + 1) % 24;
    }

    fn notify(&mut self) {
        let state = self.state;
        if let Some(hook) = self.redraw_hook.as_mut() {
            hook(&state);
        }
    }
}
