use std::fmt;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Shortest tick period; "unlimited" still yields to the event loop
const UNLIMITED_PERIOD: Duration = Duration::from_micros(500);

/// Playback speed selected with keys 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X3,
    X5,
    X10,
    Unlimited,
}

impl SpeedMultiplier {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(SpeedMultiplier::X1),
            '2' => Some(SpeedMultiplier::X3),
            '3' => Some(SpeedMultiplier::X5),
            '4' => Some(SpeedMultiplier::X10),
            '5' => Some(SpeedMultiplier::Unlimited),
            _ => None,
        }
    }

    /// `None` for unlimited
    pub fn factor(&self) -> Option<f64> {
        match self {
            SpeedMultiplier::X1 => Some(1.0),
            SpeedMultiplier::X3 => Some(3.0),
            SpeedMultiplier::X5 => Some(5.0),
            SpeedMultiplier::X10 => Some(10.0),
            SpeedMultiplier::Unlimited => None,
        }
    }

    /// Time between ticks for a game running at `tick_rate` ticks per second
    pub fn tick_period(&self, tick_rate: f64) -> Duration {
        match self.factor() {
            Some(factor) => Duration::from_secs_f64(1.0 / (tick_rate * factor)).max(UNLIMITED_PERIOD),
            None => UNLIMITED_PERIOD,
        }
    }
}

impl fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.factor() {
            Some(factor) => write!(f, "x{}", factor),
            None => f.write_str("max"),
        }
    }
}

/// Tick timer that follows the arena's tick rate and the chosen multiplier
pub struct Pacer {
    speed: SpeedMultiplier,
    period: Duration,
    timer: Interval,
}

impl Pacer {
    /// Must be called from within a tokio runtime
    pub fn new(speed: SpeedMultiplier, tick_rate: f64) -> Self {
        let period = speed.tick_period(tick_rate);
        Self {
            speed,
            period,
            timer: Self::timer(period),
        }
    }

    fn timer(period: Duration) -> Interval {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    pub fn speed(&self) -> SpeedMultiplier {
        self.speed
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub async fn tick(&mut self) {
        self.timer.tick().await;
    }

    /// Restart the timer if the period changed; the next tick comes one
    /// full period later
    pub fn retune(&mut self, speed: SpeedMultiplier, tick_rate: f64) {
        self.speed = speed;
        let period = speed.tick_period(tick_rate);
        if period != self.period {
            self.period = period;
            self.timer = Self::timer(period);
            self.timer.reset();
        }
    }
}
