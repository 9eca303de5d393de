//! Repeating generation driver and speed settings.

use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use crate::prelude::*;

/// Drives generation ticks at a fixed period.
///
/// At most one timer exists at a time: starting an already running driver
/// does nothing, and changing the period while running replaces the timer.
#[derive(Resource, Debug, Clone)]
pub struct TickDriver {
    period: Duration,
    timer: Option<Timer>,
}

impl TickDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_TICK_PERIOD),
            timer: None,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arms the timer. Returns `false` if it was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.timer = Some(Timer::new(self.period, TimerMode::Repeating));
        true
    }

    /// Cancels the timer. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Starts a stopped driver or stops a running one, returning whether it
    /// is now running.
    pub fn toggle(&mut self) -> bool {
        if !self.stop() {
            self.start();
        }
        self.is_running()
    }

    /// Changes the period. A running driver is rescheduled from zero.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period.max(MIN_TICK_PERIOD);
        if self.stop() {
            self.start();
        }
    }

    /// Advances time by `delta` and returns how many generations are due.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        match &mut self.timer {
            Some(timer) => timer
                .tick(delta)
                .times_finished_this_tick()
                .min(MAX_TICKS_PER_FRAME),
            None => 0,
        }
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

/// Fixed speed settings, cycled with a single control.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPreset {
    #[default]
    Normal,
    Half,
    Tenth,
}

impl SpeedPreset {
    pub fn period(self) -> Duration {
        match self {
            Self::Normal => DEFAULT_TICK_PERIOD,
            Self::Half => DEFAULT_TICK_PERIOD * 2,
            Self::Tenth => DEFAULT_TICK_PERIOD * 10,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::Half,
            Self::Half => Self::Tenth,
            Self::Tenth => Self::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "100% Speed",
            Self::Half => "50% Speed",
            Self::Tenth => "10% Speed",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeedInputError {
    #[error("speed must be a number, got {0:?}")]
    NotANumber(String),
    #[error("speed must be positive, got {0}")]
    NotPositive(i64),
}

/// Converts a speed percentage (100 = normal speed) into a tick period.
pub fn parse_speed_percentage(input: &str) -> Result<Duration, SpeedInputError> {
    let input = input.trim().trim_end_matches('%');
    let percent: i64 = input
        .parse()
        .map_err(|_| SpeedInputError::NotANumber(input.to_owned()))?;
    if percent <= 0 {
        return Err(SpeedInputError::NotPositive(percent));
    }
    let nanos = DEFAULT_TICK_PERIOD.as_nanos() * 100 / percent as u128;
    Ok(Duration::from_nanos(nanos as u64).max(MIN_TICK_PERIOD))
}

/// Speed as a percentage of the default period, for display.
pub fn speed_percentage(period: Duration) -> u32 {
    (DEFAULT_TICK_PERIOD.as_secs_f64() * 100.0 / period.as_secs_f64()).round() as u32
}

#[cfg(test)]
mod test {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn driver_start_stop() {
        let mut driver = TickDriver::new(ms(200));
        assert!(!driver.is_running());
        assert_eq!(0, driver.tick(ms(1000)));

        assert!(driver.start());
        assert!(!driver.start());
        assert_eq!(0, driver.tick(ms(100)));
        assert_eq!(1, driver.tick(ms(100)));
        assert_eq!(2, driver.tick(ms(450)));

        assert!(driver.stop());
        assert!(!driver.stop());
        assert_eq!(0, driver.tick(ms(1000)));

        assert!(driver.toggle());
        assert!(!driver.toggle());
        assert!(!driver.is_running());
    }

    #[test]
    fn restarting_resets_progress() {
        let mut driver = TickDriver::new(ms(200));
        driver.start();
        assert_eq!(0, driver.tick(ms(150)));
        driver.stop();
        driver.start();
        assert_eq!(0, driver.tick(ms(150)));
        assert_eq!(1, driver.tick(ms(50)));
    }

    #[test]
    fn reschedule() {
        let mut driver = TickDriver::new(ms(200));
        driver.set_period(ms(400));
        assert!(!driver.is_running());
        assert_eq!(ms(400), driver.period());

        driver.start();
        assert_eq!(0, driver.tick(ms(300)));
        driver.set_period(ms(100));
        assert!(driver.is_running());
        assert_eq!(0, driver.tick(ms(50)));
        assert_eq!(1, driver.tick(ms(50)));

        driver.set_period(Duration::ZERO);
        assert_eq!(MIN_TICK_PERIOD, driver.period());
    }

    #[test]
    fn ticks_per_frame_are_capped() {
        let mut driver = TickDriver::new(ms(10));
        driver.start();
        assert_eq!(MAX_TICKS_PER_FRAME, driver.tick(ms(10_000)));
    }

    #[test]
    fn speed_presets_cycle() {
        let mut speed = SpeedPreset::default();
        assert_eq!(ms(200), speed.period());
        speed = speed.next();
        assert_eq!(ms(400), speed.period());
        assert_eq!("50% Speed", speed.label());
        speed = speed.next();
        assert_eq!(ms(2000), speed.period());
        assert_eq!(SpeedPreset::Normal, speed.next());
    }

    #[test]
    fn percentage_input() {
        assert_eq!(Ok(ms(200)), parse_speed_percentage("100"));
        assert_eq!(Ok(ms(400)), parse_speed_percentage(" 50% "));
        assert_eq!(Ok(ms(2000)), parse_speed_percentage("10"));
        assert_eq!(Ok(ms(100)), parse_speed_percentage("200"));
        assert_eq!(Ok(MIN_TICK_PERIOD), parse_speed_percentage("1000000"));

        assert_eq!(
            Err(SpeedInputError::NotPositive(0)),
            parse_speed_percentage("0")
        );
        assert_eq!(
            Err(SpeedInputError::NotPositive(-5)),
            parse_speed_percentage("-5")
        );
        assert!(matches!(
            parse_speed_percentage("fast"),
            Err(SpeedInputError::NotANumber(_))
        ));
        assert!(parse_speed_percentage("").is_err());
    }

    #[test]
    fn percentage_display() {
        assert_eq!(100, speed_percentage(ms(200)));
        assert_eq!(10, speed_percentage(ms(2000)));
        assert_eq!(250, speed_percentage(ms(80)));
    }
}
