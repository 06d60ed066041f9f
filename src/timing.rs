//! Monotonic timing with nanosecond resolution
//!
//! Readings are `(seconds, nanoseconds)` pairs taken from `std::time::Instant`
//! relative to a process-wide anchor. Differences use the usual borrow rule and
//! a difference that comes out negative is reported as a clock regression
//! instead of being clamped.

use crate::error::{TricountError, TricountResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

const NANOS_PER_SEC: i64 = 1_000_000_000;

static ANCHOR: OnceLock<Instant> = OnceLock::new();

/// A point on the monotonic clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timespec {
    /// Whole seconds since the process anchor
    pub secs: i64,
    /// Nanoseconds past `secs`, in `[0, 1e9)`
    pub nanos: i64,
}

impl Timespec {
    /// Build a reading, carrying excess nanoseconds into the seconds field
    pub fn new(secs: i64, nanos: i64) -> Self {
        Self {
            secs: secs + nanos.div_euclid(NANOS_PER_SEC),
            nanos: nanos.rem_euclid(NANOS_PER_SEC),
        }
    }

    /// Read the monotonic clock
    pub fn now() -> Self {
        let anchor = *ANCHOR.get_or_init(Instant::now);
        let since = Instant::now().saturating_duration_since(anchor);
        Self {
            secs: since.as_secs() as i64,
            nanos: since.subsec_nanos() as i64,
        }
    }

    /// Time from `start` to `self`.
    ///
    /// Seconds and nanoseconds are subtracted field by field; a negative
    /// nanosecond remainder borrows one second. A net negative result fails with
    /// `ClockRegression` carrying the magnitude of the regression.
    pub fn duration_since(&self, start: &Timespec) -> TricountResult<Elapsed> {
        let mut secs = self.secs - start.secs;
        let mut nanos = self.nanos - start.nanos;
        if nanos < 0 {
            secs -= 1;
            nanos += NANOS_PER_SEC;
        }

        if secs < 0 {
            let behind = -(secs as i128 * NANOS_PER_SEC as i128 + nanos as i128);
            return Err(TricountError::ClockRegression {
                secs: (behind / NANOS_PER_SEC as i128) as i64,
                nanos: (behind % NANOS_PER_SEC as i128) as i64,
            });
        }

        Ok(Elapsed {
            secs: secs as u64,
            nanos: nanos as u32,
        })
    }
}

/// A non-negative time span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Elapsed {
    pub secs: u64,
    pub nanos: u32,
}

impl Elapsed {
    pub fn as_duration(&self) -> Duration {
        Duration::new(self.secs, self.nanos)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.as_duration().as_secs_f64()
    }
}

impl From<Duration> for Elapsed {
    fn from(d: Duration) -> Self {
        Self {
            secs: d.as_secs(),
            nanos: d.subsec_nanos(),
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} seconds and {} nanoseconds", self.secs, self.nanos)
    }
}

/// Measures one span between `start` and `stop`
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Timespec,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self { start: Timespec::now() }
    }

    pub fn started_at(&self) -> Timespec {
        self.start
    }

    pub fn stop(&self) -> TricountResult<Elapsed> {
        Timespec::now().duration_since(&self.start)
    }
}
