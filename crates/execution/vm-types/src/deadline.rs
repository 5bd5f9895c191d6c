// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use std::time::{Duration, Instant};

/// The wall-clock window a transaction may execute in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    pub start: Instant,
    pub end: Instant,
    /// An unenforced deadline is never exceeded.
    pub enforced: bool,
}

impl Deadline {
    /// A budget past the range of `Instant` is never exceeded.
    pub fn new(start: Instant, budget: Duration) -> Self {
        match start.checked_add(budget) {
            Some(end) => Deadline {
                start,
                end,
                enforced: true,
            },
            None => Deadline {
                start,
                end: start,
                enforced: false,
            },
        }
    }

    /// A deadline that never expires, for debugging tools.
    pub fn unbounded() -> Self {
        let now = Instant::now();
        Deadline {
            start: now,
            end: now,
            enforced: false,
        }
    }

    pub fn budget(&self) -> Duration { self.end - self.start }

    pub fn is_exceeded(&self, now: Instant) -> bool {
        self.enforced && now > self.end
    }
}

#[cfg(test)]
mod tests {
    use super::Deadline;
    use std::time::{Duration, Instant};

    #[test]
    fn test_deadline() {
        let start = Instant::now();
        let deadline = Deadline::new(start, Duration::from_millis(50));
        assert_eq!(deadline.budget(), Duration::from_millis(50));
        assert!(!deadline.is_exceeded(start));
        assert!(!deadline.is_exceeded(start + Duration::from_millis(50)));
        assert!(deadline.is_exceeded(start + Duration::from_millis(51)));

        let zero = Deadline::new(start, Duration::ZERO);
        assert!(zero.is_exceeded(start + Duration::from_micros(1)));

        let unbounded = Deadline::unbounded();
        assert!(!unbounded.is_exceeded(start + Duration::from_secs(3600)));
    }

    #[test]
    fn test_overflowing_budget_is_unenforced() {
        let start = Instant::now();
        let deadline = Deadline::new(start, Duration::MAX);
        assert!(!deadline.enforced);
        assert!(!deadline.is_exceeded(start + Duration::from_secs(3600)));
    }
}
