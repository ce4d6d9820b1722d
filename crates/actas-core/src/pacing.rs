//! Fixed-delay pacing between consecutive requests.

use std::time::Duration;

/// Sequential gate: every turn after the first waits `delay`, whatever the
/// previous request's outcome was.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    turns: u64,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, turns: 0 }
    }

    /// Call before each request.
    pub fn wait_turn(&mut self) {
        if self.turns > 0 && !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.turns += 1;
    }

    /// Number of pauses taken so far.
    pub fn pauses(&self) -> u64 {
        self.turns.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn first_turn_does_not_wait() {
        let mut p = Pacer::new(Duration::from_secs(60));
        let start = Instant::now();
        p.wait_turn();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(p.pauses(), 0);
    }

    #[test]
    fn later_turns_wait_delay() {
        let mut p = Pacer::new(Duration::from_millis(30));
        let start = Instant::now();
        p.wait_turn();
        p.wait_turn();
        p.wait_turn();
        assert!(start.elapsed() >= Duration::from_millis(60));
        assert_eq!(p.pauses(), 2);
    }
}
