//! Tick scheduling with cancellation.
//!
//! At most one gravity tick is pending at a time. Every `arm` or `cancel`
//! bumps a generation counter; a fired tick is only honored when its token
//! still carries the current generation, so a tick that was already in
//! flight when the session paused or restarted is dropped.

use tokio::time::{Duration, Instant};

/// Identifies one armed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

impl TickToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct TickScheduler {
    generation: u64,
    pending: Option<(Instant, TickToken)>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick `interval` from now, replacing any pending one.
    pub fn arm(&mut self, interval: Duration) -> TickToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TickToken {
            generation: self.generation,
        };
        self.pending = Some((Instant::now() + interval, token));
        token
    }

    /// Drop the pending tick. Tokens handed out earlier become stale.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<(Instant, TickToken)> {
        self.pending
    }

    /// Consume a fired token. Returns false for stale tokens.
    pub fn accept(&mut self, token: TickToken) -> bool {
        match self.pending {
            Some((_, current)) if current == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_arm_sets_deadline() {
        let mut scheduler = TickScheduler::new();
        assert!(!scheduler.is_armed());

        let start = Instant::now();
        let token = scheduler.arm(Duration::from_millis(500));
        let (deadline, pending) = scheduler.pending().unwrap();
        assert_eq!(pending, token);
        assert_eq!(deadline - start, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_accept_consumes_current_token() {
        let mut scheduler = TickScheduler::new();
        let token = scheduler.arm(Duration::from_millis(100));

        assert!(scheduler.accept(token));
        assert!(!scheduler.is_armed());
        // A token fires at most once.
        assert!(!scheduler.accept(token));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_rejects_stale_token() {
        let mut scheduler = TickScheduler::new();
        let stale = scheduler.arm(Duration::from_millis(100));
        scheduler.cancel();
        assert!(!scheduler.accept(stale));

        let fresh = scheduler.arm(Duration::from_millis(100));
        assert_ne!(stale, fresh);
        assert!(!scheduler.accept(stale));
        assert!(scheduler.accept(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_pending() {
        let mut scheduler = TickScheduler::new();
        let first = scheduler.arm(Duration::from_millis(500));
        let second = scheduler.arm(Duration::from_millis(300));

        assert!(second.generation() > first.generation());
        assert!(!scheduler.accept(first));
        assert!(scheduler.accept(second));
    }
}
