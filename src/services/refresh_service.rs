//! Arm-state guard for the cooperative refresh poll.
//!
//! The host timer fires the tick; this struct only tracks whether a tick is
//! outstanding, so enable transitions cannot register a second concurrent
//! poller.

/// Single-flag guard around the host timer.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    armed: bool,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Marks the scheduler armed. Returns false (and changes nothing) when a
    /// poller is already outstanding.
    pub fn try_arm(&mut self) -> bool {
        if self.armed {
            return false;
        }
        self.armed = true;
        true
    }

    /// Clears the armed flag. Returns true if a poller was outstanding.
    pub fn disarm(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_arm_is_rejected() {
        let mut scheduler = RefreshScheduler::new();
        assert!(scheduler.try_arm());
        assert!(!scheduler.try_arm());
        assert!(scheduler.is_armed());
    }

    #[test]
    fn test_disarm_allows_rearm() {
        let mut scheduler = RefreshScheduler::new();
        assert!(!scheduler.disarm());
        scheduler.try_arm();
        assert!(scheduler.disarm());
        assert!(!scheduler.is_armed());
        assert!(scheduler.try_arm());
    }
}
