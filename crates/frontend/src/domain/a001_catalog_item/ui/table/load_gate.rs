/// Single-flight guard for table loads.
///
/// A load in flight suppresses new attempts instead of queueing them. A flag
/// older than the timeout is treated as stale and reset, so a request that
/// never resolves cannot lock the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadGate {
    started_at: Option<f64>,
    timeout_ms: f64,
}

impl LoadGate {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            started_at: None,
            timeout_ms: f64::from(timeout_ms),
        }
    }

    /// Claim the gate at `now_ms`; `false` means a load is already running
    pub fn try_begin(&mut self, now_ms: f64) -> bool {
        if let Some(started) = self.started_at {
            if now_ms - started < self.timeout_ms {
                log::debug!("table load suppressed, another one is in flight");
                return false;
            }
            log::warn!("stale table load flag reset after {} ms", now_ms - started);
        }
        self.started_at = Some(now_ms);
        true
    }

    pub fn finish(&mut self) {
        self.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_load_is_suppressed() {
        let mut gate = LoadGate::new(30_000);
        assert!(gate.try_begin(0.0));
        assert!(!gate.try_begin(100.0));
        gate.finish();
        assert!(gate.try_begin(200.0));
    }

    #[test]
    fn test_stale_flag_is_reset() {
        let mut gate = LoadGate::new(30_000);
        assert!(gate.try_begin(1_000.0));
        assert!(!gate.try_begin(30_999.0));
        assert!(gate.try_begin(31_000.0));
    }
}
