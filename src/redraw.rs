//! Coalescing, rate-limited redraw requests.
//!
//! Any number of geometry changes between two paints collapse into a single
//! redraw, and redraws never come faster than the configured refresh rate.
//! Time is passed in as seconds so the scheduler works with egui's frame clock.

/// What the host should do about repainting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Redraw {
    /// Nothing pending
    Idle,
    /// Repaint now
    Now,
    /// Repaint after this many seconds
    After(f64),
}

/// Tracks pending redraw requests and the time of the last redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct RedrawScheduler {
    min_interval: f64,
    pending: bool,
    last_redraw: Option<f64>,
}

impl RedrawScheduler {
    /// Scheduler capped at `max_hz` redraws per second.
    pub fn new(max_hz: f64) -> Self {
        let max_hz = if max_hz.is_finite() && max_hz > 0.0 {
            max_hz
        } else {
            crate::constants::MAX_REFRESH_HZ
        };
        Self {
            min_interval: 1.0 / max_hz,
            pending: false,
            last_redraw: None,
        }
    }

    /// Marks the surface as needing a redraw.
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Returns `true` if a redraw is pending.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Decides whether to redraw at time `now`. A `Now` answer consumes the
    /// pending request.
    pub fn poll(&mut self, now: f64) -> Redraw {
        if !self.pending {
            return Redraw::Idle;
        }
        match self.last_redraw {
            Some(last) if now - last < self.min_interval => {
                Redraw::After(self.min_interval - (now - last))
            }
            _ => {
                self.pending = false;
                self.last_redraw = Some(now);
                Redraw::Now
            }
        }
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(crate::constants::MAX_REFRESH_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_many_requests_coalesce_into_one_redraw() {
        let mut scheduler = RedrawScheduler::new(60.0);
        for _ in 0..10 {
            scheduler.request();
        }

        assert_eq!(scheduler.poll(1.0), Redraw::Now);
        assert_eq!(scheduler.poll(1.0), Redraw::Idle);
    }

    #[test]
    fn test_redraws_are_rate_limited() {
        let mut scheduler = RedrawScheduler::new(50.0);
        scheduler.request();
        assert_eq!(scheduler.poll(0.0), Redraw::Now);

        scheduler.request();
        match scheduler.poll(0.005) {
            Redraw::After(wait) => assert!((wait - 0.015).abs() < 1e-9),
            other => panic!("expected a delayed redraw, got {other:?}"),
        }
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.poll(0.02), Redraw::Now);
    }

    #[test]
    fn test_invalid_rate_falls_back_to_default() {
        let mut scheduler = RedrawScheduler::new(0.0);
        scheduler.request();
        scheduler.poll(0.0);
        scheduler.request();

        assert!(matches!(scheduler.poll(0.001), Redraw::After(_)));
    }
}
