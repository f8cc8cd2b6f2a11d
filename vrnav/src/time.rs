use std::time::Duration;

/// Frame timing handed to every per-frame update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Time {
    /// Time since the previous frame.
    pub elapsed: Duration,
    /// Time since the session started.
    pub total: Duration,
}

impl Time {
    pub fn at(total: Duration) -> Self {
        Time {
            elapsed: Duration::ZERO,
            total,
        }
    }

    pub fn from_secs_f32(total: f32) -> Self {
        Self::at(Duration::from_secs_f32(total))
    }

    /// The timing of the next frame, `delta` later.
    pub fn advance(&self, delta: Duration) -> Self {
        Time {
            elapsed: delta,
            total: self.total + delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates_total() {
        let frame = Duration::from_millis(250);
        let time = Time::default().advance(frame).advance(frame);

        assert_eq!(time.elapsed, frame);
        assert_eq!(time.total, Duration::from_millis(500));
    }
}
