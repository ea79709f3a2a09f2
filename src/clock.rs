use std::time::{Duration, Instant};

/// Turns wall-clock time into whole simulation steps, carrying the remainder.
pub(crate) struct FixedStep {
    step: Duration,
    accum: Duration,
    max_steps: u32,
}

impl FixedStep {
    pub(crate) fn new(step: Duration, max_steps: u32) -> Self {
        Self {
            step: step.max(Duration::from_millis(1)),
            accum: Duration::ZERO,
            max_steps: max_steps.max(1),
        }
    }

    /// Steps owed after `elapsed` more real time. Backlog past `max_steps` is dropped.
    pub(crate) fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accum = self.accum.saturating_add(elapsed);
        let mut steps = 0;
        while self.accum >= self.step {
            self.accum -= self.step;
            steps += 1;
            if steps == self.max_steps {
                self.accum = Duration::ZERO;
                break;
            }
        }
        steps
    }
}

/// Sleeps off whatever is left of a frame that began at `start`.
pub(crate) fn pace(start: Instant, frame: Duration) {
    if let Some(left) = frame.checked_sub(start.elapsed()) {
        std::thread::sleep(left);
    }
}
