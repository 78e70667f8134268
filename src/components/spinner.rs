//! Indeterminate progress indicator for the model list affordance

use std::time::{Duration, Instant};

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_DURATION_MS: u64 = 80;

#[derive(Debug, Clone)]
pub struct Spinner {
    frame_index: usize,
    last_frame_time: Instant,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frame_index: 0,
            last_frame_time: Instant::now(),
        }
    }

    /// Advance one frame if the frame duration elapsed. Returns true when the frame changed.
    pub fn tick(&mut self) -> bool {
        if self.last_frame_time.elapsed() >= Duration::from_millis(FRAME_DURATION_MS) {
            self.frame_index = (self.frame_index + 1) % FRAMES.len();
            self.last_frame_time = Instant::now();
            true
        } else {
            false
        }
    }

    pub fn current_frame(&self) -> &'static str {
        FRAMES[self.frame_index % FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_starts_on_first_frame() {
        let spinner = Spinner::default();
        assert_eq!(spinner.current_frame(), "⠋");
    }

    #[test]
    fn test_spinner_tick_after_duration() {
        let mut spinner = Spinner::new();
        spinner.last_frame_time = Instant::now() - Duration::from_millis(100);
        assert!(spinner.tick());
        assert_eq!(spinner.frame_index, 1);
        assert_eq!(spinner.current_frame(), "⠙");
    }

    #[test]
    fn test_spinner_tick_too_early() {
        let mut spinner = Spinner::new();
        assert!(!spinner.tick());
        assert_eq!(spinner.frame_index, 0);
    }

    #[test]
    fn test_spinner_wraps() {
        let mut spinner = Spinner::new();
        for _ in 0..FRAMES.len() {
            spinner.last_frame_time = Instant::now() - Duration::from_millis(200);
            spinner.tick();
        }
        assert_eq!(spinner.frame_index, 0);
    }
}
