//! Frame timing

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

/// Rolling frame-duration statistics over the last `window` frames.
#[derive(Debug)]
pub struct FrameTimer {
    frame_start: Option<Instant>,
    frame_times: RingBuffer<Duration>,
    frames: usize,
}

impl FrameTimer {
    pub fn new(window: usize) -> Self {
        Self {
            frame_start: None,
            frame_times: RingBuffer::new(window),
            frames: 0,
        }
    }

    pub fn begin(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Record the frame started by `begin`. Ignored without a matching `begin`.
    pub fn end(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record(start.elapsed());
        }
    }

    pub(crate) fn record(&mut self, elapsed: Duration) {
        self.frame_times.push(elapsed);
        self.frames += 1;
    }

    /// Frames recorded since creation.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        let avg = self.frame_times.average().as_secs_f64();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_times.average().as_secs_f64() * 1000.0
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.frame_times.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_fps_from_average() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(30));
        assert_eq!(timer.frames(), 2);
        assert!((timer.frame_time_ms() - 20.0).abs() < 1e-9);
        assert!((timer.fps() - 50.0).abs() < 1e-9);
        let (min, max) = timer.frame_time_range_ms();
        assert!((min - 10.0).abs() < 1e-9);
        assert!((max - 30.0).abs() < 1e-9);
    }

    #[test]
    fn end_without_begin_records_nothing() {
        let mut timer = FrameTimer::new(4);
        timer.end();
        assert_eq!(timer.frames(), 0);
        assert_eq!(timer.fps(), 0.0);

        timer.begin();
        timer.end();
        assert_eq!(timer.frames(), 1);
    }
}
