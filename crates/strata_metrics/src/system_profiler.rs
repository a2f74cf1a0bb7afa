//! Per-pass timing for named frame stages

use std::time::{Duration, Instant};

/// Accumulated time per named pass, in first-seen order.
///
/// Pass names are static so the per-frame path never allocates once every
/// name has been seen.
#[derive(Debug, Default)]
pub struct SystemProfiler {
    timings: Vec<(&'static str, Duration)>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_system<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.add(name, start.elapsed());
        result
    }

    fn add(&mut self, name: &'static str, elapsed: Duration) {
        match self.timings.iter_mut().find(|(n, _)| *n == name) {
            Some((_, total)) => *total += elapsed,
            None => self.timings.push((name, elapsed)),
        }
    }

    pub fn timing(&self, name: &str) -> Duration {
        self.timings
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(Duration::ZERO, |(_, total)| *total)
    }

    pub fn timings(&self) -> Vec<(&'static str, Duration)> {
        self.timings.clone()
    }

    /// Zero every total, keeping the names.
    pub fn reset(&mut self) {
        for (_, total) in &mut self.timings {
            *total = Duration::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_per_name() {
        let mut profiler = SystemProfiler::new();
        profiler.add("transform_resolve", Duration::from_micros(5));
        profiler.add("render_list", Duration::from_micros(2));
        profiler.add("transform_resolve", Duration::from_micros(3));

        assert_eq!(profiler.timing("transform_resolve"), Duration::from_micros(8));
        assert_eq!(profiler.timing("missing"), Duration::ZERO);
        let names: Vec<_> = profiler.timings().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["transform_resolve", "render_list"]);
    }

    #[test]
    fn time_system_returns_closure_value() {
        let mut profiler = SystemProfiler::new();
        let out = profiler.time_system("work", || 42);
        assert_eq!(out, 42);
        assert_eq!(profiler.timings().len(), 1);

        profiler.reset();
        assert_eq!(profiler.timing("work"), Duration::ZERO);
    }
}
