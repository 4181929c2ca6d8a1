use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Simple scoped profiler recording cumulative time per section.
#[derive(Default)]
pub struct Profiler {
    pub timings: HashMap<&'static str, Duration>,
    pub calls: HashMap<&'static str, u32>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self, guard: &ProfilerGuard) {
        let elapsed = guard.start.elapsed();
        *self.timings.entry(guard.name).or_default() += elapsed;
        *self.calls.entry(guard.name).or_default() += 1;
    }

    pub fn report_sorted(&self) -> Vec<(&'static str, Duration)> {
        let mut v: Vec<_> = self.timings.iter().map(|(n, d)| (*n, *d)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }

    pub fn clear(&mut self) {
        self.timings.clear();
        self.calls.clear();
    }

    /// Log the average time per call of each section, then reset.
    pub fn log_and_clear(&mut self) {
        for (name, total) in self.report_sorted() {
            let calls = self.calls.get(name).copied().unwrap_or(1).max(1);
            log::info!("{:<16} {:>6} calls  {:?}/call", name, calls, total / calls);
        }
        self.clear();
    }
}

pub struct ProfilerGuard {
    name: &'static str,
    start: Instant,
}

/// Start a profiling section. Returns a guard that will update the global
/// profiler when dropped.
pub fn start(name: &'static str) -> ProfilerGuard {
    ProfilerGuard { name, start: Instant::now() }
}

#[cfg(feature = "profiling")]
impl Drop for ProfilerGuard {
    fn drop(&mut self) {
        crate::PROFILER.lock().finish(self);
    }
}

/// Macro helper to profile a scope only when the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _guard = $crate::profiler::start($name);
    };
}
