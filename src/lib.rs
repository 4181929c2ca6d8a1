pub mod app;
pub mod colors;
pub mod config;
pub mod device;
pub mod init_config;
pub mod paint_drop;
pub mod profiler;
pub mod renderer;
pub mod simulation;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
