// paint_drop/mod.rs
// Re-exports for the paint drop record

mod types;

pub use types::*;
