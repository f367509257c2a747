//! Background tasks module
//!
//! Long-running loops that run alongside the HTTP server: the countdown
//! clock and the surface publisher.

pub mod publisher;
pub mod tick;

// Re-export main functions
pub use publisher::surface_publisher_task;
pub use tick::tick_loop;
