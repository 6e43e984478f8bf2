//! Poll loop orchestration.

pub mod poll_scheduler;

pub use poll_scheduler::PollScheduler;
