//! Poll-evaluate-notify loop

mod poll_loop;
mod report;
mod state;

pub use poll_loop::PollLoop;
pub use report::{FailureNotice, IterationReport};
pub use state::PollState;
