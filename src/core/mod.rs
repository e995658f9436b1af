//! Runtime core: submission and event wiring.
//!
//! The only public API from this module is [`Executor`] (plus its builder and
//! [`Config`]), which turns tasks into handles.
//!
//! Internal modules:
//! - [`runner`]: runs one task on a detached tokio task with panic capture and event publishing;
//! - [`executor`]: submission entry points, one producer per task;
//! - [`builder`]: wires the event bus to subscribers.

mod builder;
mod config;
mod executor;
pub(crate) mod runner;

pub use builder::ExecutorBuilder;
pub use config::Config;
pub use executor::Executor;

pub(crate) use runner::panic_message;
