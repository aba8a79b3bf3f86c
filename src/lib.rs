//! Live system metrics read from the Linux `/proc` filesystem: CPU and
//! memory utilization, uptime, and per-process resource usage.

pub mod calc;
pub mod config;
pub mod error;
pub mod format;
pub mod process;
pub mod processor;
pub mod reader;
pub mod source;
pub mod system;
pub mod user;

#[cfg(test)]
mod fixture;

pub use config::{Config, ProcPaths};
pub use error::{ConfigError, ReadError};
pub use process::{Process, ProcessSnapshot};
pub use processor::{CpuSample, Processor};
pub use source::Source;
pub use system::System;
pub use user::User;
