//! Run Rake as one step of a build and deployment pipeline.
//!
//! A [`RakeInvocationConfig`] is translated into an argument string and an
//! absolute working directory, then handed to the [`ProcessExecuter`] of an
//! [`Agent`]. [`LocalAgent`] runs the process on the current machine.

pub mod action;
pub mod agent;
pub mod arguments;
pub mod config;
pub mod description;
pub mod environment;
pub mod error;
pub mod form;
pub mod process;
pub mod working_dir;

pub use action::{Action, ActionProperties, ExecutionContext, RakeAction};
pub use agent::{Agent, FileOperations, LocalAgent, ProcessExecuter, ProcessOutput};
pub use config::{RakeInvocationConfig, Settings, StepOverrides};
pub use error::ActionError;
