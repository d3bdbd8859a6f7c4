//! Error types for construction-time failures.
//!
//! Block execution never fails; everything here is raised while settings are
//! validated, triggers are scheduled from the host side, or operators are
//! built and bound.

use thiserror::Error;

use crate::graph::port::DataType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("sample rate must be finite and positive, got {0}")]
    SampleRate(f32),
    #[error("block size must be between 1 and {max}, got {got}")]
    BlockSize { got: usize, max: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerError {
    #[error("trigger offset {offset} outside block of {block_size} frames")]
    OutOfBlock { offset: usize, block_size: usize },
    #[error("more than {0} triggers scheduled in one block")]
    Capacity(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("invalid operator settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("node {node} has no input port named '{port}'")]
    UnknownPort { node: &'static str, port: String },
    #[error("port '{port}' expects {expected:?}, bound reference is {found:?}")]
    TypeMismatch {
        port: &'static str,
        expected: DataType,
        found: DataType,
    },
    #[error("port '{port}' is bound to a reference missing from the port data store")]
    DanglingReference { port: &'static str },
    #[error("port '{port}' carries {found} frames, operator block size is {expected}")]
    BlockSizeMismatch {
        port: &'static str,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("node registry used before registry::init()")]
    Uninitialized,
    #[error("no node class registered as '{0}'")]
    UnknownClass(String),
}
