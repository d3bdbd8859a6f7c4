pub mod dsp;
pub mod error;
pub mod graph; // Node operators, ports and the class registry
pub mod io; // Cross-thread trigger delivery

pub use error::{BuildError, RegistryError, SettingsError, TriggerError};

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Upper bound on trigger events carried by one block.
pub const MAX_TRIGGERS_PER_BLOCK: usize = 64;
