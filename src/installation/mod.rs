pub mod fs;
pub mod paths;
pub mod prompt;
pub mod registry;
pub mod remover;

pub use fs::{Filesystem, OsFilesystem};
pub use prompt::{AssumeYes, Prompt, StdinPrompt};
pub use registry::InstallationRegistry;
pub use remover::{InstallationRemover, RemovalOutcome};
