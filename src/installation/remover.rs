use std::fmt;
use std::io;

use crate::installation::fs::Filesystem;
use crate::installation::prompt::Prompt;
use crate::installation::registry::InstallationRegistry;
use crate::model::Installation;

/// Result of a removal attempt. The registry is never touched by the
/// remover; callers drop the record themselves when [`is_success`] holds.
///
/// [`is_success`]: RemovalOutcome::is_success
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// No record with that name.
    Missing { name: String },
    /// The record exists but its root is already gone.
    AlreadyGone(Installation),
    /// The user declined; nothing was deleted.
    Declined(Installation),
    /// The root directory was deleted.
    Deleted(Installation),
}

impl RemovalOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::AlreadyGone(_) | Self::Deleted(_))
    }
}

impl fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "installation '{name}' does not exist!"),
            Self::AlreadyGone(installation) => write!(
                f,
                "installation '{}' does not exist anymore.",
                installation.name
            ),
            Self::Declined(_) => f.write_str("nothing deleted"),
            Self::Deleted(installation) => write!(
                f,
                "installation '{}' ({}) deleted!",
                installation.name, installation.root
            ),
        }
    }
}

/// Confirms with the user, then deletes an installation's root directory.
pub struct InstallationRemover<'a, P: Prompt + ?Sized> {
    prompt: &'a mut P,
    fs: &'a dyn Filesystem,
}

impl<'a, P: Prompt + ?Sized> InstallationRemover<'a, P> {
    pub fn new(prompt: &'a mut P, fs: &'a dyn Filesystem) -> Self {
        Self { prompt, fs }
    }

    /// Deletion errors are returned as-is; the record stays registered so the
    /// removal can be retried.
    pub fn remove(
        &mut self,
        registry: &InstallationRegistry<'_>,
        name: &str,
    ) -> io::Result<RemovalOutcome> {
        let Some(installation) = registry.get_installation(name).cloned() else {
            tracing::info!("remove requested for unknown installation {name}");
            return Ok(RemovalOutcome::Missing {
                name: name.to_string(),
            });
        };

        let root = installation.root_path();
        if !self.fs.is_live_dir(root) {
            tracing::info!("installation {installation} has no files left");
            return Ok(RemovalOutcome::AlreadyGone(installation));
        }

        let question = format!(
            "Remove installation '{}' ({})?\nThis will delete all files!",
            installation.name, installation.root
        );
        if !self.prompt.ask(&question) {
            tracing::info!("removal of {installation} declined");
            return Ok(RemovalOutcome::Declined(installation));
        }

        self.fs.remove_tree(root)?;
        tracing::info!("deleted installation {installation}");
        Ok(RemovalOutcome::Deleted(installation))
    }
}
