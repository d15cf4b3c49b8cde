use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Context, Result};

use crate::installation::paths::absolute_root;
use crate::installation::{
    Filesystem, InstallationRegistry, InstallationRemover, Prompt, RemovalOutcome,
};
use crate::model::{Config, ConfigStore};

/// Process context: the store, the config loaded from it, and the
/// collaborators commands need. Built once in `main` and passed down.
pub struct App {
    store: ConfigStore,
    pub config: Config,
    prompt: Box<dyn Prompt>,
    fs: Box<dyn Filesystem>,
    /// User-facing lines produced by commands, drained by `main`.
    pub notifications: VecDeque<String>,
}

impl App {
    pub fn new(store: ConfigStore, prompt: Box<dyn Prompt>, fs: Box<dyn Filesystem>) -> Result<Self> {
        let mut notifications = VecDeque::new();
        if !store.exists() {
            notifications.push_back("config file missing, creating new".to_string());
        }

        let config = store
            .load()
            .with_context(|| format!("cannot load {}", store.path().display()))?;

        Ok(Self {
            store,
            config,
            prompt,
            fs,
            notifications,
        })
    }

    pub fn drain_notifications(&mut self) -> Vec<String> {
        self.notifications.drain(..).collect()
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push_back(message.into());
    }

    fn save(&self) -> Result<()> {
        self.store
            .save(&self.config)
            .with_context(|| format!("cannot save {}", self.store.path().display()))
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Delete an installation's files after confirmation and unregister it.
    ///
    /// Unknown names and declined prompts are reported, not returned as
    /// errors. Deletion and save failures propagate.
    pub fn remove_installation_command(&mut self, name: &str) -> Result<()> {
        let mut registry = InstallationRegistry::new(&mut self.config, self.fs.as_ref());
        let outcome = InstallationRemover::new(self.prompt.as_mut(), self.fs.as_ref())
            .remove(&registry, name)
            .with_context(|| format!("failed to remove installation '{name}'"))?;

        match &outcome {
            RemovalOutcome::AlreadyGone(installation) | RemovalOutcome::Deleted(installation) => {
                registry.remove_installation(installation)?;
            }
            RemovalOutcome::Missing { .. } | RemovalOutcome::Declined(_) => {}
        }

        let success = outcome.is_success();
        self.notify(outcome.to_string());

        if success {
            self.save()?;
        }
        Ok(())
    }

    /// Register `root` under `name`, then create the directory.
    ///
    /// The record is only kept once the directory exists, so a rejected name
    /// never leaves anything on disk.
    pub fn create_installation_command(&mut self, name: &str, root: &Path) -> Result<()> {
        let root = absolute_root(root)
            .with_context(|| format!("invalid installation root {}", root.display()))?;
        let root_text = root.to_string_lossy().into_owned();

        let mut registry = InstallationRegistry::new(&mut self.config, self.fs.as_ref());
        if let Err(err) = registry.ensure_does_not_exist(name) {
            self.notify(err.to_string());
            return Ok(());
        }

        let created = match registry.create_installation(name, &root_text) {
            Ok(installation) => installation.clone(),
            Err(err) => {
                self.notify(err.to_string());
                return Ok(());
            }
        };

        if let Err(err) = self.fs.create_dir_all(&root) {
            registry.remove_installation(&created)?;
            return Err(err).with_context(|| format!("cannot create {}", root.display()));
        }

        self.notify(format!(
            "installation '{}' created! ({})",
            created.name, created.root
        ));
        self.save()
    }

    pub fn list_installations_command(&mut self) -> Result<()> {
        let registry = InstallationRegistry::new(&mut self.config, self.fs.as_ref());
        let rows: Vec<String> = registry
            .installations()
            .iter()
            .map(|installation| {
                let status = if registry.is_live(installation) {
                    "live"
                } else {
                    "stale"
                };
                format!("{installation} [{status}]")
            })
            .collect();

        if rows.is_empty() {
            self.notify("no installations");
        } else {
            self.notifications.extend(rows);
        }
        Ok(())
    }

    /// Verify that `name` is live. Stale records are dropped and persisted.
    pub fn check_installation_command(&mut self, name: &str) -> Result<()> {
        let before = self.config.installations.len();
        let mut registry = InstallationRegistry::new(&mut self.config, self.fs.as_ref());

        let message = match registry.ensure_exists(name) {
            Ok(installation) => format!("installation {installation} is live"),
            Err(err) => err.to_string(),
        };

        let healed = self.config.installations.len() != before;
        self.notify(message);

        if healed {
            self.save()?;
        }
        Ok(())
    }

    pub fn show_defaults_command(&mut self) -> Result<()> {
        let registry = InstallationRegistry::new(&mut self.config, self.fs.as_ref());
        let defaults = registry.defaults().clone();
        self.notify(format!("min-ram: {}G", defaults.min_ram));
        self.notify(format!("max-ram: {}G", defaults.max_ram));
        self.notify(format!("idle_time: {}", defaults.idle_time));
        self.notify(format!("backups: {}", defaults.backups));
        Ok(())
    }
}
