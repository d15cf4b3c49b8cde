use thiserror::Error;

use crate::installation::fs::Filesystem;
use crate::model::{Config, Defaults, Installation};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("installation '{0}' does not exist!")]
    DoesNotExist(String),

    #[error("installation '{}' already exists ('{}')!", .0.name, .0.root)]
    AlreadyExists(Installation),

    /// A caller tried to drop a record the registry never held.
    #[error("installation '{0}' is not registered")]
    NotFound(String),

    #[error("installation name must not be empty")]
    EmptyName,
}

/// Uniqueness and liveness rules over the installations held by [`Config`].
pub struct InstallationRegistry<'a> {
    config: &'a mut Config,
    fs: &'a dyn Filesystem,
}

impl<'a> InstallationRegistry<'a> {
    pub fn new(config: &'a mut Config, fs: &'a dyn Filesystem) -> Self {
        Self { config, fs }
    }

    pub fn installations(&self) -> &[Installation] {
        &self.config.installations
    }

    pub fn defaults(&self) -> &Defaults {
        &self.config.defaults
    }

    pub fn is_live(&self, installation: &Installation) -> bool {
        self.fs.is_live_dir(installation.root_path())
    }

    pub fn get_installation(&self, name: &str) -> Option<&Installation> {
        self.config
            .installations
            .iter()
            .find(|installation| installation.name == name)
    }

    /// Append a new record. Fails closed on an empty or already registered name.
    pub fn create_installation(
        &mut self,
        name: &str,
        root: &str,
    ) -> Result<&Installation, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        self.ensure_does_not_exist(name)?;

        self.config
            .installations
            .push(Installation::new(name, root));
        tracing::info!("registered installation {name} at {root}");

        let created = self.config.installations.len() - 1;
        Ok(&self.config.installations[created])
    }

    /// Drop the record from the registry. Files on disk are left alone.
    pub fn remove_installation(
        &mut self,
        installation: &Installation,
    ) -> Result<Installation, RegistryError> {
        let index = self
            .config
            .installations
            .iter()
            .position(|candidate| candidate == installation)
            .ok_or_else(|| RegistryError::NotFound(installation.name.clone()))?;

        let removed = self.config.installations.remove(index);
        tracing::info!("unregistered installation {}", removed.name);
        Ok(removed)
    }

    /// Resolve `name` to a live installation.
    ///
    /// A record whose root is gone is removed from the registry before the
    /// error is returned.
    pub fn ensure_exists(&mut self, name: &str) -> Result<&Installation, RegistryError> {
        let Some(index) = self
            .config
            .installations
            .iter()
            .position(|installation| installation.name == name)
        else {
            return Err(RegistryError::DoesNotExist(name.to_string()));
        };

        if !self.is_live(&self.config.installations[index]) {
            let stale = self.config.installations.remove(index);
            tracing::warn!("dropped stale installation {stale}");
            return Err(RegistryError::DoesNotExist(name.to_string()));
        }

        Ok(&self.config.installations[index])
    }

    /// Fails if any record uses `name`, live or not.
    pub fn ensure_does_not_exist(&self, name: &str) -> Result<(), RegistryError> {
        match self.get_installation(name) {
            Some(existing) => Err(RegistryError::AlreadyExists(existing.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installation::fs::OsFilesystem;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn live_root(dir: &TempDir, name: &str) -> String {
        let root = dir.path().join(name);
        std::fs::create_dir_all(&root).expect("mkdir");
        root.to_string_lossy().into_owned()
    }

    fn missing_root(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_get_installation_finds_by_name() {
        let mut config = Config {
            installations: vec![
                Installation::new("a", "/srv/a"),
                Installation::new("b", "/srv/b"),
            ],
            ..Config::default()
        };
        let registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        assert_eq!(
            registry.get_installation("b").map(|i| i.root.as_str()),
            Some("/srv/b")
        );
        assert!(registry.get_installation("c").is_none());
    }

    #[test]
    fn test_create_appends_in_order() {
        let mut config = Config::default();
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        registry.create_installation("a", "/srv/a").expect("create a");
        let created = registry.create_installation("b", "/srv/b").expect("create b");
        assert_eq!(created.root, "/srv/b");

        let names: Vec<&str> = config.installations.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let mut config = Config::default();
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);
        registry.create_installation("a", "/srv/a").expect("create");

        let result = registry.create_installation("a", "/srv/other");

        assert!(matches!(result, Err(RegistryError::AlreadyExists(ref i)) if i.root == "/srv/a"));
        assert_eq!(registry.installations().len(), 1);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut config = Config::default();
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        assert!(matches!(
            registry.create_installation("  ", "/srv/a"),
            Err(RegistryError::EmptyName)
        ));
        assert!(registry.installations().is_empty());
    }

    #[test]
    fn test_names_stay_unique_across_create_and_remove() {
        let mut config = Config::default();
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);
        let ops = [
            ("create", "a"),
            ("create", "b"),
            ("create", "a"),
            ("remove", "a"),
            ("create", "a"),
            ("create", "b"),
            ("remove", "c"),
            ("create", "c"),
        ];

        for (op, name) in ops {
            match op {
                "create" => {
                    if registry.ensure_does_not_exist(name).is_ok() {
                        registry
                            .create_installation(name, &format!("/srv/{name}"))
                            .expect("create after check");
                    }
                }
                _ => {
                    let _ = registry.remove_installation(&Installation::new(name, ""));
                }
            }

            let names: HashSet<&str> = registry
                .installations()
                .iter()
                .map(|i| i.name.as_str())
                .collect();
            assert_eq!(names.len(), registry.installations().len());
        }

        assert_eq!(registry.installations().len(), 3);
    }

    #[test]
    fn test_remove_matches_by_name_only() {
        let mut config = Config {
            installations: vec![Installation::new("a", "/srv/a")],
            ..Config::default()
        };
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        let removed = registry
            .remove_installation(&Installation::new("a", "/elsewhere"))
            .expect("remove");

        assert_eq!(removed.root, "/srv/a");
        assert!(registry.installations().is_empty());
    }

    #[test]
    fn test_remove_non_member_is_error() {
        let mut config = Config::default();
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        let result = registry.remove_installation(&Installation::new("ghost", "/srv/ghost"));

        assert!(matches!(result, Err(RegistryError::NotFound(ref name)) if name == "ghost"));
    }

    #[test]
    fn test_ensure_exists_returns_live_installation() {
        let dir = TempDir::new().expect("tempdir");
        let root = live_root(&dir, "a");
        let mut config = Config {
            installations: vec![Installation::new("a", root.clone())],
            ..Config::default()
        };
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        let found = registry.ensure_exists("a").expect("live");

        assert_eq!(found.root, root);
    }

    #[test]
    fn test_ensure_exists_drops_stale_record() {
        // Arrange
        let dir = TempDir::new().expect("tempdir");
        let mut config = Config {
            installations: vec![
                Installation::new("stale", missing_root(&dir, "stale")),
                Installation::new("live", live_root(&dir, "live")),
            ],
            ..Config::default()
        };
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        // Act
        let result = registry.ensure_exists("stale");

        // Assert
        assert!(matches!(result, Err(RegistryError::DoesNotExist(ref name)) if name == "stale"));
        assert!(registry.get_installation("stale").is_none());
        assert!(registry.get_installation("live").is_some());
    }

    #[test]
    fn test_ensure_exists_treats_file_root_as_stale() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").expect("write");
        let mut config = Config {
            installations: vec![Installation::new("a", file.to_string_lossy())],
            ..Config::default()
        };
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        assert!(registry.ensure_exists("a").is_err());
        assert!(registry.installations().is_empty());
    }

    #[test]
    fn test_ensure_exists_unknown_name_leaves_registry_alone() {
        let mut config = Config {
            installations: vec![Installation::new("a", "/srv/a")],
            ..Config::default()
        };
        let mut registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        assert!(matches!(
            registry.ensure_exists("b"),
            Err(RegistryError::DoesNotExist(_))
        ));
        assert_eq!(registry.installations().len(), 1);
    }

    #[test]
    fn test_ensure_does_not_exist_ignores_liveness() {
        let dir = TempDir::new().expect("tempdir");
        let mut config = Config {
            installations: vec![
                Installation::new("stale", missing_root(&dir, "stale")),
                Installation::new("live", live_root(&dir, "live")),
            ],
            ..Config::default()
        };
        let registry = InstallationRegistry::new(&mut config, &OsFilesystem);

        assert!(matches!(
            registry.ensure_does_not_exist("stale"),
            Err(RegistryError::AlreadyExists(_))
        ));
        assert!(matches!(
            registry.ensure_does_not_exist("live"),
            Err(RegistryError::AlreadyExists(_))
        ));
        assert!(registry.ensure_does_not_exist("fresh").is_ok());
    }

    #[test]
    fn test_already_exists_message_names_root() {
        let err = RegistryError::AlreadyExists(Installation::new("a", "/srv/a"));
        assert_eq!(err.to_string(), "installation 'a' already exists ('/srv/a')!");
    }
}
