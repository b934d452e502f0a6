//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::TierSizerError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .asp-tier-sizer.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use asp_tier_sizer::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Targeting {} of tier capacity", config.threshold);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .asp-tier-sizer.toml");
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).context("Failed to parse .asp-tier-sizer.toml")?;

        config
            .validate()
            .map_err(|source| TierSizerError::InvalidConfig {
                path: config_path,
                source,
            })?;

        Ok(config)
    }

    /// Save config to .asp-tier-sizer.toml in the given directory
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .context("Failed to write .asp-tier-sizer.toml")?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        project_root.join(CONFIG_FILE_NAME).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::TierTableError;
    use std::io;
    use std::sync::{Arc, Mutex};

    // Mock FileSystem for testing
    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
        should_fail_write: bool,
        written_content: Arc<Mutex<Option<String>>>,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                file_content: None,
                should_fail_read: false,
                should_fail_write: false,
                written_content: Arc::new(Mutex::new(None)),
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                ..Self::new()
            }
        }

        fn with_read_error() -> Self {
            Self {
                should_fail_read: true,
                ..Self::new()
            }
        }

        fn with_write_error() -> Self {
            Self {
                should_fail_write: true,
                ..Self::new()
            }
        }

        fn get_written_content(&self) -> Option<String> {
            self.written_content.lock().unwrap().clone()
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, _path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            if self.should_fail_write {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            let contents_str = String::from_utf8_lossy(contents.as_ref()).to_string();
            *self.written_content.lock().unwrap() = Some(contents_str);
            Ok(())
        }
    }

    #[test]
    fn test_loader_loads_from_valid_toml() {
        // Use real filesystem with tempdir for this test
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);

        std::fs::write(&config_path, "threshold = 0.65\n").unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.threshold, 0.65);
        assert!(config.tiers.is_none());
    }

    #[test]
    fn test_loader_with_missing_file_uses_defaults() {
        let fs = MockFileSystem::new();
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_loader_with_invalid_toml_returns_error() {
        let fs = MockFileSystem::with_content("threshold = {");
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to parse"));
    }

    #[test]
    fn test_loader_with_permission_error_returns_error() {
        let fs = MockFileSystem::with_read_error();
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);

        // PermissionDenied should be propagated, not treated as a missing file
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read"));
    }

    #[test]
    fn test_loader_with_invalid_threshold_returns_typed_error() {
        let fs = MockFileSystem::with_content("threshold = 0.0\n");
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();

        match err.downcast_ref::<TierSizerError>() {
            Some(TierSizerError::InvalidConfig { path, source }) => {
                assert!(path.ends_with(CONFIG_FILE_NAME));
                assert_eq!(*source, TierTableError::ThresholdOutOfRange(0.0));
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_save_writes_parseable_toml() {
        let fs = MockFileSystem::new();
        ConfigLoader::save_with_fs(&ConfigFile::starter(), Path::new("/test"), &fs).unwrap();

        let written = fs.get_written_content().expect("content should be written");
        assert!(written.contains("threshold = 0.7"));

        let reloaded = ConfigLoader::load_with_fs(
            Path::new("/test"),
            &MockFileSystem::with_content(&written),
        )
        .unwrap();
        assert_eq!(reloaded, ConfigFile::starter());
    }

    #[test]
    fn test_save_with_write_error_returns_error() {
        let fs = MockFileSystem::with_write_error();
        let result = ConfigLoader::save_with_fs(&ConfigFile::default(), Path::new("/test"), &fs);

        assert!(result.unwrap_err().to_string().contains("Failed to write"));
    }

    #[test]
    fn test_exists_returns_true_after_save() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::exists(temp.path()));

        ConfigLoader::save(&ConfigFile::default(), temp.path()).unwrap();
        assert!(ConfigLoader::exists(temp.path()));
    }
}
