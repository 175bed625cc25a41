use anyhow::Result;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "STAR_BOARD_DATA_DIR";

/// Redirect file looked up in the default data directory
pub const REDIRECT_FILE_NAME: &str = ".star_board_redirect";

const DEFAULT_DIRECTORY_NAME: &str = "Star Board";

/// JsonConnection owns the data directory all repositories write into
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    ///
    /// Resolution order: `STAR_BOARD_DATA_DIR`, then a redirect file inside
    /// `~/Documents/Star Board`, then `~/Documents/Star Board` itself.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            let dir = dir.trim();
            if !dir.is_empty() {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
                return Self::new(dir);
            }
        }

        let documents_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let default_data_dir = documents_dir.join(DEFAULT_DIRECTORY_NAME);

        Self::new(Self::resolve_redirect(default_data_dir))
    }

    /// Follow a redirect file in `default_dir` if it points at an existing directory
    pub fn resolve_redirect(default_dir: PathBuf) -> PathBuf {
        let redirect_file = default_dir.join(REDIRECT_FILE_NAME);
        if !redirect_file.exists() {
            info!("No redirect file found, using data directory: {}", default_dir.display());
            return default_dir;
        }

        match fs::read_to_string(&redirect_file) {
            Ok(redirected_path) => {
                let path = PathBuf::from(redirected_path.trim());
                if path.exists() {
                    info!("Found redirect file, using data directory: {}", path.display());
                    path
                } else {
                    warn!(
                        "Redirect file points to non-existent directory: {}. Using default.",
                        path.display()
                    );
                    default_dir
                }
            }
            Err(e) => {
                error!("Failed to read redirect file: {}. Using default directory.", e);
                default_dir
            }
        }
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the board document stored under `storage_key`
    pub fn document_path(&self, storage_key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", storage_key))
    }

    /// Path of the global configuration file
    pub fn global_config_path(&self) -> PathBuf {
        self.base_directory.join("global_config.yaml")
    }

    /// Write `contents` to `path` atomically: temp file first, then rename
    pub fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}
