//! External tool detection
//!
//! Live reports need `mongosh` on PATH (or at the configured path).

use crate::error::TierSizerError;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use thiserror::Error;

/// Install hint shown when mongosh is missing
pub const MONGOSH_INSTALL_HINT: &str = "npm install -g mongosh (or your platform's package manager)";

/// mongosh installation docs
pub const MONGOSH_DOCS_URL: &str = "https://www.mongodb.com/docs/mongodb-shell/install/";

/// Errors that can occur during tool operations
#[derive(Error, Debug)]
pub enum ToolError {
    /// I/O error during tool execution
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool execution failed
    #[error("Failed to get version for {0}")]
    VersionFailed(String),
}

/// An external binary with detection capabilities
///
/// # Examples
///
/// ```no_run
/// use asp_tier_sizer::tools::Tool;
///
/// let mongosh = Tool::new("mongosh", "mongosh");
/// if mongosh.is_installed() {
///     println!("{}", mongosh.version()?);
/// }
/// # Ok::<(), asp_tier_sizer::tools::ToolError>(())
/// ```
#[derive(Debug)]
pub struct Tool<CE: CommandExecutor = RealCommandExecutor> {
    /// Human-readable name
    pub name: String,
    /// Binary name in PATH, or a path to it
    pub binary: String,
    cmd_executor: CE,
}

impl Tool<RealCommandExecutor> {
    /// Create a new Tool with real command execution
    pub fn new(name: impl Into<String>, binary: impl Into<String>) -> Self {
        Self::with_executor(name, binary, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> Tool<CE> {
    /// Create a new Tool with a custom command executor
    pub fn with_executor(name: impl Into<String>, binary: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            name: name.into(),
            binary: binary.into(),
            cmd_executor,
        }
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        which::which(&self.binary).is_ok()
    }

    /// Get the first line of `<binary> --version`
    pub fn version(&self) -> Result<String, ToolError> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg("--version"), &self.binary)?;

        if !output.status.success() {
            return Err(ToolError::VersionFailed(self.name.clone()));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_string())
    }

    /// Fail with [`TierSizerError::ToolMissing`] when the binary cannot be found
    pub fn require(&self) -> Result<(), TierSizerError> {
        if self.is_installed() {
            Ok(())
        } else {
            Err(TierSizerError::ToolMissing {
                tool: self.name.clone(),
                install_hint: MONGOSH_INSTALL_HINT.to_string(),
                docs_url: Some(MONGOSH_DOCS_URL.to_string()),
            })
        }
    }
}
