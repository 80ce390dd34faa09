//! Project-local package environment for documentation tooling.
//!
//! The site generator and its consumer extension are installed into an
//! isolated environment next to the docs, never into a system-wide
//! interpreter. The environment itself must already exist; this crate only
//! resolves its tools and installs packages through its pip client.

use std::path::{Path, PathBuf};

use bindery_exec::{executable, ToolInvocation};

/// A package to install: a registry name plus an optional source-control
/// revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Registry package name.
    pub name: String,

    /// Git revision to install from instead of a registry release.
    pub revision: Option<String>,
}

impl PackageSpec {
    /// A plain registry package.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: None,
        }
    }

    /// Pin the package to a git revision.
    pub fn at_revision(name: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: Some(revision.into()),
        }
    }

    /// Parse the `name` / `name@revision` config form.
    pub fn parse(spec: &str) -> Self {
        match spec.rsplit_once('@') {
            Some((name, revision)) => Self::at_revision(name, revision),
            None => Self::new(spec),
        }
    }

    /// The requirement string handed to the package manager.
    ///
    /// A pinned revision rewrites the requirement to pull from the package's
    /// GitHub repository at that revision.
    pub fn requirement(&self) -> String {
        match &self.revision {
            Some(revision) => format!("git+https://github.com/{}.git@{}", self.name, revision),
            None => self.name.clone(),
        }
    }
}

/// The isolated package environment at a fixed location relative to the
/// working directory.
#[derive(Debug, Clone)]
pub struct PackageEnv {
    root: PathBuf,
}

impl PackageEnv {
    /// Wrap the environment rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The environment root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the environment's executables.
    pub fn scripts_dir(&self) -> PathBuf {
        let subdir = if cfg!(windows) { "Scripts" } else { "bin" };
        self.root.join(subdir)
    }

    /// Path of a named tool inside the environment.
    pub fn tool(&self, name: &str) -> PathBuf {
        self.scripts_dir().join(executable(name))
    }

    /// Install one package through the environment's pip client.
    ///
    /// Fails before launching anything if the environment is missing, and on
    /// any non-zero pip exit. No retries: later pipeline steps are
    /// meaningless without the package.
    pub async fn install(&self, spec: &PackageSpec) -> Result<(), EnvError> {
        if !self.root.exists() {
            return Err(EnvError::Missing(self.root.clone()));
        }

        let requirement = spec.requirement();
        tracing::info!("Installing {}", requirement);

        ToolInvocation::new(self.tool("pip"))
            .args(["install", requirement.as_str()])
            .status()
            .await?;

        Ok(())
    }
}

/// Errors from the package environment.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Package environment not found at {}", .0.display())]
    Missing(PathBuf),

    #[error(transparent)]
    Exec(#[from] bindery_exec::ExecError),
}
