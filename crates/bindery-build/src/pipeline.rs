//! The sequential documentation build.

use std::path::PathBuf;
use std::time::Instant;

use bindery_env::PackageEnv;
use bindery_exec::{executable, ExecError};

use crate::doxygen::{Doxygen, DoxygenConfig};
use crate::sphinx::SphinxInvocation;

/// Public headers documented by default.
pub const DEFAULT_HEADERS: &[&str] = &[
    "base.h",
    "config.h",
    "memory.h",
    "script.h",
    "status.h",
    "yasl.h",
    "memory/data.h",
    "memory/patch.h",
    "memory/peformat.h",
    "memory/protection.h",
    "memory/trampoline.h",
];

/// Predefinitions matching the build environment the headers target.
pub const DEFAULT_PREDEFINED: &[&str] =
    &["_WIN32=1", "__cplusplus=1", "_MSVC_LANG=202002L", "_DLL=1"];

/// Configuration for one documentation build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Project name, used both in the generator config and as the XML
    /// mapping key at render time.
    pub project: String,

    /// Documentation source directory.
    pub docs_dir: PathBuf,

    /// HTML destination directory.
    pub output_dir: PathBuf,

    /// Directory receiving the intermediate XML tree.
    pub xml_dir: PathBuf,

    /// Directory holding the library's public headers.
    pub include_dir: PathBuf,

    /// Header files to scan, relative to `include_dir`.
    pub headers: Vec<String>,

    /// Preprocessor predefinitions for the scan.
    pub predefined: Vec<String>,

    /// Theme override for the renderer.
    pub theme: Option<String>,

    /// Binary-description generator executable.
    pub doxygen: PathBuf,

    /// Site generator executable.
    pub sphinx: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let docs_dir = PathBuf::from("docs");
        Self {
            project: "YASL".to_string(),
            xml_dir: docs_dir.join("doxyxml"),
            docs_dir,
            output_dir: PathBuf::from("_build"),
            include_dir: PathBuf::from("include"),
            headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
            predefined: DEFAULT_PREDEFINED.iter().map(|p| p.to_string()).collect(),
            theme: None,
            doxygen: PathBuf::from(".").join(executable("doxygen")),
            sphinx: PackageEnv::new("_env").tool("sphinx-build"),
        }
    }
}

/// Result of a completed build.
#[derive(Debug)]
pub struct BuildResult {
    /// Directory containing the rendered HTML.
    pub html_dir: PathBuf,

    /// Total build time in milliseconds.
    pub duration_ms: u64,
}

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Binary-description generator exited with {status}")]
    Generator { status: std::process::ExitStatus },

    #[error("Failed to resolve {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Sequential two-step builder: generate the XML declaration tree, then
/// render the site against it.
pub struct DocBuilder {
    config: BuildConfig,
}

impl DocBuilder {
    /// Create a builder from a build configuration.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run the build.
    ///
    /// Rendering never starts unless generation succeeded; the renderer
    /// consumes the XML tree as input.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.generate_xml().await?;
        self.render_html().await?;

        Ok(BuildResult {
            html_dir: self.config.output_dir.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn generate_xml(&self) -> Result<(), BuildError> {
        let config = DoxygenConfig {
            project_name: self.config.project.clone(),
            inputs: self
                .config
                .headers
                .iter()
                .map(|header| self.config.include_dir.join(header))
                .collect(),
            predefined: self.config.predefined.clone(),
            xml_output: self.config.xml_dir.clone(),
        };

        tracing::info!("Generating XML declarations for {}", self.config.project);

        let captured = Doxygen::new(&self.config.doxygen).generate(&config).await?;

        // The generator's own diagnostics, shown whether or not it succeeded.
        print!("{}", captured.text);

        if !captured.success() {
            return Err(BuildError::Generator {
                status: captured.status,
            });
        }
        Ok(())
    }

    async fn render_html(&self) -> Result<(), BuildError> {
        let xml_dir =
            std::path::absolute(&self.config.xml_dir).map_err(|source| BuildError::Resolve {
                path: self.config.xml_dir.clone(),
                source,
            })?;

        tracing::info!("Rendering HTML into {}", self.config.output_dir.display());

        let invocation = SphinxInvocation {
            project: self.config.project.clone(),
            xml_dir,
            theme: self.config.theme.clone(),
            source_dir: self.config.docs_dir.clone(),
            output_dir: self.config.output_dir.clone(),
        };

        invocation.render(&self.config.sphinx).await?;
        Ok(())
    }
}
