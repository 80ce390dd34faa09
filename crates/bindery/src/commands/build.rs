//! Documentation build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use bindery_build::{BuildConfig, DocBuilder};
use bindery_env::PackageEnv;

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config: &ConfigFile, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building documentation...");

    let defaults = BuildConfig::default();
    let env = PackageEnv::new(&config.env.dir);

    let build_config = BuildConfig {
        project: config.project.name.clone(),
        docs_dir: PathBuf::from(&config.docs.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&config.docs.output)),
        xml_dir: config
            .docs
            .xml
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(&config.docs.dir).join("doxyxml")),
        include_dir: PathBuf::from(&config.headers.dir),
        headers: config.headers.files.clone(),
        predefined: config.headers.predefined.clone(),
        theme: config.docs.theme.clone(),
        doxygen: config
            .build
            .doxygen
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or(defaults.doxygen),
        sphinx: env.tool("sphinx-build"),
    };

    let result = DocBuilder::new(build_config).build().await?;

    tracing::info!("Rendered HTML in {}ms", result.duration_ms);
    tracing::info!("Output: {}", result.html_dir.display());

    Ok(())
}
