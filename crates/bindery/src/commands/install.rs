//! Install the documentation toolchain into the package environment.

use anyhow::{Context, Result};
use bindery_env::{PackageEnv, PackageSpec};

use crate::config::ConfigFile;

/// Run the install command.
pub async fn run(config: &ConfigFile) -> Result<()> {
    let env = PackageEnv::new(&config.env.dir);

    for package in &config.env.packages {
        let spec = PackageSpec::parse(package);
        env.install(&spec)
            .await
            .with_context(|| format!("Failed to install {}", spec.name))?;
    }

    tracing::info!("Toolchain ready in {}", env.root().display());

    Ok(())
}
