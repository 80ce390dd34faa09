//! Site rendering via the external static-site generator.

use std::ffi::OsString;
use std::path::PathBuf;

use bindery_exec::{ExecError, ToolInvocation};

/// One render of the documentation site.
///
/// The generator reads its own configuration from the source directory; the
/// invocation only overrides where the consumer extension finds the XML
/// tree, and optionally the theme.
#[derive(Debug, Clone)]
pub struct SphinxInvocation {
    /// Project key the XML mapping is registered under.
    pub project: String,

    /// Absolute path of the generated XML tree.
    pub xml_dir: PathBuf,

    /// Theme override, when configured.
    pub theme: Option<String>,

    /// Documentation source directory.
    pub source_dir: PathBuf,

    /// HTML destination directory.
    pub output_dir: PathBuf,
}

impl SphinxInvocation {
    /// Arguments handed to the generator.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from(format!(
            "-Dbreathe_projects.{}={}",
            self.project,
            self.xml_dir.display()
        ))];

        if let Some(theme) = &self.theme {
            args.push(OsString::from(format!("-Dhtml_theme={theme}")));
        }

        args.push(OsString::from("-b"));
        args.push(OsString::from("html"));
        args.push(self.source_dir.clone().into_os_string());
        args.push(self.output_dir.clone().into_os_string());
        args
    }

    /// Render the site with the given generator executable, stdio inherited.
    pub async fn render(&self, program: impl Into<PathBuf>) -> Result<(), ExecError> {
        ToolInvocation::new(program)
            .args(self.to_args())
            .status()
            .await
    }
}
