//! Binary-description generation.
//!
//! The generator scans the library's public headers and emits an XML
//! declaration tree for the site generator's consumer extension. Its
//! configuration is assembled here as a value and serialized to the tool's
//! `KEY = value` format on the way out, rather than spliced into a text
//! template.

use std::path::PathBuf;

use bindery_exec::{Captured, ExecError, ToolInvocation};

// Column the values start in; continuation lines align under it.
const VALUE_COLUMN: usize = 20;

/// Generator configuration: the fields that vary per project.
///
/// Output-format selection is not part of it. The pipeline always wants XML
/// only, quietly, with macro expansion for the export annotations in the
/// headers.
#[derive(Debug, Clone)]
pub struct DoxygenConfig {
    /// Project name recorded in the XML index.
    pub project_name: String,

    /// Header files to scan.
    pub inputs: Vec<PathBuf>,

    /// Preprocessor predefinitions applied while scanning.
    pub predefined: Vec<String>,

    /// Directory receiving the XML tree.
    pub xml_output: PathBuf,
}

impl DoxygenConfig {
    /// Serialize to the generator's configuration format.
    pub fn doxyfile(&self) -> String {
        let inputs: Vec<String> = self
            .inputs
            .iter()
            .map(|path| path.display().to_string())
            .collect();

        let mut out = String::new();
        entry(&mut out, "PROJECT_NAME", &self.project_name);
        entry(&mut out, "GENERATE_LATEX", "NO");
        entry(&mut out, "GENERATE_MAN", "NO");
        entry(&mut out, "GENERATE_RTF", "NO");
        entry(&mut out, "CASE_SENSE_NAMES", "NO");
        list(&mut out, "INPUT", &inputs);
        entry(&mut out, "QUIET", "YES");
        entry(&mut out, "JAVADOC_AUTOBRIEF", "YES");
        entry(&mut out, "AUTOLINK_SUPPORT", "NO");
        entry(&mut out, "GENERATE_HTML", "NO");
        entry(&mut out, "GENERATE_XML", "YES");
        entry(&mut out, "XML_OUTPUT", &self.xml_output.display().to_string());
        entry(&mut out, "ALIASES", r#""rst=\verbatim embed:rst""#);
        append(&mut out, "ALIASES", r#""endrst=\endverbatim""#);
        entry(&mut out, "MACRO_EXPANSION", "YES");
        list(&mut out, "PREDEFINED", &self.predefined);
        out
    }
}

fn entry(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{key:<18}= {value}\n"));
}

fn append(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("{key:<17}+= {value}\n"));
}

fn list(out: &mut String, key: &str, values: &[String]) {
    let separator = format!(" \\\n{}", " ".repeat(VALUE_COLUMN));
    entry(out, key, &values.join(&separator));
}

/// Handle to the generator executable.
#[derive(Debug, Clone)]
pub struct Doxygen {
    program: PathBuf,
}

impl Doxygen {
    /// Use the generator at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the generator with `config` fed over its standard input,
    /// capturing combined stdout/stderr.
    ///
    /// The capture is returned even when the tool fails, so the pipeline can
    /// echo the diagnostics before aborting.
    pub async fn generate(&self, config: &DoxygenConfig) -> Result<Captured, ExecError> {
        ToolInvocation::new(&self.program)
            .arg("-")
            .stdin(config.doxyfile().into_bytes())
            .capture()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DoxygenConfig {
        DoxygenConfig {
            project_name: "YASL".to_string(),
            inputs: vec![
                PathBuf::from("include/base.h"),
                PathBuf::from("include/memory/patch.h"),
            ],
            predefined: vec!["_WIN32=1".to_string(), "__cplusplus=1".to_string()],
            xml_output: PathBuf::from("docs/doxyxml"),
        }
    }

    #[test]
    fn doxyfile_names_the_project() {
        assert!(sample().doxyfile().contains("PROJECT_NAME      = YASL\n"));
    }

    #[test]
    fn inputs_are_space_joined_and_line_continued() {
        let text = sample().doxyfile();

        assert!(text.contains(
            "INPUT             = include/base.h \\\n                    include/memory/patch.h\n"
        ));
    }

    #[test]
    fn predefinitions_are_line_continued() {
        let text = sample().doxyfile();

        assert!(
            text.contains("PREDEFINED        = _WIN32=1 \\\n                    __cplusplus=1\n")
        );
    }

    #[test]
    fn only_xml_output_is_enabled() {
        let text = sample().doxyfile();

        assert!(text.contains("GENERATE_XML      = YES\n"));
        assert!(text.contains("GENERATE_HTML     = NO\n"));
        assert!(text.contains("GENERATE_LATEX    = NO\n"));
        assert!(text.contains("GENERATE_MAN      = NO\n"));
        assert!(text.contains("GENERATE_RTF      = NO\n"));
        assert!(text.contains("XML_OUTPUT        = docs/doxyxml\n"));
    }

    #[test]
    fn rst_aliases_accumulate() {
        let text = sample().doxyfile();

        assert!(text.contains(r#"ALIASES           = "rst=\verbatim embed:rst""#));
        assert!(text.contains(r#"ALIASES          += "endrst=\endverbatim""#));
    }
}
