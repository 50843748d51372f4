//! `.gitignore` assembly: language templates plus user-supplied entries.

use anyhow::Result;

use ghb_core::prompter::Prompter;

/// Sentinel the user types to finish entering custom ignore lines.
pub const CUSTOM_LINES_SENTINEL: &str = "imdone";

/// Languages with a supported community template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Python projects.
    Python,
    /// Node.js projects.
    Node,
}

impl Language {
    /// All selectable languages, in prompt order.
    pub const ALL: [Self; 2] = [Self::Python, Self::Node];

    /// Template file name in the community gitignore collection.
    pub fn template_name(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Node => "Node",
        }
    }

    /// Prompt labels for all languages.
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(ToString::to_string).collect()
    }

    /// Map a prompt selection index back to a language.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template_name())
    }
}

/// Combine a downloaded template with custom lines into the final
/// `.gitignore` content.
///
/// The credentials file is always excluded: a generated project must
/// never commit its own `.env`.
pub fn assemble(template: &str, custom_lines: &[String]) -> String {
    let mut out = template.trim_end().to_string();
    out.push_str("\n\n# Local configuration\n.env\n");

    if !custom_lines.is_empty() {
        out.push_str("\n# Project specific\n");
        for line in custom_lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

/// Prompt for custom ignore lines, one per answer, until the sentinel.
///
/// Blank answers are skipped rather than recorded.
///
/// # Errors
///
/// Propagates prompt I/O errors.
pub fn collect_custom_lines(prompter: &dyn Prompter) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    loop {
        let entry = prompter.input(
            &format!("Add a .gitignore entry ('{CUSTOM_LINES_SENTINEL}' to finish)"),
            CUSTOM_LINES_SENTINEL,
        )?;
        let entry = entry.trim();

        if entry == CUSTOM_LINES_SENTINEL {
            return Ok(lines);
        }
        if !entry.is_empty() {
            lines.push(entry.to_string());
        }
    }
}
