// File: src/core/context.rs
//! Context hints derived from the file the identifier is destined for.

use std::path::Path;

/// The source-language family a file name points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFamily {
    /// C or C++ implementation files.
    C,
    /// C or C++ headers. Also counted as C family.
    Header,
    /// JavaScript and TypeScript.
    Script,
    Python,
    Java,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextHint {
    extension: String,
    family: SourceFamily,
}

impl ContextHint {
    /// Accepts a path (`src/file.h`), a bare file name or a bare extension
    /// (`h` or `.h`). Matching is case-insensitive.
    pub fn from_file_name(name: &str) -> Self {
        let trimmed = name.trim();
        let extension = Path::new(trimmed)
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_else(|| trimmed.trim_start_matches('.').to_string())
            .to_ascii_lowercase();

        let family = match extension.as_str() {
            "h" | "hh" | "hpp" | "hxx" => SourceFamily::Header,
            "c" | "cc" | "cpp" | "cxx" => SourceFamily::C,
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => SourceFamily::Script,
            "py" | "pyi" => SourceFamily::Python,
            "java" => SourceFamily::Java,
            _ => SourceFamily::Other,
        };

        Self { extension, family }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn family(&self) -> SourceFamily {
        self.family
    }

    pub fn is_c_family(&self) -> bool {
        matches!(self.family, SourceFamily::C | SourceFamily::Header)
    }

    pub fn is_header(&self) -> bool {
        self.family == SourceFamily::Header
    }
}
