//! Language detection and tree-sitter grammar loading
//!
//! hookflow analyzes the JavaScript family only. The TSX grammar is a
//! practical superset for component sources, so it doubles as the default
//! when no file name is available.

use std::path::Path;
use tree_sitter::Language;

use crate::error::{HookflowError, Result};

/// Supported source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl Lang {
    /// Detect language from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| HookflowError::UnsupportedLanguage {
                extension: "none".to_string(),
            })?;

        Self::from_extension(ext)
    }

    /// Detect language from file extension string
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Ok(Self::JavaScript),
            "jsx" => Ok(Self::Jsx),
            "ts" | "mts" | "cts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            _ => Err(HookflowError::UnsupportedLanguage {
                extension: ext.to_string(),
            }),
        }
    }

    /// Detect language from an optional file name, defaulting to TSX
    ///
    /// The library entry point takes source text with no required path, so
    /// an absent or unrecognized extension falls back to the TSX grammar
    /// rather than failing.
    pub fn from_file_name(file_name: Option<&str>) -> Self {
        file_name
            .and_then(|f| Self::from_path(Path::new(f)).ok())
            .unwrap_or(Self::Tsx)
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// Get the tree-sitter Language for parsing
    ///
    /// JSX sources use the TSX grammar: the plain JavaScript grammar accepts
    /// JSX too, but routing both through one grammar keeps node kinds
    /// uniform for the extractors.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Jsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Lang::from_extension("tsx").unwrap(), Lang::Tsx);
        assert_eq!(Lang::from_extension("JSX").unwrap(), Lang::Jsx);
        assert_eq!(Lang::from_extension("mjs").unwrap(), Lang::JavaScript);
        assert!(Lang::from_extension("py").is_err());
    }

    #[test]
    fn test_from_file_name_defaults_to_tsx() {
        assert_eq!(Lang::from_file_name(None), Lang::Tsx);
        assert_eq!(Lang::from_file_name(Some("App.rs")), Lang::Tsx);
        assert_eq!(Lang::from_file_name(Some("App.ts")), Lang::TypeScript);
    }
}
