//! Syntax-tree production for component sources
//!
//! This is the boundary with the external parser: given source text and a
//! detected language, produce a tree-sitter tree or fail with a typed parse
//! error. The analysis passes consume only the resulting tree, never the raw
//! text on its own.

use tree_sitter::Tree;

use crate::error::{HookflowError, Result};
use crate::lang::Lang;

/// Parse source text into a syntax tree.
///
/// # Errors
///
/// Returns `HookflowError::ParseFailure` if:
/// - The grammar cannot be loaded into the parser
/// - tree-sitter cannot produce a tree at all
///
/// A tree containing error nodes is still returned: extraction walks what it
/// can and skips the rest, which matches the best-effort contract of the
/// analysis passes.
pub fn parse_source(source: &str, lang: Lang) -> Result<Tree> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| HookflowError::ParseFailure {
            message: format!("Failed to set {} grammar: {:?}", lang.name(), e),
        })?;

    parser
        .parse(source, None)
        .ok_or_else(|| HookflowError::ParseFailure {
            message: format!("tree-sitter returned no tree for {} source", lang.name()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_component() {
        let tree = parse_source("const App = () => <div />;", Lang::Tsx).unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }

    #[test]
    fn test_parse_plain_javascript() {
        let tree = parse_source("function f() { return 1; }", Lang::JavaScript).unwrap();
        assert!(!tree.root_node().has_error());
    }
}
