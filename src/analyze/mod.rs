//! Structural extraction: syntax tree in, `ComponentAnalysis` out
//!
//! The passes run in a fixed order over one immutable tree:
//!
//! 1. Export resolution and primary component selection (`exports`)
//! 2. Body traversal for hook, effect, and callback facts (`body`, using the
//!    classifier in `hooks`)
//! 3. Element tree extraction (`jsx`)
//!
//! Data flows strictly one way; no pass feeds back into an earlier one. An
//! unresolvable primary component is not an error: the analysis carries an
//! absent component name and empty fact collections.

pub mod body;
pub mod common;
pub mod exports;
pub mod hooks;
pub mod jsx;

use tracing::debug;

use crate::error::Result;
use crate::lang::Lang;
use crate::parsing::parse_source;
use crate::schema::ComponentAnalysis;

/// Analyze one component source text into an immutable fact snapshot.
///
/// `file_name` is optional; when present it selects the grammar and feeds
/// the primary-component fallback that matches named exports against the
/// file's base name.
///
/// # Errors
///
/// Only a genuinely malformed source aborts the analysis, surfacing the
/// parser's `ParseFailure`. Everything downstream degrades instead of
/// failing.
pub fn analyze(source: &str, file_name: Option<&str>) -> Result<ComponentAnalysis> {
    let lang = Lang::from_file_name(file_name);
    let tree = parse_source(source, lang)?;
    let root = tree.root_node();

    let exports = exports::resolve(&root, source);
    let component_name = exports::select_primary(&exports, file_name);
    debug!(?component_name, "selected primary component");

    let mut analysis = ComponentAnalysis {
        source: source.to_string(),
        file_name: file_name.map(|f| f.to_string()),
        component_name: component_name.clone(),
        exports,
        ..Default::default()
    };

    if let Some(name) = &component_name {
        if let Some(component) = body::find_component_node(&root, source, name) {
            let imports = body::collect_imports(&root, source);
            body::walk(&mut analysis, &component, source, &imports);
            jsx::extract(&mut analysis, &component, source);
        }
    }

    debug!(
        hooks = analysis.hooks.len(),
        effects = analysis.effects.len(),
        callbacks = analysis.callbacks.len(),
        elements = analysis.elements.len(),
        "extraction complete"
    );

    Ok(analysis)
}
