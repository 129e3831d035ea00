//! Analysis data model for component data-flow extraction
//!
//! Everything here is produced in one synchronous pass over an immutable
//! syntax tree and never mutated afterward. A fresh `ComponentAnalysis` is
//! built per source text; nothing outlives a single invocation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source position of an extracted fact (1-indexed line)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Build a location from a tree-sitter node's start position
    pub fn of(node: &tree_sitter::Node) -> Self {
        let pos = node.start_position();
        Self {
            line: pos.row + 1,
            column: pos.column,
        }
    }
}

/// Category assigned to a hook call site by naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookKind {
    /// useState
    State,
    /// useRef
    Ref,
    /// useReducer
    Reducer,
    /// useEffect
    Effect,
    /// useLayoutEffect
    LayoutEffect,
    /// useCallback
    Callback,
    /// useMemo
    Memo,
    /// use*Store from a known store package (zustand and friends)
    ExternalStore,
    /// query/mutation hooks from a known data-fetching package
    ServerQuery,
    /// Anything else bound from a call
    Unclassified,
}

impl HookKind {
    /// Whether this kind declares a state-bearing value (a state-column
    /// candidate in the graph)
    pub fn is_state_bearing(&self) -> bool {
        matches!(
            self,
            Self::State | Self::Reducer | Self::ExternalStore | Self::ServerQuery
        )
    }
}

/// Where a hook's value lives relative to the component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookScope {
    /// Component-local value
    #[default]
    Local,
    /// Shared store or server-state cache
    Global,
    /// Reserved for values resolved outside the module graph
    External,
}

/// One state-bearing declaration recovered from the component body
///
/// A destructured binding (`const [count, setCount] = useState(0)`) yields
/// one record per bound name, all sharing the declaration's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedHook {
    /// Unique within one analysis (`hook-N` in discovery order)
    pub id: String,

    /// Declared binding name
    pub name: String,

    pub kind: HookKind,

    pub scope: HookScope,

    pub location: Location,

    /// Free-form metadata (import origin of the callee, etc.). Ordered so
    /// identical input serializes identically.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

/// A name listed in an effect/callback reactivity list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFact {
    pub name: String,

    /// Whether the name resolves to a globally-scoped hook declaration
    pub is_global: bool,
}

/// One effect-hook or layout-effect-hook invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedEffect {
    /// Unique within one analysis (`effect-N`)
    pub id: String,

    /// Effect or LayoutEffect
    pub kind: HookKind,

    /// Direct identifier elements of the literal dependency array, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyFact>,

    /// Detected state-changing calls, deduplicated, first-seen order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mutations: Vec<String>,

    /// Names of `*Ref` identifiers touched inside the effect body
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<String>,

    pub location: Location,
}

/// One memoized-callback invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedCallback {
    /// Unique within one analysis (`callback-N`)
    pub id: String,

    /// Identifier of the enclosing binding, if the call initializes a simple
    /// variable binding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyFact>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mutations: Vec<String>,

    pub location: Location,
}

/// A dynamically-valued attribute wrapping a bare identifier reference
///
/// `name` is the attribute, `reference` the identifier its expression wraps;
/// edge inference matches on the reference and labels with the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropFact {
    pub name: String,
    pub reference: String,
}

/// One node of the declarative markup tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedElementNode {
    /// Pre-order identity (`el-N`)
    pub id: String,

    /// Resolved element name: bare, dot-joined, or `namespace:name`
    pub name: String,

    /// Depth from the element's tree root (root = 0)
    pub depth: usize,

    /// Identity of the parent element, absent for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Captured dynamic attribute references, in attribute order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropFact>,

    pub location: Location,
}

/// Top-level export surface of the analyzed module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    /// Default-export bound name, when the default export is a plain
    /// reference or a named function declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_export: Option<String>,

    /// Named-exported function/identifier names in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named_exports: Vec<String>,
}

/// Immutable snapshot of one component analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentAnalysis {
    /// The analyzed source text
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Resolved primary component name; absent when no usable export exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<AnalyzedHook>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<AnalyzedEffect>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub callbacks: Vec<AnalyzedCallback>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<AnalyzedElementNode>,

    pub exports: ExportInfo,

    /// Reserved diagnostics list. The current algorithm never populates it;
    /// it exists as an extension point for partial-parse recovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_bearing_kinds() {
        assert!(HookKind::State.is_state_bearing());
        assert!(HookKind::Reducer.is_state_bearing());
        assert!(HookKind::ExternalStore.is_state_bearing());
        assert!(HookKind::ServerQuery.is_state_bearing());
        assert!(!HookKind::Ref.is_state_bearing());
        assert!(!HookKind::Callback.is_state_bearing());
        assert!(!HookKind::Effect.is_state_bearing());
    }

    #[test]
    fn test_analysis_serializes_without_empty_collections() {
        let analysis = ComponentAnalysis {
            source: "const x = 1;".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(!json.contains("\"hooks\""));
        assert!(!json.contains("\"errors\""));
    }
}
