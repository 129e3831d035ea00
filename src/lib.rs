//! hookflow: React component data-flow graph analyzer
//!
//! This library turns the source text of a single function-based component
//! into a typed directed graph of its internal data flow: which state-holding
//! values exist, which effect and memoized-callback blocks read or write
//! them, and which values reach the rendered element tree. The graph is
//! consumed by an interactive viewer; hookflow produces no pixels.
//!
//! The pipeline has two stages with one contract between them:
//!
//! 1. [`analyze`] walks a tree-sitter parse of the source and produces an
//!    immutable [`ComponentAnalysis`] fact snapshot.
//! 2. [`build_graph`] converts that snapshot into a positioned
//!    [`GraphLayout`] with heuristically inferred edges.
//!
//! # Example
//!
//! ```ignore
//! use hookflow::{analyze, build_graph};
//!
//! let source = r#"
//! import { useState } from 'react';
//! export default function Counter() {
//!     const [count, setCount] = useState(0);
//!     return <span>{count}</span>;
//! }
//! "#;
//!
//! let analysis = analyze(source, Some("Counter.tsx"))?;
//! let layout = build_graph(Some(&analysis));
//! println!("{}", serde_json::to_string_pretty(&layout)?);
//! ```

pub mod analyze;
pub mod cli;
pub mod error;
pub mod graph;
pub mod lang;
pub mod parsing;
pub mod schema;

// Re-export commonly used types
pub use analyze::analyze;
pub use cli::{Cli, OutputFormat};
pub use error::{HookflowError, Result};
pub use graph::{
    build_graph, EdgeKind, Endpoint, GraphEdge, GraphLayout, GraphNode, NodeKind,
};
pub use lang::Lang;
pub use parsing::parse_source;
pub use schema::{
    AnalyzedCallback, AnalyzedEffect, AnalyzedElementNode, AnalyzedHook, ComponentAnalysis,
    DependencyFact, ExportInfo, HookKind, HookScope, Location, PropFact,
};
