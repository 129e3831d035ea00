//! Component body traversal: hook bindings, effect facts, callback facts
//!
//! Extraction runs in two passes over the same subtree. Pass one collects
//! every hook binding and its scope; pass two extracts effect and callback
//! facts, resolving each dependency's global flag against the complete set of
//! global-scoped names. Splitting the passes removes any dependence on the
//! order hooks appear in: a dependency on a store hook declared later in the
//! body is still recognized as global.
//!
//! Nested closures are walked transparently. Dependency and mutation
//! detection has to see calls made inside arrow bodies passed to other hooks.

use std::collections::{BTreeMap, HashMap};
use tree_sitter::Node;

use crate::analyze::common::{call_arguments, node_text, push_unique, visit_all};
use crate::analyze::hooks::{classify, is_setter_name, scope_for};
use crate::schema::{
    AnalyzedCallback, AnalyzedEffect, AnalyzedHook, ComponentAnalysis, DependencyFact, HookKind,
    HookScope, Location,
};

/// Member-call property names treated as state mutations
const MUTATE_METHODS: &[&str] = &["mutate", "mutateAsync"];

/// Bound name -> module source, built from the file's import statements
pub type ImportMap = HashMap<String, String>;

/// Collect the import origin of every name bound at the top of the module
pub fn collect_imports(root: &Node, source: &str) -> ImportMap {
    let mut imports = ImportMap::new();
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        if child.kind() != "import_statement" {
            continue;
        }
        let Some(source_node) = child.child_by_field_name("source") else {
            continue;
        };
        let module = node_text(&source_node, source);
        let module = module.trim_matches('"').trim_matches('\'').to_string();

        let mut stmt_cursor = child.walk();
        for clause in child.children(&mut stmt_cursor) {
            if clause.kind() != "import_clause" {
                continue;
            }
            let mut clause_cursor = clause.walk();
            for inner in clause.children(&mut clause_cursor) {
                match inner.kind() {
                    "identifier" => {
                        imports.insert(node_text(&inner, source), module.clone());
                    }
                    "named_imports" => {
                        let mut named_cursor = inner.walk();
                        for spec in inner.children(&mut named_cursor) {
                            if spec.kind() != "import_specifier" {
                                continue;
                            }
                            // The local binding is the alias when present
                            let bound = spec
                                .child_by_field_name("alias")
                                .or_else(|| spec.child_by_field_name("name"));
                            if let Some(bound) = bound {
                                imports.insert(node_text(&bound, source), module.clone());
                            }
                        }
                    }
                    "namespace_import" => {
                        let mut ns_cursor = inner.walk();
                        for ns in inner.children(&mut ns_cursor) {
                            if ns.kind() == "identifier" {
                                imports.insert(node_text(&ns, source), module.clone());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    imports
}

/// Locate the function node for the primary component: a top-level function
/// declaration with that name, or an arrow/function expression bound to it,
/// including export-wrapped forms.
pub fn find_component_node<'a>(root: &Node<'a>, source: &str, name: &str) -> Option<Node<'a>> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(found) = component_in_statement(&child, source, name) {
            return Some(found);
        }
        if child.kind() == "export_statement" {
            let mut export_cursor = child.walk();
            for inner in child.children(&mut export_cursor) {
                if let Some(found) = component_in_statement(&inner, source, name) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn component_in_statement<'a>(stmt: &Node<'a>, source: &str, name: &str) -> Option<Node<'a>> {
    match stmt.kind() {
        "function_declaration" => {
            let found = stmt
                .child_by_field_name("name")
                .map(|n| node_text(&n, source) == name)
                .unwrap_or(false);
            found.then_some(*stmt)
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = stmt.walk();
            for decl in stmt.children(&mut cursor) {
                if decl.kind() != "variable_declarator" {
                    continue;
                }
                let matches = decl
                    .child_by_field_name("name")
                    .map(|n| n.kind() == "identifier" && node_text(&n, source) == name)
                    .unwrap_or(false);
                if !matches {
                    continue;
                }
                if let Some(value) = decl.child_by_field_name("value") {
                    if value.kind() == "arrow_function" || value.kind() == "function_expression" {
                        return Some(value);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// Walk the component body and populate hook, effect, and callback facts
pub fn walk(
    analysis: &mut ComponentAnalysis,
    component: &Node,
    source: &str,
    imports: &ImportMap,
) {
    collect_hooks(analysis, component, source, imports);

    let globals: Vec<String> = analysis
        .hooks
        .iter()
        .filter(|h| h.scope == HookScope::Global)
        .map(|h| h.name.clone())
        .collect();

    collect_effects_and_callbacks(analysis, component, source, imports, &globals);
}

// =============================================================================
// Pass 1: hook bindings
// =============================================================================

fn collect_hooks(
    analysis: &mut ComponentAnalysis,
    component: &Node,
    source: &str,
    imports: &ImportMap,
) {
    visit_all(component, |node| {
        if node.kind() != "variable_declarator" {
            return;
        }
        let Some(value) = node.child_by_field_name("value") else {
            return;
        };
        if value.kind() != "call_expression" {
            return;
        }
        let Some((callee, origin)) = callee_name_and_origin(&value, source, imports) else {
            return;
        };

        let kind = classify(&callee, origin.as_deref());
        let scope = scope_for(kind);
        let location = Location::of(node);

        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        // One hook record per bound name; destructured bindings all share the
        // declaration's location. The binding index distinguishes the primary
        // bound value from its companions (the setter of a state pair, the
        // dispatch of a reducer pair).
        for (position, bound) in bound_names(&name_node, source).into_iter().enumerate() {
            let mut meta = BTreeMap::new();
            if let Some(origin) = &origin {
                meta.insert("import".to_string(), origin.clone());
            }
            meta.insert("callee".to_string(), callee.clone());
            meta.insert("binding_index".to_string(), position.to_string());

            let id = format!("hook-{}", analysis.hooks.len());
            analysis.hooks.push(AnalyzedHook {
                id,
                name: bound,
                kind,
                scope,
                location,
                meta,
            });
        }
    });
}

/// Resolve a call's callee name and the import origin used to classify it.
///
/// `React.useState(...)` classifies by the property name with the origin of
/// the object binding; a bare `useState(...)` classifies by the identifier
/// with its own origin.
fn callee_name_and_origin(
    call: &Node,
    source: &str,
    imports: &ImportMap,
) -> Option<(String, Option<String>)> {
    let callee = call.child_by_field_name("function")?;
    match callee.kind() {
        "identifier" => {
            let name = node_text(&callee, source);
            let origin = imports.get(&name).cloned();
            Some((name, origin))
        }
        "member_expression" => {
            let object = callee.child_by_field_name("object")?;
            let property = callee.child_by_field_name("property")?;
            if object.kind() != "identifier" {
                return None;
            }
            let origin = imports.get(&node_text(&object, source)).cloned();
            Some((node_text(&property, source), origin))
        }
        _ => None,
    }
}

/// Names bound by a declarator's name pattern: a plain identifier, or each
/// identifier of an array/object destructuring pattern
fn bound_names(pattern: &Node, source: &str) -> Vec<String> {
    match pattern.kind() {
        "identifier" => vec![node_text(pattern, source)],
        "array_pattern" | "object_pattern" => {
            let mut names = Vec::new();
            let mut cursor = pattern.walk();
            for child in pattern.children(&mut cursor) {
                match child.kind() {
                    "identifier" | "shorthand_property_identifier_pattern" => {
                        names.push(node_text(&child, source));
                    }
                    "pair_pattern" => {
                        if let Some(value) = child.child_by_field_name("value") {
                            if value.kind() == "identifier" {
                                names.push(node_text(&value, source));
                            }
                        }
                    }
                    _ => {}
                }
            }
            names
        }
        _ => Vec::new(),
    }
}

// =============================================================================
// Pass 2: effect and callback facts
// =============================================================================

fn collect_effects_and_callbacks(
    analysis: &mut ComponentAnalysis,
    component: &Node,
    source: &str,
    imports: &ImportMap,
    globals: &[String],
) {
    visit_all(component, |node| {
        if node.kind() != "call_expression" {
            return;
        }
        let Some((callee, origin)) = callee_name_and_origin(node, source, imports) else {
            return;
        };

        match classify(&callee, origin.as_deref()) {
            kind @ (HookKind::Effect | HookKind::LayoutEffect) => {
                let effect = extract_effect(node, kind, source, globals, analysis.effects.len());
                analysis.effects.push(effect);
            }
            HookKind::Callback => {
                let callback =
                    extract_callback(node, source, globals, analysis.callbacks.len());
                analysis.callbacks.push(callback);
            }
            _ => {}
        }
    });
}

fn extract_effect(
    call: &Node,
    kind: HookKind,
    source: &str,
    globals: &[String],
    index: usize,
) -> AnalyzedEffect {
    let args = call_arguments(call);
    let dependencies = args
        .get(1)
        .map(|deps| dependency_facts(deps, source, globals))
        .unwrap_or_default();

    let mut mutations = Vec::new();
    let mut refs = Vec::new();
    if let Some(body) = args.first().filter(|a| is_function_node(a)) {
        scan_effect_body(body, source, &mut mutations, &mut refs);
    }

    AnalyzedEffect {
        id: format!("effect-{}", index),
        kind,
        dependencies,
        mutations,
        refs,
        location: Location::of(call),
    }
}

fn extract_callback(
    call: &Node,
    source: &str,
    globals: &[String],
    index: usize,
) -> AnalyzedCallback {
    let args = call_arguments(call);
    let dependencies = args
        .get(1)
        .map(|deps| dependency_facts(deps, source, globals))
        .unwrap_or_default();

    // Setter-call rule only; the mutate-method rule does not apply here
    let mut mutations = Vec::new();
    if let Some(body) = args.first().filter(|a| is_function_node(a)) {
        visit_all(body, |node| {
            if node.kind() != "call_expression" {
                return;
            }
            if let Some(callee) = node.child_by_field_name("function") {
                if callee.kind() == "identifier" {
                    let name = node_text(&callee, source);
                    if is_setter_name(&name) {
                        push_unique(&mut mutations, name);
                    }
                }
            }
        });
    }

    AnalyzedCallback {
        id: format!("callback-{}", index),
        name: enclosing_binding_name(call, source),
        dependencies,
        mutations,
        location: Location::of(call),
    }
}

/// Dependency names from a literal array second argument. Only direct
/// identifier elements count; member expressions and computed values are
/// silently ignored (a known precision limit).
fn dependency_facts(deps: &Node, source: &str, globals: &[String]) -> Vec<DependencyFact> {
    if deps.kind() != "array" {
        return Vec::new();
    }
    let mut facts = Vec::new();
    let mut cursor = deps.walk();
    for element in deps.children(&mut cursor) {
        if element.kind() == "identifier" {
            let name = node_text(&element, source);
            let is_global = globals.iter().any(|g| *g == name);
            facts.push(DependencyFact { name, is_global });
        }
    }
    facts
}

/// One descent of an effect callback body collecting setter calls,
/// mutate-method calls, and ref usage
fn scan_effect_body(body: &Node, source: &str, mutations: &mut Vec<String>, refs: &mut Vec<String>) {
    visit_all(body, |node| match node.kind() {
        "call_expression" => {
            let Some(callee) = node.child_by_field_name("function") else {
                return;
            };
            match callee.kind() {
                "identifier" => {
                    let name = node_text(&callee, source);
                    if is_setter_name(&name) {
                        push_unique(mutations, name);
                    }
                }
                "member_expression" => {
                    let object = callee.child_by_field_name("object");
                    let property = callee.child_by_field_name("property");
                    if let (Some(object), Some(property)) = (object, property) {
                        let method = node_text(&property, source);
                        if MUTATE_METHODS.contains(&method.as_str()) {
                            let label = format!("{}.{}", node_text(&object, source), method);
                            push_unique(mutations, label);
                        }
                    }
                }
                _ => {}
            }
        }
        "member_expression" => {
            if let Some(object) = node.child_by_field_name("object") {
                if object.kind() == "identifier" {
                    let name = node_text(&object, source);
                    if name.ends_with("Ref") {
                        push_unique(refs, name);
                    }
                }
            }
        }
        _ => {}
    });
}

fn is_function_node(node: &Node) -> bool {
    matches!(node.kind(), "arrow_function" | "function_expression")
}

/// The identifier of the enclosing binding, if this call is the initializer
/// of a simple variable binding
fn enclosing_binding_name(call: &Node, source: &str) -> Option<String> {
    let parent = call.parent()?;
    if parent.kind() != "variable_declarator" {
        return None;
    }
    let name = parent.child_by_field_name("name")?;
    (name.kind() == "identifier").then(|| node_text(&name, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;
    use crate::parsing::parse_source;
    use crate::schema::ComponentAnalysis;

    fn walk_component(source: &str) -> ComponentAnalysis {
        let tree = parse_source(source, Lang::Tsx).unwrap();
        let root = tree.root_node();
        let imports = collect_imports(&root, source);
        let component =
            find_component_node(&root, source, "App").expect("component not found");
        let mut analysis = ComponentAnalysis::default();
        walk(&mut analysis, &component, source, &imports);
        analysis
    }

    #[test]
    fn test_destructured_state_binding_yields_two_hooks() {
        let analysis = walk_component(
            r#"
            import { useState } from 'react';
            function App() {
                const [count, setCount] = useState(0);
                return null;
            }
            "#,
        );
        assert_eq!(analysis.hooks.len(), 2);
        assert_eq!(analysis.hooks[0].name, "count");
        assert_eq!(analysis.hooks[1].name, "setCount");
        assert_eq!(analysis.hooks[0].kind, HookKind::State);
        assert_eq!(analysis.hooks[0].location, analysis.hooks[1].location);
        assert_ne!(analysis.hooks[0].id, analysis.hooks[1].id);
    }

    #[test]
    fn test_effect_dependencies_and_mutations() {
        let analysis = walk_component(
            r#"
            import { useState, useEffect } from 'react';
            function App() {
                const [count, setCount] = useState(0);
                useEffect(() => {
                    setCount(count + 1);
                    setCount(count + 2);
                }, [count, other.field]);
                return null;
            }
            "#,
        );
        assert_eq!(analysis.effects.len(), 1);
        let effect = &analysis.effects[0];
        // Member expression elements are silently ignored
        assert_eq!(effect.dependencies.len(), 1);
        assert_eq!(effect.dependencies[0].name, "count");
        assert!(!effect.dependencies[0].is_global);
        // Deduplicated, first-seen order
        assert_eq!(effect.mutations, vec!["setCount"]);
    }

    #[test]
    fn test_effect_mutate_method_and_ref_usage() {
        let analysis = walk_component(
            r#"
            import { useEffect, useRef } from 'react';
            import { useMutation } from 'react-query';
            function App() {
                const timerRef = useRef(null);
                const saveMutation = useMutation(save);
                useEffect(() => {
                    timerRef.current = 1;
                    saveMutation.mutate({});
                }, []);
                return null;
            }
            "#,
        );
        let effect = &analysis.effects[0];
        assert_eq!(effect.mutations, vec!["saveMutation.mutate"]);
        assert_eq!(effect.refs, vec!["timerRef"]);
    }

    #[test]
    fn test_global_flag_resolved_regardless_of_declaration_order() {
        // The store hook is declared after the effect that depends on it;
        // two-pass resolution still flags the dependency as global.
        let analysis = walk_component(
            r#"
            import { useEffect } from 'react';
            import { useCartStore } from 'zustand';
            function App() {
                useEffect(() => {}, [items]);
                const items = useCartStore(s => s.items);
                return null;
            }
            "#,
        );
        assert_eq!(analysis.hooks.len(), 1);
        assert_eq!(analysis.hooks[0].scope, HookScope::Global);
        assert!(analysis.effects[0].dependencies[0].is_global);
    }

    #[test]
    fn test_callback_name_and_setter_rule_only() {
        let analysis = walk_component(
            r#"
            import { useState, useCallback } from 'react';
            function App() {
                const [open, setOpen] = useState(false);
                const toggle = useCallback(() => {
                    setOpen(!open);
                    menu.mutate();
                }, [open]);
                return null;
            }
            "#,
        );
        assert_eq!(analysis.callbacks.len(), 1);
        let callback = &analysis.callbacks[0];
        assert_eq!(callback.name.as_deref(), Some("toggle"));
        assert_eq!(callback.dependencies[0].name, "open");
        // mutate-method calls are not recorded for callbacks
        assert_eq!(callback.mutations, vec!["setOpen"]);
    }

    #[test]
    fn test_calls_inside_nested_closures_are_seen() {
        let analysis = walk_component(
            r#"
            import { useEffect } from 'react';
            function App() {
                useEffect(() => {
                    const tick = () => { setCount(1); };
                    tick();
                }, []);
                return null;
            }
            "#,
        );
        assert_eq!(analysis.effects[0].mutations, vec!["setCount"]);
    }

    #[test]
    fn test_namespaced_hook_call() {
        let analysis = walk_component(
            r#"
            import React from 'react';
            function App() {
                const [value, setValue] = React.useState('');
                return null;
            }
            "#,
        );
        assert_eq!(analysis.hooks.len(), 2);
        assert_eq!(analysis.hooks[0].kind, HookKind::State);
        assert_eq!(analysis.hooks[0].meta.get("import").map(String::as_str), Some("react"));
    }

    #[test]
    fn test_unclassified_binding_still_recorded() {
        let analysis = walk_component(
            r#"
            function App() {
                const data = loadData();
                return null;
            }
            "#,
        );
        assert_eq!(analysis.hooks.len(), 1);
        assert_eq!(analysis.hooks[0].kind, HookKind::Unclassified);
        assert_eq!(analysis.hooks[0].scope, HookScope::Local);
    }

    #[test]
    fn test_find_component_arrow_binding() {
        let source = "const App = () => { return null; };";
        let tree = parse_source(source, Lang::Tsx).unwrap();
        let node = find_component_node(&tree.root_node(), source, "App").unwrap();
        assert_eq!(node.kind(), "arrow_function");
    }

    #[test]
    fn test_find_component_exported_function() {
        let source = "export default function App() { return null; }";
        let tree = parse_source(source, Lang::Tsx).unwrap();
        let node = find_component_node(&tree.root_node(), source, "App").unwrap();
        assert_eq!(node.kind(), "function_declaration");
    }
}
