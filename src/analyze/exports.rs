//! Export resolution and primary component selection

use std::path::Path;
use tree_sitter::Node;

use crate::analyze::common::node_text;
use crate::schema::ExportInfo;

/// Scan top-level declarations for the module's export surface.
///
/// The default export is recorded only when it is a plain reference or a
/// named function declaration; anonymous default exports yield nothing.
/// Absence of exports is not an error, just empty results.
pub fn resolve(root: &Node, source: &str) -> ExportInfo {
    let mut info = ExportInfo::default();
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        if child.kind() != "export_statement" {
            continue;
        }
        resolve_export_statement(&child, source, &mut info);
    }

    info
}

fn resolve_export_statement(stmt: &Node, source: &str, info: &mut ExportInfo) {
    let is_default = has_default_keyword(stmt);

    if let Some(decl) = stmt.child_by_field_name("declaration") {
        for name in declared_names(&decl, source) {
            if is_default && info.default_export.is_none() {
                info.default_export = Some(name);
            } else {
                info.named_exports.push(name);
            }
        }
        return;
    }

    // `export { A, B as C }` or `export { A as default }`
    let mut cursor = stmt.walk();
    for child in stmt.children(&mut cursor) {
        if child.kind() == "export_clause" {
            resolve_export_clause(&child, source, info);
            return;
        }
    }

    // `export default App;` - the expression carries the reference
    if is_default {
        if let Some(value) = stmt.child_by_field_name("value") {
            if value.kind() == "identifier" && info.default_export.is_none() {
                info.default_export = Some(node_text(&value, source));
            }
        }
    }
}

fn resolve_export_clause(clause: &Node, source: &str, info: &mut ExportInfo) {
    let mut cursor = clause.walk();
    for spec in clause.children(&mut cursor) {
        if spec.kind() != "export_specifier" {
            continue;
        }
        let Some(name_node) = spec.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(&name_node, source);

        match spec.child_by_field_name("alias") {
            Some(alias) if node_text(&alias, source) == "default" => {
                if info.default_export.is_none() {
                    info.default_export = Some(name);
                }
            }
            Some(alias) => info.named_exports.push(node_text(&alias, source)),
            None => info.named_exports.push(name),
        }
    }
}

/// Names bound by a declaration node under an export statement
fn declared_names(decl: &Node, source: &str) -> Vec<String> {
    match decl.kind() {
        "function_declaration" => decl
            .child_by_field_name("name")
            .map(|n| vec![node_text(&n, source)])
            .unwrap_or_default(),
        "lexical_declaration" | "variable_declaration" => {
            let mut names = Vec::new();
            let mut cursor = decl.walk();
            for child in decl.children(&mut cursor) {
                if child.kind() == "variable_declarator" {
                    if let Some(name) = child.child_by_field_name("name") {
                        if name.kind() == "identifier" {
                            names.push(node_text(&name, source));
                        }
                    }
                }
            }
            names
        }
        _ => Vec::new(),
    }
}

fn has_default_keyword(stmt: &Node) -> bool {
    let mut cursor = stmt.walk();
    let found = stmt.children(&mut cursor).any(|c| c.kind() == "default");
    found
}

/// Pick the component the rest of the pipeline analyzes.
///
/// Preference order: default export; sole named export; named export
/// matching the file's base name; first named export; absent. The default
/// export is the strongest signal of "the component", a single named export
/// is unambiguous, and matching the file name is a common convention.
pub fn select_primary(exports: &ExportInfo, file_name: Option<&str>) -> Option<String> {
    if let Some(default) = &exports.default_export {
        return Some(default.clone());
    }

    match exports.named_exports.as_slice() {
        [] => None,
        [sole] => Some(sole.clone()),
        named => {
            if let Some(stem) = file_name.and_then(file_base_name) {
                if let Some(hit) = named.iter().find(|n| **n == stem) {
                    return Some(hit.clone());
                }
            }
            Some(named[0].clone())
        }
    }
}

fn file_base_name(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;
    use crate::parsing::parse_source;

    fn resolve_src(source: &str) -> ExportInfo {
        let tree = parse_source(source, Lang::Tsx).unwrap();
        resolve(&tree.root_node(), source)
    }

    #[test]
    fn test_default_function_declaration() {
        let info = resolve_src("export default function App() { return null; }");
        assert_eq!(info.default_export.as_deref(), Some("App"));
        assert!(info.named_exports.is_empty());
    }

    #[test]
    fn test_default_reference() {
        let info = resolve_src("const App = () => null;\nexport default App;");
        assert_eq!(info.default_export.as_deref(), Some("App"));
    }

    #[test]
    fn test_named_exports_in_order() {
        let info = resolve_src(
            "export function First() {}\nexport const Second = () => null;\nexport function Third() {}",
        );
        assert_eq!(info.default_export, None);
        assert_eq!(info.named_exports, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_export_clause_with_default_alias() {
        let info = resolve_src("function App() {}\nexport { App as default };");
        assert_eq!(info.default_export.as_deref(), Some("App"));
    }

    #[test]
    fn test_anonymous_default_yields_nothing() {
        let info = resolve_src("export default () => null;");
        assert_eq!(info.default_export, None);
    }

    #[test]
    fn test_no_exports() {
        let info = resolve_src("const x = 1;");
        assert_eq!(info, ExportInfo::default());
    }

    #[test]
    fn test_select_prefers_default() {
        let info = ExportInfo {
            default_export: Some("App".to_string()),
            named_exports: vec!["Other".to_string()],
        };
        assert_eq!(select_primary(&info, None).as_deref(), Some("App"));
    }

    #[test]
    fn test_select_sole_named() {
        let info = ExportInfo {
            default_export: None,
            named_exports: vec!["Widget".to_string()],
        };
        assert_eq!(select_primary(&info, None).as_deref(), Some("Widget"));
    }

    #[test]
    fn test_select_matches_file_base_name() {
        let info = ExportInfo {
            default_export: None,
            named_exports: vec!["Helper".to_string(), "Card".to_string()],
        };
        assert_eq!(
            select_primary(&info, Some("Card.tsx")).as_deref(),
            Some("Card")
        );
    }

    #[test]
    fn test_select_falls_back_to_first_named() {
        let info = ExportInfo {
            default_export: None,
            named_exports: vec!["Helper".to_string(), "Card".to_string()],
        };
        assert_eq!(select_primary(&info, None).as_deref(), Some("Helper"));
        assert_eq!(
            select_primary(&info, Some("Nothing.tsx")).as_deref(),
            Some("Helper")
        );
    }

    #[test]
    fn test_select_absent() {
        assert_eq!(select_primary(&ExportInfo::default(), Some("App.tsx")), None);
    }
}
