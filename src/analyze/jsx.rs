//! Element tree extraction from the component's declarative markup
//!
//! Elements are collected depth-grouped and parent-linked: every node knows
//! its depth within its tree root and the identity of its parent element.
//! Roots are elements whose immediate syntactic parent is not itself an
//! element, so markup nested inside expression containers
//! (`{open && <Menu />}`) starts a fresh root.

use tree_sitter::Node;

use crate::analyze::common::{node_text, visit_all};
use crate::schema::{AnalyzedElementNode, ComponentAnalysis, Location, PropFact};

/// Placeholder for element name shapes the resolver does not recognize
const UNKNOWN_ELEMENT: &str = "<unknown>";

/// Extract the element tree of the component body into `analysis.elements`,
/// pre-order ids, parent identity recorded per node
pub fn extract(analysis: &mut ComponentAnalysis, component: &Node, source: &str) {
    let mut roots = Vec::new();
    visit_all(component, |node| {
        if is_element(node) && !node.parent().map(|p| is_element(&p)).unwrap_or(false) {
            roots.push(*node);
        }
    });

    for root in roots {
        descend(analysis, &root, source, 0, None);
    }
}

fn is_element(node: &Node) -> bool {
    matches!(node.kind(), "jsx_element" | "jsx_self_closing_element")
}

fn descend(
    analysis: &mut ComponentAnalysis,
    element: &Node,
    source: &str,
    depth: usize,
    parent: Option<String>,
) {
    let id = format!("el-{}", analysis.elements.len());
    analysis.elements.push(AnalyzedElementNode {
        id: id.clone(),
        name: resolve_element_name(element, source),
        depth,
        parent,
        props: capture_props(element, source),
        location: Location::of(element),
    });

    let mut cursor = element.walk();
    for child in element.children(&mut cursor) {
        if is_element(&child) {
            descend(analysis, &child, source, depth + 1, Some(id.clone()));
        }
    }
}

/// Resolve an element's display name: bare identifier, dot-joined chain for
/// member-style names, `namespace:name` for namespaced names, placeholder
/// otherwise
fn resolve_element_name(element: &Node, source: &str) -> String {
    let Some(name_node) = element_name_node(element) else {
        return UNKNOWN_ELEMENT.to_string();
    };
    match name_node.kind() {
        // Hyphenated names (custom elements) parse as jsx_identifier
        "identifier" | "jsx_identifier" => node_text(&name_node, source),
        "member_expression" | "nested_identifier" => dotted_name(&name_node, source),
        "jsx_namespace_name" => namespaced_name(&name_node, source),
        _ => UNKNOWN_ELEMENT.to_string(),
    }
}

fn element_name_node<'a>(element: &Node<'a>) -> Option<Node<'a>> {
    match element.kind() {
        "jsx_self_closing_element" => element.child_by_field_name("name"),
        "jsx_element" => {
            let mut cursor = element.walk();
            let opening = element
                .children(&mut cursor)
                .find(|c| c.kind() == "jsx_opening_element")?;
            opening.child_by_field_name("name")
        }
        _ => None,
    }
}

/// Dot-join the identifier parts of a member-style name (`Icons.Home`)
fn dotted_name(name: &Node, source: &str) -> String {
    let mut parts = Vec::new();
    let mut cursor = name.walk();
    for child in name.children(&mut cursor) {
        if child.is_named() {
            match child.kind() {
                "member_expression" | "nested_identifier" => {
                    parts.push(dotted_name(&child, source))
                }
                _ => parts.push(node_text(&child, source)),
            }
        }
    }
    parts.join(".")
}

/// Join the two halves of a namespaced name (`svg:circle`)
fn namespaced_name(name: &Node, source: &str) -> String {
    let mut parts = Vec::new();
    let mut cursor = name.walk();
    for child in name.children(&mut cursor) {
        if child.is_named() {
            parts.push(node_text(&child, source));
        }
    }
    parts.join(":")
}

/// Capture the attributes whose value is a dynamic expression wrapping a
/// bare identifier reference. Literal and static attribute values are not
/// props in the data-flow sense.
fn capture_props(element: &Node, source: &str) -> Vec<PropFact> {
    let attr_holder = match element.kind() {
        "jsx_self_closing_element" => *element,
        "jsx_element" => {
            let mut cursor = element.walk();
            let opening = element
                .children(&mut cursor)
                .find(|c| c.kind() == "jsx_opening_element");
            match opening {
                Some(opening) => opening,
                None => return Vec::new(),
            }
        }
        _ => return Vec::new(),
    };

    let mut props = Vec::new();
    let mut cursor = attr_holder.walk();
    for attr in attr_holder.children(&mut cursor) {
        if attr.kind() != "jsx_attribute" {
            continue;
        }
        let Some(name_node) = attr.named_child(0) else {
            continue;
        };
        let Some(reference) = dynamic_identifier_value(&attr, source) else {
            continue;
        };
        props.push(PropFact {
            name: node_text(&name_node, source),
            reference,
        });
    }
    props
}

/// The bare identifier inside a `{expr}` attribute value, if that is the
/// whole expression
fn dynamic_identifier_value(attr: &Node, source: &str) -> Option<String> {
    let mut cursor = attr.walk();
    let expression = attr
        .children(&mut cursor)
        .find(|c| c.kind() == "jsx_expression")?;

    let mut inner = None;
    let mut expr_cursor = expression.walk();
    for child in expression.children(&mut expr_cursor) {
        if child.is_named() {
            if inner.is_some() {
                return None;
            }
            inner = Some(child);
        }
    }

    let inner = inner?;
    (inner.kind() == "identifier").then(|| node_text(&inner, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::body::find_component_node;
    use crate::lang::Lang;
    use crate::parsing::parse_source;

    fn extract_elements(source: &str) -> ComponentAnalysis {
        let tree = parse_source(source, Lang::Tsx).unwrap();
        let component =
            find_component_node(&tree.root_node(), source, "App").expect("component not found");
        let mut analysis = ComponentAnalysis::default();
        extract(&mut analysis, &component, source);
        analysis
    }

    #[test]
    fn test_nested_elements_depth_and_parents() {
        let analysis = extract_elements(
            r#"
            function App() {
                return (
                    <div>
                        <section>
                            <span />
                        </section>
                    </div>
                );
            }
            "#,
        );
        let elements = &analysis.elements;
        assert_eq!(elements.len(), 3);
        assert_eq!(
            elements.iter().map(|e| e.depth).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(elements[0].parent, None);
        assert_eq!(elements[1].parent.as_deref(), Some("el-0"));
        assert_eq!(elements[2].parent.as_deref(), Some("el-1"));
    }

    #[test]
    fn test_preorder_identity_assignment() {
        let analysis = extract_elements(
            r#"
            function App() {
                return (
                    <div>
                        <a />
                        <b><c /></b>
                    </div>
                );
            }
            "#,
        );
        let names: Vec<&str> = analysis.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["div", "a", "b", "c"]);
        let ids: Vec<&str> = analysis.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["el-0", "el-1", "el-2", "el-3"]);
    }

    #[test]
    fn test_member_and_namespaced_names() {
        let analysis = extract_elements(
            r#"
            function App() {
                return (
                    <div>
                        <Icons.Home />
                        <svg:circle />
                    </div>
                );
            }
            "#,
        );
        let names: Vec<&str> = analysis.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["div", "Icons.Home", "svg:circle"]);
    }

    #[test]
    fn test_hyphenated_custom_element_names() {
        let analysis = extract_elements(
            r#"
            function App() {
                return (
                    <div>
                        <my-widget theme={mode} />
                        <sl-button>ok</sl-button>
                    </div>
                );
            }
            "#,
        );
        let names: Vec<&str> = analysis.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["div", "my-widget", "sl-button"]);
        assert_eq!(
            analysis.elements[1].props,
            vec![PropFact {
                name: "theme".to_string(),
                reference: "mode".to_string()
            }]
        );
    }

    #[test]
    fn test_dynamic_props_captured_static_values_ignored() {
        let analysis = extract_elements(
            r#"
            function App() {
                return <input value={count} max={count + 1} type="text" disabled={flag} />;
            }
            "#,
        );
        let props = &analysis.elements[0].props;
        // Only bare identifier expressions count; literals and computed
        // expressions do not
        assert_eq!(
            props,
            &vec![
                PropFact {
                    name: "value".to_string(),
                    reference: "count".to_string()
                },
                PropFact {
                    name: "disabled".to_string(),
                    reference: "flag".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_element_in_expression_container_starts_new_root() {
        let analysis = extract_elements(
            r#"
            function App() {
                return <div>{open && <menu />}</div>;
            }
            "#,
        );
        let menu = analysis
            .elements
            .iter()
            .find(|e| e.name == "menu")
            .unwrap();
        assert_eq!(menu.depth, 0);
        assert_eq!(menu.parent, None);
    }
}
