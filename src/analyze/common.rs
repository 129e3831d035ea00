//! Shared AST helpers for the extraction passes

use tree_sitter::Node;

/// Get text content of a node
pub fn node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

/// Visit every node under `node` in pre-order (iterative to avoid stack
/// overflow on deeply nested JSX)
pub fn visit_all<'tree, F>(node: &Node<'tree>, mut visitor: F)
where
    F: FnMut(&Node<'tree>),
{
    let mut cursor = node.walk();
    let mut descending = true;

    loop {
        if descending {
            visitor(&cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
        }

        if cursor.goto_next_sibling() {
            descending = true;
            continue;
        }

        if !cursor.goto_parent() {
            break;
        }
        descending = false;
    }
}

/// Positional (non-punctuation) children of a call's `arguments` node
pub fn call_arguments<'a>(call: &Node<'a>) -> Vec<Node<'a>> {
    let Some(args) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = args.walk();
    args.children(&mut cursor)
        .filter(|c| c.is_named())
        .collect()
}

/// Push `value` unless it is already present (first-seen order dedup)
pub fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.iter().any(|v| *v == value) {
        list.push(value);
    }
}
