//! Hook classification by naming convention and import origin
//!
//! Classification is pure string-pattern matching over surface syntax. There
//! is no type resolution on purpose: the analyzer must work on arbitrary,
//! possibly type-incomplete source.

use crate::schema::{HookKind, HookScope};

/// Packages whose `use*Store` hooks read shared client-side stores
const STORE_PACKAGES: &[&str] = &["zustand", "jotai", "valtio", "recoil"];

/// Packages whose query/mutation hooks read server-state caches
const QUERY_PACKAGES: &[&str] = &["@tanstack/react-query", "react-query", "swr"];

/// Assign a hook category from a call's callee name and import origin.
///
/// Exact builtin names win; then the external-store convention
/// (`use…Store` imported from a store package); then anything from a
/// data-fetching package whose name mentions query/mutation.
pub fn classify(callee: &str, import_source: Option<&str>) -> HookKind {
    match callee {
        "useState" => return HookKind::State,
        "useRef" => return HookKind::Ref,
        "useReducer" => return HookKind::Reducer,
        "useEffect" => return HookKind::Effect,
        "useLayoutEffect" => return HookKind::LayoutEffect,
        "useCallback" => return HookKind::Callback,
        "useMemo" => return HookKind::Memo,
        _ => {}
    }

    let Some(origin) = import_source else {
        return HookKind::Unclassified;
    };

    if callee.starts_with("use")
        && callee.ends_with("Store")
        && STORE_PACKAGES.contains(&origin)
    {
        return HookKind::ExternalStore;
    }

    if QUERY_PACKAGES.contains(&origin) {
        let lowered = callee.to_lowercase();
        if lowered.contains("mutation") || lowered.contains("query") {
            return HookKind::ServerQuery;
        }
    }

    HookKind::Unclassified
}

/// Scope of the value a hook category declares
pub fn scope_for(kind: HookKind) -> HookScope {
    match kind {
        HookKind::ExternalStore | HookKind::ServerQuery => HookScope::Global,
        _ => HookScope::Local,
    }
}

/// Whether a callee name follows the `setX` state-setter convention
pub fn is_setter_name(name: &str) -> bool {
    name.strip_prefix("set")
        .and_then(|rest| rest.chars().next())
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Derive the candidate state name a setter mutates: strip the `set` prefix
/// and lowercase the first following letter. Non-setter names pass through
/// verbatim.
pub fn setter_target(name: &str) -> String {
    if !is_setter_name(name) {
        return name.to_string();
    }
    let rest = &name[3..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_builtins() {
        assert_eq!(classify("useState", Some("react")), HookKind::State);
        assert_eq!(classify("useRef", None), HookKind::Ref);
        assert_eq!(classify("useReducer", Some("react")), HookKind::Reducer);
        assert_eq!(classify("useEffect", Some("react")), HookKind::Effect);
        assert_eq!(classify("useLayoutEffect", None), HookKind::LayoutEffect);
        assert_eq!(classify("useCallback", Some("react")), HookKind::Callback);
        assert_eq!(classify("useMemo", None), HookKind::Memo);
    }

    #[test]
    fn test_classify_external_store() {
        assert_eq!(
            classify("useCartStore", Some("zustand")),
            HookKind::ExternalStore
        );
        // Right shape, wrong origin
        assert_eq!(
            classify("useCartStore", Some("./stores/cart")),
            HookKind::Unclassified
        );
        // Right origin, wrong shape
        assert_eq!(classify("useCart", Some("zustand")), HookKind::Unclassified);
    }

    #[test]
    fn test_classify_server_query() {
        assert_eq!(
            classify("useQuery", Some("@tanstack/react-query")),
            HookKind::ServerQuery
        );
        assert_eq!(
            classify("useMutation", Some("react-query")),
            HookKind::ServerQuery
        );
        assert_eq!(
            classify("useInfiniteQuery", Some("swr")),
            HookKind::ServerQuery
        );
        assert_eq!(
            classify("useQuery", Some("my-lib")),
            HookKind::Unclassified
        );
    }

    #[test]
    fn test_classify_unknown_without_import() {
        assert_eq!(classify("useThing", None), HookKind::Unclassified);
    }

    #[test]
    fn test_scope_assignment() {
        assert_eq!(scope_for(HookKind::ExternalStore), HookScope::Global);
        assert_eq!(scope_for(HookKind::ServerQuery), HookScope::Global);
        assert_eq!(scope_for(HookKind::State), HookScope::Local);
        assert_eq!(scope_for(HookKind::Ref), HookScope::Local);
    }

    #[test]
    fn test_setter_name_convention() {
        assert!(is_setter_name("setCount"));
        assert!(is_setter_name("setUserName"));
        assert!(!is_setter_name("setup"));
        assert!(!is_setter_name("set"));
        assert!(!is_setter_name("resetCount"));
    }

    #[test]
    fn test_setter_target() {
        assert_eq!(setter_target("setCount"), "count");
        assert_eq!(setter_target("setUserName"), "userName");
        // Non-setter mutation names pass through verbatim
        assert_eq!(setter_target("mutation.mutate"), "mutation.mutate");
        assert_eq!(setter_target("setup"), "setup");
    }
}
