//! Graph assembly and deterministic layout
//!
//! Converts the four fact collections of a `ComponentAnalysis` into
//! positioned nodes and heuristically inferred edges. Edge inference is
//! first-match over construction order with case-sensitive prefix matching
//! against display labels. Prefix matching, never exact, tolerates decorated
//! labels such as the ` (global)` suffix. When two state labels share a
//! prefix the first-constructed node wins; that ambiguity is a documented
//! limitation, not corrected by any tie-break.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::analyze::hooks::setter_target;
use crate::graph::{
    column_x, EdgeKind, Endpoint, GraphEdge, GraphLayout, GraphNode, NodeKind, COLUMN_COUNT,
    FALLBACK_HEIGHT, NODE_HEIGHT, NODE_WIDTH,
};
use crate::schema::{ComponentAnalysis, HookKind, HookScope};

const START_Y: f32 = 80.0;
const INDEPENDENT_ROW_GAP: f32 = 50.0;
const EFFECT_ROW_GAP: f32 = 40.0;
const STATE_ROW_GAP: f32 = 40.0;
const DEPTH_BAND_GAP: f32 = 80.0;
const RIGHT_MARGIN: f32 = 200.0;
const BOTTOM_MARGIN: f32 = 120.0;

/// Assemble the positioned graph for a component analysis.
///
/// An absent analysis degrades to an empty layout with the fallback canvas
/// dimensions; absence of heuristic matches degrades to fewer edges, never
/// to an error.
pub fn build_graph(analysis: Option<&ComponentAnalysis>) -> GraphLayout {
    let columns: [f32; COLUMN_COUNT] = std::array::from_fn(column_x);
    let width = columns[COLUMN_COUNT - 1] + RIGHT_MARGIN;

    let Some(analysis) = analysis else {
        return GraphLayout {
            nodes: Vec::new(),
            edges: Vec::new(),
            width,
            height: FALLBACK_HEIGHT,
            columns,
        };
    };

    let mut builder = GraphBuilder::new(columns);
    builder.place_nodes(analysis);
    builder.infer_edges(analysis);

    let height = builder
        .nodes
        .iter()
        .map(|n| n.y)
        .fold(None::<f32>, |acc, y| Some(acc.map_or(y, |a| a.max(y))))
        .map(|lowest| lowest + BOTTOM_MARGIN)
        .unwrap_or(FALLBACK_HEIGHT);

    debug!(
        nodes = builder.nodes.len(),
        edges = builder.edges.len(),
        "graph assembled"
    );

    GraphLayout {
        nodes: builder.nodes,
        edges: builder.edges,
        width,
        height,
        columns,
    }
}

/// Whether a hook record is the primary bound value of its declaration.
/// The setter of a state pair and the dispatch of a reducer pair are
/// companion records and get no node of their own.
fn is_primary_binding(hook: &crate::schema::AnalyzedHook) -> bool {
    hook.meta
        .get("binding_index")
        .map(|v| v == "0")
        .unwrap_or(true)
}

struct GraphBuilder {
    columns: [f32; COLUMN_COUNT],
    nodes: Vec<GraphNode>,

    /// Indices into `nodes`, per column, in construction order
    independents: Vec<usize>,
    states: Vec<usize>,
    effects: Vec<usize>,

    /// Element fact id -> index into `nodes`
    elements: HashMap<String, usize>,
    element_order: Vec<usize>,

    edges: Vec<GraphEdge>,
}

impl GraphBuilder {
    fn new(columns: [f32; COLUMN_COUNT]) -> Self {
        Self {
            columns,
            nodes: Vec::new(),
            independents: Vec::new(),
            states: Vec::new(),
            effects: Vec::new(),
            elements: HashMap::new(),
            element_order: Vec::new(),
            edges: Vec::new(),
        }
    }

    // =========================================================================
    // Node placement
    // =========================================================================

    fn place_nodes(&mut self, analysis: &ComponentAnalysis) {
        self.place_independents(analysis);
        self.place_states(analysis);
        self.place_effects(analysis);
        self.place_elements(analysis);
    }

    fn push_node(
        &mut self,
        id: String,
        label: String,
        kind: NodeKind,
        column: usize,
        y: f32,
        meta: BTreeMap<String, String>,
    ) -> usize {
        self.nodes.push(GraphNode {
            id,
            label,
            kind,
            x: self.columns[column],
            y,
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            meta,
        });
        self.nodes.len() - 1
    }

    /// Column 0: ref-category hooks, fact order
    fn place_independents(&mut self, analysis: &ComponentAnalysis) {
        let refs = analysis
            .hooks
            .iter()
            .filter(|h| h.kind == HookKind::Ref && is_primary_binding(h));
        for (row, hook) in refs.enumerate() {
            let mut meta = hook.meta.clone();
            meta.insert("fact".to_string(), hook.id.clone());
            let index = self.push_node(
                format!("independent-{}", row),
                hook.name.clone(),
                NodeKind::Independent,
                0,
                START_Y + row as f32 * INDEPENDENT_ROW_GAP,
                meta,
            );
            self.independents.push(index);
        }
    }

    /// Column 1: state-bearing hooks, fact order. Global-scoped hooks carry
    /// a label suffix, which is why every label lookup is prefix-based.
    fn place_states(&mut self, analysis: &ComponentAnalysis) {
        let states = analysis
            .hooks
            .iter()
            .filter(|h| h.kind.is_state_bearing() && is_primary_binding(h));
        for (row, hook) in states.enumerate() {
            let label = match hook.scope {
                HookScope::Local | HookScope::External => hook.name.clone(),
                HookScope::Global => format!("{} (global)", hook.name),
            };
            let mut meta = hook.meta.clone();
            meta.insert("fact".to_string(), hook.id.clone());
            let index = self.push_node(
                format!("state-{}", row),
                label,
                NodeKind::State,
                1,
                START_Y + row as f32 * STATE_ROW_GAP,
                meta,
            );
            self.states.push(index);
        }
    }

    /// Column 3: effects in fact order, then callbacks, one shared row
    /// counter. Column 2 (variable) stays reserved.
    fn place_effects(&mut self, analysis: &ComponentAnalysis) {
        let mut row = 0usize;
        for effect in &analysis.effects {
            let label = match effect.kind {
                HookKind::LayoutEffect => "useLayoutEffect".to_string(),
                _ => "useEffect".to_string(),
            };
            let meta = BTreeMap::from([("fact".to_string(), effect.id.clone())]);
            let index = self.push_node(
                format!("effect-{}", row),
                label,
                NodeKind::Effect,
                3,
                START_Y + row as f32 * EFFECT_ROW_GAP,
                meta,
            );
            self.effects.push(index);
            row += 1;
        }
        for callback in &analysis.callbacks {
            let label = callback
                .name
                .clone()
                .unwrap_or_else(|| "useCallback".to_string());
            let meta = BTreeMap::from([("fact".to_string(), callback.id.clone())]);
            let index = self.push_node(
                format!("effect-{}", row),
                label,
                NodeKind::Effect,
                3,
                START_Y + row as f32 * EFFECT_ROW_GAP,
                meta,
            );
            self.effects.push(index);
            row += 1;
        }
    }

    /// Column 4: elements grouped by depth. Each depth band sits at its own
    /// y; nodes within a band stack downward. Depth, not traversal order,
    /// governs vertical position.
    fn place_elements(&mut self, analysis: &ComponentAnalysis) {
        let mut band_counts: HashMap<usize, usize> = HashMap::new();
        for (row, element) in analysis.elements.iter().enumerate() {
            let in_band = band_counts.entry(element.depth).or_insert(0);
            let y = START_Y + element.depth as f32 * DEPTH_BAND_GAP + *in_band as f32 * NODE_HEIGHT;
            *in_band += 1;

            let meta = BTreeMap::from([
                ("fact".to_string(), element.id.clone()),
                ("depth".to_string(), element.depth.to_string()),
            ]);
            let index = self.push_node(
                format!("jsx-{}", row),
                element.name.clone(),
                NodeKind::Jsx,
                4,
                y,
                meta,
            );
            self.elements.insert(element.id.clone(), index);
            self.element_order.push(index);
        }
    }

    // =========================================================================
    // Edge inference
    // =========================================================================

    fn infer_edges(&mut self, analysis: &ComponentAnalysis) {
        self.pair_independents_with_states();
        self.connect_dependencies(analysis);
        self.connect_mutations(analysis);
        self.connect_structure(analysis);
        self.connect_props(analysis);
    }

    fn push_edge(&mut self, kind: EdgeKind, source: usize, target: usize, label: Option<String>) {
        let (sx, sy) = self.nodes[source].right_anchor();
        let (tx, ty) = self.nodes[target].left_anchor();
        let id = format!("edge-{}", self.edges.len());
        self.edges.push(GraphEdge {
            id,
            kind,
            source: Endpoint {
                node: self.nodes[source].id.clone(),
                x: sx,
                y: sy,
            },
            target: Endpoint {
                node: self.nodes[target].id.clone(),
                x: tx,
                y: ty,
            },
            label,
        });
    }

    /// First state node whose label starts with `name`, construction order
    fn first_state_with_prefix(&self, name: &str) -> Option<usize> {
        self.states
            .iter()
            .copied()
            .find(|&i| self.nodes[i].label.starts_with(name))
    }

    /// Rule 1: pair each independent node with the state node at the same
    /// index; extra independents share the last state node. No edge when
    /// either column is empty.
    fn pair_independents_with_states(&mut self) {
        if self.states.is_empty() {
            return;
        }
        for i in 0..self.independents.len() {
            let state = self.states[i.min(self.states.len() - 1)];
            self.push_edge(EdgeKind::Flow, self.independents[i], state, None);
        }
    }

    /// Rule 2: each effect dependency name draws an edge from the first
    /// prefix-matching state node to the effect node. Unmatched names
    /// silently produce no edge.
    fn connect_dependencies(&mut self, analysis: &ComponentAnalysis) {
        for (pos, effect) in analysis.effects.iter().enumerate() {
            let effect_node = self.effects[pos];
            for dep in &effect.dependencies {
                if let Some(state) = self.first_state_with_prefix(&dep.name) {
                    self.push_edge(
                        EdgeKind::StateDependency,
                        state,
                        effect_node,
                        Some(dep.name.clone()),
                    );
                }
            }
        }
    }

    /// Rule 3: each recorded mutation derives a candidate state name (setter
    /// prefix stripped, else verbatim) and draws an edge from the mutating
    /// effect/callback node to the first prefix-matching state node.
    fn connect_mutations(&mut self, analysis: &ComponentAnalysis) {
        let mutation_lists: Vec<&[String]> = analysis
            .effects
            .iter()
            .map(|e| e.mutations.as_slice())
            .chain(analysis.callbacks.iter().map(|c| c.mutations.as_slice()))
            .collect();

        for (pos, mutations) in mutation_lists.into_iter().enumerate() {
            let source_node = self.effects[pos];
            for mutation in mutations {
                let candidate = setter_target(mutation);
                if let Some(state) = self.first_state_with_prefix(&candidate) {
                    self.push_edge(
                        EdgeKind::StateMutation,
                        source_node,
                        state,
                        Some(mutation.clone()),
                    );
                }
            }
        }
    }

    /// Rule 4: one structural edge per parent link in the element tree
    fn connect_structure(&mut self, analysis: &ComponentAnalysis) {
        for element in &analysis.elements {
            let Some(parent_id) = &element.parent else {
                continue;
            };
            let (Some(&parent), Some(&child)) = (
                self.elements.get(parent_id),
                self.elements.get(&element.id),
            ) else {
                continue;
            };
            self.push_edge(EdgeKind::Structural, parent, child, None);
        }
    }

    /// Rule 5: each captured prop reference draws an edge to its element
    /// from the first prefix-matching state node, else from the independent
    /// node whose label equals the reference exactly.
    fn connect_props(&mut self, analysis: &ComponentAnalysis) {
        for (pos, element) in analysis.elements.iter().enumerate() {
            let element_node = self.element_order[pos];
            for prop in &element.props {
                let source = self.first_state_with_prefix(&prop.reference).or_else(|| {
                    self.independents
                        .iter()
                        .copied()
                        .find(|&i| self.nodes[i].label == prop.reference)
                });
                if let Some(source) = source {
                    self.push_edge(
                        EdgeKind::StateDependency,
                        source,
                        element_node,
                        Some(prop.name.clone()),
                    );
                }
            }
        }
    }
}
