//! Hierarchy graph model: node kinds, the input document, and the derived
//! maps every solver stage reads (children, descendants, structural leaves,
//! bottom adjacency, visible clusters).

use crate::error::{Error, Result};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Deserializer, Serialize};

/// Node type tag. Only `cluster` and `leaf` influence the visible-cluster
/// assignment; everything else behaves like the generic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Cluster,
    Leaf,
    #[default]
    Node,
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "root" => Self::Root,
            "cluster" => Self::Cluster,
            "leaf" => Self::Leaf,
            // Unknown tags fall back to the generic kind.
            _ => Self::Node,
        })
    }
}

/// Ids arrive as JSON strings or numbers; numbers are kept as their decimal
/// rendering.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Num(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Num(n) => n.to_string(),
        }
    }
}

fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawId::deserialize(deserializer)?.into_string())
}

/// `null`, `"None"`, and `""` all mean "no parent" in the documents this
/// crate consumes.
fn parent_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        None => None,
        Some(RawId::Str(s)) if s.is_empty() || s == "None" => None,
        Some(raw) => Some(raw.into_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(
        default,
        deserialize_with = "parent_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    #[serde(deserialize_with = "id_string")]
    pub source: String,
    #[serde(deserialize_with = "id_string")]
    pub target: String,
}

/// The abstract input contract: a node collection plus a bottom-edge
/// collection. Hierarchy ("top") edges are derived from the parent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDoc {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphDoc {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A hierarchically clustered graph with all derived maps precomputed.
///
/// Read-only once built; the only mutable state a solve carries is its own
/// [`crate::EdgeBalance`] table. Descendant lists are self-inclusive and in
/// preorder, so a node's list is exactly the block its subtree occupies in a
/// tree-contiguous layout.
#[derive(Debug, Clone, Default)]
pub struct HierarchyGraph {
    ids: Vec<String>,
    kinds: HashMap<String, NodeKind>,
    parents: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,
    bottom_edges: Vec<(String, String)>,
    top_edges: Vec<(String, String)>,
    adjacency: HashMap<String, Vec<String>>,
    descendants: HashMap<String, Vec<String>>,
    leaves: HashMap<String, Vec<String>>,
    clusters: HashMap<String, String>,
}

impl HierarchyGraph {
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_doc(&GraphDoc::from_json(text)?)
    }

    pub fn from_doc(doc: &GraphDoc) -> Result<Self> {
        Self::new(doc.nodes.clone(), doc.edges.clone())
    }

    pub fn new(nodes: Vec<NodeSpec>, edges: Vec<EdgeSpec>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let mut g = Self::default();

        for spec in &nodes {
            if g.kinds.contains_key(spec.id.as_str()) {
                return Err(Error::DuplicateNode {
                    id: spec.id.clone(),
                });
            }
            // A parentless node is a root no matter what its tag says.
            let kind = if spec.parent.is_none() {
                NodeKind::Root
            } else {
                spec.kind
            };
            g.ids.push(spec.id.clone());
            g.kinds.insert(spec.id.clone(), kind);
            g.children.insert(spec.id.clone(), Vec::new());
            g.adjacency.insert(spec.id.clone(), Vec::new());
        }

        for spec in &nodes {
            let Some(parent) = &spec.parent else {
                continue;
            };
            if !g.kinds.contains_key(parent.as_str()) {
                return Err(Error::MissingParent {
                    id: spec.id.clone(),
                    parent: parent.clone(),
                });
            }
            g.parents.insert(spec.id.clone(), parent.clone());
            g.children
                .get_mut(parent.as_str())
                .expect("parent checked above")
                .push(spec.id.clone());
            g.top_edges.push((parent.clone(), spec.id.clone()));
        }

        // Reachability from the roots doubles as the acyclicity check: a node
        // caught in a parent cycle is never reached through the children map.
        {
            let mut seen: HashSet<&str> = HashSet::default();
            let mut stack: Vec<&str> = g
                .ids
                .iter()
                .filter(|id| !g.parents.contains_key(id.as_str()))
                .map(String::as_str)
                .collect();
            while let Some(v) = stack.pop() {
                if !seen.insert(v) {
                    continue;
                }
                stack.extend(g.children[v].iter().map(String::as_str));
            }
            if seen.len() != g.ids.len() {
                let id = g
                    .ids
                    .iter()
                    .find(|id| !seen.contains(id.as_str()))
                    .expect("some node is unreached")
                    .clone();
                return Err(Error::CyclicHierarchy { id });
            }
        }

        for spec in &edges {
            if !g.kinds.contains_key(spec.source.as_str())
                || !g.kinds.contains_key(spec.target.as_str())
            {
                return Err(Error::UnknownEndpoint {
                    from: spec.source.clone(),
                    target: spec.target.clone(),
                });
            }
            g.adjacency
                .get_mut(spec.source.as_str())
                .expect("endpoint checked above")
                .push(spec.target.clone());
            g.adjacency
                .get_mut(spec.target.as_str())
                .expect("endpoint checked above")
                .push(spec.source.clone());
            g.bottom_edges.push((spec.source.clone(), spec.target.clone()));
        }

        // Descendant and structural-leaf lists, preorder, via an explicit
        // stack (hierarchies can be deeper than the call stack tolerates).
        for id in &g.ids {
            let mut desc: Vec<String> = Vec::new();
            let mut leaf: Vec<String> = Vec::new();
            let mut stack: Vec<&str> = vec![id.as_str()];
            while let Some(v) = stack.pop() {
                desc.push(v.to_string());
                let kids = &g.children[v];
                if kids.is_empty() {
                    leaf.push(v.to_string());
                } else {
                    stack.extend(kids.iter().rev().map(String::as_str));
                }
            }
            g.descendants.insert(id.clone(), desc);
            g.leaves.insert(id.clone(), leaf);
        }

        // Visible cluster per node: a cluster is its own; a leaf belongs to
        // its nearest cluster ancestor, or stands alone if it has none; every
        // other kind stands alone.
        for id in &g.ids {
            let cluster = match g.kinds[id.as_str()] {
                NodeKind::Cluster => id.clone(),
                NodeKind::Leaf => {
                    let mut cur = g.parents.get(id.as_str());
                    while let Some(p) = cur {
                        if g.kinds[p.as_str()] == NodeKind::Cluster {
                            break;
                        }
                        cur = g.parents.get(p.as_str());
                    }
                    cur.cloned().unwrap_or_else(|| id.clone())
                }
                NodeKind::Root | NodeKind::Node => id.clone(),
            };
            g.clusters.insert(id.clone(), cluster);
        }

        Ok(g)
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// All node ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.kinds.contains_key(id)
    }

    pub fn kind(&self, id: &str) -> Option<NodeKind> {
        self.kinds.get(id).copied()
    }

    pub fn parent(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> Vec<&str> {
        self.ids
            .iter()
            .filter(|id| !self.parents.contains_key(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// The ancestor chain of `id`, nearest parent first, root last.
    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut cur = self.parents.get(id);
        while let Some(p) = cur {
            out.push(p.as_str());
            cur = self.parents.get(p.as_str());
        }
        out
    }

    /// The subtree of `id` in preorder, `id` itself included.
    pub fn descendants(&self, id: &str) -> &[String] {
        self.descendants.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The childless nodes of `id`'s subtree (`id` itself if childless).
    pub fn leaves(&self, id: &str) -> &[String] {
        self.leaves.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_structural_leaf(&self, id: &str) -> bool {
        self.children(id).is_empty() && self.has_node(id)
    }

    /// Bottom-edge neighbors of `id`, both directions, duplicates preserved.
    pub fn bottom_neighbors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bottom_edges(&self) -> &[(String, String)] {
        &self.bottom_edges
    }

    /// Derived (parent, child) hierarchy edges.
    pub fn top_edges(&self) -> &[(String, String)] {
        &self.top_edges
    }

    /// The cluster a rendering would show `id` inside; `id` itself when it
    /// belongs to none.
    pub fn visible_cluster<'a>(&'a self, id: &'a str) -> &'a str {
        self.clusters.get(id).map(String::as_str).unwrap_or(id)
    }
}
