//! Component graph
//!
//! Components are stored in an arena ([`DeclarationTable`]) and refer to
//! each other, and to primitives, materials, textures and transformations,
//! by index. The graph is only constructed after every reference resolved,
//! the root exists and no component is its own ancestor.

use super::table::DeclarationTable;
use crate::gfx::transform::TransformOp;
use cgmath::Matrix4;
use thiserror::Error;

/// Failures of whole-graph validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("root component '{0}' has not been declared")]
    RootNotFound(String),
    #[error("cycle in component graph: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Reserved id meaning "use the nearest ancestor's value"
pub const INHERIT: &str = "inherit";
/// Reserved texture id disabling texturing for a subtree
pub const NO_TEXTURE: &str = "none";

/// Material entry of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialRef {
    Inherit,
    Declared(usize),
}

/// Texture entry of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureRef {
    Inherit,
    None,
    Declared(usize),
}

/// Texture entry plus its amplification factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureBinding {
    pub reference: TextureRef,
    /// 0 when absent
    pub length_s: f32,
    /// 0 when absent
    pub length_t: f32,
}

/// Where a component's matrix came from
#[derive(Debug, Clone, PartialEq)]
pub enum TransformSource {
    /// Index into the transformation table
    Reference(usize),
    Inline(Vec<TransformOp>),
}

/// One resolved `<component>`
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub transform: TransformSource,
    /// Composed local matrix
    pub matrix: Matrix4<f32>,
    /// Never empty
    pub materials: Vec<MaterialRef>,
    pub texture: TextureBinding,
    pub children: Vec<usize>,
    pub primitives: Vec<usize>,
}

impl ComponentNode {
    /// Material selected by the scene-wide material index
    pub fn active_material(&self, material_index: usize) -> MaterialRef {
        match self.materials.len() {
            0 => MaterialRef::Inherit,
            len => self.materials[material_index % len],
        }
    }
}

/// Validated, acyclic component graph with a known root
#[derive(Debug, Clone)]
pub struct ComponentGraph {
    nodes: DeclarationTable<ComponentNode>,
    root: usize,
}

impl ComponentGraph {
    pub fn new(nodes: DeclarationTable<ComponentNode>, root_id: &str) -> Result<Self, GraphError> {
        let root = nodes
            .index_of(root_id)
            .ok_or_else(|| GraphError::RootNotFound(root_id.to_string()))?;

        let adjacency: Vec<Vec<usize>> = nodes.records().iter().map(|n| n.children.clone()).collect();
        let starts = std::iter::once(root).chain(0..nodes.len());
        if let Some(cycle) = find_cycle(&adjacency, starts) {
            let names = cycle
                .into_iter()
                .map(|slot| nodes.id_of(slot).unwrap_or("?").to_string())
                .collect();
            return Err(GraphError::Cycle(names));
        }

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn root_id(&self) -> &str {
        self.nodes.id_of(self.root).unwrap_or_default()
    }

    pub fn node(&self, slot: usize) -> Option<&ComponentNode> {
        self.nodes.by_index(slot)
    }

    pub fn nodes(&self) -> &DeclarationTable<ComponentNode> {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of components the root can never reach
    pub fn unreachable(&self) -> Vec<&str> {
        let adjacency: Vec<Vec<usize>> = self.nodes.records().iter().map(|n| n.children.clone()).collect();
        let seen = reachable_from(&adjacency, self.root);

        seen.iter()
            .enumerate()
            .filter(|(_, reached)| !**reached)
            .filter_map(|(slot, _)| self.nodes.id_of(slot))
            .collect()
    }
}

/// Marks every node reachable from `start`.
pub fn reachable_from(adjacency: &[Vec<usize>], start: usize) -> Vec<bool> {
    let mut seen = vec![false; adjacency.len()];
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if node >= seen.len() || seen[node] {
            continue;
        }
        seen[node] = true;
        stack.extend(adjacency[node].iter().copied());
    }

    seen
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Depth-first search for a node that is its own ancestor.
///
/// Returns the offending path, first node repeated at the end, e.g.
/// `[a, b, a]`. Iterative so deep graphs cannot overflow the stack.
pub fn find_cycle(adjacency: &[Vec<usize>], starts: impl IntoIterator<Item = usize>) -> Option<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; adjacency.len()];

    for start in starts {
        if start >= adjacency.len() || marks[start] != Mark::Unvisited {
            continue;
        }

        // (node, position of the next child to explore)
        let mut path: Vec<(usize, usize)> = vec![(start, 0)];
        marks[start] = Mark::OnPath;

        while let Some(&mut (node, ref mut next)) = path.last_mut() {
            if let Some(&child) = adjacency[node].get(*next) {
                *next += 1;
                match marks.get(child) {
                    Some(Mark::Unvisited) => {
                        marks[child] = Mark::OnPath;
                        path.push((child, 0));
                    }
                    Some(Mark::OnPath) => {
                        let from = path.iter().position(|(n, _)| *n == child).unwrap_or(0);
                        let mut cycle: Vec<usize> = path[from..].iter().map(|(n, _)| *n).collect();
                        cycle.push(child);
                        return Some(cycle);
                    }
                    _ => {}
                }
            } else {
                marks[node] = Mark::Done;
                path.pop();
            }
        }
    }

    None
}
