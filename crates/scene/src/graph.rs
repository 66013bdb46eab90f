use reefscape_common::{EntityId, Transform};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GraphError {
    #[error("parent {0:?} is not in the graph")]
    UnknownParent(EntityId),
    #[error("node {0:?} is already in the graph")]
    Duplicate(EntityId),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: Transform,
    world: Transform,
}

/// Explicit transform tree.
///
/// Parents must be inserted before their children, so insertion order is a
/// valid parents-first traversal and the tree can never contain a cycle.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<EntityId, Node>,
    order: Vec<EntityId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Add a node under `parent` (or as a root).
    pub fn insert(
        &mut self,
        id: EntityId,
        parent: Option<EntityId>,
        local: Transform,
    ) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::Duplicate(id));
        }
        let world = match parent {
            Some(p) => {
                let parent_node = self.nodes.get_mut(&p).ok_or(GraphError::UnknownParent(p))?;
                parent_node.children.push(id);
                parent_node.world.mul_transform(&local)
            }
            None => local,
        };
        self.nodes.insert(
            id,
            Node {
                parent,
                children: Vec::new(),
                local,
                world,
            },
        );
        self.order.push(id);
        Ok(())
    }

    /// Replace a node's local transform. World transforms are stale until the
    /// next [`SceneGraph::propagate`].
    pub fn set_local(&mut self, id: EntityId, local: Transform) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.local = local;
                true
            }
            None => false,
        }
    }

    pub fn local(&self, id: EntityId) -> Option<Transform> {
        self.nodes.get(&id).map(|n| n.local)
    }

    pub fn world(&self, id: EntityId) -> Option<Transform> {
        self.nodes.get(&id).map(|n| n.world)
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|id| self.parent(*id).is_none())
    }

    /// Recompute every world transform, parents first.
    pub fn propagate(&mut self) {
        for id in &self.order {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let world = match node.parent.and_then(|p| self.nodes.get(&p)) {
                Some(parent) => parent.world.mul_transform(&node.local),
                None => node.local,
            };
            if let Some(node) = self.nodes.get_mut(id) {
                node.world = world;
            }
        }
    }

    /// World transforms in id order.
    pub fn world_transforms(&self) -> impl Iterator<Item = (EntityId, Transform)> + '_ {
        self.nodes.iter().map(|(id, n)| (*id, n.world))
    }
}
