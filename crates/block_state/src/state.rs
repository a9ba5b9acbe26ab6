use std::collections::{BTreeSet, HashMap, HashSet};

use crate::block::{Block, BlockId};
use crate::error::StateError;
use crate::position::Position;

/// The document tree. Blocks are owned by id; parents are derived from the
/// children lists.
#[derive(Debug, Clone)]
pub struct State {
    root_id: BlockId,
    blocks: HashMap<BlockId, Block>,
    changed: BTreeSet<BlockId>,
    detached: BTreeSet<BlockId>,
}

impl State {
    pub fn new(root: Block) -> Self {
        let root_id = root.id.clone();
        let mut blocks = HashMap::new();
        blocks.insert(root_id.clone(), root);
        Self {
            root_id,
            blocks,
            changed: BTreeSet::new(),
            detached: BTreeSet::new(),
        }
    }

    pub fn from_blocks(
        root_id: impl Into<BlockId>,
        blocks: impl IntoIterator<Item = Block>,
    ) -> Result<Self, StateError> {
        let root_id = root_id.into();
        let mut map = HashMap::new();
        for block in blocks {
            if map.contains_key(&block.id) {
                return Err(StateError::AlreadyExists(block.id));
            }
            map.insert(block.id.clone(), block);
        }
        if !map.contains_key(&root_id) {
            return Err(StateError::MissingRoot(root_id));
        }
        Ok(Self {
            root_id,
            blocks: map,
            changed: BTreeSet::new(),
            detached: BTreeSet::new(),
        })
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn exists(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    /// Read-only lookup. Does not mark the block as changed.
    pub fn pick(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Mutable lookup. The block is recorded as changed.
    pub fn get(&mut self, id: &str) -> Option<&mut Block> {
        let block = self.blocks.get_mut(id)?;
        self.changed.insert(block.id.clone());
        Some(block)
    }

    pub fn set(&mut self, block: Block) {
        self.changed.insert(block.id.clone());
        self.blocks.insert(block.id.clone(), block);
    }

    /// Inserts a new block. Returns `false` if the id is already taken.
    pub fn add(&mut self, block: Block) -> bool {
        if self.blocks.contains_key(&block.id) {
            return false;
        }
        self.changed.insert(block.id.clone());
        self.detached.remove(&block.id);
        self.blocks.insert(block.id.clone(), block);
        true
    }

    /// Removes `id` from its parent's children. The block itself stays in the
    /// state and is reported by [`State::detached_ids`] until re-inserted.
    pub fn unlink(&mut self, id: &str) -> bool {
        let Some(parent_id) = self.parent_id_of(id) else {
            return false;
        };
        if let Some(parent) = self.get(&parent_id) {
            parent.children_ids.retain(|child| child != id);
        }
        self.detached.insert(id.to_string());
        true
    }

    /// Removes `id` from the children of `parent_id` only. The block is
    /// reported detached once no other block references it.
    pub fn unlink_from(&mut self, parent_id: &str, id: &str) -> bool {
        let Some(parent) = self.blocks.get_mut(parent_id) else {
            return false;
        };
        if !parent.children_ids.iter().any(|child| child == id) {
            return false;
        }
        parent.children_ids.retain(|child| child != id);
        self.changed.insert(parent_id.to_string());
        if self.exists(id) && self.parent_id_of(id).is_none() {
            self.detached.insert(id.to_string());
        }
        true
    }

    /// Drops a block from the state, unlinking it first if needed.
    pub fn remove(&mut self, id: &str) -> Option<Block> {
        self.unlink(id);
        self.detached.remove(id);
        self.changed.remove(id);
        self.blocks.remove(id)
    }

    /// Fails with the same error [`State::insert_to`] would, without mutating.
    pub fn check_insert(&self, target: &str, position: Position) -> Result<(), StateError> {
        if !self.exists(target) {
            return Err(StateError::NotFound(target.to_string()));
        }
        match position {
            Position::Inner => Ok(()),
            Position::Top | Position::Bottom | Position::Replace => {
                if self.parent_id_of(target).is_none() {
                    return Err(StateError::NoParent(target.to_string()));
                }
                Ok(())
            }
            Position::Left | Position::Right => Err(StateError::UnsupportedPosition(position)),
        }
    }

    pub fn insert_to<S: AsRef<str>>(
        &mut self,
        target: &str,
        position: Position,
        ids: &[S],
    ) -> Result<(), StateError> {
        self.check_insert(target, position)?;
        for id in ids {
            if !self.exists(id.as_ref()) {
                return Err(StateError::NotFound(id.as_ref().to_string()));
            }
        }
        let ids: Vec<BlockId> = ids.iter().map(|id| id.as_ref().to_string()).collect();

        if position == Position::Inner {
            let Some(block) = self.get(target) else {
                return Err(StateError::NotFound(target.to_string()));
            };
            block.children_ids.extend(ids.iter().cloned());
        } else {
            let parent_id = self
                .parent_id_of(target)
                .ok_or_else(|| StateError::NoParent(target.to_string()))?;
            let Some(parent) = self.get(&parent_id) else {
                return Err(StateError::NotFound(parent_id));
            };
            let Some(pos) = parent.children_ids.iter().position(|c| c == target) else {
                return Err(StateError::NoParent(target.to_string()));
            };
            match position {
                Position::Top => {
                    parent.children_ids.splice(pos..pos, ids.iter().cloned());
                }
                Position::Bottom => {
                    parent.children_ids.splice(pos + 1..pos + 1, ids.iter().cloned());
                }
                _ => {
                    parent.children_ids.splice(pos..pos + 1, ids.iter().cloned());
                    self.detached.insert(target.to_string());
                }
            }
        }

        for id in &ids {
            self.detached.remove(id);
        }
        Ok(())
    }

    pub fn parent_id_of(&self, id: &str) -> Option<BlockId> {
        self.pick_parent_of(id).map(|parent| parent.id.clone())
    }

    pub fn pick_parent_of(&self, id: &str) -> Option<&Block> {
        self.blocks
            .values()
            .find(|block| block.children_ids.iter().any(|child| child == id))
    }

    /// True if `ancestor` is found while climbing parents from `id`. A block is
    /// its own descendant.
    pub fn is_descendant_of(&self, id: &str, ancestor: &str) -> bool {
        let mut next = Some(id.to_string());
        let mut seen = HashSet::new();
        while let Some(current) = next {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current.clone()) {
                return false;
            }
            next = self.parent_id_of(&current);
        }
        false
    }

    /// Depth-first, pre-order walk from the root. `visit` returns whether to
    /// continue. Children that are not in the state are skipped.
    pub fn iterate<'a>(
        &'a self,
        mut visit: impl FnMut(&'a Block) -> bool,
    ) -> Result<(), StateError> {
        let mut seen: HashSet<&'a str> = HashSet::new();
        let mut stack: Vec<&'a str> = vec![self.root_id.as_str()];

        while let Some(id) = stack.pop() {
            let Some(block) = self.blocks.get(id) else {
                continue;
            };
            if !seen.insert(id) {
                return Err(StateError::DuplicateReference(id.to_string()));
            }
            if !visit(block) {
                return Ok(());
            }
            stack.extend(block.children_ids.iter().rev().map(String::as_str));
        }
        Ok(())
    }

    /// Blocks reachable from the root, in traversal order.
    pub fn blocks(&self) -> Vec<&Block> {
        let mut out = Vec::with_capacity(self.blocks.len());
        if let Err(err) = self.iterate(|block| {
            out.push(block);
            true
        }) {
            tracing::warn!(error = %err, "state traversal stopped early");
        }
        out
    }

    pub fn changed_ids(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    pub fn clear_changes(&mut self) {
        self.changed.clear();
    }

    pub fn detached_ids(&self) -> impl Iterator<Item = &str> {
        self.detached.iter().map(String::as_str)
    }
}
