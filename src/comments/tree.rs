use std::collections::HashMap;

use crate::models::{CommentId, CommentRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub comment: CommentRecord,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(comment: CommentRecord) -> Self {
        Self {
            comment,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> CommentId {
        self.comment.id
    }

    /// Number of nodes in this subtree, itself included.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Long reply chains would otherwise drop recursively.
impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

pub fn forest_len(forest: &[CommentNode]) -> usize {
    forest.iter().map(CommentNode::subtree_len).sum()
}

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Resolves each record's parent to a position in `records`.
///
/// Unset, dangling and self-referencing parents resolve to `None`. With
/// duplicate ids the last occurrence owns the id.
fn resolve_parents(records: &[CommentRecord]) -> Vec<Option<usize>> {
    let index: HashMap<CommentId, usize> = records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.id, position))
        .collect();

    records
        .iter()
        .map(|record| match record.parent_comment_id {
            Some(parent) if parent != record.id => index.get(&parent).copied(),
            _ => None,
        })
        .collect()
}

/// Cuts every parent cycle at its earliest member so all nodes reach a root.
fn break_cycles(parents: &mut [Option<usize>]) {
    let mut state = vec![Visit::New; parents.len()];
    let mut path = Vec::new();

    for start in 0..parents.len() {
        let mut current = start;
        loop {
            match state[current] {
                Visit::Done => break,
                Visit::Active => {
                    let from = path.iter().position(|&p| p == current).unwrap_or(0);
                    if let Some(&earliest) = path[from..].iter().min() {
                        tracing::debug!(position = earliest, "cutting comment parent cycle");
                        parents[earliest] = None;
                    }
                    break;
                }
                Visit::New => {
                    state[current] = Visit::Active;
                    path.push(current);
                    match parents[current] {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
            }
        }
        for visited in path.drain(..) {
            state[visited] = Visit::Done;
        }
    }
}

/// Builds the comment forest from a flat, possibly inconsistent list.
///
/// Every record yields exactly one node. Records whose parent cannot be
/// resolved become roots. Roots and siblings keep their input order.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn build_comment_tree(records: Vec<CommentRecord>) -> Vec<CommentNode> {
    let mut parents = resolve_parents(&records);
    break_cycles(&mut parents);

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (position, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(position),
            None => roots.push(position),
        }
    }

    // Assemble bottom-up so deep chains never recurse.
    let mut pending: Vec<Option<CommentRecord>> = records.into_iter().map(Some).collect();
    let mut built: Vec<Option<CommentNode>> = vec![None; pending.len()];
    for &root in &roots {
        let mut stack = vec![(root, false)];
        while let Some((position, expanded)) = stack.pop() {
            if expanded {
                let Some(comment) = pending[position].take() else {
                    continue;
                };
                let mut node = CommentNode::new(comment);
                node.children = children[position]
                    .iter()
                    .filter_map(|&child| built[child].take())
                    .collect();
                built[position] = Some(node);
            } else {
                stack.push((position, true));
                stack.extend(children[position].iter().rev().map(|&child| (child, false)));
            }
        }
    }

    roots
        .into_iter()
        .filter_map(|root| built[root].take())
        .collect()
}
