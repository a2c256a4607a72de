//! Pure operations over the document tree.
//!
//! The tree is an immutable value: every function here either borrows it
//! or builds a new one. The controller replaces the whole tree after each
//! refetch and bumps a generation counter that [`FilteredTree`] keys on.

use notehub_core::path;
use notehub_core::types::TreeNode;

/// Depth-first lookup of the first node whose path equals `target`.
pub fn find_by_path<'a>(tree: &'a [TreeNode], target: &str) -> Option<&'a TreeNode> {
    for node in tree {
        if node.path == target {
            return Some(node);
        }
        if let Some(found) = find_by_path(&node.children, target) {
            return Some(found);
        }
    }
    None
}

/// Keep nodes whose name contains `query` (case-insensitive).
///
/// A folder survives if its own name matches or any descendant does; only
/// matching descendants are kept beneath it. An empty query returns the
/// tree unchanged.
pub fn filter(tree: &[TreeNode], query: &str) -> Vec<TreeNode> {
    if query.is_empty() {
        return tree.to_vec();
    }
    filter_lowered(tree, &query.to_lowercase())
}

fn filter_lowered(tree: &[TreeNode], query: &str) -> Vec<TreeNode> {
    tree.iter()
        .filter_map(|node| {
            let matches = node.name.to_lowercase().contains(query);
            if node.is_folder() {
                let children = filter_lowered(&node.children, query);
                (matches || !children.is_empty()).then(|| TreeNode {
                    children,
                    ..node.clone()
                })
            } else {
                matches.then(|| node.clone())
            }
        })
        .collect()
}

/// Paths of every folder, in depth-first order. Drives expand-all.
pub fn list_all_folder_paths(tree: &[TreeNode]) -> Vec<String> {
    let mut out = Vec::new();
    collect(tree, &mut out, &|n: &TreeNode| n.is_folder());
    out
}

/// Paths of every file, in depth-first order.
pub fn list_all_files(tree: &[TreeNode]) -> Vec<String> {
    let mut out = Vec::new();
    collect(tree, &mut out, &|n: &TreeNode| !n.is_folder());
    out
}

fn collect(tree: &[TreeNode], out: &mut Vec<String>, keep: &dyn Fn(&TreeNode) -> bool) {
    for node in tree {
        if keep(node) {
            out.push(node.path.clone());
        }
        collect(&node.children, out, keep);
    }
}

/// File paths containing `query` anywhere in the path (case-insensitive).
///
/// Used by the document reference picker, which matches on the full path
/// rather than on the name.
pub fn search_files(tree: &[TreeNode], query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    list_all_files(tree)
        .into_iter()
        .filter(|p| query.is_empty() || p.to_lowercase().contains(&query))
        .collect()
}

/// Inline token that links one document to another.
pub fn reference_token(target: &str) -> String {
    format!("@({target})")
}

/// Folder paths that must be expanded for `target` to be visible.
pub fn ancestor_paths(target: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let parent = path::parent(target);
    for segment in path::segments(parent) {
        current = path::join(&current, segment);
        out.push(current.clone());
    }
    out
}

/// Memoized search result, recomputed only when the source tree
/// generation or the query changes.
#[derive(Debug, Default)]
pub struct FilteredTree {
    key: Option<(u64, String)>,
    nodes: Vec<TreeNode>,
}

impl FilteredTree {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered tree for `(generation, query)`.
    pub fn get(&mut self, tree: &[TreeNode], generation: u64, query: &str) -> &[TreeNode] {
        let stale = match &self.key {
            Some((g, q)) => *g != generation || q != query,
            None => true,
        };
        if stale {
            self.nodes = filter(tree, query);
            self.key = Some((generation, query.to_string()));
        }
        &self.nodes
    }

    /// Whether the memo currently holds a result for `(generation, query)`.
    pub fn is_fresh(&self, generation: u64, query: &str) -> bool {
        matches!(&self.key, Some((g, q)) if *g == generation && q == query)
    }
}
