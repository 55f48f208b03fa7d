//! The pruning engine.
//!
//! Pruning consumes the tree and hands back whatever survives. Each call
//! takes ownership of a node, prunes its children, and returns either the
//! node or `None`, so the child map is rebuilt bottom-up without any shared
//! mutable state.
//!
//! Two checks run on the way down:
//!
//! 1. Before descending into a child, the child's letter is checked against
//!    the position it would occupy ([`Rules::admits_branch`]). A child that
//!    fails is dropped with its whole subtree.
//! 2. At depth equal to the word length the full word is validated
//!    ([`Rules::admits_word`]), which covers the letter counts that cannot
//!    be judged from a prefix.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::constraints::Rules;
use crate::trie::TrieNode;

/// Candidate counts around one call to [`Trie::prune`](crate::Trie::prune).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneReport {
    pub before: usize,
    pub after: usize,
}

impl PruneReport {
    pub fn eliminated(&self) -> usize {
        self.before.saturating_sub(self.after)
    }

    pub fn is_exhausted(&self) -> bool {
        self.after == 0
    }
}

/// Prune a whole tree. `None` means nothing survived; the count is the
/// number of words left.
pub(crate) fn prune_root(root: TrieNode, rules: &Rules) -> (Option<TrieNode>, usize) {
    let mut prefix = Vec::with_capacity(rules.word_length());
    let mut survivors = 0;
    let pruned = prune_node(root, &mut prefix, rules, &mut survivors);
    (pruned, survivors)
}

/// Prune a whole tree, handing each branch of the root to the rayon pool.
///
/// Branches are independent; the root's child map is rebuilt only after
/// every branch has reported.
pub(crate) fn prune_root_parallel(mut root: TrieNode, rules: &Rules) -> (Option<TrieNode>, usize) {
    if rules.word_length() == 0 {
        return prune_root(root, rules);
    }

    let children: Vec<(char, TrieNode)> = std::mem::take(&mut root.children)
        .into_iter()
        .collect();
    let branches: Vec<(char, TrieNode, usize)> = children
        .into_par_iter()
        .filter(|&(letter, _)| rules.admits_branch(0, letter))
        .filter_map(|(letter, child)| {
            let mut prefix = Vec::with_capacity(rules.word_length());
            prefix.push(letter);
            let mut survivors = 0;
            prune_node(child, &mut prefix, rules, &mut survivors)
                .map(|child| (letter, child, survivors))
        })
        .collect();

    let survivors = branches.iter().map(|&(_, _, count)| count).sum();
    root.children = branches
        .into_iter()
        .map(|(letter, child, _)| (letter, child))
        .collect();

    // the root sits at depth 0 and can never be a complete word
    root.is_end_of_word = false;
    ((!root.children.is_empty()).then(|| root), survivors)
}

fn prune_node(
    mut node: TrieNode,
    prefix: &mut Vec<char>,
    rules: &Rules,
    survivors: &mut usize,
) -> Option<TrieNode> {
    let depth = prefix.len();

    if depth == rules.word_length() {
        if node.is_end_of_word && rules.admits_word(prefix) {
            node.children.clear();
            *survivors += 1;
            return Some(node);
        }
        return None;
    }

    let mut kept = BTreeMap::new();
    for (letter, child) in std::mem::take(&mut node.children) {
        if !rules.admits_branch(depth, letter) {
            continue;
        }
        prefix.push(letter);
        if let Some(child) = prune_node(child, prefix, rules, survivors) {
            kept.insert(letter, child);
        }
        prefix.pop();
    }
    node.children = kept;

    // shorter words can never be validated
    node.is_end_of_word = false;

    if node.children.is_empty() {
        None
    } else {
        Some(node)
    }
}
