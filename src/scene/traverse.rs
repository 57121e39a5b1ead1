//! Depth-first pre-order walks.
//!
//! The visitor sees the root first, then each child subtree in document
//! order. Walks use an explicit stack so deep trees cannot overflow the
//! call stack. The tree is assumed acyclic.

use super::SceneNode;

/// Visit `root` and every descendant.
pub fn traverse<'a, N, F>(root: &'a N, mut visit: F)
where
    N: SceneNode,
    F: FnMut(&'a N),
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        if let Some(children) = node.children() {
            stack.extend(children.iter().rev());
        }
    }
}

/// Visit `root` and every descendant with mutable access.
///
/// Children are looked up after the visitor returns, so a visitor may
/// rewrite a node's attributes before its subtree is walked.
pub fn traverse_mut<N, F>(root: &mut N, mut visit: F)
where
    N: SceneNode,
    F: FnMut(&mut N),
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(&mut *node);
        if let Some(children) = node.children_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
}

/// Materialize the subtree in visit order.
pub fn collect_nodes<N: SceneNode>(root: &N) -> Vec<&N> {
    let mut nodes = Vec::new();
    traverse(root, |node| nodes.push(node));
    nodes
}

/// Number of nodes in the subtree, root included.
pub fn count_nodes<N: SceneNode>(root: &N) -> usize {
    let mut total = 0;
    traverse(root, |_| total += 1);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, SceneNode};

    fn sample() -> Node {
        Node::group("root")
            .with_child(
                Node::group("a")
                    .with_child(Node::new("a1"))
                    .with_child(Node::new("a2")),
            )
            .with_child(Node::new("b"))
            .with_child(Node::group("c").with_child(Node::new("c1")))
    }

    #[test]
    fn test_pre_order() {
        let root = sample();
        let names: Vec<&str> = collect_nodes(&root).iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["root", "a", "a1", "a2", "b", "c", "c1"]);
    }

    #[test]
    fn test_leaf_root() {
        let leaf = Node::new("solo");
        assert_eq!(count_nodes(&leaf), 1);
    }

    #[test]
    fn test_count_matches_collect() {
        let root = sample();
        assert_eq!(count_nodes(&root), collect_nodes(&root).len());
    }

    #[test]
    fn test_traverse_mut_visits_all() {
        let mut root = sample();
        let mut order = Vec::new();
        traverse_mut(&mut root, |node| {
            order.push(node.name.clone());
            node.name.push('!');
        });
        assert_eq!(order, vec!["root", "a", "a1", "a2", "b", "c", "c1"]);

        let renamed: Vec<&str> = collect_nodes(&root).iter().map(|n| n.name()).collect();
        assert!(renamed.iter().all(|n| n.ends_with('!')));
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut root = Node::new("leaf");
        for i in 0..50_000 {
            root = Node::group(format!("n{}", i)).with_child(root);
        }
        assert_eq!(count_nodes(&root), 50_001);
        // Node's own Drop is recursive; unlink iteratively before it runs
        let mut next = root.children.take();
        while let Some(mut children) = next {
            next = children.pop().and_then(|mut child| child.children.take());
        }
    }
}
