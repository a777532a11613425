//! Rotation case selection.

use log::trace;

use crate::avl::node::AvlNode;

/// The four AVL rebalancing cases, named after the path from the unbalanced
/// node to its heavier grandchild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Single right rotation on the node.
    LeftLeft,
    /// Single left rotation on the node.
    RightRight,
    /// Left rotation on the left child, then right rotation on the node.
    LeftRight,
    /// Right rotation on the right child, then left rotation on the node.
    RightLeft,
}

impl Rotation {
    /// Whether this case needs two primitive rotations.
    pub fn is_double(self) -> bool {
        matches!(self, Rotation::LeftRight | Rotation::RightLeft)
    }
}

/// Running counts of the rotation cases a tree has applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebalanceStats {
    pub left_left: u64,
    pub right_right: u64,
    pub left_right: u64,
    pub right_left: u64,
}

impl RebalanceStats {
    pub(crate) fn record(&mut self, rotation: Option<Rotation>) {
        match rotation {
            Some(Rotation::LeftLeft) => self.left_left += 1,
            Some(Rotation::RightRight) => self.right_right += 1,
            Some(Rotation::LeftRight) => self.left_right += 1,
            Some(Rotation::RightLeft) => self.right_left += 1,
            None => {}
        }
    }

    /// Single-rotation cases applied.
    pub fn single(&self) -> u64 {
        self.left_left + self.right_right
    }

    /// Double-rotation cases applied.
    pub fn double(&self) -> u64 {
        self.left_right + self.right_left
    }

    /// All cases applied.
    pub fn total(&self) -> u64 {
        self.single() + self.double()
    }
}

/// Refresh `node`'s height and, if its balance factor left `[-1, 1]`,
/// restore it with the matching rotation case.
///
/// The case is chosen from the heavy child's own balance factor: a child
/// leaning away from the heavy side needs the double rotation. On insert
/// this agrees with "which grandchild received the new key"; it also stays
/// correct on delete, where the heavy child can be perfectly balanced.
pub(crate) fn rebalance<K, V>(
    mut node: Box<AvlNode<K, V>>,
) -> (Box<AvlNode<K, V>>, Option<Rotation>) {
    node.update_height();
    let balance = node.balance_factor();

    let case = if balance > 1 {
        match node.left.take() {
            Some(left) if left.balance_factor() < 0 => {
                node.left = Some(left.rotate_left());
                Rotation::LeftRight
            }
            left => {
                node.left = left;
                Rotation::LeftLeft
            }
        }
    } else if balance < -1 {
        match node.right.take() {
            Some(right) if right.balance_factor() > 0 => {
                node.right = Some(right.rotate_right());
                Rotation::RightLeft
            }
            right => {
                node.right = right;
                Rotation::RightRight
            }
        }
    } else {
        return (node, None);
    };

    trace!("avl rebalance: {case:?} at balance {balance}");

    let node = match case {
        Rotation::LeftLeft | Rotation::LeftRight => node.rotate_right(),
        Rotation::RightRight | Rotation::RightLeft => node.rotate_left(),
    };
    (node, Some(case))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Node = Box<AvlNode<i32, ()>>;

    fn attach(mut parent: Node, left: Option<Node>, right: Option<Node>) -> Node {
        parent.left = left;
        parent.right = right;
        parent.update_height();
        parent
    }

    #[test]
    fn test_balanced_node_untouched() {
        let node = attach(AvlNode::leaf(2, ()), Some(AvlNode::leaf(1, ())), None);
        let (node, case) = rebalance(node);
        assert_eq!(case, None);
        assert_eq!(node.key, 2);
    }

    #[test]
    fn test_left_right_case() {
        // 30 <- 10 -> 20
        let left = attach(AvlNode::leaf(10, ()), None, Some(AvlNode::leaf(20, ())));
        let root = attach(AvlNode::leaf(30, ()), Some(left), None);

        let (root, case) = rebalance(root);
        assert_eq!(case, Some(Rotation::LeftRight));
        assert_eq!(root.key, 20);
        assert_eq!(root.left.as_ref().map(|n| n.key), Some(10));
        assert_eq!(root.right.as_ref().map(|n| n.key), Some(30));
        assert_eq!(root.height, 2);
    }

    #[test]
    fn test_right_left_case() {
        let right = attach(AvlNode::leaf(30, ()), Some(AvlNode::leaf(20, ())), None);
        let root = attach(AvlNode::leaf(10, ()), None, Some(right));

        let (root, case) = rebalance(root);
        assert_eq!(case, Some(Rotation::RightLeft));
        assert_eq!(root.key, 20);
    }

    #[test]
    fn test_right_right_with_balanced_child_is_single() {
        // Heavy child with balance 0, as happens after a delete.
        let right = attach(
            AvlNode::leaf(30, ()),
            Some(AvlNode::leaf(25, ())),
            Some(AvlNode::leaf(35, ())),
        );
        let root = attach(AvlNode::leaf(10, ()), None, Some(right));

        let (root, case) = rebalance(root);
        assert_eq!(case, Some(Rotation::RightRight));
        assert_eq!(root.key, 30);
        assert_eq!(root.height, 3);
        assert_eq!(root.balance_factor(), 1);
    }

    #[test]
    fn test_stats() {
        let mut stats = RebalanceStats::default();
        stats.record(Some(Rotation::LeftLeft));
        stats.record(Some(Rotation::RightLeft));
        stats.record(None);
        assert_eq!(stats.single(), 1);
        assert_eq!(stats.double(), 1);
        assert_eq!(stats.total(), 2);
        assert!(Rotation::RightLeft.is_double());
        assert!(!Rotation::LeftLeft.is_double());
    }
}
