//! AVL nodes and the two primitive rotations.

pub(crate) type Link<K, V> = Option<Box<AvlNode<K, V>>>;

#[derive(Debug, Clone)]
pub(crate) struct AvlNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    /// Nodes on the longest downward path, this one included (leaf = 1).
    pub(crate) height: u32,
}

/// Height of a possibly empty subtree.
#[inline]
pub(crate) fn height<K, V>(link: &Link<K, V>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

impl<K, V> AvlNode<K, V> {
    pub(crate) fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(AvlNode {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance_factor(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }

    /// Promote the left child:
    ///
    /// ```text
    ///       self            pivot
    ///      /    \          /     \
    ///   pivot    c   =>   a      self
    ///   /   \                   /    \
    ///  a     b                 b      c
    /// ```
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.left.take() else {
            return self;
        };
        self.left = pivot.right.take();
        self.update_height();
        pivot.right = Some(self);
        pivot.update_height();
        pivot
    }

    /// Promote the right child; mirror image of [`rotate_right`](Self::rotate_right).
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.right.take() else {
            return self;
        };
        self.right = pivot.left.take();
        self.update_height();
        pivot.left = Some(self);
        pivot.update_height();
        pivot
    }
}
