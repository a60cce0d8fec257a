//! AVL 树
//!
//! 每次插入、删除后沿路径回溯重新平衡，保证任意节点左右子树高度差不超过 1。
//! 相等的键插入右子树。

use std::cmp::Ordering;

type Link<K> = Option<Box<AvlNode<K>>>;

#[derive(Debug, Clone)]
struct AvlNode<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    height: usize,
}

fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

impl<K> AvlNode<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn rotate_right<K>(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<K>(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

fn rebalance<K>(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        // 左-右型先左旋左子树
        if node.left.as_ref().is_some_and(|l| l.balance() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_ref().is_some_and(|r| r.balance() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert<K: Ord>(link: Link<K>, key: K) -> Box<AvlNode<K>> {
    match link {
        None => AvlNode::leaf(key),
        Some(mut node) => {
            if key < node.key {
                node.left = Some(insert(node.left.take(), key));
            } else {
                node.right = Some(insert(node.right.take(), key));
            }
            rebalance(node)
        }
    }
}

/// 摘下最小节点，返回 (剩余子树, 最小键)
fn remove_min<K>(mut node: Box<AvlNode<K>>) -> (Link<K>, K) {
    match node.left.take() {
        None => {
            let AvlNode { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (rest, min) = remove_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn remove<K: Ord>(link: Link<K>, key: &K, removed: &mut bool) -> Link<K> {
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = remove(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove(node.right.take(), key, removed),
        Ordering::Equal => {
            *removed = true;
            match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                (Some(left), Some(right)) => {
                    // 用右子树的最小键替换
                    let (rest, successor) = remove_min(right);
                    node.key = successor;
                    node.left = Some(left);
                    node.right = rest;
                }
            }
        }
    }

    Some(rebalance(node))
}

/// AVL 树
#[derive(Debug, Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord> AvlTree<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K) {
        self.root = Some(insert(self.root.take(), key));
        self.len += 1;
    }

    /// 删除一个等于 `key` 的键，不存在时返回 false
    pub fn remove(&mut self, key: &K) -> bool {
        let mut removed = false;
        self.root = remove(self.root.take(), key, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut cursor = &self.root;
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn height(&self) -> usize {
        height(&self.root)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<K: Clone> AvlTree<K> {
    /// 前序遍历（根、左、右）
    pub fn pre_order(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<&AvlNode<K>> = self.root.iter().map(|b| &**b).collect();

        while let Some(node) = stack.pop() {
            keys.push(node.key.clone());
            if let Some(right) = &node.right {
                stack.push(right);
            }
            if let Some(left) = &node.left {
                stack.push(left);
            }
        }

        keys
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}
