//! 普通二叉搜索树
//!
//! 不做平衡，有序输入会退化成链表，因此所有操作都用迭代实现。

type Link<K> = Option<Box<BstNode<K>>>;

#[derive(Debug)]
struct BstNode<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

/// 摘下子树中的最小键
fn take_min<K>(link: &mut Link<K>) -> Option<K> {
    let mut cursor = link;
    while cursor.as_ref().is_some_and(|n| n.left.is_some()) {
        cursor = &mut cursor.as_mut()?.left;
    }

    let node = cursor.take()?;
    let BstNode { key, right, .. } = *node;
    *cursor = right;
    Some(key)
}

/// 二叉搜索树，相等的键插入右子树
#[derive(Debug)]
pub struct BstTree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for BstTree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord> BstTree<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K) {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            cursor = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *cursor = Some(Box::new(BstNode {
            key,
            left: None,
            right: None,
        }));
        self.len += 1;
    }

    /// 删除一个等于 `key` 的键；有两个子节点时用中序后继替换
    pub fn remove(&mut self, key: &K) -> bool {
        let mut cursor = &mut self.root;
        while cursor.as_ref().is_some_and(|n| *key != n.key) {
            let Some(node) = cursor.as_mut() else {
                return false;
            };
            cursor = if *key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let Some(node) = cursor.as_mut() else {
            return false;
        };

        if node.left.is_some() && node.right.is_some() {
            if let Some(successor) = take_min(&mut node.right) {
                node.key = successor;
            }
        } else {
            let left = node.left.take();
            let right = node.right.take();
            *cursor = left.or(right);
        }

        self.len -= 1;
        true
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut cursor = &self.root;
        while let Some(node) = cursor {
            if *key == node.key {
                return true;
            }
            cursor = if *key < node.key { &node.left } else { &node.right };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<K> BstTree<K> {
    /// 树高（空树为 0）
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&BstNode<K>, usize)> =
            self.root.iter().map(|b| (&**b, 1)).collect();

        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            for child in [&node.left, &node.right].into_iter().flatten() {
                stack.push((&**child, depth + 1));
            }
        }

        max
    }
}

impl<K: Clone> BstTree<K> {
    /// 前序遍历（根、左、右）
    pub fn pre_order(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<&BstNode<K>> = self.root.iter().map(|b| &**b).collect();

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

impl<K: Ord> FromIterator<K> for BstTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}

impl<K: Clone> Clone for BstTree<K> {
    // 派生实现沿 Box 递归，退化链表会栈溢出
    fn clone(&self) -> Self {
        let mut order: Vec<&BstNode<K>> = Vec::with_capacity(self.len);
        let mut stack: Vec<&BstNode<K>> = self.root.iter().map(|b| &**b).collect();
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        // 逆序即后序，右子树的副本位于栈顶
        let mut built: Vec<Box<BstNode<K>>> = Vec::new();
        for node in order.into_iter().rev() {
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(BstNode {
                key: node.key.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<K> Drop for BstTree<K> {
    // 退化成链表时递归释放会栈溢出
    fn drop(&mut self) {
        let mut stack: Vec<Box<BstNode<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
