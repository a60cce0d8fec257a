//! 搜索树：AVL 树与普通二叉搜索树

pub mod avl;
pub mod bst;

pub use avl::AvlTree;
pub use bst::BstTree;
