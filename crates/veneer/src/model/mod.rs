//! Tree/table data model.
//!
//! - [`Tree`] / [`TreeNode`]: nested input data, decodable from JSON
//! - [`TreeModel`]: the rows and columns a [`TreeView`](crate::TreeView) shows
//! - [`Column`]: per-column rendering and comparison

mod tree;
mod view;

pub use tree::{CellValue, TERMINAL_KEY, Tree, TreeNode, tree_from_json};
pub use view::{Column, RowData, TreeModel, TreeRow};
