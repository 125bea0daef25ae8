//! Row model projected from a [`Tree`] onto a fixed column schema.
//!
//! Each column owns its rendering and comparison rule. Column 0 renders a
//! branch by its key and a terminal by its first cell; every other column
//! renders a branch as an empty string and a terminal by the matching cell.

use std::cmp::Ordering;

use crate::error::{Result, VeneerError};

use super::tree::{CellValue, Tree, TreeNode};

/// Payload of one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowData {
    /// A branch row, shown by its key.
    Branch(String),
    /// A terminal row with one value per declared column.
    Terminal(Vec<CellValue>),
}

/// One row of the projected model with its nested rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    /// Key of this row in its parent mapping.
    pub key: String,
    /// Row payload.
    pub data: RowData,
    /// Nested rows, in display order.
    pub children: Vec<TreeRow>,
}

impl TreeRow {
    /// Returns `true` if this row holds nested rows rather than values.
    pub fn is_branch(&self) -> bool {
        matches!(self.data, RowData::Branch(_))
    }
}

/// A declared column: its position and header title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    index: usize,
    title: String,
}

impl Column {
    fn new(index: usize, title: String) -> Self {
        Self { index, title }
    }

    /// Position of the column.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text shown in this column for `data`.
    pub fn render(&self, data: &RowData) -> String {
        match (data, self.index) {
            (RowData::Branch(key), 0) => key.clone(),
            (RowData::Branch(_), _) => String::new(),
            (RowData::Terminal(cells), index) => cells.get(index).map(ToString::to_string).unwrap_or_default(),
        }
    }

    /// Sort order of two rows under this column.
    ///
    /// Branches compare by key, ignoring case. Terminals compare the cell in
    /// this column. A branch and a terminal compare equal.
    pub fn compare(&self, a: &RowData, b: &RowData) -> Ordering {
        match (a, b) {
            (RowData::Branch(a), RowData::Branch(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (RowData::Terminal(a), RowData::Terminal(b)) => match (a.get(self.index), b.get(self.index)) {
                (Some(a), Some(b)) => a.compare(b),
                _ => Ordering::Equal,
            },
            _ => Ordering::Equal,
        }
    }
}

/// Columns and rows backing a [`TreeView`](crate::TreeView).
///
/// Rows are addressed by *path*: the row index at each level, starting at
/// the top.
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    columns: Vec<Column>,
    rows: Vec<TreeRow>,
    sort_column: Option<usize>,
}

impl TreeModel {
    /// Create an empty model with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the columns. Drops every row and any active sort.
    pub fn set_headers<S: AsRef<str>>(&mut self, titles: &[S]) {
        self.columns = titles
            .iter()
            .enumerate()
            .map(|(index, title)| Column::new(index, title.as_ref().to_string()))
            .collect();
        self.rows.clear();
        self.sort_column = None;
    }

    /// The declared columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replace every row with the projection of `tree`.
    ///
    /// Terminal values are taken in column order; a terminal missing a
    /// declared column is rejected and leaves the model unchanged. An active
    /// sort is reapplied.
    pub fn set_tree(&mut self, tree: &Tree) -> Result<()> {
        if self.columns.is_empty() {
            return Err(VeneerError::tree_data("headers must be set before the tree"));
        }
        let mut rows = self.project(tree)?;
        if let Some(column) = self.sort_column.and_then(|c| self.columns.get(c)) {
            sort_rows(&mut rows, column);
        }
        self.rows = rows;
        Ok(())
    }

    fn project(&self, tree: &Tree) -> Result<Vec<TreeRow>> {
        tree.iter()
            .map(|(key, node)| match node {
                TreeNode::Branch(children) => Ok(TreeRow {
                    key: key.clone(),
                    data: RowData::Branch(key.clone()),
                    children: self.project(children)?,
                }),
                TreeNode::Terminal(values) => {
                    let cells = self
                        .columns
                        .iter()
                        .map(|column| {
                            values.get(column.title()).cloned().ok_or_else(|| {
                                VeneerError::tree_data(format!(
                                    "row '{key}' has no value for column '{}'",
                                    column.title()
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(TreeRow {
                        key: key.clone(),
                        data: RowData::Terminal(cells),
                        children: Vec::new(),
                    })
                }
            })
            .collect()
    }

    /// Drop every row. Columns and sort survive.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Top-level rows.
    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    /// Returns `true` if the model has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `path`.
    pub fn row(&self, path: &[usize]) -> Option<&TreeRow> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.rows.get(*first)?, |row, index| row.children.get(*index))
    }

    /// `(parent key, row key)` for the row at `path`, if it has a parent.
    pub fn selection_for(&self, path: &[usize]) -> Option<(String, String)> {
        let (_, parent_path) = path.split_last()?;
        if parent_path.is_empty() {
            return None;
        }
        let parent = self.row(parent_path)?;
        let row = self.row(path)?;
        Some((parent.key.clone(), row.key.clone()))
    }

    /// Text of column `column` at `path`.
    pub fn cell_text(&self, path: &[usize], column: usize) -> Option<String> {
        let column = self.columns.get(column)?;
        self.row(path).map(|row| column.render(&row.data))
    }

    /// Sort every level ascending by `column`. The sort is stable.
    pub fn sort_by_column(&mut self, column: usize) -> Result<()> {
        let Some(col) = self.columns.get(column) else {
            return Err(VeneerError::IndexOutOfBounds {
                index: column,
                len: self.columns.len(),
            });
        };
        sort_rows(&mut self.rows, col);
        self.sort_column = Some(column);
        Ok(())
    }

    /// The column rows are sorted by, if any.
    pub fn sort_column(&self) -> Option<usize> {
        self.sort_column
    }

    /// Column 0 text of every row, depth first.
    pub fn display_texts(&self) -> Vec<String> {
        let mut texts = Vec::new();
        if let Some(column) = self.columns.first() {
            collect_texts(&self.rows, column, &mut texts);
        }
        texts
    }
}

/// Sort branches among branches and terminals among terminals, each kind
/// keeping the positions it held.
fn sort_rows(rows: &mut Vec<TreeRow>, column: &Column) {
    let slots: Vec<bool> = rows.iter().map(TreeRow::is_branch).collect();
    let (mut branches, mut terminals): (Vec<_>, Vec<_>) =
        std::mem::take(rows).into_iter().partition(TreeRow::is_branch);
    branches.sort_by(|a, b| column.compare(&a.data, &b.data));
    terminals.sort_by(|a, b| column.compare(&a.data, &b.data));

    let mut branches = branches.into_iter();
    let mut terminals = terminals.into_iter();
    *rows = slots
        .into_iter()
        .filter_map(|is_branch| if is_branch { branches.next() } else { terminals.next() })
        .collect();
    for row in rows.iter_mut() {
        sort_rows(&mut row.children, column);
    }
}

fn collect_texts(rows: &[TreeRow], column: &Column, out: &mut Vec<String>) {
    for row in rows {
        out.push(column.render(&row.data));
        collect_texts(&row.children, column, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::from_iter([
            (
                "g1".to_string(),
                TreeNode::branch([
                    ("x", TreeNode::terminal([("Name", "x"), ("Value", "1")])),
                    (
                        "deeper",
                        TreeNode::branch([("z", TreeNode::terminal([("Name", "Zed"), ("Value", "3")]))]),
                    ),
                    ("a", TreeNode::terminal([("Name", "Alpha"), ("Value", "2")])),
                ]),
            ),
            ("G0".to_string(), TreeNode::Branch(Tree::new())),
        ])
    }

    fn model() -> TreeModel {
        let mut model = TreeModel::new();
        model.set_headers(&["Name", "Value"]);
        model.set_tree(&sample()).unwrap();
        model
    }

    #[test]
    fn test_projection_and_rendering() {
        let model = model();
        assert_eq!(model.rows().len(), 2);
        assert_eq!(model.cell_text(&[0], 0).as_deref(), Some("g1"));
        assert_eq!(model.cell_text(&[0], 1).as_deref(), Some(""));
        assert_eq!(model.cell_text(&[0, 0], 0).as_deref(), Some("x"));
        assert_eq!(model.cell_text(&[0, 0], 1).as_deref(), Some("1"));
        assert_eq!(model.cell_text(&[0, 0], 2), None);
        assert_eq!(model.cell_text(&[5], 0), None);
    }

    #[test]
    fn test_nested_branches_attach_under_parent() {
        let model = model();
        let deeper = model.row(&[0, 1]).unwrap();
        assert!(deeper.is_branch());
        assert_eq!(deeper.children.len(), 1);
        assert_eq!(model.cell_text(&[0, 1, 0], 0).as_deref(), Some("Zed"));
        assert_eq!(model.display_texts(), vec!["g1", "x", "deeper", "Zed", "Alpha", "G0"]);
    }

    #[test]
    fn test_selection_needs_a_parent() {
        let model = model();
        assert_eq!(model.selection_for(&[0]), None);
        assert_eq!(
            model.selection_for(&[0, 0]),
            Some(("g1".to_string(), "x".to_string()))
        );
        assert_eq!(
            model.selection_for(&[0, 1, 0]),
            Some(("deeper".to_string(), "z".to_string()))
        );
        assert_eq!(model.selection_for(&[]), None);
    }

    #[test]
    fn test_sort_by_column() {
        let mut model = model();
        model.sort_by_column(0).unwrap();
        // Top level ignores case: "G0" < "g1".
        assert_eq!(model.cell_text(&[0], 0).as_deref(), Some("G0"));
        // Terminals sort among themselves; the branch keeps its place.
        let names: Vec<_> = model.rows()[1].children.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(names, vec!["a", "deeper", "x"]);

        model.sort_by_column(1).unwrap();
        assert_eq!(model.sort_column(), Some(1));
        assert!(matches!(
            model.sort_by_column(2),
            Err(VeneerError::IndexOutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_sort_survives_new_tree() {
        let mut model = model();
        model.sort_by_column(0).unwrap();
        model.set_tree(&sample()).unwrap();
        assert_eq!(model.cell_text(&[0], 0).as_deref(), Some("G0"));
    }

    #[test]
    fn test_set_tree_validation() {
        let mut model = TreeModel::new();
        assert!(matches!(model.set_tree(&sample()), Err(VeneerError::TreeData(_))));

        model.set_headers(&["Name", "Value", "Units"]);
        let err = model.set_tree(&sample()).unwrap_err();
        assert!(err.to_string().contains("Units"));
        assert!(model.is_empty());
    }

    #[test]
    fn test_set_headers_resets() {
        let mut model = model();
        model.sort_by_column(1).unwrap();
        model.set_headers(&["Only"]);
        assert!(model.is_empty());
        assert_eq!(model.sort_column(), None);
        assert_eq!(model.columns()[0].title(), "Only");
    }
}
