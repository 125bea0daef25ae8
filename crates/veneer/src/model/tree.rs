//! Nested tree data handed to a [`TreeView`](crate::TreeView).
//!
//! A tree is a mapping from keys to nodes. A node is either a *branch*
//! (another mapping) or a *terminal* row carrying one value per column,
//! keyed by column title. In JSON, a terminal is an object containing the
//! [`TERMINAL_KEY`] sentinel:
//!
//! ```
//! use serde_json::json;
//! use veneer::model::{TreeNode, tree_from_json};
//!
//! let tree = tree_from_json(&json!({
//!     "group": {
//!         "x": { "__terminal__": true, "Name": "x", "Value": 1 },
//!     },
//! }))
//! .unwrap();
//! assert!(matches!(tree["group"], TreeNode::Branch(_)));
//! ```

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Result, VeneerError};

/// Key marking a JSON object as a terminal row.
pub const TERMINAL_KEY: &str = "__terminal__";

/// A top-level tree: keys in display order.
pub type Tree = IndexMap<String, TreeNode>;

/// One cell of a terminal row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Rank used when comparing values of different types.
    fn type_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) | Self::Float(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Compare two cells for sorting.
    ///
    /// Text compares case-insensitively, numbers numerically (integers and
    /// floats mix), booleans `false < true`. Values of different types
    /// order by type: booleans, then numbers, then text.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => self
                .as_f64()
                .partial_cmp(&other.as_f64())
                .unwrap_or(Ordering::Equal),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Bool(v) => f64::from(u8::from(*v)),
            Self::Text(_) => f64::NAN,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => f.write_str(v),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl TryFrom<&Value> for CellValue {
    type Error = VeneerError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => n
                    .as_f64()
                    .map(Self::Float)
                    .ok_or_else(|| VeneerError::tree_data(format!("unrepresentable number {n}"))),
            },
            other => Err(VeneerError::tree_data(format!(
                "cell values must be text, numbers or booleans, got {other}"
            ))),
        }
    }
}

/// A node of the input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// A row: values keyed by column title.
    Terminal(IndexMap<String, CellValue>),
    /// Nested nodes keyed by name.
    Branch(Tree),
}

impl TreeNode {
    /// Build a terminal row from `(column, value)` pairs.
    pub fn terminal<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self::Terminal(cells.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Build a branch from `(key, node)` pairs.
    pub fn branch<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, TreeNode)>,
        K: Into<String>,
    {
        Self::Branch(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl TryFrom<&Value> for TreeNode {
    type Error = VeneerError;

    fn try_from(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(VeneerError::tree_data(format!("expected an object, got {value}")));
        };
        if map.contains_key(TERMINAL_KEY) {
            let cells = map
                .iter()
                .filter(|(key, _)| key.as_str() != TERMINAL_KEY)
                .map(|(key, value)| Ok((key.clone(), CellValue::try_from(value)?)))
                .collect::<Result<IndexMap<_, _>>>()?;
            Ok(Self::Terminal(cells))
        } else {
            Ok(Self::Branch(tree_from_json(value)?))
        }
    }
}

/// Decode a JSON object into a [`Tree`].
pub fn tree_from_json(value: &Value) -> Result<Tree> {
    let Value::Object(map) = value else {
        return Err(VeneerError::tree_data(format!("expected an object, got {value}")));
    };
    map.iter()
        .map(|(key, node)| Ok((key.clone(), TreeNode::try_from(node)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compare_text_ignores_case() {
        let a = CellValue::from("apple");
        let b = CellValue::from("Banana");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(CellValue::from("X").compare(&CellValue::from("x")), Ordering::Equal);
    }

    #[test]
    fn test_compare_numbers_and_mixed() {
        assert_eq!(CellValue::Int(2).compare(&CellValue::Float(1.5)), Ordering::Greater);
        assert_eq!(CellValue::Int(10).compare(&CellValue::Int(9)), Ordering::Greater);
        assert_eq!(CellValue::Bool(true).compare(&CellValue::Int(0)), Ordering::Less);
        assert_eq!(CellValue::from("1").compare(&CellValue::Int(5)), Ordering::Greater);
    }

    #[test]
    fn test_from_json() {
        let tree = tree_from_json(&json!({
            "g1": {
                "x": { "__terminal__": true, "Name": "x", "Value": "1" },
                "sub": {
                    "y": { "__terminal__": true, "Name": "y", "Value": 2.5 },
                },
            },
        }))
        .unwrap();

        let TreeNode::Branch(g1) = &tree["g1"] else {
            panic!("g1 should be a branch");
        };
        assert_eq!(
            g1["x"],
            TreeNode::terminal([("Name", "x"), ("Value", "1")])
        );
        let TreeNode::Branch(sub) = &g1["sub"] else {
            panic!("sub should be a branch");
        };
        let TreeNode::Terminal(y) = &sub["y"] else {
            panic!("y should be a terminal");
        };
        assert_eq!(y["Value"], CellValue::Float(2.5));
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert!(matches!(tree_from_json(&json!([1, 2])), Err(VeneerError::TreeData(_))));
        assert!(tree_from_json(&json!({ "g": 5 })).is_err());
        assert!(tree_from_json(&json!({ "g": { "__terminal__": 1, "Name": null } })).is_err());
    }
}
