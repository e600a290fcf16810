//! Column identifiers and sort requests

use std::num::NonZeroUsize;

use bakeweb_dom::NodeId;

use crate::error::CoreError;

/// 1-based column identifier, as written in header markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIndex(NonZeroUsize);

impl ColumnIndex {
    /// Returns None for 0
    pub fn new(column: usize) -> Option<Self> {
        NonZeroUsize::new(column).map(ColumnIndex)
    }

    /// The 1-based value
    pub fn get(&self) -> usize {
        self.0.get()
    }

    /// Zero-based cell position within a row
    pub fn position(&self) -> usize {
        self.0.get() - 1
    }
}

impl std::str::FromStr for ColumnIndex {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(ColumnIndex::new)
            .ok_or_else(|| CoreError::InvalidColumn { value: s.to_string() })
    }
}

impl std::fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which table to sort and by which column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRequest {
    pub table: NodeId,
    pub column: ColumnIndex,
}

impl SortRequest {
    pub fn new(table: NodeId, column: ColumnIndex) -> Self {
        Self { table, column }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_parse() {
        let column: ColumnIndex = "3".parse().unwrap();
        assert_eq!(column.get(), 3);
        assert_eq!(column.position(), 2);

        let column: ColumnIndex = " 1 ".parse().unwrap();
        assert_eq!(column.position(), 0);
        assert_eq!(column.to_string(), "1");
    }

    #[test]
    fn test_column_index_rejects_invalid() {
        for value in ["0", "-1", "", "abc", "1.5", "２"] {
            let err = value.parse::<ColumnIndex>().unwrap_err();
            assert!(matches!(err, CoreError::InvalidColumn { .. }), "{value}");
        }
        assert!(ColumnIndex::new(0).is_none());
    }
}
