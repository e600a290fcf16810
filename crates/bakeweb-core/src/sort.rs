//! Sorting one table: snapshot, order, apply
//!
//! The rows and their keys are read once into a [`TableSnapshot`], ordered
//! by a pure function over that snapshot, and the resulting order is written
//! back by re-appending each row to its body. Rows are only moved, never
//! cloned or edited, and nothing about the sort is remembered afterwards.

use bakeweb_dom::{Document, NodeId};

use crate::collation::KeyComparator;
use crate::error::{CoreError, CoreResult};
use crate::types::{ColumnIndex, SortRequest};

/// One body row and its sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub row: NodeId,
    pub key: String,
}

/// Body rows of a table as they were before sorting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub body: NodeId,
    pub rows: Vec<RowSnapshot>,
}

impl TableSnapshot {
    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }
}

/// Read the body rows of `table` and the key of each at `column`
///
/// Fails when `table` is not a table or has no `tbody` child. A row without
/// a cell at `column` gets an empty key.
pub fn snapshot(doc: &Document, table: NodeId, column: ColumnIndex) -> CoreResult<TableSnapshot> {
    if !doc.is_element_named(table, "table") {
        return Err(CoreError::NotATable { node: table });
    }
    let body = doc
        .first_child_by_tag(table, "tbody")
        .ok_or(CoreError::MalformedTable { table })?;

    let rows = doc
        .element_children(body)
        .into_iter()
        .filter(|row| doc.is_element_named(*row, "tr"))
        .map(|row| RowSnapshot {
            row,
            key: sort_key(doc, row, column),
        })
        .collect();

    Ok(TableSnapshot { body, rows })
}

/// Trimmed text of the cell at `column`, or "" when the row is too short
pub fn sort_key(doc: &Document, row: NodeId, column: ColumnIndex) -> String {
    match doc.element_children(row).get(column.position()) {
        Some(cell) => doc.text_content(*cell).trim().to_string(),
        None => {
            log::trace!("row {} has no cell at column {}", row, column);
            String::new()
        }
    }
}

/// Ascending order of the snapshot's rows under `comparator`
pub fn order(snapshot: &TableSnapshot, comparator: &dyn KeyComparator) -> Vec<NodeId> {
    let mut rows: Vec<&RowSnapshot> = snapshot.rows.iter().collect();
    rows.sort_by(|a, b| comparator.compare(&a.key, &b.key));
    rows.into_iter().map(|r| r.row).collect()
}

/// Re-append rows to `body` in the given order
pub fn apply(doc: &mut Document, body: NodeId, order: &[NodeId]) -> CoreResult<()> {
    for row in order {
        doc.append_child(body, *row)?;
    }
    Ok(())
}

/// Sorts tables with one comparator
#[derive(Debug)]
pub struct TableSorter<C> {
    comparator: C,
}

impl<C: KeyComparator> TableSorter<C> {
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Sort the body rows of a table ascending by one column
    ///
    /// Returns the number of rows reordered.
    pub fn sort(&self, doc: &mut Document, request: &SortRequest) -> CoreResult<usize> {
        let snapshot = snapshot(doc, request.table, request.column)?;
        let ordered = order(&snapshot, &self.comparator);
        apply(doc, snapshot.body, &ordered)?;

        log::debug!(
            "sorted {} row(s) of table {} by column {} ({})",
            ordered.len(),
            request.table,
            request.column,
            self.comparator.locale()
        );
        Ok(ordered.len())
    }
}

// ==================== Tests ====================
