//! Table sort controller
//!
//! Tables marked with the sortable class get a click listener on each
//! header that names a 1-based column. A click re-orders the table's body
//! rows ascending by that column's cell text, compared with locale-aware
//! (Japanese by default) collation. There is no direction toggle and no
//! remembered sort state.

pub mod collation;
pub mod controller;
pub mod error;
pub mod sort;
pub mod types;

pub use collation::{KeyComparator, LocaleCollator};
pub use controller::TableSortController;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use sort::{RowSnapshot, TableSnapshot, TableSorter};
pub use types::{ColumnIndex, SortRequest};
