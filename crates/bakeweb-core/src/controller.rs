//! Binding sort behavior to table headers

use std::rc::Rc;

use bakeweb_config::{Config, MarkupConfig};
use bakeweb_dom::{Document, NodeId};

use crate::collation::LocaleCollator;
use crate::error::CoreResult;
use crate::sort::TableSorter;
use crate::types::{ColumnIndex, SortRequest};

/// Makes sortable tables respond to header clicks
#[derive(Debug)]
pub struct TableSortController {
    markup: MarkupConfig,
    sorter: Rc<TableSorter<LocaleCollator>>,
}

impl TableSortController {
    pub fn new(markup: MarkupConfig, collator: LocaleCollator) -> Self {
        Self {
            markup,
            sorter: Rc::new(TableSorter::new(collator)),
        }
    }

    /// Build from the markup and collation sections of the config
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let collator = LocaleCollator::new(&config.collation.locale)?;
        Ok(Self::new(config.markup.clone(), collator))
    }

    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    /// Tables carrying the sortable class, in document order
    pub fn sortable_tables(&self, doc: &Document) -> Vec<NodeId> {
        doc.elements_by_class(doc.root(), &self.markup.sortable_class)
            .into_iter()
            .filter(|id| doc.is_element_named(*id, "table"))
            .collect()
    }

    /// Header cells of `table` that declare a usable column identifier
    ///
    /// Headers whose attribute is not a positive integer are skipped.
    pub fn sort_headers(&self, doc: &Document, table: NodeId) -> Vec<(NodeId, ColumnIndex)> {
        let mut headers = Vec::new();
        for header in doc.elements_by_tag(table, &self.markup.header_tag) {
            let value = match doc
                .element(header)
                .and_then(|e| e.attr(&self.markup.column_attribute))
            {
                Some(value) => value,
                None => continue,
            };
            match value.parse::<ColumnIndex>() {
                Ok(column) => headers.push((header, column)),
                Err(e) => e.report(&format!("bind header {} of table {}", header, table)),
            }
        }
        headers
    }

    /// Attach a click listener to every sort header of every sortable table
    ///
    /// Returns the number of listeners attached. Calling this twice on the
    /// same document binds every header twice.
    pub fn init(&self, doc: &mut Document) -> CoreResult<usize> {
        let mut bound = 0;
        for table in self.sortable_tables(doc) {
            for (header, column) in self.sort_headers(doc, table) {
                let sorter = Rc::clone(&self.sorter);
                let request = SortRequest::new(table, column);
                doc.add_click_listener(header, move |doc, _event| {
                    sorter.sort(doc, &request)?;
                    Ok(())
                })?;
                bound += 1;
            }
        }

        log::debug!(
            "bound {} sort header(s) for tables marked .{}",
            bound,
            self.markup.sortable_class
        );
        Ok(bound)
    }

    /// Sort one table directly, without going through a click
    pub fn sort(&self, doc: &mut Document, request: &SortRequest) -> CoreResult<usize> {
        self.sorter.sort(doc, request)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::sort::sort_key;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<table class="table sortable" id="ingredients">
  <thead>
    <tr><th data-sort="1">材料名</th><th data-sort="2"><span>単価</span></th><th>操作</th></tr>
  </thead>
  <tbody>
    <tr><td>砂糖</td><td>300</td><td>編集</td></tr>
    <tr><td>いちご</td><td>1200</td><td>編集</td></tr>
    <tr><td>バター</td><td>800</td><td>編集</td></tr>
  </tbody>
</table>
<table id="plain"><tbody><tr><th data-sort="1">x</th></tr></tbody></table>
</body></html>"#;

    fn controller() -> TableSortController {
        TableSortController::from_config(&Config::default()).unwrap()
    }

    fn table_by_id(doc: &Document, id: &str) -> NodeId {
        doc.elements_by_tag(doc.root(), "table")
            .into_iter()
            .find(|t| doc.element(*t).and_then(|e| e.attr("id")) == Some(id))
            .unwrap()
    }

    fn column_keys(doc: &Document, table: NodeId, column: usize) -> Vec<String> {
        let body = doc.first_child_by_tag(table, "tbody").unwrap();
        doc.element_children(body)
            .into_iter()
            .map(|row| sort_key(doc, row, ColumnIndex::new(column).unwrap()))
            .collect()
    }

    #[test]
    fn test_sortable_tables() {
        let doc = Document::parse_html(PAGE);
        let tables = controller().sortable_tables(&doc);
        assert_eq!(tables, vec![table_by_id(&doc, "ingredients")]);
    }

    #[test]
    fn test_init_binds_declared_headers_only() {
        let mut doc = Document::parse_html(PAGE);
        let controller = controller();
        assert_eq!(controller.init(&mut doc).unwrap(), 2);

        let headers = doc.elements_by_tag(doc.root(), "th");
        let counts: Vec<usize> = headers.iter().map(|h| doc.listener_count(*h)).collect();
        assert_eq!(counts, vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_init_twice_double_binds() {
        let mut doc = Document::parse_html(PAGE);
        let controller = controller();
        controller.init(&mut doc).unwrap();
        controller.init(&mut doc).unwrap();

        let first = doc.elements_by_tag(doc.root(), "th")[0];
        assert_eq!(doc.listener_count(first), 2);
        assert_eq!(doc.click(first).unwrap().invoked, 2);
    }

    #[test]
    fn test_init_without_sortable_tables_is_noop() {
        let mut doc = Document::parse_html("<p>no tables here</p>");
        assert_eq!(controller().init(&mut doc).unwrap(), 0);
    }

    #[test]
    fn test_click_sorts_by_header_column() {
        let mut doc = Document::parse_html(PAGE);
        controller().init(&mut doc).unwrap();
        let table = table_by_id(&doc, "ingredients");
        let name_header = doc.elements_by_tag(table, "th")[0];

        let outcome = doc.click(name_header).unwrap();
        assert!(outcome.is_ok());
        assert_eq!(column_keys(&doc, table, 1), vec!["いちご", "バター", "砂糖"]);
    }

    #[test]
    fn test_click_on_nested_span_sorts_as_text() {
        let mut doc = Document::parse_html(PAGE);
        controller().init(&mut doc).unwrap();
        let table = table_by_id(&doc, "ingredients");
        let span = doc.elements_by_tag(table, "span")[0];

        doc.click(span).unwrap();
        // String comparison, not numeric
        assert_eq!(column_keys(&doc, table, 2), vec!["1200", "300", "800"]);
    }

    #[test]
    fn test_same_header_twice_has_no_toggle() {
        let mut doc = Document::parse_html(PAGE);
        controller().init(&mut doc).unwrap();
        let table = table_by_id(&doc, "ingredients");
        let name_header = doc.elements_by_tag(table, "th")[0];

        doc.click(name_header).unwrap();
        let first = column_keys(&doc, table, 1);
        doc.click(name_header).unwrap();
        assert_eq!(column_keys(&doc, table, 1), first);
    }

    #[test]
    fn test_click_on_table_without_rows_reports_error() {
        let mut doc = Document::parse_html(
            "<table class=\"sortable\"><thead><tr><th data-sort=\"1\">名前</th></tr></thead></table>",
        );
        controller().init(&mut doc).unwrap();
        let header = doc.elements_by_tag(doc.root(), "th")[0];
        let before = doc.to_html();

        let outcome = doc.click(header).unwrap();
        assert_eq!(outcome.errors.len(), 1);
        let error = outcome.errors[0].downcast_ref::<CoreError>().unwrap();
        assert!(matches!(error, CoreError::MalformedTable { .. }));
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_invalid_headers_are_skipped() {
        let doc = Document::parse_html(
            "<table class=\"sortable\"><thead><tr>\
             <th data-sort=\"0\">a</th><th data-sort=\"abc\">b</th><th data-sort=\" 3 \">c</th>\
             </tr></thead><tbody></tbody></table>",
        );
        let controller = controller();
        let table = controller.sortable_tables(&doc)[0];
        let headers = controller.sort_headers(&doc, table);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].1.get(), 3);
    }

    #[test]
    fn test_custom_markup_markers() {
        let mut config = Config::default();
        config.markup.sortable_class = "sort-me".to_string();
        config.markup.column_attribute = "data-col".to_string();
        let controller = TableSortController::from_config(&config).unwrap();

        let mut doc = Document::parse_html(
            "<table class=\"sort-me\"><thead><tr><th data-col=\"1\">品名</th></tr></thead>\
             <tbody><tr><td>ぶどう</td></tr><tr><td>いちご</td></tr></tbody></table>",
        );
        assert_eq!(controller.init(&mut doc).unwrap(), 1);
        let header = doc.elements_by_tag(doc.root(), "th")[0];
        doc.click(header).unwrap();

        let table = controller.sortable_tables(&doc)[0];
        assert_eq!(column_keys(&doc, table, 1), vec!["いちご", "ぶどう"]);
    }

    #[test]
    fn test_direct_sort() {
        let mut doc = Document::parse_html(PAGE);
        let controller = controller();
        let table = table_by_id(&doc, "ingredients");
        let column = ColumnIndex::new(1).unwrap();

        assert_eq!(controller.sort(&mut doc, &SortRequest::new(table, column)).unwrap(), 3);
        assert_eq!(controller.markup().header_tag, "th");
    }
}
