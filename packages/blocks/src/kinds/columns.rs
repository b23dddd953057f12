use super::{escape_attr, object, padding, style_attr};
use crate::{
    format_number, value_text, BlockData, BlockKind, EditorField, FieldInput, FieldPath, Linkage,
    RenderContext, Slot, Template,
};
use serde_json::{json, Value};

const DEFAULT_GAP: f64 = 16.0;

/// Multi-column layout rendered as a single table row.
pub struct ColumnsBlock;

impl ColumnsBlock {
    /// Horizontal `(left, right)` padding for a column.
    ///
    /// The gap is split asymmetrically: the first column pads only its trailing
    /// edge, the last only its leading edge, interior columns both, each by half
    /// the gap. A lone column has no padding.
    pub fn column_padding(index: usize, columns: usize, gap: f64) -> (f64, f64) {
        let half = gap / 2.0;
        if columns <= 1 {
            (0.0, 0.0)
        } else if index == 0 {
            (0.0, half)
        } else if index == columns - 1 {
            (half, 0.0)
        } else {
            (half, half)
        }
    }

    /// Width of every column: explicit `props.columnWidths` entries where given,
    /// equal shares otherwise.
    pub fn column_widths(data: &BlockData) -> Vec<String> {
        let columns = data.column_count();
        let equal = format!("{}%", format_number(100.0 / columns as f64));
        let explicit = data.prop("columnWidths").and_then(Value::as_array);

        (0..columns)
            .map(|i| {
                explicit
                    .and_then(|widths| widths.get(i))
                    .and_then(value_text)
                    .filter(|w| !w.is_empty())
                    .unwrap_or_else(|| equal.clone())
            })
            .collect()
    }
}

impl BlockKind for ColumnsBlock {
    fn name(&self) -> &'static str {
        "Columns"
    }

    fn linkage(&self) -> Linkage {
        Linkage::Columns
    }

    fn default_data(&self) -> BlockData {
        let columns = 2;
        let mut data = BlockData::new(
            object(json!({ "padding": padding(16, 0, 16, 0) })),
            object(json!({
                "columns": columns,
                "columnWidths": BlockData::equal_column_widths(columns),
                "gap": 16
            })),
        );
        data.column_children_ids = Some(vec![Vec::new(); columns]);
        data
    }

    fn render(&self, data: &BlockData, ctx: &RenderContext<'_>) -> Template {
        let columns = data.column_count();
        let gap = data.prop_f64("gap").unwrap_or(DEFAULT_GAP);
        let widths = Self::column_widths(data);

        let mut template = Template::markup(format!(
            "<div class=\"block-columns\" style=\"{}\"><table style=\"width: 100%; border-collapse: collapse;\"><tr>",
            style_attr(data)
        ));

        for (index, width) in widths.iter().enumerate() {
            let (left, right) = Self::column_padding(index, columns, gap);
            template.push_str(&format!(
                "<td style=\"width: {}; padding: 0 {}px 0 {}px; vertical-align: top;\">",
                escape_attr(width),
                format_number(right),
                format_number(left)
            ));
            if ctx.is_editable() {
                let id = escape_attr(ctx.block_id);
                template.push_str(&format!(
                    "<div class=\"column-children\" data-column-id=\"{id}-col-{index}\" data-column-index=\"{index}\" data-columns-block-id=\"{id}\">"
                ));
            } else {
                template.push_str("<div class=\"column-children\">");
            }
            template.push_slot(Slot::Column(index));
            template.push_str("</div></td>");
        }

        template.push_str("</tr></table></div>");
        template
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        vec![
            EditorField::new(
                FieldPath::props("columns"),
                "Number of columns",
                FieldInput::Select(vec![
                    ("2".into(), "2".into()),
                    ("3".into(), "3".into()),
                ]),
            ),
            EditorField::new(
                FieldPath::props("gap"),
                "Gap between columns (px)",
                FieldInput::Number,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_distribution() {
        assert_eq!(ColumnsBlock::column_padding(0, 1, 16.0), (0.0, 0.0));
        assert_eq!(ColumnsBlock::column_padding(0, 3, 16.0), (0.0, 8.0));
        assert_eq!(ColumnsBlock::column_padding(1, 3, 16.0), (8.0, 8.0));
        assert_eq!(ColumnsBlock::column_padding(2, 3, 16.0), (8.0, 0.0));
    }

    #[test]
    fn test_explicit_widths_fall_back_per_column() {
        let mut data = ColumnsBlock.default_data();
        data.props.insert("columns".into(), json!(3));
        data.props.insert("columnWidths".into(), json!(["50%", null]));

        let widths = ColumnsBlock::column_widths(&data);
        assert_eq!(widths[0], "50%");
        assert_eq!(widths[1], "33.333333333333336%");
        assert_eq!(widths[2], "33.333333333333336%");
    }
}
