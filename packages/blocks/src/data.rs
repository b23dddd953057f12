//! Block data: style and prop maps plus the two child-linkage fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Number of columns a multi-column block gets when `props.columns` is absent.
const DEFAULT_COLUMNS: usize = 2;

/// Upper bound on columns in one multi-column block. Larger stored or requested
/// counts are clamped to it.
pub const MAX_COLUMNS: usize = 12;

/// The `data` part of a block record.
///
/// A block uses at most one of the two linkage fields, chosen by its kind.
/// Keys the builder doesn't know about are kept in `extra` so documents written
/// by older builders survive a round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockData {
    #[serde(default)]
    pub style: Map<String, Value>,

    #[serde(default)]
    pub props: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_ids: Option<Vec<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_columns"
    )]
    pub column_children_ids: Option<Vec<Vec<String>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column lists written by sparse array assignment contain `null` holes.
fn deserialize_columns<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<Vec<String>>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|columns| columns.into_iter().map(Option::unwrap_or_default).collect()))
}

impl BlockData {
    pub fn new(style: Map<String, Value>, props: Map<String, Value>) -> Self {
        Self {
            style,
            props,
            ..Default::default()
        }
    }

    /// Non-null prop value
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key).filter(|v| !v.is_null())
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.prop(key).and_then(Value::as_str)
    }

    pub fn prop_f64(&self, key: &str) -> Option<f64> {
        self.prop(key).and_then(value_as_f64)
    }

    /// Prop rendered as text, numbers formatted the way CSS expects them.
    pub fn prop_text(&self, key: &str) -> Option<String> {
        self.prop(key).and_then(value_text)
    }

    pub fn style_value(&self, key: &str) -> Option<&Value> {
        self.style.get(key).filter(|v| !v.is_null())
    }

    pub fn style_text(&self, key: &str) -> Option<String> {
        self.style_value(key).and_then(value_text)
    }

    /// Effective column count: `props.columns` (number or numeric string),
    /// defaulting to 2, kept within `1..=MAX_COLUMNS`.
    pub fn column_count(&self) -> usize {
        Self::column_count_from(self.prop("columns"))
    }

    /// Column count a raw `columns` value stands for, on the same terms as
    /// [`BlockData::column_count`].
    pub fn column_count_from(value: Option<&Value>) -> usize {
        match value.and_then(value_as_f64) {
            Some(n) if n >= MAX_COLUMNS as f64 => MAX_COLUMNS,
            Some(n) if n >= 1.0 => n.trunc() as usize,
            Some(_) => 1,
            None => DEFAULT_COLUMNS,
        }
    }

    /// Equal-share width for every column, e.g. `50%` for two columns.
    pub fn equal_column_widths(count: usize) -> Vec<Value> {
        let count = count.clamp(1, MAX_COLUMNS);
        let share = format!("{}%", format_number(100.0 / count as f64));
        vec![Value::String(share); count]
    }

    /// Replace `style` and/or `props` wholesale with the caller's overrides.
    pub fn apply_overrides(&mut self, overrides: &DataOverrides) {
        if let Some(style) = &overrides.style {
            self.style = style.clone();
        }
        if let Some(props) = &overrides.props {
            self.props = props.clone();
        }
    }

    /// Every id referenced by either linkage field, in slot order.
    pub fn linked_ids(&self) -> impl Iterator<Item = &String> {
        let children = self.children_ids.iter().flatten();
        let columns = self.column_children_ids.iter().flatten().flatten();
        children.chain(columns)
    }
}

/// Caller-supplied data merged over a kind's defaults when a block is added.
///
/// Matching top-level keys replace the default wholesale; there is no deep merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Map<String, Value>>,
}

impl DataOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: Map<String, Value>) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_props(mut self, props: Map<String, Value>) -> Self {
        self.props = Some(props);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.props.is_none()
    }
}

/// Read a number from a JSON number or a numeric string (`"3"`, `" 12.5 "`).
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Scalar value as text; objects, arrays and null have no text form.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(format_number),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Shortest round-trip form: `8` rather than `8.0`, `33.333333333333336` for a third.
pub fn format_number(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
