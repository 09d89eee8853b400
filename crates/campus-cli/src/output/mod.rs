use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let options = table::TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
            };
            Ok(render_table(&serde_json::to_value(value)?, options))
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table(value: &Value, options: table::TableOptions) -> String {
    match value {
        Value::Array(items) => render_array(items, options),
        Value::Object(map) => {
            let mut rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), to_cell(value)])
                .collect();
            rows.sort();
            table::render_rows(&["field", "value"], &rows, options)
        }
        scalar => table::render_rows(&["value"], &[vec![to_cell(scalar)]], options),
    }
}

/// Arrays of objects become one row per item with the sorted union of keys as columns.
fn render_array(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![to_cell(item)]).collect();
        return table::render_rows(&["value"], &rows, options);
    }

    let mut headers: Vec<&str> = items
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|map| map.keys().map(String::as_str))
        .collect();
    headers.sort_unstable();
    headers.dedup();

    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), to_cell))
                .collect()
        })
        .collect();

    table::render_rows(&headers, &rows, options)
}

/// Nested objects (sellers, authors, rosters) are flattened to compact JSON.
fn to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
