pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod tracker;

use crate::OutputFormat;
use serde_json::Value;

/// Keys that hold the row data of a report, in lookup order.
const ROW_KEYS: [&str; 3] = ["rows", "scenarios", "results"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => return json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Tracker => return tracker::print_tracker(value),
    }
    Ok(())
}

/// The first array of row objects in a report, if any.
fn row_array(map: &serde_json::Map<String, Value>) -> Option<&Vec<Value>> {
    ROW_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
}
