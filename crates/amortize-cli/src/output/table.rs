use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::row_array;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            // Check if "result" key holds the primary data
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_report(map);
            }
        }
        Value::Array(arr) => {
            println!("{}", array_table(arr));
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        print_report(res_map);
    } else {
        println!("{}", field_table(envelope));
    }

    // Print warnings if any
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Scalar fields first, then one titled section per nested object or row list.
fn print_report(map: &Map<String, Value>) {
    let scalars: Map<String, Value> = map
        .iter()
        .filter(|(_, v)| !v.is_object() && !is_row_list(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !scalars.is_empty() {
        println!("{}", field_table(&scalars));
    }

    for (key, val) in map {
        match val {
            Value::Object(nested) => {
                println!("\n{}", title(key));
                match row_array(nested) {
                    Some(rows) => println!("{}", array_table(rows)),
                    None => println!("{}", field_table(nested)),
                }
            }
            Value::Array(rows) if is_row_list(val) => {
                println!("\n{}", title(key));
                println!("{}", array_table(rows));
            }
            _ => {}
        }
    }
}

fn is_row_list(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if arr.first().is_some_and(Value::is_object))
}

fn title(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    Table::from(builder)
}

fn array_table(arr: &[Value]) -> String {
    if arr.is_empty() {
        return "(empty)".to_string();
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        Table::from(builder).to_string()
    } else {
        // Simple array of values
        arr.iter().map(format_value).collect::<Vec<_>>().join("\n")
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_case() {
        assert_eq!(title("scenarios"), "Scenarios");
        assert_eq!(title("loan_summary"), "Loan summary");
    }

    #[test]
    fn test_array_table_has_headers() {
        let rendered = array_table(&[json!({"period": 1, "payment": "10.00"})]);
        assert!(rendered.contains("period"));
        assert!(rendered.contains("10.00"));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(array_table(&[]), "(empty)");
    }
}
