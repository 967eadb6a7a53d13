use serde_json::Value;
use std::io::{self, Write};

/// Pretty-printed JSON report on stdout.
pub fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    write_json(stdout.lock(), value)
}

pub fn write_json<W: Write>(mut out: W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_stays_textual() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({"payment": "1347.13"})).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\n  \"payment\": \"1347.13\"\n}\n");
    }
}
