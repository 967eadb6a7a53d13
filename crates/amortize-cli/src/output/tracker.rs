//! Payment tracker CSV.
//!
//! One line per scheduled payment plus blank columns for the borrower to fill
//! in, followed by a summary block whose cells are spreadsheet formulas kept
//! as literal text. Column letters in the formulas: B = payment number,
//! C = due date, J = "Payment Complete".

use serde_json::Value;
use std::io::{self, Write};

const HEADER: [&str; 12] = [
    "Done",
    "Payment #",
    "Due Date",
    "Payment Amount",
    "Principal",
    "Interest",
    "Remaining Balance",
    "Total Interest",
    "Progress (%)",
    "Payment Complete",
    "Date Paid",
    "Notes",
];

const INSTRUCTIONS: [&str; 3] = [
    "1. Mark \"Yes\" in the Payment Complete column to track payments",
    "2. Enter the payment date when completed",
    "3. Use the Notes column for any payment references",
];

/// Write a schedule report as a payment tracker to stdout.
pub fn print_tracker(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    write_tracker(stdout.lock(), value)
}

pub fn write_tracker<W: Write>(mut out: W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let rows = value
        .get("rows")
        .and_then(Value::as_array)
        .filter(|rows| !rows.is_empty())
        .ok_or("tracker output needs a non-empty schedule (use the schedule command)")?;

    let mut records: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    records.push(HEADER.iter().map(|h| h.to_string()).collect());
    for row in rows {
        records.push(vec![
            String::new(),
            text(row, "period")?,
            text(row, "due_date")?,
            money(row, "payment")?,
            money(row, "principal")?,
            money(row, "interest")?,
            money(row, "remaining_balance")?,
            money(row, "total_interest_paid")?,
            percent(row, "loan_paid_pct")?,
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    write_block(&mut out, &records)?;

    // Header occupies spreadsheet row 1.
    let end = rows.len() + 1;
    let done = format!("COUNTIF(J2:J{end},\"Yes\")");

    out.write_all(b"\n")?;
    write_block(
        &mut out,
        &[
            vec!["Payment Summary".to_string()],
            vec![
                "Total Payments:".to_string(),
                format!("=COUNTIF(J2:J{end}, \"Yes\")"),
            ],
            vec![
                "Progress:".to_string(),
                format!("=ROUND(COUNTIF(J2:J{end}, \"Yes\")/COUNTA(B2:B{end})*100,1)&\"%\""),
            ],
            vec![
                "Next Due:".to_string(),
                format!("=IF({done}>=COUNTA(B2:B{end}),\"Complete!\",INDEX(C2:C{end},{done}+1))"),
            ],
        ],
    )?;

    out.write_all(b"\n")?;
    let instructions: Vec<Vec<String>> = std::iter::once("Instructions:")
        .chain(INSTRUCTIONS)
        .map(|line| vec![line.to_string()])
        .collect();
    write_block(&mut out, &instructions)?;

    out.flush()?;
    Ok(())
}

/// Write records of varying width; the writer is dropped so `out` can take
/// a bare newline next.
fn write_block<W: Write>(out: &mut W, records: &[Vec<String>]) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn field<'a>(row: &'a Value, key: &str) -> Result<&'a Value, Box<dyn std::error::Error>> {
    row.get(key)
        .ok_or_else(|| format!("schedule row is missing '{key}'").into())
}

fn text(row: &Value, key: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match field(row, key)? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn fixed(row: &Value, key: &str, dp: u32) -> Result<String, Box<dyn std::error::Error>> {
    let raw = text(row, key)?;
    let amount: rust_decimal::Decimal = raw
        .parse()
        .map_err(|e| format!("'{key}' is not a decimal ({raw}): {e}"))?;
    let mut rounded = amount.round_dp(dp);
    rounded.rescale(dp);
    Ok(rounded.to_string())
}

fn money(row: &Value, key: &str) -> Result<String, Box<dyn std::error::Error>> {
    fixed(row, key, 2)
}

fn percent(row: &Value, key: &str) -> Result<String, Box<dyn std::error::Error>> {
    fixed(row, key, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_tracker(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn report() -> Value {
        json!({
            "frequency": "monthly",
            "rows": [
                {
                    "due_date": "2025-01-15", "period": 1, "payment": "1347.13",
                    "principal": "472.13", "interest": "875.00",
                    "remaining_balance": "299527.87", "total_interest_paid": "875.00",
                    "annual_interest": "875.00", "loan_paid_pct": "0.2", "year": 1
                },
                {
                    "due_date": "2025-02-15", "period": 2, "payment": "1347.13",
                    "principal": "473.51", "interest": "873.62",
                    "remaining_balance": "299054.36", "total_interest_paid": "1748.62",
                    "annual_interest": "1748.62", "loan_paid_pct": "0.3", "year": 1
                }
            ]
        })
    }

    #[test]
    fn test_rows_and_formulas() {
        let csv = render(&report());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Done,Payment #,Due Date,Payment Amount,Principal,Interest,Remaining Balance,\
             Total Interest,Progress (%),Payment Complete,Date Paid,Notes"
        );
        assert_eq!(
            lines[1],
            ",1,2025-01-15,1347.13,472.13,875.00,299527.87,875.00,0.2,,,"
        );
        assert!(csv.contains("Total Payments:,\"=COUNTIF(J2:J3, \"\"Yes\"\")\""));
        assert!(csv.contains("COUNTA(B2:B3)"));
        assert!(csv.contains("INDEX(C2:C3,COUNTIF(J2:J3,\"\"Yes\"\")+1)"));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Payment Summary");
        assert!(csv.ends_with("3. Use the Notes column for any payment references\n"));
    }

    #[test]
    fn test_amounts_padded_to_cents() {
        let value = json!({"rows": [{
            "due_date": "2025-01-01", "period": 120, "payment": "833.7",
            "principal": "833.7", "interest": "0", "remaining_balance": "0",
            "total_interest_paid": "0", "loan_paid_pct": "100"
        }]});
        let csv = render(&value);
        assert!(csv.contains(",120,2025-01-01,833.70,833.70,0.00,0.00,0.00,100.0,,,"));
    }

    #[test]
    fn test_non_schedule_rejected() {
        let mut buf = Vec::new();
        let err = write_tracker(&mut buf, &json!({"payment": "1.00"})).unwrap_err();
        assert!(err.to_string().contains("schedule"));
    }
}
