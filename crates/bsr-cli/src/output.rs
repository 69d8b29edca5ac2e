use bsr_core::speckit::{ValidationIssue, ValidationResult};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{cell:w$}")
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!(
        "{}",
        render(headers.iter().map(|h| h.to_string()).collect())
    );
    println!(
        "{}",
        render(widths.iter().map(|&w| "-".repeat(w)).collect())
    );
    for row in rows {
        println!("{}", render(row));
    }
}

/// Human-readable rendering of a validation result: an issue table, then
/// the score and verdict.
pub fn print_validation(result: &ValidationResult) {
    let issues: Vec<&ValidationIssue> = result.errors.iter().chain(&result.warnings).collect();
    if issues.is_empty() {
        println!("No issues found.");
    } else {
        let rows = issues
            .iter()
            .map(|i| {
                vec![
                    i.severity.to_string(),
                    i.field.clone(),
                    i.message.clone(),
                    i.suggestion.clone().unwrap_or_default(),
                ]
            })
            .collect();
        print_table(&["SEVERITY", "FIELD", "MESSAGE", "SUGGESTION"], rows);
    }
    println!();
    println!("Score: {}/100", result.score);
    println!("{}", if result.valid { "Valid" } else { "Invalid" });
}
