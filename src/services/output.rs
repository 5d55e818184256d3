use crate::domain::models::{AuditReport, JsonOut};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    text: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        print!("{}", text(&data));
    }
    Ok(())
}

pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();

    if !report.skipped.is_empty() {
        out.push_str("Skipped projects:\n");
        for s in &report.skipped {
            out.push_str(&format!(
                "  {} (excluded by '{}')\n",
                s.project.full_path, s.prefix
            ));
        }
        out.push('\n');
    }

    let s = &report.summary;
    out.push_str("Summary:\n");
    out.push_str(&format!("  Total: {}\n", s.total));
    out.push_str(&format!("  Correct: {}\n", s.correct));
    out.push_str(&format!("  Incorrect: {}\n", s.incorrect));
    out.push_str(&format!("  Skipped: {}\n", s.skipped));

    if !report.correct.is_empty() {
        out.push_str("\nCorrect projects:\n");
        for p in &report.correct {
            out.push_str(&format!("  {}\n", p.full_path));
        }
    }

    if !report.incorrect.is_empty() {
        out.push_str("\nIncorrect projects:\n");
        for p in &report.incorrect {
            out.push_str(&format!("  {}\n", p.project.full_path));
            for m in &p.mismatches {
                out.push_str(&format!("    {}\n", m));
            }
        }
    }

    out
}
