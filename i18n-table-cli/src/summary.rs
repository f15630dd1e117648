use std::fmt::Write;

use i18n_table::ConversionReport;

/// Human-readable summary of a conversion run.
pub fn render_summary(report: &ConversionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Summary ===");
    let _ = writeln!(out, "Languages: {}", report.languages.join(", "));
    let _ = writeln!(out, "Records: {}", report.records);

    if let Some(fill) = &report.fill {
        let _ = writeln!(
            out,
            "Translated: {} (failed: {}, no reference value: {})",
            fill.translated, fill.failed, fill.skipped_no_reference
        );
    }

    let _ = writeln!(out, "Written: {}", report.written.len());
    for path in &report.written {
        let _ = writeln!(out, "  {}", path.display());
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "Failed: {}", report.failures.len());
        for failure in &report.failures {
            let _ = writeln!(out, "  {}: {}", failure.path.display(), failure.message);
        }
    }
    out
}

pub fn print_summary(report: &ConversionReport, json_output: bool) {
    if json_output {
        match serde_json::to_string_pretty(report) {
            Ok(body) => println!("{}", body),
            Err(e) => eprintln!("Error: cannot serialize summary: {}", e),
        }
        return;
    }
    print!("{}", render_summary(report));
}
