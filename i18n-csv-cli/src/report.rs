//! Human-readable output for command results.

use i18n_csv::{Diagnostic, GenerateReport, TableSummary, ValidationReport, ValidationResult};
use serde_json::json;

fn print_diagnostic(diagnostic: &Diagnostic) {
    println!("  {}", diagnostic);
    if diagnostic.is_file_level() {
        return;
    }
    if let Some(value) = diagnostic.value.as_deref().filter(|v| !v.is_empty()) {
        println!("    Value: \"{}\"", value);
    }
}

/// Prints errors then warnings, followed by a one-line verdict.
pub fn print_validation_results(result: &ValidationResult, subject: &str) {
    println!("\n=== Validation Results ===\n");

    if !result.errors().is_empty() {
        println!("❌ ERRORS:");
        result.errors().iter().for_each(print_diagnostic);
        println!();
    }

    if !result.warnings().is_empty() {
        println!("⚠️  WARNINGS:");
        result.warnings().iter().for_each(print_diagnostic);
        println!();
    }

    if result.is_valid() {
        println!("✅ {} is valid!", subject);
    } else {
        println!("❌ {} has errors that need to be fixed.", subject);
    }
    println!();
}

pub fn print_validation_stats(report: &ValidationReport) {
    let stats = report.stats();
    println!("📊 Statistics:");
    println!("  • Total Rows: {}", stats.total_rows);
    println!("  • Languages: {}", report.languages.join(", "));
    println!("  • Errors: {}", stats.error_count);
    println!("  • Warnings: {}", stats.warning_count);
    println!();
}

/// Prints a validation report as one pretty JSON object on stdout.
pub fn print_validation_json(report: &ValidationReport) -> Result<(), String> {
    let body = json!({
        "languages": report.languages,
        "stats": report.stats(),
        "errors": report.result.errors(),
        "warnings": report.result.warnings(),
    });
    let text = serde_json::to_string_pretty(&body).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

pub fn print_generate_summary(report: &GenerateReport, input: &str, output: &str) {
    if !report.collisions.is_empty() {
        println!("⚠️  PATH COLLISIONS (last write wins):");
        for collision in &report.collisions {
            println!("  {}", collision);
        }
        println!();
    }

    println!("📊 Generation Summary:");
    println!("  • Input CSV: {}", input);
    println!("  • Output Directory: {}", output);
    println!("  • Total Rows: {}", report.validation.total_rows);
    println!("  • Languages: {}", report.validation.languages.join(", "));
    println!("  • Generated Files:");
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("    - {}", outcome.path.display()),
            Err(e) => println!("    - {} (failed: {})", outcome.path.display(), e),
        }
        if let Some(backup) = &outcome.backup {
            println!("      backup: {}", backup.display());
        }
    }
    println!();
}

pub fn print_table_summary(summary: &TableSummary, output: &str) {
    println!("📁 Output: {}", output);
    println!("🌍 Languages: {}", summary.languages.join(", "));
    println!("📝 Translation keys: {}", summary.rows);
}
