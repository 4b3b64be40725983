use crate::report::print_table_summary;
use crate::validation::{
    parse_language_list, validate_dir_path, validate_file_path, validate_language_code,
    validate_output_path,
};
use i18n_csv::generator::{DEFAULT_LANGUAGES, DEFAULT_SOURCE_LANGUAGE};
use i18n_csv::{create_sample_csv, export_to_csv, from_json};
use std::path::Path;

fn languages_or_default(languages: Option<&str>) -> Result<Vec<String>, String> {
    match languages {
        Some(list) => parse_language_list(list),
        None => Ok(DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()),
    }
}

/// Merges every JSON document in a directory into one spreadsheet.
pub fn run_export(input: Option<String>, output: Option<String>) -> Result<(), String> {
    let (Some(input), Some(output)) = (input, output) else {
        return Err(
            "--input (JSON dir) and --output (CSV file) are required for export command"
                .to_string(),
        );
    };
    validate_dir_path(&input)?;
    validate_output_path(&output)?;

    println!("📤 Exporting JSON files to CSV...\n");
    let summary = export_to_csv(Path::new(&input), Path::new(&output)).map_err(|e| e.to_string())?;
    print_table_summary(&summary, &output);
    println!("✅ Successfully exported to: {}\n", output);
    Ok(())
}

/// Builds a spreadsheet template from one source-language JSON document.
pub fn run_from_json(
    input: Option<String>,
    output: Option<String>,
    languages: Option<String>,
    source_lang: Option<String>,
) -> Result<(), String> {
    let (Some(input), Some(output)) = (input, output) else {
        return Err(
            "--input (JSON file) and --output (CSV file) are required for from-json command"
                .to_string(),
        );
    };
    validate_file_path(&input)?;
    validate_output_path(&output)?;
    let targets = languages_or_default(languages.as_deref())?;
    let source_lang = source_lang.unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string());
    validate_language_code(&source_lang)?;

    let summary = from_json(Path::new(&input), Path::new(&output), &source_lang, &targets)
        .map_err(|e| e.to_string())?;
    println!("✅ Generated CSV template from {} JSON", source_lang);
    print_table_summary(&summary, &output);
    println!("\n💡 Next steps:");
    println!("   1. Open the CSV file and add translations for other languages");
    println!(
        "   2. Run: i18n-generator generate --input {} --output <output-dir>",
        output
    );
    Ok(())
}

/// Writes a sample spreadsheet to start from.
pub fn run_init(output: Option<String>, languages: Option<String>) -> Result<(), String> {
    let output = output.ok_or_else(|| "--output is required for init command".to_string())?;
    validate_output_path(&output)?;
    let languages = languages_or_default(languages.as_deref())?;

    create_sample_csv(Path::new(&output), &languages).map_err(|e| e.to_string())?;
    println!("✅ Sample CSV template created: {}", output);
    Ok(())
}
