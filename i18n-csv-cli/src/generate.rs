use crate::config::FileConfig;
use crate::report::{
    print_generate_summary, print_validation_json, print_validation_results, print_validation_stats,
};
use crate::validation::{parse_language_list, validate_dir_path, validate_file_path};
use i18n_csv::{Generator, GeneratorConfig, ValidationReport};
use std::path::Path;
use tracing::debug;

/// Flags shared by the commands that read the translation spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub input: Option<String>,
    pub output: Option<String>,
    pub backup: bool,
    /// Comma-separated language filter.
    pub languages: Option<String>,
    pub normalize_languages: bool,
    pub keep_empty: bool,
}

impl SourceOptions {
    fn input(&self, file: &FileConfig) -> Option<String> {
        self.input.clone().or_else(|| file.input.clone())
    }

    fn output(&self, file: &FileConfig) -> Option<String> {
        self.output.clone().or_else(|| file.output.clone())
    }

    /// Input and output, from flags or the config file.
    pub fn input_and_output(&self, file: &FileConfig, command: &str) -> Result<(String, String), String> {
        match (self.input(file), self.output(file)) {
            (Some(input), Some(output)) => Ok((input, output)),
            _ => Err(format!(
                "--input and --output are required for {} command",
                command
            )),
        }
    }

    /// Merges flags over the config file into a library configuration.
    pub fn generator_config(
        &self,
        file: &FileConfig,
        input: &str,
        output: Option<&str>,
    ) -> Result<GeneratorConfig, String> {
        validate_file_path(input)?;

        let languages = match &self.languages {
            Some(list) => Some(parse_language_list(list)?),
            None => file.languages.clone(),
        };

        let mut config = GeneratorConfig::new(input)
            .with_languages(languages)
            .with_backup(self.backup || file.backup.unwrap_or(false))
            .with_normalize_languages(
                self.normalize_languages || file.normalize_languages.unwrap_or(false),
            )
            .with_keep_empty(self.keep_empty || file.keep_empty.unwrap_or(false))
            .with_aliases(file.alias_table());
        if let Some(output) = output {
            config = config.with_output_dir(output);
        }

        debug!(?config, "resolved generator configuration");
        Ok(config)
    }
}

/// Validates the spreadsheet, then writes one JSON document per language.
pub fn run_generate(opts: &SourceOptions, file: &FileConfig) -> Result<(), String> {
    let (input, output) = opts.input_and_output(file, "generate")?;
    let config = opts.generator_config(file, &input, Some(output.as_str()))?;
    generate_once(&Generator::new(config), &input, &output)
}

/// One full parse, validate, write pass; shared with the watcher.
pub fn generate_once(generator: &Generator, input: &str, output: &str) -> Result<(), String> {
    println!("🚀 Starting i18n generation...\n");

    println!("📖 Parsing CSV file...");
    let table = generator.load_table().map_err(|e| e.to_string())?;
    println!(
        "✅ Parsed {} rows with {} languages: {}\n",
        table.rows.len(),
        table.languages.len(),
        table.languages.join(", ")
    );

    println!("🔍 Validating CSV data...");
    let validation = generator.validate_table(&table);
    print_validation_results(&validation.result, "CSV file");
    if !validation.is_valid() {
        return Err(
            "CSV validation failed. Please fix the errors before generating JSON files."
                .to_string(),
        );
    }

    println!("💾 Writing JSON files...");
    let report = generator
        .generate_validated(&table, validation)
        .map_err(|e| e.to_string())?;
    print_generate_summary(&report, input, output);

    let failed = report.failures().count();
    if failed > 0 {
        return Err(format!("Failed to write {} language file(s)", failed));
    }

    println!("✅ i18n generation completed successfully!\n");
    Ok(())
}

/// Validates the spreadsheet without writing anything.
///
/// With `json_output` the report is printed as one JSON object instead.
pub fn run_validate(
    opts: &SourceOptions,
    file: &FileConfig,
    strict: bool,
    json_output: bool,
) -> Result<(), String> {
    let input = opts
        .input(file)
        .ok_or_else(|| "--input is required for validate command".to_string())?;
    let config = opts.generator_config(file, &input, None)?;

    let report = Generator::new(config).validate().map_err(|e| e.to_string())?;
    if json_output {
        print_validation_json(&report)?;
    } else {
        println!("🔍 Validating CSV file...\n");
        print_validation_results(&report.result, "CSV file");
        print_validation_stats(&report);
    }
    strict_verdict(strict, &report, "Validation")
}

/// Checks existing JSON documents against the spreadsheet's keys.
pub fn run_validate_json(
    opts: &SourceOptions,
    json_dir: Option<String>,
    file: &FileConfig,
    strict: bool,
    json_output: bool,
) -> Result<(), String> {
    let input = opts.input(file);
    let json_dir = json_dir.or_else(|| opts.output(file));
    let (Some(input), Some(json_dir)) = (input, json_dir) else {
        return Err("--input and --json-dir are required for validate-json command".to_string());
    };
    validate_dir_path(&json_dir)?;
    let config = opts.generator_config(file, &input, None)?;

    let report = Generator::new(config)
        .validate_json(Path::new(&json_dir))
        .map_err(|e| e.to_string())?;
    if json_output {
        print_validation_json(&report)?;
    } else {
        println!("🔍 Validating JSON files in {} against {}...\n", json_dir, input);
        print_validation_results(&report.result, "JSON output");
    }
    strict_verdict(strict, &report, "JSON validation")
}

/// Under `--strict`, any error fails the command.
fn strict_verdict(strict: bool, report: &ValidationReport, what: &str) -> Result<(), String> {
    if strict && !report.is_valid() {
        return Err(format!(
            "{} failed with {} error(s)",
            what,
            report.result.errors().len()
        ));
    }
    Ok(())
}
