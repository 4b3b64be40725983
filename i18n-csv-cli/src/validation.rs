use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validate file path exists and is a regular file
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate a directory exists
pub fn validate_dir_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("Directory does not exist: {}", path));
    }

    if !path_obj.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }

    Ok(())
}

/// Validate output file's parent directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    Ok(())
}

/// Validate language code format using unic-langid
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}

/// Splits a comma-separated language list and validates each code.
///
/// Whitespace around codes is ignored, and so are empty items and repeats.
pub fn parse_language_list(list: &str) -> Result<Vec<String>, String> {
    let mut languages: Vec<String> = Vec::new();
    for code in list.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        validate_language_code(code)?;
        if !languages.iter().any(|l| l == code) {
            languages.push(code.to_string());
        }
    }

    if languages.is_empty() {
        return Err("Language list cannot be empty".to_string());
    }
    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_language_code() {
        assert!(validate_language_code("en").is_ok());
        assert!(validate_language_code("mr").is_ok());
        assert!(validate_language_code("zh-Hans").is_ok());
        assert!(validate_language_code("pt-BR").is_ok());

        assert!(validate_language_code("").is_err());
        assert!(validate_language_code("not a code").is_err());
        assert!(validate_language_code("-en").is_err());
    }

    #[test]
    fn test_parse_language_list() {
        assert_eq!(
            parse_language_list("en, mr,,en").unwrap(),
            vec!["en".to_string(), "mr".to_string()]
        );
        assert!(parse_language_list(" , ").is_err());
        assert!(parse_language_list("en,???").is_err());
    }

    #[test]
    fn test_file_and_dir_checks() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("translations.csv");
        std::fs::write(&file, "path,description,en\n").unwrap();

        let file_str = file.to_string_lossy();
        let dir_str = dir.path().to_string_lossy();
        assert!(validate_file_path(&file_str).is_ok());
        assert!(validate_file_path(&dir_str).is_err());
        assert!(validate_dir_path(&dir_str).is_ok());
        assert!(validate_dir_path(&file_str).is_err());
    }

    #[test]
    fn test_validate_output_path_creates_parent() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("nested").join("out.csv");
        assert!(validate_output_path(&output.to_string_lossy()).is_ok());
        assert!(output.parent().unwrap().is_dir());
    }
}
