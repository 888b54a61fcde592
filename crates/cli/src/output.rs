use crate::error::CliError;
use extractor::artifacts::SchemaArtifacts;

pub fn artifacts_json(artifacts: &[SchemaArtifacts]) -> Result<String, CliError> {
    serde_json::to_string_pretty(artifacts).map_err(CliError::JsonSerialize)
}

/// Writes to the given path, or prints to stdout when no path is given.
pub fn write_or_print(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_content_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.txt");
        write_or_print("TABLES TO IMPORT:\n", path.to_str()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "TABLES TO IMPORT:\n"
        );
    }
}
