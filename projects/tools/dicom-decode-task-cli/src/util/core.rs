use crate::error::CliError;
use std::fs;
use std::path::*;

/// Collects the task files (`*.json`) directly inside `dir`, sorted by name.
pub fn find_task_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue, // Skip problematic entries, e.g. those without access.
        };

        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Logs a failed task file; the remaining files are still processed.
pub fn handle_process_entry_error(result: Result<u64, CliError>) -> u64 {
    match result {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("{e}");
            0
        }
    }
}

/// Canonicalizes a CLI path argument, creating the directory if it doesn't exist.
pub fn canonicalize_cli_path(value: &str) -> Result<PathBuf, String> {
    let path = Path::new(value);

    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| format!("Failed to create directory: {e}"))?;
    }

    fs::canonicalize(path).map_err(|e| format!("Invalid path: {e}"))
}

/// Canonicalizes a CLI path argument that must name an existing file.
pub fn canonicalize_cli_file(value: &str) -> Result<PathBuf, String> {
    fs::canonicalize(value).map_err(|e| format!("Invalid path: {e}"))
}
