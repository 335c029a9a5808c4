#[cfg(test)]
#[path = "candidate_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Renders a byte count the way the server's pages do: base 1024 units, two
/// decimals at most, trailing zeros dropped. Sizes beyond the table stay in
/// gigabytes.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = bytes.ilog(1024) as usize;
    if exponent >= SIZE_UNITS.len() {
        exponent = SIZE_UNITS.len() - 1;
    }

    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    return format!("{trimmed} {}", SIZE_UNITS[exponent]);
}

fn media_type_for(path: &Path) -> String {
    let extension = path
        .extension()
        .map(|ext| return ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let media_type = match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "",
    };

    return media_type.to_string();
}

/// A document picked in the upload step. At most one exists at a time, and
/// picking another replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

impl CandidateFile {
    pub async fn from_path(input: &str) -> Result<CandidateFile> {
        let path = PathBuf::from(input.trim());
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(_) => bail!("{} could not be opened", path.display()),
        };
        if !metadata.is_file() {
            bail!("{} is not a file", path.display());
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => bail!("{} has no file name", path.display()),
        };

        let media_type = media_type_for(&path);

        return Ok(CandidateFile {
            path,
            name,
            size: metadata.len(),
            media_type,
        });
    }

    pub fn human_size(&self) -> String {
        return format_size(self.size);
    }
}
