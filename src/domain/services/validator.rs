#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;

use crate::domain::models::CandidateFile;
use crate::domain::models::ValidationError;

pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

const ACCEPTED_MEDIA_TYPES: [&str; 4] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "text/markdown",
];

const ACCEPTED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "md"];

pub struct FileValidator {}

impl FileValidator {
    /// Gates a file before it may become the wizard's candidate. The format
    /// check runs first, the size cap second, and a file passing both is
    /// accepted exactly as-is. Exactly 16 MiB is still within the cap.
    pub fn validate(file: &CandidateFile) -> Result<(), ValidationError> {
        if !FileValidator::is_accepted_format(file) {
            return Err(ValidationError::UnsupportedFormat {
                name: file.name.clone(),
            });
        }

        if file.size > MAX_FILE_SIZE {
            return Err(ValidationError::TooLarge {
                name: file.name.clone(),
                size: file.size,
                limit: MAX_FILE_SIZE,
            });
        }

        return Ok(());
    }

    /// Either signal is enough: a known media type, or a known extension on
    /// the file name. Extensions are matched case-insensitively.
    fn is_accepted_format(file: &CandidateFile) -> bool {
        if ACCEPTED_MEDIA_TYPES.contains(&file.media_type.as_str()) {
            return true;
        }

        let name = file.name.to_lowercase();
        return ACCEPTED_EXTENSIONS
            .iter()
            .any(|ext| return name.ends_with(&format!(".{ext}")));
    }
}
