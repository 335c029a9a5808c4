use std::io::Write;

use anyhow::Result;

use super::format_size;
use super::CandidateFile;

#[tokio::test]
async fn it_loads_a_file_from_disk() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile()?;
    file.write_all(b"%PDF-1.4 fixture")?;

    let candidate = CandidateFile::from_path(file.path().to_str().unwrap()).await?;

    assert_eq!(candidate.size, 16);
    assert_eq!(candidate.media_type, "application/pdf");
    assert_eq!(
        candidate.name,
        file.path().file_name().unwrap().to_string_lossy().to_string()
    );

    return Ok(());
}

#[tokio::test]
async fn it_trims_surrounding_whitespace() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile()?;
    file.write_all(b"notes")?;

    let padded = format!("  {}  ", file.path().to_str().unwrap());
    let candidate = CandidateFile::from_path(&padded).await?;

    assert_eq!(candidate.size, 5);
    assert_eq!(candidate.media_type, "text/plain");

    return Ok(());
}

#[tokio::test]
async fn it_rejects_missing_files() {
    let res = CandidateFile::from_path("/definitely/not/here.pdf").await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_rejects_directories() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let res = CandidateFile::from_path(dir.path().to_str().unwrap()).await;
    assert!(res.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_infers_media_types_case_insensitively() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".MD").tempfile()?;
    file.write_all(b"# notes")?;

    let candidate = CandidateFile::from_path(file.path().to_str().unwrap()).await?;
    assert_eq!(candidate.media_type, "text/markdown");

    return Ok(());
}

#[tokio::test]
async fn it_leaves_unknown_extensions_without_a_media_type() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".xyz").tempfile()?;
    file.write_all(b"???")?;

    let candidate = CandidateFile::from_path(file.path().to_str().unwrap()).await?;
    assert_eq!(candidate.media_type, "");

    return Ok(());
}

#[test]
fn it_formats_byte_sizes() {
    assert_eq!(format_size(0), "0 Bytes");
    assert_eq!(format_size(1), "1 Bytes");
    assert_eq!(format_size(1023), "1023 Bytes");
    assert_eq!(format_size(1024), "1 KB");
    assert_eq!(format_size(1536), "1.5 KB");
    assert_eq!(format_size(1048576), "1 MB");
    assert_eq!(format_size(16 * 1024 * 1024), "16 MB");
    assert_eq!(format_size(2_684_354_560), "2.5 GB");
}

#[test]
fn it_clamps_oversized_values_to_gigabytes() {
    assert_eq!(format_size(5_497_558_138_880), "5120 GB");
}
