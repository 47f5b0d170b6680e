//! README file output.
//!
//! The stats block replaces the whole file; the timestamp is prepended to
//! whatever the file already holds.

use crate::error::Result;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::Path;
use tracing::info;

/// Overwrite `path` with `content`.
pub fn write_readme(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// `6/15/2024, 2:05:09 PM`
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// The stamped document: a blank line, the timestamp line, a blank line,
/// the previous content, and a trailing newline.
pub fn stamp_content<Tz>(content: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("\n🔄 **Updated:** {}\n\n{}\n", format_timestamp(at), content)
}

/// Prepend an "Updated" line to the file at `path` and rewrite it.
pub fn prepend_timestamp<Tz>(path: &Path, at: &DateTime<Tz>) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let content = std::fs::read_to_string(path)?;
    let updated = stamp_content(&content, at);
    std::fs::write(path, &updated)?;
    info!("Prepended timestamp to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 14, 5, 9).unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&at()), "6/15/2024, 2:05:09 PM");
    }

    #[test]
    fn test_stamp_content() {
        assert_eq!(
            stamp_content("# Hi\n", &at()),
            "\n🔄 **Updated:** 6/15/2024, 2:05:09 PM\n\n# Hi\n\n"
        );
    }

    #[test]
    fn test_write_readme_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "old content that is longer").unwrap();

        write_readme(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_prepend_timestamp_keeps_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Profile").unwrap();

        prepend_timestamp(&path, &at()).unwrap();
        prepend_timestamp(&path, &at()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("**Updated:**").count(), 2);
        assert!(content.contains("# Profile"));
        assert!(content.starts_with("\n🔄 **Updated:**"));
    }

    #[test]
    fn test_prepend_timestamp_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(prepend_timestamp(&dir.path().join("nope.md"), &at()).is_err());
    }
}
