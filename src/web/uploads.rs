//! Uploaded file persistence.
//!
//! Files land under `<data_dir>/uploads` and are served back at `/uploads/*`
//! by the static file service. Stored names combine a timestamp, a random
//! suffix, and the sanitized original name so concurrent uploads of the same
//! file cannot collide.

use std::io;
use std::path::Path;

use rand::Rng;
use tokio::fs;

/// Persist one uploaded file and return the public path recorded in the
/// database (e.g. `/uploads/1714-381-license.pdf`).
pub async fn save_upload(uploads_dir: &Path, original_name: &str, data: &[u8]) -> io::Result<String> {
    let filename = unique_filename(original_name);
    fs::create_dir_all(uploads_dir).await?;
    fs::write(uploads_dir.join(&filename), data).await?;
    Ok(format!("/uploads/{}", filename))
}

fn unique_filename(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random();
    format!("{}-{}-{}", millis, suffix, sanitize_filename(original_name))
}

/// Keep only the final path component and collapse whitespace, so a hostile
/// original name cannot escape the uploads directory.
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_becomes_dashes() {
        assert_eq!(sanitize_filename("my license scan.pdf"), "my-license-scan.pdf");
    }

    #[test]
    fn path_components_are_stripped() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\id.png"), "id.png");
    }

    #[test]
    fn empty_or_dot_names_get_a_placeholder() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("..."), "file");
    }

    #[test]
    fn generated_names_do_not_collide() {
        let a = unique_filename("license.pdf");
        let b = unique_filename("license.pdf");
        assert_ne!(a, b);
        assert!(a.ends_with("license.pdf"));
    }

    #[tokio::test]
    async fn saved_file_is_readable_under_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let public = save_upload(dir.path(), "license.pdf", b"scan bytes")
            .await
            .unwrap();
        let name = public.strip_prefix("/uploads/").unwrap();
        let stored = tokio::fs::read(dir.path().join(name)).await.unwrap();
        assert_eq!(stored, b"scan bytes");
    }
}
