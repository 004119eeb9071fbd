//! Object-storage collaborator: uploads the validated resume text as a
//! `.txt` artifact for record-keeping and returns its location.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// Location of an uploaded artifact.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub url: String,
    pub key: String,
}

/// Uploads extracted resume text under `resumes/<user>/<uuid>-<name>.txt`.
pub async fn upload_resume_text(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    user_id: Uuid,
    file_name: &str,
    text: &str,
) -> Result<StoredArtifact, AppError> {
    let key = format!(
        "resumes/{}/{}-{}",
        user_id,
        Uuid::new_v4(),
        txt_file_name(file_name)
    );

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(Bytes::copy_from_slice(text.as_bytes())))
        .content_type("text/plain")
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!("Uploaded resume text to s3://{bucket}/{key}");

    Ok(StoredArtifact {
        url: format!("{endpoint}/{bucket}/{key}"),
        key,
    })
}

/// Rewrites a document file name to its `.txt` form; the stored artifact is
/// always plain text (extraction happens client-side).
fn txt_file_name(file_name: &str) -> String {
    for ext in ["pdf", "docx", "doc", "txt"] {
        let suffix = format!(".{ext}");
        let bytes = file_name.as_bytes();
        if bytes.len() > suffix.len()
            && bytes[bytes.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
        {
            // ASCII suffix: the byte offset is a char boundary
            let stem = &file_name[..file_name.len() - suffix.len()];
            return format!("{stem}.txt");
        }
    }
    format!("{file_name}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_file_name_rewrites_pdf() {
        assert_eq!(txt_file_name("resume.pdf"), "resume.txt");
    }

    #[test]
    fn test_txt_file_name_rewrites_docx_case_insensitive() {
        assert_eq!(txt_file_name("Resume.DOCX"), "Resume.txt");
    }

    #[test]
    fn test_txt_file_name_keeps_txt() {
        assert_eq!(txt_file_name("notes.txt"), "notes.txt");
    }

    #[test]
    fn test_txt_file_name_appends_for_unknown_extension() {
        assert_eq!(txt_file_name("resume"), "resume.txt");
        assert_eq!(txt_file_name("resume.rtf"), "resume.rtf.txt");
    }
}
