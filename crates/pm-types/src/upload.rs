use std::path::{Path, PathBuf};

/// Where the bytes of an [`UploadFile`] come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileSource {
    /// Bytes already held in memory.
    Memory(Vec<u8>),
    /// A file on disk, read when the upload is encoded or sent.
    Path(PathBuf),
}

/// A file selected for upload: a name, a declared MIME type and its bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    /// Declared MIME type. May be empty when the type is unknown.
    pub mime_type: String,
    pub source: FileSource,
}

impl UploadFile {
    pub fn from_bytes(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            source: FileSource::Memory(bytes.into()),
        }
    }

    /// Reference a file on disk. The filename is the last path component.
    pub fn from_path(path: impl AsRef<Path>, mime_type: impl Into<String>) -> Self {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            filename,
            mime_type: mime_type.into(),
            source: FileSource::Path(path.to_path_buf()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_takes_last_component() {
        let file = UploadFile::from_path("/tmp/photos/cat.png", "image/png");
        assert_eq!(file.filename, "cat.png");
        assert_eq!(
            file.source,
            FileSource::Path(PathBuf::from("/tmp/photos/cat.png"))
        );
    }

    #[test]
    fn from_bytes_keeps_payload() {
        let file = UploadFile::from_bytes("a.bin", "", vec![1, 2, 3]);
        assert_eq!(file.source, FileSource::Memory(vec![1, 2, 3]));
        assert!(file.mime_type.is_empty());
    }
}
