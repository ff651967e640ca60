use pm_types::{FileSource, UploadFile};
use tracing::debug;

use crate::data_url::encode_bytes;
use crate::error::{CodecError, CodecResult};

/// Result of encoding an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFile {
    pub data_url: String,
    /// Byte length of the original file.
    pub size: u64,
}

/// Read every byte of an upload.
///
/// Suspends until the whole file is read. A read error fails the call with
/// [`CodecError::Read`]; no partial content is returned.
pub async fn read_file(file: &UploadFile) -> CodecResult<Vec<u8>> {
    match &file.source {
        FileSource::Memory(bytes) => Ok(bytes.clone()),
        FileSource::Path(path) => tokio::fs::read(path).await.map_err(|source| CodecError::Read {
            path: path.clone(),
            source,
        }),
    }
}

/// Read an upload and encode it as a data URL using its declared MIME type.
pub async fn encode_file(file: &UploadFile) -> CodecResult<EncodedFile> {
    let bytes = read_file(file).await?;
    let data_url = encode_bytes(&file.mime_type, &bytes);
    debug!(
        filename = %file.filename,
        size = bytes.len(),
        encoded = data_url.len(),
        "encoded upload"
    );
    Ok(EncodedFile {
        data_url,
        size: bytes.len() as u64,
    })
}
