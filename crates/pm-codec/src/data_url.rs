use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{CodecError, CodecResult};

/// MIME type written when the declared type is empty.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// MIME type assumed when a parsed data URL omits one (RFC 2397).
const IMPLIED_MIME_TYPE: &str = "text/plain;charset=US-ASCII";

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// A parsed data URL: MIME type plus the raw bytes it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUrl {
    mime_type: String,
    data: Vec<u8>,
}

impl DataUrl {
    /// Wrap raw bytes. An empty MIME type becomes [`DEFAULT_MIME_TYPE`].
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE.to_string()
        } else {
            mime_type
        };
        Self { mime_type, data }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME}{}{BASE64_MARKER},{}",
            self.mime_type,
            STANDARD.encode(&self.data)
        )
    }
}

impl FromStr for DataUrl {
    type Err = CodecError;

    fn from_str(s: &str) -> CodecResult<Self> {
        let rest = strip_prefix_ignore_case(s.trim(), SCHEME).ok_or(CodecError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(CodecError::MissingPayload)?;
        let mime = strip_suffix_ignore_case(header, BASE64_MARKER)
            .ok_or_else(|| CodecError::NotBase64(header.to_string()))?;
        let data = STANDARD.decode(payload)?;
        let mime_type = if mime.is_empty() {
            IMPLIED_MIME_TYPE.to_string()
        } else {
            mime.to_string()
        };
        Ok(Self { mime_type, data })
    }
}

/// Encode bytes as a data URL string.
///
/// # Examples
///
/// ```
/// assert_eq!(
///     pm_codec::encode_bytes("text/plain", b"hi"),
///     "data:text/plain;base64,aGk="
/// );
/// ```
pub fn encode_bytes(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "{SCHEME}{}{BASE64_MARKER},{}",
        if mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type
        },
        STANDARD.encode(bytes)
    )
}

/// Parse a data URL produced by [`encode_bytes`] (or a browser file reader).
pub fn decode(text: &str) -> CodecResult<DataUrl> {
    text.parse()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}
