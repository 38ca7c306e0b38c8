use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use gridlog_model::CellValue;

/// Leading columns dropped from digest input by convention (the submission
/// timestamp).
pub const DEFAULT_SKIP_COLUMNS: u32 = 1;

/// Field separator joining cell texts before hashing. Chosen because it
/// cannot appear in form answers.
const FIELD_SEPARATOR: char = '\u{001F}';

/// Hash function used for row fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// 160-bit SHA-1, the historical default for digest columns.
    Sha1,
    Sha256,
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::Sha1
    }
}

impl HashAlgorithm {
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => {
                use sha1::Digest as _;
                sha1::Sha1::digest(data).to_vec()
            }
            HashAlgorithm::Sha256 => {
                use sha2::Digest as _;
                sha2::Sha256::digest(data).to_vec()
            }
        }
    }
}

/// Computes the base64 fingerprint of a row's content.
///
/// The first `skip` values (conventionally the timestamp column) never
/// contribute to the result. Equal post-skip sequences always produce equal
/// digests, independent of table size or call history.
pub fn compute_digest(values: &[CellValue], skip: u32, algorithm: HashAlgorithm) -> String {
    let joined = values
        .iter()
        .skip(skip as usize)
        .map(CellValue::canonical_text)
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string());
    STANDARD.encode(algorithm.digest(joined.as_bytes()))
}
