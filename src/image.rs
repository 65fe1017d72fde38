use crate::{Error, Result};

/// Scheme marker of an embeddable image reference.
pub const DATA_URL_PREFIX: &str = "data:image/";

const DEFAULT_PREFIX: &str = "data:image/jpeg;base64,";

/// Turns a caller-supplied image into a data URL the upstream accepts.
///
/// Raw base64 is assumed to be JPEG. The payload itself is not inspected.
pub fn normalize(raw: Option<&str>, available_styles: &[String]) -> Result<String> {
    match raw {
        None | Some("") => Err(Error::MissingImage {
            available: available_styles.to_vec(),
        }),
        Some(data) if data.starts_with(DATA_URL_PREFIX) => Ok(data.to_string()),
        Some(data) => Ok(format!("{}{}", DEFAULT_PREFIX, data)),
    }
}
