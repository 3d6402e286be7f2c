//! Short ID generation utilities.
//!
//! IDs are raw OS randomness encoded as URL-safe base64. Padding is kept, so
//! the default 4 bytes give an 8-character token such as `q3Zt_w==`.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;

/// Default number of random bytes per short ID.
pub const DEFAULT_ID_LENGTH_BYTES: usize = 4;

/// Smallest accepted ID length in bytes.
pub const MIN_ID_LENGTH_BYTES: usize = 4;

/// Largest accepted ID length in bytes.
pub const MAX_ID_LENGTH_BYTES: usize = 32;

/// Generates a random short ID from `length_bytes` bytes of OS entropy.
///
/// No uniqueness check is made against the store.
///
/// # Errors
///
/// Returns the `getrandom` error if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let id = generate_id(4)?;
/// assert_eq!(id.len(), 8);
/// ```
pub fn generate_id(length_bytes: usize) -> Result<String, getrandom::Error> {
    let mut buffer = vec![0u8; length_bytes];

    getrandom::fill(&mut buffer)?;

    Ok(URL_SAFE.encode(&buffer))
}

/// Decodes a short ID back to the random bytes it was built from.
///
/// Returns `None` for anything that is not padded URL-safe base64.
pub fn decode_id(id: &str) -> Option<Vec<u8>> {
    URL_SAFE.decode(id).ok()
}

/// Length of the token produced by [`generate_id`] for `length_bytes`.
pub fn encoded_len(length_bytes: usize) -> usize {
    length_bytes.div_ceil(3) * 4
}
