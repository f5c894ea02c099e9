//! CSRF tokens for grid forms
//!
//! A session keeps one secret; every rendered form gets a freshly masked token
//! derived from it, so the token value changes on each render while still
//! unmasking to the same secret.

use crate::{FormError, FormResult};
use rand::Rng;
use subtle::ConstantTimeEq;

/// Token length (mask followed by masked secret)
pub const CSRF_TOKEN_LENGTH: usize = 64;

/// Secret length
pub const CSRF_SECRET_LENGTH: usize = 32;

/// Characters used in secrets and tokens
pub const CSRF_ALLOWED_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const REASON_INCORRECT_LENGTH: &str = "CSRF token has incorrect length.";
const REASON_INVALID_CHARACTERS: &str = "CSRF token has invalid characters.";
const REASON_MISMATCH: &str = "CSRF token mismatch.";

fn random_chars(len: usize) -> Vec<u8> {
	let mut rng = rand::thread_rng();
	(0..len)
		.map(|_| CSRF_ALLOWED_CHARS[rng.gen_range(0..CSRF_ALLOWED_CHARS.len())])
		.collect()
}

fn char_index(c: u8) -> Option<usize> {
	CSRF_ALLOWED_CHARS.iter().position(|&allowed| allowed == c)
}

/// Generates a new random secret
pub fn generate_secret() -> String {
	String::from_utf8_lossy(&random_chars(CSRF_SECRET_LENGTH)).into_owned()
}

/// Masks `secret` with a random mask, producing a token
///
/// Characters outside [`CSRF_ALLOWED_CHARS`] are treated as the first allowed
/// character, so a malformed secret still produces a well-formed token that
/// will simply never verify.
pub fn mask_secret(secret: &str) -> String {
	let mask = random_chars(CSRF_SECRET_LENGTH);
	let n = CSRF_ALLOWED_CHARS.len();

	let masked: Vec<u8> = secret
		.bytes()
		.chain(std::iter::repeat(CSRF_ALLOWED_CHARS[0]))
		.take(CSRF_SECRET_LENGTH)
		.zip(mask.iter())
		.map(|(s, &m)| {
			let s_idx = char_index(s).unwrap_or(0);
			let m_idx = char_index(m).unwrap_or(0);
			CSRF_ALLOWED_CHARS[(s_idx + m_idx) % n]
		})
		.collect();

	let mut token = mask;
	token.extend(masked);
	String::from_utf8_lossy(&token).into_owned()
}

/// Recovers the secret a well-formed token was masked from
pub fn unmask_token(token: &str) -> FormResult<String> {
	check_token_format(token)?;
	let n = CSRF_ALLOWED_CHARS.len();
	let (mask, masked) = token.as_bytes().split_at(CSRF_SECRET_LENGTH);

	let secret: Vec<u8> = mask
		.iter()
		.zip(masked.iter())
		.map(|(&m, &c)| {
			let m_idx = char_index(m).unwrap_or(0);
			let c_idx = char_index(c).unwrap_or(0);
			CSRF_ALLOWED_CHARS[(c_idx + n - m_idx) % n]
		})
		.collect();

	Ok(String::from_utf8_lossy(&secret).into_owned())
}

/// Checks length and alphabet of a token
pub fn check_token_format(token: &str) -> FormResult<()> {
	if token.len() != CSRF_TOKEN_LENGTH {
		return Err(FormError::CsrfValidationFailed(
			REASON_INCORRECT_LENGTH.to_string(),
		));
	}

	if !token.bytes().all(|c| char_index(c).is_some()) {
		return Err(FormError::CsrfValidationFailed(
			REASON_INVALID_CHARACTERS.to_string(),
		));
	}

	Ok(())
}

/// Verifies that a submitted token was masked from `secret`
pub fn check_token(token: &str, secret: &str) -> FormResult<()> {
	let unmasked = unmask_token(token)?;
	if !bool::from(unmasked.as_bytes().ct_eq(secret.as_bytes())) {
		return Err(FormError::CsrfValidationFailed(REASON_MISMATCH.to_string()));
	}
	Ok(())
}
