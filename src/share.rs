//! Shareable links carrying the manifest text in a query parameter.
//!
//! Text is encoded as URL-safe base64 over its UTF-8 bytes, so it survives a
//! query string without percent-encoding. Decoding accepts padded and
//! unpadded input.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::ShareError;

const LINK_ENGINE: GeneralPurpose = GeneralPurpose::new(
	&alphabet::URL_SAFE,
	GeneralPurposeConfig::new()
		.with_encode_padding(false)
		.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode manifest text for use as a query value.
pub fn encode(text: &str) -> String {
	LINK_ENGINE.encode(text.as_bytes())
}

/// Decode a query value produced by [`encode`].
pub fn decode(param: &str) -> Result<String, ShareError> {
	let bytes = LINK_ENGINE.decode(param.trim())?;
	Ok(String::from_utf8(bytes)?)
}

/// Full share URL for `text`, e.g. `https://host/app?yaml=…`.
pub fn share_url(base: &str, param: &str, text: &str) -> Result<String, ShareError> {
	if text.trim().is_empty() {
		return Err(ShareError::Empty);
	}
	Ok(format!("{base}?{param}={}", encode(text)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_multibyte_text() {
		let text = "kind: ConfigMap\nmetadata:\n  name: grüße-☸\ndata: {emoji: \"🚀\"}\n";
		assert_eq!(decode(&encode(text)).unwrap(), text);
	}

	#[test]
	fn encoded_text_is_query_safe() {
		let encoded = encode("???>>>~~~ÿÿÿ");
		assert!(
			encoded
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
		);
	}

	#[test]
	fn padded_input_is_accepted() {
		assert_eq!(decode("YQ==").unwrap(), "a");
		assert_eq!(decode("YQ").unwrap(), "a");
	}

	#[test]
	fn garbage_is_a_decode_error() {
		assert!(matches!(decode("***"), Err(ShareError::Decode(_))));
	}

	#[test]
	fn invalid_utf8_is_rejected() {
		let encoded = LINK_ENGINE.encode([0xff, 0xfe]);
		assert!(matches!(decode(&encoded), Err(ShareError::Utf8(_))));
	}

	#[test]
	fn share_url_appends_parameter() {
		let url = share_url("https://example.test/viz", "yaml", "kind: Pod").unwrap();
		assert_eq!(url, format!("https://example.test/viz?yaml={}", encode("kind: Pod")));
		assert!(matches!(share_url("https://x", "yaml", "  \n"), Err(ShareError::Empty)));
	}
}
