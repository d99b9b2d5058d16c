//! Deep-link URL codec for out-of-process signers.
//!
//! External-custody wallets sign through a hardware device or companion
//! app reached via a deep link:
//!
//! `tonsign://?pk=<b64url-pubkey>&body=<b64url-payload>&v=<revision>&return=<url-encoded-scheme>`
//!
//! Percent-decoding followed by base64-decoding must reproduce the exact
//! public key and payload bytes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;
use tonkit_types::{PublicKey, Revision};

/// URL scheme for signing requests.
pub const SIGN_SCHEME: &str = "tonsign";

/// Errors from decoding a signing deep link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignUrlError {
    #[error("not a {SIGN_SCHEME}:// url")]
    WrongScheme,

    #[error("missing query parameter: {0}")]
    MissingParam(&'static str),

    #[error("invalid query parameter {0}")]
    InvalidParam(&'static str),
}

/// A signing request addressed to an external signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUrl {
    pub public_key: PublicKey,
    pub body: Vec<u8>,
    pub revision: Revision,
    pub return_url: String,
}

impl SignUrl {
    /// Render the deep-link URL.
    pub fn encode(&self) -> String {
        format!(
            "{SIGN_SCHEME}://?pk={}&body={}&v={}&return={}",
            urlencoding::encode(&URL_SAFE_NO_PAD.encode(self.public_key.as_bytes())),
            urlencoding::encode(&URL_SAFE_NO_PAD.encode(&self.body)),
            self.revision.as_str(),
            urlencoding::encode(&self.return_url),
        )
    }

    /// Parse a deep-link URL back into its parts.
    pub fn decode(url: &str) -> Result<Self, SignUrlError> {
        let query = url
            .strip_prefix(SIGN_SCHEME)
            .and_then(|rest| rest.strip_prefix("://?"))
            .ok_or(SignUrlError::WrongScheme)?;

        let mut pk = None;
        let mut body = None;
        let mut revision = None;
        let mut return_url = None;
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "pk" => pk = Some(decode_bytes(value, "pk")?),
                "body" => body = Some(decode_bytes(value, "body")?),
                "v" => {
                    revision =
                        Some(Revision::parse(value).ok_or(SignUrlError::InvalidParam("v"))?)
                }
                "return" => {
                    return_url = Some(
                        urlencoding::decode(value)
                            .map_err(|_| SignUrlError::InvalidParam("return"))?
                            .into_owned(),
                    )
                }
                _ => {}
            }
        }

        let pk = pk.ok_or(SignUrlError::MissingParam("pk"))?;
        let public_key = PublicKey(
            <[u8; 32]>::try_from(pk.as_slice()).map_err(|_| SignUrlError::InvalidParam("pk"))?,
        );
        Ok(Self {
            public_key,
            body: body.ok_or(SignUrlError::MissingParam("body"))?,
            revision: revision.ok_or(SignUrlError::MissingParam("v"))?,
            return_url: return_url.ok_or(SignUrlError::MissingParam("return"))?,
        })
    }
}

fn decode_bytes(value: &str, name: &'static str) -> Result<Vec<u8>, SignUrlError> {
    let unescaped =
        urlencoding::decode(value).map_err(|_| SignUrlError::InvalidParam(name))?;
    URL_SAFE_NO_PAD
        .decode(unescaped.as_bytes())
        .map_err(|_| SignUrlError::InvalidParam(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SignUrl {
        SignUrl {
            public_key: PublicKey([0xC4; 32]),
            body: vec![0x00, 0x01, 0xFE, 0xFF, 0x80],
            revision: Revision::V4R2,
            return_url: "wallet://sign-result?id=7".into(),
        }
    }

    #[test]
    fn encode_decode_roundtrip_is_byte_exact() {
        let url = sample();
        let encoded = url.encode();
        assert!(encoded.starts_with("tonsign://?"));
        let decoded = SignUrl::decode(&encoded).unwrap();
        assert_eq!(decoded, url);
    }

    #[test]
    fn return_url_is_percent_encoded() {
        let encoded = sample().encode();
        // The raw return scheme must not appear unescaped in the query.
        assert!(!encoded.contains("return=wallet://"));
        assert!(encoded.contains("return=wallet%3A%2F%2F"));
    }

    #[test]
    fn wrong_scheme_rejected() {
        assert_eq!(
            SignUrl::decode("https://?pk=a&body=b&v=v4r2&return=x"),
            Err(SignUrlError::WrongScheme)
        );
    }

    #[test]
    fn missing_params_rejected() {
        let err = SignUrl::decode("tonsign://?body=AA&v=v4r2&return=x").unwrap_err();
        assert_eq!(err, SignUrlError::MissingParam("pk"));
    }

    #[test]
    fn short_public_key_rejected() {
        let short_pk = URL_SAFE_NO_PAD.encode([1u8; 8]);
        let url = format!("tonsign://?pk={short_pk}&body=AA&v=v4r2&return=x");
        assert_eq!(
            SignUrl::decode(&url),
            Err(SignUrlError::InvalidParam("pk"))
        );
    }

    #[test]
    fn unknown_revision_rejected() {
        let pk = URL_SAFE_NO_PAD.encode([1u8; 32]);
        let url = format!("tonsign://?pk={pk}&body=AA&v=v9r9&return=x");
        assert_eq!(SignUrl::decode(&url), Err(SignUrlError::InvalidParam("v")));
    }

    #[test]
    fn empty_body_roundtrips() {
        let url = SignUrl {
            body: Vec::new(),
            ..sample()
        };
        assert_eq!(SignUrl::decode(&url.encode()).unwrap(), url);
    }
}
