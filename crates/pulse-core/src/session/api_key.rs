//! API key wire format: `mern:<user id>:<email>:<secret>`.

use uuid::Uuid;

use crate::ports::AuthError;

pub const API_KEY_MARKER: &str = "mern";
pub const API_KEY_DELIMITER: char = ':';

/// The decoded fields of an API key.
///
/// Decoding only checks shape; whether the key is live is decided by
/// [`SessionManager::validate`](super::SessionManager::validate).
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub user_id: Uuid,
    pub email: String,
    pub secret: String,
}

impl ApiKey {
    pub fn new(user_id: Uuid, email: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            secret: secret.into(),
        }
    }

    /// Render the wire form. Fails if a field is empty or contains the
    /// delimiter, since the result could not be decoded unambiguously.
    pub fn encode(&self) -> Result<String, AuthError> {
        if !is_encodable(&self.email) {
            return Err(AuthError::UnencodableField("email"));
        }
        if !is_encodable(&self.secret) {
            return Err(AuthError::UnencodableField("secret"));
        }

        Ok(format!(
            "{API_KEY_MARKER}{d}{}{d}{}{d}{}",
            self.user_id.hyphenated(),
            self.email,
            self.secret,
            d = API_KEY_DELIMITER,
        ))
    }

    /// Parse an untrusted string. Returns `None` for anything that is not
    /// exactly `marker:uuid:email:secret` with non-empty fields.
    pub fn decode(raw: &str) -> Option<Self> {
        let fields: Vec<&str> = raw.split(API_KEY_DELIMITER).collect();
        let [marker, user_id, email, secret] = fields.as_slice() else {
            return None;
        };

        if *marker != API_KEY_MARKER || email.is_empty() || secret.is_empty() {
            return None;
        }

        Some(Self {
            user_id: parse_canonical_uuid(user_id)?,
            email: (*email).to_string(),
            secret: (*secret).to_string(),
        })
    }
}

/// Whether `field` can sit inside an API key.
pub fn is_encodable(field: &str) -> bool {
    !field.is_empty() && !field.contains(API_KEY_DELIMITER)
}

/// Only the lowercase hyphenated form is accepted, so each user has exactly
/// one textual id inside a key.
fn parse_canonical_uuid(s: &str) -> Option<Uuid> {
    let id = Uuid::parse_str(s).ok()?;
    (id.hyphenated().to_string() == s).then_some(id)
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ApiKey {
        ApiKey::new(
            Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            "a@x.com",
            "c2VjcmV0LXZhbHVl",
        )
    }

    #[test]
    fn test_encode_layout() {
        let encoded = sample().encode().unwrap();
        assert_eq!(
            encoded,
            "mern:67e55044-10b1-426f-9247-bb680e5fe0c8:a@x.com:c2VjcmV0LXZhbHVl"
        );
        assert_eq!(ApiKey::decode(&encoded), Some(sample()));
    }

    #[test]
    fn test_encode_rejects_delimiter_in_email() {
        let key = ApiKey::new(Uuid::new_v4(), "weird:name@x.com", "s");
        assert!(matches!(
            key.encode(),
            Err(AuthError::UnencodableField("email"))
        ));
    }

    #[test]
    fn test_encode_rejects_empty_secret() {
        let key = ApiKey::new(Uuid::new_v4(), "a@x.com", "");
        assert!(matches!(
            key.encode(),
            Err(AuthError::UnencodableField("secret"))
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let cases = [
            String::new(),
            "mern".to_string(),
            ":::".to_string(),
            format!("{id}:a@x.com:secret"),
            format!("nope:{id}:a@x.com:secret"),
            format!("MERN:{id}:a@x.com:secret"),
            format!("mern:{id}:a@x.com"),
            format!("mern:{id}:a@x.com:secret:extra"),
            format!("mern:{id}:a@x.com:secret:"),
            format!(":mern:{id}:a@x.com:secret"),
            "mern:not-a-uuid:a@x.com:secret".to_string(),
            "mern::a@x.com:secret".to_string(),
            format!("mern:{id}::secret"),
            format!("mern:{id}:a@x.com:"),
        ];

        for case in cases {
            assert_eq!(ApiKey::decode(&case), None, "accepted {case:?}");
        }
    }

    #[test]
    fn test_decode_rejects_non_canonical_uuid() {
        let cases = [
            "mern:67E55044-10B1-426F-9247-BB680E5FE0C8:a@x.com:s",
            "mern:67e5504410b1426f9247bb680e5fe0c8:a@x.com:s",
            "mern:{67e55044-10b1-426f-9247-bb680e5fe0c8}:a@x.com:s",
        ];

        for case in cases {
            assert_eq!(ApiKey::decode(case), None, "accepted {case:?}");
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("c2VjcmV0LXZhbHVl"));
    }
}
