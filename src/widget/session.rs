use std::fmt;

use rand::Rng;
use uuid::Uuid;

const SESSION_PREFIX: &str = "session_";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque id scoping one conversation on the backend. Fixed for the lifetime
/// of a controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Use the injected id when it is present and non-blank, otherwise
    /// generate one locally.
    pub fn resolve(injected: Option<&str>) -> Self {
        match injected.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self::generate(),
        }
    }

    /// `session_` followed by 9 random base-36 characters. Not suitable where
    /// ids must be unguessable; see [`SessionId::secure`].
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{SESSION_PREFIX}{suffix}"))
    }

    pub fn secure() -> Self {
        Self(format!("{SESSION_PREFIX}{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_id_wins() {
        assert_eq!(SessionId::resolve(Some("abc")).as_str(), "abc");
    }

    #[test]
    fn blank_injection_generates() {
        let id = SessionId::resolve(Some("   "));
        assert!(id.as_str().starts_with(SESSION_PREFIX));
    }

    #[test]
    fn generated_suffix_is_base36() {
        let id = SessionId::resolve(None);
        let suffix = id.as_str().strip_prefix(SESSION_PREFIX).unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn secure_ids_differ() {
        assert_ne!(SessionId::secure(), SessionId::secure());
    }
}
