use ssh_key::{HashAlg, PublicKey};

use crate::core::errors::{AuthKeysError, Result};
use crate::core::models::ssh_public_key::SshPublicKey;

/// Key algorithms accepted in an authorized key line.
pub const KNOWN_KEY_TYPES: &[&str] = &[
    "ssh-rsa",
    "ssh-dss",
    "ssh-ed25519",
    "ecdsa-sha2-nistp256",
    "ecdsa-sha2-nistp384",
    "ecdsa-sha2-nistp521",
    "sk-ssh-ed25519@openssh.com",
    "sk-ecdsa-sha2-nistp256@openssh.com",
];

/// Parses `type base64material [comment]` lines into [`SshPublicKey`]s.
pub struct KeyParser;

impl KeyParser {
    /// Parse and validate a single line.
    ///
    /// The material must decode into a complete public key of the
    /// algorithm named by the first field. The comment is everything
    /// after the material, joined with single spaces.
    pub fn parse(raw: &str) -> Result<SshPublicKey> {
        let line = raw.trim();
        if line.contains(['\n', '\r']) {
            return Err(invalid("key must be a single line"));
        }
        let mut fields = line.split_whitespace();

        let key_type = fields.next().ok_or_else(|| invalid("empty key"))?;
        if !KNOWN_KEY_TYPES.contains(&key_type) {
            return Err(invalid(format!("unrecognized key type \"{key_type}\"")));
        }

        let material = fields
            .next()
            .ok_or_else(|| invalid("missing key material"))?;
        let key = PublicKey::from_openssh(&format!("{key_type} {material}"))
            .map_err(|e| invalid(format!("invalid {key_type} key data: {e}")))?;

        let comment = fields.collect::<Vec<_>>().join(" ");
        let comment = (!comment.is_empty()).then_some(comment);

        Ok(SshPublicKey::new(
            key_type.to_string(),
            material.to_string(),
            comment,
            key.fingerprint(HashAlg::Sha256).to_string(),
            line.to_string(),
        ))
    }

    /// Whether `raw` has the shape of a key line rather than a bare id.
    pub fn looks_like_key(raw: &str) -> bool {
        raw.split_whitespace()
            .next()
            .is_some_and(|first| KNOWN_KEY_TYPES.contains(&first))
    }
}

fn invalid(reason: impl Into<String>) -> AuthKeysError {
    AuthKeysError::InvalidKeyFormat {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE: &str =
        "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGqF/jwORIgRvnQB3IxDfR8dgTgzs0tD5Y22B2VPxlg6";
    const KEY_ONE_FINGERPRINT: &str = "SHA256:ypaOARKoebnuSwqUNUCkaiJn9C6xDBwHLjny98fsDnM";
    const RSA_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQCHYN41xpRX7933ELQi9fcAbBiIWsXV2iPNV/a1JgizqzVwQSUdrfayB7w83pgz45FK1MJAmgNTg9hH3nsRauZa33+snHg4UTOHDYofXVdN1ui1l28iFg0EDdo7O4yt86FD9etAlg+/2Q899Iol1VQPCahw5OWn8aARJa2iJagbV6w2+vV7MPIFtysVmDLF2FZBpdqCYMU9sBeDoezAG+SbLKsXmtvD2jHlDO4BazteT0kJyFEHjHvpZ7RLmcJ9zyWTb3KqRwIeY1PS0kpDnUtKVsJzh+wwBJTGl9X+WD3xh1pT1RIJqTkyEDoWrYOLym3hoUcj0K60Gx6gjFUfDuef";
    const RSA_FINGERPRINT: &str = "SHA256:kWzfAehMmMWPI/Rq8rFCwd18xNBuY1Ab2taxt/+Z0ME";

    #[test]
    fn parses_key_without_comment() {
        let key = KeyParser::parse(KEY_ONE).unwrap();
        assert_eq!(key.key_type(), "ssh-ed25519");
        assert_eq!(key.comment(), None);
        assert_eq!(key.fingerprint(), KEY_ONE_FINGERPRINT);
        assert_eq!(key.line(), KEY_ONE);
    }

    #[test]
    fn parses_rsa_key() {
        let key = KeyParser::parse(&format!("{RSA_KEY} ops@bastion")).unwrap();
        assert_eq!(key.key_type(), "ssh-rsa");
        assert_eq!(key.fingerprint(), RSA_FINGERPRINT);
    }

    #[test]
    fn comment_may_contain_spaces() {
        let key = KeyParser::parse(&format!("  {KEY_ONE}   Alice's   laptop  ")).unwrap();
        assert_eq!(key.comment(), Some("Alice's laptop"));
        assert_eq!(key.line(), format!("{KEY_ONE}   Alice's   laptop"));
        assert_eq!(key.to_string(), format!("{KEY_ONE} Alice's laptop"));
    }

    #[test]
    fn fingerprint_ignores_comment() {
        let a = KeyParser::parse(&format!("{KEY_ONE} user@host")).unwrap();
        let b = KeyParser::parse(&format!("{KEY_ONE} another@host")).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn rejects_garbage() {
        let err = KeyParser::parse("invalid-key").unwrap_err();
        assert!(err.to_string().contains("unrecognized key type"));
    }

    #[test]
    fn rejects_empty_line() {
        assert!(KeyParser::parse("   ").is_err());
    }

    #[test]
    fn rejects_missing_material() {
        let err = KeyParser::parse("ssh-ed25519").unwrap_err();
        assert!(err.to_string().contains("missing key material"));
    }

    fn assert_invalid(raw: &str) {
        let err = KeyParser::parse(raw).unwrap_err();
        assert!(
            matches!(err, AuthKeysError::InvalidKeyFormat { .. }),
            "unexpected error for {raw:?}: {err}"
        );
    }

    #[test]
    fn rejects_bad_base64() {
        assert_invalid("ssh-ed25519 not*base64!");
    }

    #[test]
    fn rejects_type_mismatch() {
        let material = KEY_ONE.split_whitespace().nth(1).unwrap();
        assert_invalid(&format!("ssh-rsa {material}"));
    }

    #[test]
    fn rejects_truncated_blob() {
        assert_invalid("ssh-ed25519 AAAA");
    }

    #[test]
    fn rejects_blob_with_only_type_name() {
        assert_invalid("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5");
    }

    #[test]
    fn rejects_short_ed25519_key() {
        assert_invalid("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAAQA=");
    }

    #[test]
    fn rejects_multiple_lines() {
        let err = KeyParser::parse(&format!("{KEY_ONE} c\n{KEY_ONE}")).unwrap_err();
        assert!(err.to_string().contains("single line"));
        assert_invalid(&format!("{KEY_ONE}\r\n{KEY_ONE}"));
    }

    #[test]
    fn surrounding_newline_is_trimmed() {
        let key = KeyParser::parse(&format!("{KEY_ONE}\n")).unwrap();
        assert_eq!(key.line(), KEY_ONE);
    }

    #[test]
    fn looks_like_key_checks_first_field() {
        assert!(KeyParser::looks_like_key(KEY_ONE));
        assert!(!KeyParser::looks_like_key(KEY_ONE_FINGERPRINT));
        assert!(!KeyParser::looks_like_key("user@host"));
    }
}
