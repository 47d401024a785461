use super::{DecodeError, TokenReader, COMPAT_VERSION, PROTOCOL_NAME};
use std::fmt;
use tokio::io::AsyncBufRead;

/// What the host opens the session with: `<protocol_name> <version>`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HandshakeRequest {
    pub protocol_name: String,
    pub protocol_version: i64,
}

impl HandshakeRequest {
    pub fn is_compatible(&self) -> bool {
        self.protocol_name == PROTOCOL_NAME && self.protocol_version == COMPAT_VERSION
    }

    pub fn reply(&self) -> HandshakeReply {
        if self.is_compatible() {
            HandshakeReply::Compatible(COMPAT_VERSION)
        } else {
            HandshakeReply::NotCompatible(COMPAT_VERSION)
        }
    }
}

/// Both variants carry the version this client speaks, not the offered one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandshakeReply {
    Compatible(i64),
    NotCompatible(i64),
}

impl HandshakeReply {
    pub fn is_compatible(&self) -> bool {
        matches!(self, HandshakeReply::Compatible(_))
    }
}

impl fmt::Display for HandshakeReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeReply::Compatible(version) => write!(f, "COMPATIBLE {}", version),
            HandshakeReply::NotCompatible(version) => write!(f, "NOT_COMPATIBLE {}", version),
        }
    }
}

/// `Ok(None)` if the host hung up before saying anything
pub async fn read_handshake<R: AsyncBufRead + Unpin>(
    tokens: &mut TokenReader<R>,
) -> Result<Option<HandshakeRequest>, DecodeError> {
    let Some(protocol_name) = tokens.next_token().await? else {
        return Ok(None);
    };
    let protocol_version = tokens.expect("protocol version").await?;
    Ok(Some(HandshakeRequest {
        protocol_name,
        protocol_version,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn reply_to(input: &str) -> HandshakeReply {
        let mut tokens = TokenReader::new(input.as_bytes());
        read_handshake(&mut tokens)
            .await
            .unwrap()
            .expect("a handshake")
            .reply()
    }

    #[tokio::test]
    async fn accepts_expected_name_and_version() {
        let reply = reply_to("ROBOIME_INTEL_PROTOCOL_VERSION 1\n").await;
        assert!(reply.is_compatible());
        assert_eq!(reply.to_string(), "COMPATIBLE 1");
    }

    #[tokio::test]
    async fn rejects_other_versions_with_own_version() {
        for input in [
            "ROBOIME_INTEL_PROTOCOL_VERSION 2\n",
            "ROBOIME_INTEL_PROTOCOL_VERSION 0\n",
            "ROBOIME_INTEL_PROTOCOL_VERSION -1\n",
        ] {
            let reply = reply_to(input).await;
            assert!(!reply.is_compatible());
            assert_eq!(reply.to_string(), "NOT_COMPATIBLE 1");
        }
    }

    #[tokio::test]
    async fn rejects_other_protocol_names() {
        for input in [
            "ROBOIME_AI_PROTOCOL 1\n",
            "roboime_intel_protocol_version 1\n",
            "ROBOIME_INTEL_PROTOCOL_VERSION_2 1\n",
        ] {
            assert_eq!(reply_to(input).await.to_string(), "NOT_COMPATIBLE 1");
        }
    }

    #[tokio::test]
    async fn silent_host_is_not_a_handshake() {
        let mut tokens = TokenReader::new(&b""[..]);
        assert_eq!(read_handshake(&mut tokens).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_or_bad_version_is_a_decode_error() {
        let mut tokens = TokenReader::new(&b"ROBOIME_INTEL_PROTOCOL_VERSION"[..]);
        assert!(matches!(
            read_handshake(&mut tokens).await,
            Err(DecodeError::UnexpectedEof { .. })
        ));

        let mut tokens = TokenReader::new(&b"ROBOIME_INTEL_PROTOCOL_VERSION one\n"[..]);
        assert!(matches!(
            read_handshake(&mut tokens).await,
            Err(DecodeError::Malformed { .. })
        ));
    }
}
