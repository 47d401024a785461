use super::DecodeError;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// longest token accepted, well above any number or name the protocol carries
pub const MAX_TOKEN_LEN: usize = 64;

/// Splits an async byte stream into whitespace separated tokens.
///
/// Reading stops right after the whitespace byte ending a token, so nothing
/// past the current record is ever waited on.
pub struct TokenReader<R> {
    reader: R,
}

impl<R: AsyncBufRead + Unpin> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// `Ok(None)` when the stream ends before any byte of a new token
    pub async fn next_token(&mut self) -> Result<Option<String>, DecodeError> {
        let mut token = Vec::new();
        loop {
            let buf = self.reader.fill_buf().await.map_err(DecodeError::Io)?;
            if buf.is_empty() {
                break; // eof
            }

            let mut consumed = 0;
            let mut complete = false;
            let mut too_long = false;
            for &byte in buf {
                if byte.is_ascii_whitespace() {
                    consumed += 1;
                    if token.is_empty() {
                        continue;
                    }
                    complete = true;
                    break;
                }
                if token.len() == MAX_TOKEN_LEN {
                    too_long = true;
                    break;
                }
                consumed += 1;
                token.push(byte);
            }
            self.reader.consume(consumed);

            if too_long {
                return Err(DecodeError::Malformed {
                    expected: "a token of at most 64 bytes",
                    token: String::from_utf8_lossy(&token).into_owned(),
                });
            }
            if complete {
                break;
            }
        }

        if token.is_empty() {
            return Ok(None);
        }
        String::from_utf8(token)
            .map(Some)
            .map_err(|e| DecodeError::Malformed {
                expected: "utf-8 text",
                token: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            })
    }

    /// next token, the stream ending here is an error
    pub async fn expect_token(&mut self, expected: &'static str) -> Result<String, DecodeError> {
        self.next_token()
            .await?
            .ok_or(DecodeError::UnexpectedEof { expected })
    }

    pub async fn expect<T: FromStr>(&mut self, expected: &'static str) -> Result<T, DecodeError> {
        let token = self.expect_token(expected).await?;
        parse_token(token, expected)
    }

    /// like [`TokenReader::expect`] but a stream ending before the token is `Ok(None)`
    pub async fn first<T: FromStr>(
        &mut self,
        expected: &'static str,
    ) -> Result<Option<T>, DecodeError> {
        match self.next_token().await? {
            Some(token) => parse_token(token, expected).map(Some),
            None => Ok(None),
        }
    }

    pub async fn expect_char(&mut self, expected: &'static str) -> Result<char, DecodeError> {
        let token = self.expect_token(expected).await?;
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(DecodeError::Malformed { expected, token }),
        }
    }
}

fn parse_token<T: FromStr>(token: String, expected: &'static str) -> Result<T, DecodeError> {
    token
        .parse()
        .map_err(|_| DecodeError::Malformed { expected, token })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn splits_on_any_whitespace() {
        let mut tokens = TokenReader::new(&b"  a\tbc\n\n d \r\n"[..]);
        assert_eq!(tokens.next_token().await.unwrap().as_deref(), Some("a"));
        assert_eq!(tokens.next_token().await.unwrap().as_deref(), Some("bc"));
        assert_eq!(tokens.next_token().await.unwrap().as_deref(), Some("d"));
        assert_eq!(tokens.next_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_token_without_trailing_whitespace() {
        let mut tokens = TokenReader::new(&b"12 34"[..]);
        assert_eq!(tokens.expect::<i32>("a").await.unwrap(), 12);
        assert_eq!(tokens.expect::<i32>("b").await.unwrap(), 34);
        assert!(matches!(
            tokens.expect::<i32>("c").await,
            Err(DecodeError::UnexpectedEof { expected: "c" })
        ));
    }

    #[tokio::test]
    async fn malformed_token_names_the_field() {
        let mut tokens = TokenReader::new(&b"1.5x "[..]);
        match tokens.expect::<f32>("ball x").await {
            Err(DecodeError::Malformed { expected, token }) => {
                assert_eq!(expected, "ball x");
                assert_eq!(token, "1.5x");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn endless_token_is_cut_off() {
        let endless = vec![b'7'; 4096];
        let mut tokens = TokenReader::new(&endless[..]);
        match tokens.next_token().await {
            Err(DecodeError::Malformed { token, .. }) => assert_eq!(token.len(), MAX_TOKEN_LEN),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn token_at_the_limit_is_accepted() {
        let input = format!("{} 1", "A".repeat(MAX_TOKEN_LEN));
        let mut tokens = TokenReader::new(input.as_bytes());
        assert_eq!(
            tokens.next_token().await.unwrap().map(|t| t.len()),
            Some(MAX_TOKEN_LEN)
        );
        assert_eq!(tokens.expect::<i32>("one").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn first_is_none_on_clean_eof() {
        let mut tokens = TokenReader::new(&b" \n "[..]);
        assert_eq!(tokens.first::<u64>("counter").await.unwrap(), None);
    }

    #[tokio::test]
    async fn char_token_must_be_a_single_character() {
        let mut tokens = TokenReader::new(&b"N HALT "[..]);
        assert_eq!(tokens.expect_char("referee").await.unwrap(), 'N');
        assert!(matches!(
            tokens.expect_char("referee").await,
            Err(DecodeError::Malformed { .. })
        ));
    }
}
