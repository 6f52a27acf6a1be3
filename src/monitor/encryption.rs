use defmt::Format;
use snafu::Snafu;

/// Raw key length in bytes (16 hex characters in the provisioning table).
pub const KEY_LEN: usize = 8;
/// Raw initialization-vector length in bytes (8 hex characters).
pub const IV_LEN: usize = 4;

/// Key material for one monitor, decoded from its provisioning tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub struct MonitorEncryption {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl MonitorEncryption {
    /// Decodes the hex key and IV tokens as they appear in the provisioning
    /// table.
    ///
    /// # Errors
    ///
    /// Returns a `TokenError` if either token has the wrong length or
    /// contains a non-hex character.
    pub fn from_tokens(key: &str, iv: &str) -> Result<Self, TokenError> {
        Ok(Self {
            key: decode_hex(key)?,
            iv: decode_hex(iv)?,
        })
    }

    #[must_use]
    pub const fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    #[must_use]
    pub const fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

#[derive(Debug, Snafu, Format)]
pub enum TokenError {
    #[snafu(display("Expected {} hex characters, got {}", expected, len))]
    InvalidLength { expected: usize, len: usize },
    #[snafu(display("Invalid hex digit"))]
    InvalidDigit,
}

fn decode_hex<const N: usize>(token: &str) -> Result<[u8; N], TokenError> {
    let bytes = token.as_bytes();
    if bytes.len() != N * 2 {
        return Err(TokenError::InvalidLength {
            expected: N * 2,
            len: bytes.len(),
        });
    }

    let mut out = [0u8; N];
    for (byte, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
        *byte = (hex_digit(pair[0])? << 4) | hex_digit(pair[1])?;
    }
    Ok(out)
}

const fn hex_digit(digit: u8) -> Result<u8, TokenError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(TokenError::InvalidDigit),
    }
}
