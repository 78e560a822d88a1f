//! Stateful UTF-8 decoding for byte streams
//!
//! Network chunks are cut wherever the transport pleases, so a multi-byte
//! character may arrive in two (or up to four) pieces. [`Utf8Decoder`] keeps
//! the unfinished tail of the previous chunk and prepends it to the next one.

/// Incremental UTF-8 decoder.
///
/// Malformed sequences are replaced with U+FFFD instead of failing the
/// stream, matching what a lenient text decoder does.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of a character whose remaining bytes have not arrived yet
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a new decoder with no buffered bytes
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, holding back any trailing incomplete character
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let bytes = if self.pending.is_empty() {
            chunk.to_vec()
        } else {
            let mut combined = std::mem::take(&mut self.pending);
            combined.extend_from_slice(chunk);
            combined
        };

        let mut decoded = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    decoded.push_str(valid);
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    decoded.push_str(std::str::from_utf8(&rest[..valid_up_to]).unwrap_or_default());

                    match e.error_len() {
                        Some(invalid_len) => {
                            tracing::warn!(
                                position = valid_up_to,
                                invalid_len,
                                "invalid UTF-8 sequence in stream, substituting replacement character"
                            );
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid_up_to + invalid_len..];
                        }
                        None => {
                            // Unexpected end of input: the character continues in the next chunk
                            self.pending = rest[valid_up_to..].to_vec();
                            break;
                        }
                    }
                }
            }
        }

        decoded
    }

    /// Flush the decoder at end of stream.
    ///
    /// A character that never completed becomes a single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        tracing::warn!(
            bytes = self.pending.len(),
            "stream ended inside a UTF-8 sequence"
        );
        self.pending.clear();
        char::REPLACEMENT_CHARACTER.to_string()
    }

    /// Check if there are incomplete UTF-8 bytes buffered
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Get the number of incomplete UTF-8 bytes buffered
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
