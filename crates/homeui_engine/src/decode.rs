use encoding_rs::{CoderResult, Decoder, UTF_8};

/// Stateful incremental UTF-8 decoder for a chunked byte stream.
///
/// A multi-byte sequence split across a chunk boundary is held back until the
/// next chunk completes it, so concatenating everything returned by `push`
/// plus the final `finish` equals decoding the whole body at once. Malformed
/// input decodes to U+FFFD rather than failing.
pub struct ChunkDecoder {
    decoder: Decoder,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self {
            decoder: UTF_8.new_decoder(),
        }
    }

    /// Decodes one chunk, returning the text that is complete so far.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.run(bytes, false)
    }

    /// Final non-streaming decode: flushes any held-back partial sequence.
    pub fn finish(mut self) -> String {
        self.run(&[], true)
    }

    fn run(&mut self, bytes: &[u8], last: bool) -> String {
        let capacity = self
            .decoder
            .max_utf8_buffer_length(bytes.len())
            .unwrap_or(bytes.len() + 4);
        let mut out = String::with_capacity(capacity);
        let (result, _read, _had_replacements) = self.decoder.decode_to_string(bytes, &mut out, last);
        // The output buffer is sized for worst-case expansion, so the decoder
        // always consumes the whole chunk.
        debug_assert_eq!(result, CoderResult::InputEmpty);
        out
    }
}

impl Default for ChunkDecoder {
    fn default() -> Self {
        Self::new()
    }
}
