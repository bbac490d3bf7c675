//! Decoder configuration

/// Initial size of the read window
pub const DEFAULT_BUFFER_CAPACITY: usize = 8192;

/// Largest single token (tag, text run, comment...) the reader will buffer
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 16 * 1024 * 1024;

/// Knobs for [`Decoder`](crate::Decoder) and [`StreamReader`](crate::reader::StreamReader)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Bytes requested from the source per read; the window grows past this
    /// only while a single token is larger than it
    pub buffer_capacity: usize,
    /// Tokens larger than this are reported as malformed
    pub max_token_size: usize,
    /// Strict mode reports malformed markup; lenient mode recovers from it
    pub strict: bool,
}

impl DecoderOptions {
    /// Options that recover from malformed markup instead of failing
    ///
    /// Stray `<` become text, unknown entities stay literal, invalid UTF-8 is
    /// replaced, mismatched end tags are tolerated and elements still open at
    /// end of input are closed implicitly.
    pub fn lenient() -> Self {
        DecoderOptions {
            strict: false,
            ..Self::default()
        }
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }

    pub fn with_max_token_size(mut self, size: usize) -> Self {
        self.max_token_size = size;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_token_size: DEFAULT_MAX_TOKEN_SIZE,
            strict: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let options = DecoderOptions::default();
        assert!(options.strict);
        assert_eq!(options.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert!(!DecoderOptions::lenient().strict);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let options = DecoderOptions::default().with_buffer_capacity(0);
        assert_eq!(options.buffer_capacity, 1);
    }
}
