//! RIFF tags and fixed-pattern byte search.

/// Length of every tag and chunk signature.
pub const TAG_LEN: usize = 4;

/// Start of the interleaved-data region.
pub const MOVI: [u8; TAG_LEN] = *b"movi";

/// Start of the trailing chunk index.
pub const IDX1: [u8; TAG_LEN] = *b"idx1";

/// Video chunk of stream 0 (compressed).
pub const VIDEO_SIGNATURE: [u8; TAG_LEN] = *b"00dc";

/// Audio chunk of stream 1.
pub const AUDIO_SIGNATURE: [u8; TAG_LEN] = *b"01wb";

/// First occurrence of `needle` in `haystack`.
pub fn find_first(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
