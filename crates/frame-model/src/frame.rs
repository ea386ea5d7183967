//! Frame descriptors.

use serde::{Deserialize, Serialize};

use crate::tags::{AUDIO_SIGNATURE, TAG_LEN, VIDEO_SIGNATURE};

/// Which chunk signature a frame was found by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Video,
    Audio,
}

impl FrameKind {
    /// The four-byte signature that starts chunks of this kind.
    pub fn signature(self) -> &'static [u8; TAG_LEN] {
        match self {
            FrameKind::Video => &VIDEO_SIGNATURE,
            FrameKind::Audio => &AUDIO_SIGNATURE,
        }
    }

    /// Kind for a four-byte chunk id, if it is one we index.
    pub fn from_signature(bytes: &[u8]) -> Option<Self> {
        [FrameKind::Video, FrameKind::Audio]
            .into_iter()
            .find(|kind| kind.signature() == bytes)
    }
}

/// One media chunk inside the interleaved-data region.
///
/// A value record: the effect pipeline freely copies and repeats frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// Byte position of the chunk signature within the region.
    pub offset: u64,

    /// Distance to the next frame, or to the end of the region.
    pub size: u64,

    pub kind: FrameKind,
}

impl Frame {
    pub fn new(offset: u64, size: u64, kind: FrameKind) -> Self {
        Self { offset, size, kind }
    }

    /// Placeholder entry that reassembly skips.
    pub fn is_sentinel(&self) -> bool {
        self.offset == 0 && self.size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_signature_roundtrip() {
        for kind in [FrameKind::Video, FrameKind::Audio] {
            assert_eq!(FrameKind::from_signature(kind.signature()), Some(kind));
        }
        assert_eq!(FrameKind::from_signature(b"02tx"), None);
    }

    #[test]
    fn test_sentinel() {
        assert!(Frame::new(0, 0, FrameKind::Video).is_sentinel());
        assert!(!Frame::new(0, 8, FrameKind::Video).is_sentinel());
        assert!(!Frame::new(4, 0, FrameKind::Audio).is_sentinel());
    }

    #[test]
    fn test_serde_shape() {
        let frame = Frame::new(4, 16, FrameKind::Audio);
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"offset":4,"size":16,"kind":"audio"}"#);
    }
}
