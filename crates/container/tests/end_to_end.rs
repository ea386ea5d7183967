use std::path::{Path, PathBuf};

use avimosh_common::config::MoshConfig;
use avimosh_common::error::MoshError;
use avimosh_container::{inspect, MoshSession};
use avimosh_processing_core::EffectMode;

/// Chunk payload lengths for the synthetic movie: (is_audio, payload_len).
const CHUNKS: &[(bool, usize)] = &[
    (false, 400),
    (true, 64),
    (false, 120),
    (true, 64),
    (false, 130),
    (true, 64),
    (false, 125),
    (true, 64),
    (false, 140),
];

fn chunk(id: &[u8; 4], len: usize, fill: u8) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(len as u32).to_le_bytes());
    out.extend(std::iter::repeat(fill).take(len));
    out
}

/// RIFF/AVI-shaped bytes: header list, `movi` list of chunks, `idx1`.
/// Returns the file bytes and the byte range of the `movi` region.
fn synthetic_avi() -> (Vec<u8>, std::ops::Range<usize>) {
    let mut header = b"RIFF\0\0\0\0AVI LIST\x20\0\0\0hdrlavih".to_vec();
    header.extend(std::iter::repeat(0x11).take(2100));
    header.extend_from_slice(b"LIST\0\0\0\0");

    let mut movi = b"movi".to_vec();
    for (i, &(audio, len)) in CHUNKS.iter().enumerate() {
        let id = if audio { b"01wb" } else { b"00dc" };
        movi.extend(chunk(id, len, 0x41 + i as u8));
    }

    let mut index = b"idx1".to_vec();
    index.extend_from_slice(&(16u32 * CHUNKS.len() as u32).to_le_bytes());
    index.extend(std::iter::repeat(0x22).take(16 * CHUNKS.len()));

    let start = header.len();
    let end = start + movi.len();
    let mut file = header;
    file.extend(movi);
    file.extend(index);
    (file, start..end)
}

fn write_input(dir: &Path) -> (PathBuf, Vec<u8>, std::ops::Range<usize>) {
    let (bytes, movi) = synthetic_avi();
    let path = dir.join("clip.avi");
    std::fs::write(&path, &bytes).unwrap();
    (path, bytes, movi)
}

fn config(input: &Path, mode: &str) -> MoshConfig {
    let mut config = MoshConfig::new(input);
    config.mode = mode.to_string();
    config.preserve_audio = true;
    config.keep_first_frame = false;
    config.kill_ratio = 1.0;
    config.seed = Some(42);
    config
}

#[test]
fn void_mode_reproduces_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let (input, bytes, _) = write_input(dir.path());

    let report = MoshSession::new(&config(&input, "void")).run().unwrap();

    assert_eq!(report.output, dir.path().join("clip-void.avi"));
    assert_eq!(report.applied_mode, EffectMode::Void);
    assert_eq!(report.table_frames, CHUNKS.len());
    assert_eq!(report.final_frames, CHUNKS.len());
    assert_eq!(std::fs::read(&report.output).unwrap(), bytes);
}

#[test]
fn reverse_mode_reverses_chunks_and_keeps_framing() {
    let dir = tempfile::tempdir().unwrap();
    let (input, bytes, movi) = write_input(dir.path());

    let report = MoshSession::new(&config(&input, "reverse")).run().unwrap();
    let out = std::fs::read(&report.output).unwrap();

    assert_eq!(out.len(), bytes.len());
    assert_eq!(out[..movi.start + 4], bytes[..movi.start + 4]);
    assert_eq!(out[movi.end..], bytes[movi.end..]);

    // The last chunk of the input is now first.
    let (_, last_len) = CHUNKS[CHUNKS.len() - 1];
    let first_out = &out[movi.start + 4..movi.start + 4 + 8 + last_len];
    assert_eq!(&first_out[..4], b"00dc");
    assert!(first_out[8..].iter().all(|b| *b == 0x41 + (CHUNKS.len() - 1) as u8));
}

#[test]
fn output_length_tracks_payload_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let (input, bytes, movi) = write_input(dir.path());

    let mut cfg = config(&input, "bloom");
    cfg.count = 4;
    cfg.position = 2;
    let report = MoshSession::new(&cfg).run().unwrap();
    let out = std::fs::read(&report.output).unwrap();

    assert_eq!(report.output, dir.path().join("clip-bloom-c4-n2.avi"));
    assert_eq!(report.final_frames, CHUNKS.len() + 3);
    let header_and_index = bytes.len() - movi.len();
    assert_eq!(
        out.len() as u64,
        header_and_index as u64 + 4 + report.reassembly.payload_bytes
    );
}

#[test]
fn keep_first_frame_duplicates_the_first_video_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let (input, bytes, _) = write_input(dir.path());

    let mut cfg = config(&input, "void");
    cfg.keep_first_frame = true;
    let report = MoshSession::new(&cfg).run().unwrap();

    assert_eq!(report.clean_frames, CHUNKS.len() + 1);
    let out = std::fs::read(&report.output).unwrap();
    assert_eq!(out.len(), bytes.len() + 8 + CHUNKS[0].1);
}

#[test]
fn kill_ratio_drops_the_oversized_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let (input, _, _) = write_input(dir.path());

    let mut cfg = config(&input, "void");
    cfg.kill_ratio = 0.7;
    let report = MoshSession::new(&cfg).run().unwrap();

    // Only the 400-byte first chunk exceeds 70% of the largest frame.
    assert_eq!(report.clean_frames, CHUNKS.len() - 1);
}

#[test]
fn seeded_random_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let (input, bytes, _) = write_input(dir.path());
    let cfg = config(&input, "random");

    let first = MoshSession::new(&cfg).run().unwrap();
    let a = std::fs::read(&first.output).unwrap();
    let second = MoshSession::new(&cfg).run().unwrap();
    let b = std::fs::read(&second.output).unwrap();

    assert_eq!(first.seed, 42);
    assert_eq!(a, b);
    assert_eq!(a.len(), bytes.len());
}

#[test]
fn unknown_mode_falls_back_to_void() {
    let dir = tempfile::tempdir().unwrap();
    let (input, bytes, _) = write_input(dir.path());

    let report = MoshSession::new(&config(&input, "exponential")).run().unwrap();

    assert_eq!(report.applied_mode, EffectMode::Void);
    assert_eq!(report.output, dir.path().join("clip-exponential.avi"));
    assert_eq!(std::fs::read(&report.output).unwrap(), bytes);
}

#[test]
fn bad_parameters_fail_before_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let (input, _, _) = write_input(dir.path());

    let mut cfg = config(&input, "bloom");
    cfg.position = 500;
    let err = MoshSession::new(&cfg).run().unwrap_err();

    assert!(matches!(err, MoshError::ParameterOutOfRange { .. }));
    assert!(!dir.path().join("clip-bloom-n500.avi").exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir.path().join("absent.avi"), "void");
    let err = MoshSession::new(&cfg).run().unwrap_err();
    assert!(matches!(err, MoshError::FileNotFound { .. }));
}

#[test]
fn inspect_reports_regions_and_frames() {
    let dir = tempfile::tempdir().unwrap();
    let (input, bytes, movi) = write_input(dir.path());

    let mut cfg = config(&input, "void");
    cfg.kill_ratio = 0.7;
    let report = inspect(&cfg).unwrap();

    assert!(report.movi_found && report.idx1_found);
    assert_eq!(report.header_len, movi.start as u64);
    assert_eq!(report.data_len, movi.len() as u64);
    assert_eq!(
        report.header_len + report.data_len + report.index_len,
        bytes.len() as u64
    );
    assert_eq!(report.table.frames, CHUNKS.len());
    assert_eq!(report.table.audio_frames, 4);
    assert_eq!(report.rejected_frames, 1);
    assert_eq!(report.clean_frames, CHUNKS.len() - 1);
    assert!(!dir.path().join("clip-void.avi").exists());
}

#[test]
fn missing_movi_tag_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.avi");
    let bytes = b"RIFF\0\0\0\0AVI nothing-here".to_vec();
    std::fs::write(&input, &bytes).unwrap();

    let report = MoshSession::new(&config(&input, "void")).run().unwrap();

    assert!(!report.movi_found);
    assert_eq!(report.table_frames, 0);
    assert_eq!(report.reassembly.tag_bytes, 0);
    assert_eq!(std::fs::read(&report.output).unwrap(), bytes);
}

#[test]
fn mode_with_path_separators_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (input, _, _) = write_input(dir.path());

    for mode in ["../x", "a/b", ".."] {
        let err = MoshSession::new(&config(&input, mode)).run().unwrap_err();
        assert!(matches!(err, MoshError::Config { .. }), "{mode}: {err}");
    }
    assert!(!dir.path().parent().unwrap().join("clip-x.avi").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
