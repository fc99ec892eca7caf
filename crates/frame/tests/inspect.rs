//! Frame inspection without decompression.

use frame::inspect::{self, frames};
use frame::registry::codes;
use frame::{
    Compressor, Decompressor, ErrorKind, FrameError, frame_compressed_size, frame_content_size,
};

fn framed(data: &[u8]) -> Vec<u8> {
    Compressor::new(None)
        .expect("compressor")
        .compress_to_vec(data)
        .expect("compress")
}

#[test]
fn content_size_matches_input_length() {
    for len in [0usize, 1, 280, 10_000] {
        let data = vec![b'z'; len];
        assert_eq!(frame_content_size(&framed(&data)), Ok(len as u64));
    }
}

#[test]
fn unknown_and_malformed_are_distinct() {
    let streamed = zstd::stream::encode_all(&b"streamed payload"[..], 3).expect("encode");
    let unknown = frame_content_size(&streamed).expect_err("no size field");
    let malformed = frame_content_size(b"\x00\x01\x02\x03\x04\x05").expect_err("not a frame");

    assert_eq!(unknown.kind(), ErrorKind::ContentSizeUnknown);
    assert_eq!(malformed.kind(), ErrorKind::BadFrame);
    assert_ne!(unknown, malformed);
}

#[test]
fn compressed_size_is_a_decodable_prefix() {
    let first = b"alpha ".repeat(40);
    let second = b"beta ".repeat(30);
    let mut packed = framed(&first);
    let first_len = packed.len();
    packed.extend(framed(&second));

    let n = frame_compressed_size(&packed).expect("first frame");
    assert_eq!(n, first_len);

    let mut decompressor = Decompressor::new(0).expect("decompressor");
    let restored = decompressor
        .decompress_to_vec(&packed[..n])
        .expect("prefix decodes");
    assert_eq!(restored, first);
}

#[test]
fn truncated_frame_reports_untagged_code() {
    let compressed = framed(&b"payload ".repeat(64));
    let truncated = &compressed[..compressed.len() - 1];
    let err = frame_compressed_size(truncated).expect_err("truncated");
    assert!(matches!(err, FrameError::Code(_)));
    assert_eq!(
        err.code().map(|code| code.code()),
        Some(codes::SRC_SIZE_WRONG)
    );
}

#[test]
fn frames_splits_packed_buffer() {
    let payloads: [&[u8]; 3] = [b"one", b"two two", b"three three three"];
    let packed: Vec<u8> = payloads.iter().flat_map(|p| framed(p)).collect();

    let mut decompressor = Decompressor::new(0).expect("decompressor");
    let decoded: Vec<Vec<u8>> = frames(&packed)
        .map(|frame| {
            let frame = frame.expect("well-formed frame");
            decompressor.decompress_to_vec(frame).expect("decompress")
        })
        .collect();

    assert_eq!(decoded.len(), payloads.len());
    for (decoded, expected) in decoded.iter().zip(payloads) {
        assert_eq!(decoded.as_slice(), expected);
    }
}

#[test]
fn frames_reports_trailing_garbage_once() {
    let mut packed = framed(b"good frame");
    packed.extend_from_slice(b"trailing garbage");

    let mut iter = inspect::frames(&packed);
    assert!(matches!(iter.next(), Some(Ok(_))));
    assert!(matches!(iter.next(), Some(Err(_))));
    assert!(iter.next().is_none());
}
