//! Line-breaking base64 encode and tolerant decode between two
//! [`ByteBuffer`]s.
//!
//! Neither direction fails other than by allocation: the encoder always
//! produces valid output for any input, and the decoder silently drops any
//! byte that is not part of the alphabet (CRLF, other whitespace, or stray
//! noise), recovering whatever whole 3-byte groups a truncated final quantum
//! allows.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use pep_buffer::ByteBuffer;

/// Default line-break length in encoded characters.
pub const DEFAULT_LINE_SIZE: usize = 64;

/// Disables line-breaking entirely when passed as `linesize`.
pub const NO_LINE_BREAK: i64 = -1000;

const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn decode_table() -> [i8; 256] {
    let mut table = [-1i8; 256];
    for (i, &b) in ALPHABET.iter().enumerate() {
        table[b as usize] = i as i8;
    }
    table
}

fn encode_block(input: &[u8], in_len: usize) -> [u8; 4] {
    let b0 = input[0];
    let b1 = if in_len > 1 { input[1] } else { 0 };
    let b2 = if in_len > 2 { input[2] } else { 0 };
    [
        ALPHABET[(b0 >> 2) as usize],
        ALPHABET[(((b0 & 0x03) << 4) | ((b1 & 0xf0) >> 4)) as usize],
        if in_len > 1 {
            ALPHABET[(((b1 & 0x0f) << 2) | ((b2 & 0xc0) >> 6)) as usize]
        } else {
            b'='
        },
        if in_len > 2 {
            ALPHABET[(b2 & 0x3f) as usize]
        } else {
            b'='
        },
    ]
}

fn decode_block(input: &[u8; 4]) -> [u8; 3] {
    [
        (input[0] << 2) | (input[1] >> 4),
        (input[1] << 4) | (input[2] >> 2),
        ((input[2] << 6) & 0xc0) | input[3],
    ]
}

/// Encode the unread region of `inbuf` into `outbuf`, without line breaks.
pub fn encode(inbuf: &mut ByteBuffer, outbuf: &mut ByteBuffer) {
    encode_l(inbuf, outbuf, NO_LINE_BREAK);
}

/// Encode the unread region of `inbuf` into `outbuf`, inserting a CRLF every
/// `linesize` encoded characters (and a final CRLF at end of input) when
/// `linesize != NO_LINE_BREAK`. Values below 4 (and not `NO_LINE_BREAK`) are
/// replaced by [`DEFAULT_LINE_SIZE`].
pub fn encode_l(inbuf: &mut ByteBuffer, outbuf: &mut ByteBuffer, linesize: i64) {
    let linesize = if linesize != NO_LINE_BREAK && linesize < 4 {
        DEFAULT_LINE_SIZE as i64
    } else {
        linesize
    };

    let mut written_since_break: usize = 0;
    let mut chunk = [0u8; 3];

    while !inbuf.is_eof() {
        let mut in_len = 0;
        chunk = [0u8; 3];
        for slot in chunk.iter_mut() {
            match inbuf.pop_byte() {
                Some(b) => {
                    *slot = b;
                    in_len += 1;
                }
                None => break,
            }
        }
        if in_len > 0 {
            let out = encode_block(&chunk, in_len);
            outbuf.push_bytes(&out);
            written_since_break += out.len();
        }
        if linesize != NO_LINE_BREAK
            && (written_since_break >= linesize as usize || inbuf.is_eof())
        {
            outbuf.push_bytes(b"\r\n");
            written_since_break = 0;
        }
    }
}

/// Decode the unread region of `inbuf` into `outbuf`, ignoring any byte that
/// is not part of the base64 alphabet.
pub fn decode(inbuf: &mut ByteBuffer, outbuf: &mut ByteBuffer) {
    let table = decode_table();
    let mut quantum = [0u8; 4];

    while !inbuf.is_eof() {
        let mut in_len = 0;
        quantum = [0u8; 4];
        while in_len < 4 {
            let Some(c) = inbuf.pop_byte() else {
                break;
            };
            let idx = table[c as usize];
            if idx >= 0 {
                quantum[in_len] = idx as u8;
                in_len += 1;
            }
        }
        if in_len > 0 {
            let out = decode_block(&quantum);
            outbuf.push_bytes(&out[..in_len.saturating_sub(1)]);
        }
    }
}
