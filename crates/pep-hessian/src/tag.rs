//! Single-byte Hessian 1.0 wire tags.

/// Null.
pub const NULL: u8 = b'N';
/// Boolean true.
pub const TRUE: u8 = b'T';
/// Boolean false.
pub const FALSE: u8 = b'F';
/// 32-bit signed integer.
pub const INT32: u8 = b'I';
/// 64-bit signed integer.
pub const INT64: u8 = b'L';
/// IEEE-754 binary64.
pub const DOUBLE: u8 = b'D';
/// Epoch-millisecond date.
pub const DATE: u8 = b'd';
/// String non-final chunk.
pub const STRING_CHUNK: u8 = b's';
/// String final chunk.
pub const STRING_FINAL: u8 = b'S';
/// Xml non-final chunk.
pub const XML_CHUNK: u8 = b'x';
/// Xml final chunk.
pub const XML_FINAL: u8 = b'X';
/// Binary non-final chunk.
pub const BINARY_CHUNK: u8 = b'b';
/// Binary final chunk.
pub const BINARY_FINAL: u8 = b'B';
/// Remote reference.
pub const REMOTE: u8 = b'r';
/// List start.
pub const LIST: u8 = b'V';
/// Map start.
pub const MAP: u8 = b'M';
/// List/Map terminator.
pub const END: u8 = b'z';
/// Back-reference.
pub const REF: u8 = b'R';
/// Type-name section inside List/Map/Remote.
pub const TYPE: u8 = b't';
/// Optional length section inside List.
pub const LENGTH: u8 = b'l';

/// Maximum chunk size, in characters (String/Xml) or bytes (Binary).
pub const MAX_CHUNK_SIZE: usize = 32_767;
