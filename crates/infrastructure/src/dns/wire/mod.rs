//! DNS wire format (RFC 1035 §4)
//!
//! ```text
//! +---------------------+
//! |        Header       |  12 bytes: id, flags, 4 section counts
//! +---------------------+
//! |       Question      |
//! +---------------------+
//! |        Answer       |
//! +---------------------+
//! |      Authority      |
//! +---------------------+
//! |      Additional     |
//! +---------------------+
//! ```
//!
//! The decoder never reads past the input and never allocates more entries
//! than the input could hold. The encoder writes names uncompressed.

mod decoder;
mod encoder;
mod reader;

pub use decoder::decode;
pub use encoder::encode;

pub(crate) const HEADER_LEN: usize = 12;
pub(crate) const MAX_LABEL_LEN: usize = 63;
pub(crate) const MAX_NAME_LEN: usize = 255;

/// Smallest encoded question: root name + type + class.
pub(crate) const MIN_QUESTION_LEN: usize = 1 + 2 + 2;

/// Smallest encoded resource record: root name + type + class + ttl + rdlength.
pub(crate) const MIN_RECORD_LEN: usize = 1 + 2 + 2 + 4 + 2;
