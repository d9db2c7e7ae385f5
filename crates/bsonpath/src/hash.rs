//! Rolling multiplicative hash over the raw encoding.

/// Hash seed.
const START_STATE: u32 = 5381;

/// Hashes the raw encoded bytes of a document: `h = h * 33 + byte`,
/// seeded with 5381, over the entire encoding including header and
/// terminator.
///
/// This is representation-based. Two value-equal documents with different
/// encodings (an Int32 and an Int64 holding the same number) hash
/// differently, so a hash index built on this function must pair it with
/// [`binary_equal`](crate::compare::binary_equal), never with value-semantic
/// [`equal`](crate::compare::equal).
pub fn hash(bytes: &[u8]) -> u32 {
    let mut state = START_STATE;
    for &byte in bytes {
        state = (state << 5)
            .wrapping_add(state)
            .wrapping_add(byte as u32);
    }
    state
}
