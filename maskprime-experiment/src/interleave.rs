use crate::error::SequenceError;

/// Inserts the whole separator sequence after every chunk of at most `n`
/// main items, including after the final, possibly short, chunk. This is the
/// block/break structure: every `n` test trials are followed by one break.
///
/// A main sequence of length zero or one is returned unchanged; a
/// single-trial pool never gets a break.
pub fn interleave<T: Clone>(
    separator: &[T],
    main: Vec<T>,
    n: usize,
) -> Result<Vec<T>, SequenceError> {
    if n == 0 {
        return Err(SequenceError::ChunkSize);
    }
    if main.len() <= 1 {
        return Ok(main);
    }

    let mut out = Vec::with_capacity(main.len() + main.len().div_ceil(n) * separator.len());
    for chunk in main.chunks(n) {
        out.extend_from_slice(chunk);
        out.extend_from_slice(separator);
    }
    Ok(out)
}
