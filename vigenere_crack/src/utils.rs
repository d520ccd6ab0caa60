//! Utility functions shared by the cipher and the analysis passes

/// Fold a symbol to its uppercase form.
///
/// Symbols whose uppercase form is more than one character (e.g. `ß`) are
/// returned unchanged so that folding stays a one-to-one symbol mapping.
pub fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Render `symbol` in the case of `original`.
pub fn match_case(symbol: char, original: char) -> char {
    if original.is_lowercase() {
        let mut lower = symbol.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) => l,
            _ => symbol,
        }
    } else {
        symbol
    }
}

/// Shift an alphabet index, wrapping with a non-negative modulo.
pub fn shift_index(index: usize, shift: i64, size: usize) -> usize {
    if size == 0 {
        return index;
    }
    (index as i64 + shift).rem_euclid(size as i64) as usize
}
