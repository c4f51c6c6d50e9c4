//! Strict parsing of bracketed integer-array cells.
//!
//! Vendor exports store per-row sample arrays as text like
//! `"[60, 60, 30]"`. Only digits, commas, ASCII whitespace, and one pair
//! of brackets are accepted; everything else is rejected instead of
//! being handed to a general literal evaluator.

/// Parse a bracketed integer array.
///
/// `[]` is the empty array. Errors are plain messages; callers attach
/// file and row context.
pub fn parse_int_array(text: &str) -> Result<Vec<i64>, String> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| format!("expected bracketed array, got '{trimmed}'"))?;
    if inner.contains('[') || inner.contains(']') {
        return Err(format!("nested brackets in array '{trimmed}'"));
    }
    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    let mut values = Vec::new();
    for element in inner.split(',') {
        let element = element.trim();
        if element.is_empty() {
            return Err(format!("empty element in array '{trimmed}'"));
        }
        if !element.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid integer '{element}' in array '{trimmed}'"));
        }
        let value: i64 = element
            .parse()
            .map_err(|_| format!("integer out of range '{element}'"))?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_arrays() {
        assert_eq!(parse_int_array("[60, 60, 30]").unwrap(), vec![60, 60, 30]);
        assert_eq!(parse_int_array("[60,60,30]").unwrap(), vec![60, 60, 30]);
        assert_eq!(parse_int_array("[0]").unwrap(), vec![0]);
        assert_eq!(parse_int_array(" [ 7 ] ").unwrap(), vec![7]);
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(parse_int_array("[]").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_int_array("[ ]").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_rejects_unbracketed() {
        assert!(parse_int_array("60, 60").is_err());
        assert!(parse_int_array("[60, 60").is_err());
        assert!(parse_int_array("60, 60]").is_err());
    }

    #[test]
    fn test_rejects_non_integers() {
        assert!(parse_int_array("[60.5]").is_err());
        assert!(parse_int_array("[-60]").is_err());
        assert!(parse_int_array("[+60]").is_err());
        assert!(parse_int_array("[6e1]").is_err());
        assert!(parse_int_array("[sixty]").is_err());
    }

    #[test]
    fn test_rejects_structural_noise() {
        assert!(parse_int_array("[[60]]").is_err());
        assert!(parse_int_array("[60,]").is_err());
        assert!(parse_int_array("[,60]").is_err());
        assert!(parse_int_array("[60 60]").is_err());
        assert!(parse_int_array("[__import__('os')]").is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(parse_int_array("[99999999999999999999]").is_err());
    }
}
