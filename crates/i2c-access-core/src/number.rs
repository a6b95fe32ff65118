//! Numeric token parsing
//!
//! Tokens are parsed the way C's `strtoull(s, &end, 0)` does: the base is
//! picked from the prefix (`0x` hex, `0` octal, decimal otherwise) and the
//! caller learns whether the whole token was used. Range checks are left to
//! the caller.

/// Result of parsing a numeric token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNumber {
    /// Parsed value (saturated at `u64::MAX`, wrapped when negated)
    pub value: u64,
    /// True when digits were found and nothing trailed them
    pub fully_consumed: bool,
}

impl ParsedNumber {
    /// Value if the token was fully consumed and fits in `max`
    pub fn within(&self, max: u64) -> Option<u64> {
        (self.fully_consumed && self.value <= max).then_some(self.value)
    }
}

/// Parse a token with base auto-detection
pub fn parse_number(token: &str) -> ParsedNumber {
    let bytes = token.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let mut negative = false;
    if let Some(&sign) = bytes.get(pos) {
        if sign == b'+' || sign == b'-' {
            negative = sign == b'-';
            pos += 1;
        }
    }

    let radix = if bytes.get(pos) == Some(&b'0')
        && matches!(bytes.get(pos + 1), Some(b'x') | Some(b'X'))
        && bytes.get(pos + 2).is_some_and(u8::is_ascii_hexdigit)
    {
        pos += 2;
        16
    } else if bytes.get(pos) == Some(&b'0') {
        8
    } else {
        10
    };

    let start = pos;
    let mut value: u64 = 0;
    let mut overflow = false;
    while let Some(digit) = bytes.get(pos).and_then(|&b| (b as char).to_digit(radix)) {
        match value
            .checked_mul(radix as u64)
            .and_then(|v| v.checked_add(digit as u64))
        {
            Some(v) => value = v,
            None => overflow = true,
        }
        pos += 1;
    }

    if pos == start {
        return ParsedNumber {
            value: 0,
            fully_consumed: false,
        };
    }

    if overflow {
        value = u64::MAX;
    } else if negative {
        value = value.wrapping_neg();
    }

    ParsedNumber {
        value,
        fully_consumed: pos == bytes.len(),
    }
}
