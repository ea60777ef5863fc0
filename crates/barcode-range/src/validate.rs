//! Pure field validators.
//!
//! The string predicates ([`is_guid`], [`is_account_number`]) are always
//! available. The JSON-value predicates operate on already-parsed
//! `serde_json::Value`s and are enabled by the `json` feature; they reproduce
//! the loose truthiness and number-coercion rules clients of the allocation
//! API already rely on, so an absent field (`None`) is distinct from `null`.

/// Returns `true` if `s` has the textual shape of a version 1-5 UUID.
///
/// Groups are 8-4-4-4-12 hex digits (either case). The first digit of the
/// third group must be `1`-`5` and the first digit of the fourth group one of
/// `8`, `9`, `a`, `b`.
///
/// # Example
/// ```
/// use barcode_range::is_guid;
///
/// assert!(is_guid("550e8400-e29b-41d4-a716-446655440000"));
/// assert!(!is_guid("550e8400-e29b-61d4-a716-446655440000"));
/// ```
pub fn is_guid(s: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }

    let mut pos = 0;
    for (i, &len) in GROUPS.iter().enumerate() {
        if i > 0 {
            if bytes[pos] != b'-' {
                return false;
            }
            pos += 1;
        }
        let group = &bytes[pos..pos + len];
        if !group.iter().all(u8::is_ascii_hexdigit) {
            return false;
        }
        match i {
            2 if !matches!(group[0], b'1'..=b'5') => return false,
            3 if !matches!(group[0], b'8' | b'9' | b'a' | b'b' | b'A' | b'B') => return false,
            _ => {}
        }
        pos += len;
    }
    true
}

/// Returns `true` if `s` is exactly ten ASCII digits.
pub fn is_account_number(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Length of `s` in UTF-16 code units, the unit field length limits are
/// counted in.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Returns `true` if a trimmed string converts to a number (not NaN).
///
/// Blank strings convert to zero. Accepted forms are an optionally signed
/// decimal (`12`, `-1.5`, `.5`, `5.`, `1e3`), an optionally signed
/// `Infinity`, and unsigned `0x`/`0o`/`0b` integer literals.
pub fn is_numeric_str(s: &str) -> bool {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return true;
    }

    let bytes = s.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let digits = &bytes[2..];
        let radix_ok = match bytes[1] {
            b'x' | b'X' => Some(digits.iter().all(u8::is_ascii_hexdigit)),
            b'o' | b'O' => Some(digits.iter().all(|&b| matches!(b, b'0'..=b'7'))),
            b'b' | b'B' => Some(digits.iter().all(|&b| matches!(b, b'0' | b'1'))),
            _ => None,
        };
        if let Some(ok) = radix_ok {
            return ok;
        }
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned == "Infinity" || is_decimal_literal(unsigned.as_bytes())
}

/// `digits [. digits?] [exp]` or `. digits [exp]`, with no sign.
fn is_decimal_literal(bytes: &[u8]) -> bool {
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut rest = &bytes[int_len..];

    let mut frac_len = 0;
    if let Some((&b'.', tail)) = rest.split_first() {
        frac_len = tail.iter().take_while(|b| b.is_ascii_digit()).count();
        rest = &tail[frac_len..];
    }
    if int_len == 0 && frac_len == 0 {
        return false;
    }

    match rest.split_first() {
        None => true,
        Some((&(b'e' | b'E'), exp)) => {
            let exp = match exp.split_first() {
                Some((&(b'+' | b'-'), tail)) => tail,
                _ => exp,
            };
            !exp.is_empty() && exp.iter().all(u8::is_ascii_digit)
        }
        Some(_) => false,
    }
}

#[cfg(feature = "json")]
mod json {
    use super::is_numeric_str;
    use serde_json::Value;

    /// Returns `true` for the values treated as a missing field: absent,
    /// `null`, the empty string, and an empty object or array.
    ///
    /// `0` and `false` are present values.
    pub fn is_empty(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Bool(_) | Value::Number(_)) => false,
        }
    }

    /// Returns `true` if `value` converts to a number that is not NaN.
    ///
    /// Numbers, booleans and `null` convert. Strings follow
    /// [`is_numeric_str`]. An array converts through its string form, so
    /// only `[]` and single-element arrays can qualify. Objects never do.
    pub fn is_numeric_value(value: &Value) -> bool {
        match value {
            Value::Null | Value::Bool(_) | Value::Number(_) => true,
            Value::String(s) => is_numeric_str(s),
            Value::Array(items) => match items.as_slice() {
                [] => true,
                // `null` elements join as the empty string.
                [only] => {
                    is_numeric_str(&display_value(Some(&Value::Array(vec![only.clone()]))))
                }
                _ => false,
            },
            Value::Object(_) => false,
        }
    }

    /// Renders `value` the way it is embedded in error messages.
    ///
    /// Absent fields render as `undefined`, strings verbatim, integral
    /// numbers without a fractional part, arrays comma-joined (with `null`
    /// elements rendered empty) and objects as `[object Object]`.
    pub fn display_value(value: Option<&Value>) -> String {
        let Some(value) = value else {
            return "undefined".to_string();
        };
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => display_number(n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => display_value(Some(other)),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }

    // Plain decimal notation for magnitudes in [1e-6, 1e21), exponent
    // notation with an explicit sign otherwise. Negative zero prints as `0`.
    fn display_number(n: &serde_json::Number) -> String {
        if n.is_i64() || n.is_u64() {
            return n.to_string();
        }
        let Some(f) = n.as_f64() else {
            return n.to_string();
        };
        if f == 0.0 {
            return "0".to_string();
        }
        if (1e-6..1e21).contains(&f.abs()) {
            return f.to_string();
        }
        let formatted = format!("{f:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    }
}

#[cfg(feature = "json")]
pub use json::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_accepts_versions_one_through_five() {
        for version in '1'..='5' {
            let guid = format!("550e8400-e29b-{version}1d4-a716-446655440000");
            assert!(is_guid(&guid), "{guid}");
        }
    }

    #[test]
    fn guid_is_case_insensitive() {
        assert!(is_guid("550E8400-E29B-41D4-A716-446655440000"));
        assert!(is_guid("550e8400-e29b-41d4-B716-446655440000"));
    }

    #[test]
    fn guid_rejects_bad_shapes() {
        for bad in [
            "",
            "not-a-guid",
            "550e8400e29b41d4a716446655440000",
            "550e8400-e29b-01d4-a716-446655440000",
            "550e8400-e29b-61d4-a716-446655440000",
            "550e8400-e29b-41d4-c716-446655440000",
            "550e8400-e29b-41d4-7716-446655440000",
            "550e8400-e29b-41d4-a716-44665544000g",
            "550e8400-e29b-41d4-a716-4466554400000",
            "550e8400_e29b-41d4-a716-446655440000",
            "550e8400-e29b-41d4-a716-446655440000\n",
            " 550e8400-e29b-41d4-a716-44665544000",
        ] {
            assert!(!is_guid(bad), "{bad:?}");
        }
    }

    #[test]
    fn account_number_requires_ten_digits() {
        assert!(is_account_number("1234567890"));
        assert!(is_account_number("0000000000"));

        for bad in ["", "12345", "12345678901", "abcdefghij", "123456789a", "١٢٣٤٥٦٧٨٩٠"] {
            assert!(!is_account_number(bad), "{bad:?}");
        }
    }

    #[test]
    fn utf16_len_counts_code_units() {
        assert_eq!(utf16_len("ABC"), 3);
        assert_eq!(utf16_len("ÄBC"), 3);
        // One astral code point is two UTF-16 units.
        assert_eq!(utf16_len("A😀"), 3);
    }

    #[test]
    fn numeric_str_accepts_number_forms() {
        for ok in [
            "5", "0", "-5", "+5", "1.5", ".5", "5.", "1e3", "1E-3", "2.5e+10", " 42 ", "\t7\n",
            "", "   ", "Infinity", "-Infinity", "0x1A", "0o17", "0b101", "007",
        ] {
            assert!(is_numeric_str(ok), "{ok:?}");
        }
    }

    #[test]
    fn numeric_str_rejects_non_numbers() {
        for bad in [
            "abc", "12a", "1..2", ".", "e5", "1e", "1e+", "-0x1A", "0xZZ", "0b102", "inf", "NaN",
            "infinity", "1_000", "--1", "1 2",
        ] {
            assert!(!is_numeric_str(bad), "{bad:?}");
        }
    }

    #[cfg(feature = "json")]
    mod json_values {
        use super::super::*;
        use serde_json::{Value, json};

        #[test]
        fn empty_covers_missing_values() {
            assert!(is_empty(None));
            assert!(is_empty(Some(&Value::Null)));
            assert!(is_empty(Some(&json!(""))));
            assert!(is_empty(Some(&json!({}))));
            assert!(is_empty(Some(&json!([]))));
        }

        #[test]
        fn empty_keeps_falsy_scalars() {
            assert!(!is_empty(Some(&json!(0))));
            assert!(!is_empty(Some(&json!(false))));
            assert!(!is_empty(Some(&json!(" "))));
            assert!(!is_empty(Some(&json!({"a": 1}))));
            assert!(!is_empty(Some(&json!([0]))));
        }

        #[test]
        fn numeric_value_coerces_like_number() {
            assert!(is_numeric_value(&json!(5)));
            assert!(is_numeric_value(&json!(-2.5)));
            assert!(is_numeric_value(&json!(true)));
            assert!(is_numeric_value(&json!("5")));
            assert!(is_numeric_value(&json!(["12"])));
            assert!(is_numeric_value(&json!([7])));
            assert!(is_numeric_value(&json!([null])));
            assert!(is_numeric_value(&json!([[" 3 "]])));

            assert!(!is_numeric_value(&json!("five")));
            assert!(!is_numeric_value(&json!([1, 2])));
            assert!(!is_numeric_value(&json!(["x"])));
            assert!(!is_numeric_value(&json!([[1, 2]])));
            assert!(!is_numeric_value(&json!({"a": 1})));
        }

        #[test]
        fn display_matches_template_interpolation() {
            assert_eq!(display_value(None), "undefined");
            assert_eq!(display_value(Some(&Value::Null)), "null");
            assert_eq!(display_value(Some(&json!("X123"))), "X123");
            assert_eq!(display_value(Some(&json!(true))), "true");
            assert_eq!(display_value(Some(&json!(12))), "12");
            assert_eq!(display_value(Some(&json!(1.0))), "1");
            assert_eq!(display_value(Some(&json!(1.5))), "1.5");
            assert_eq!(display_value(Some(&json!(0.000001))), "0.000001");
            assert_eq!(display_value(Some(&json!(1e-7))), "1e-7");
            assert_eq!(display_value(Some(&json!(-2.5e-8))), "-2.5e-8");
            assert_eq!(display_value(Some(&json!(1e21))), "1e+21");
            assert_eq!(display_value(Some(&json!(-0.0))), "0");
            assert_eq!(display_value(Some(&json!([1, null, "a"]))), "1,,a");
            assert_eq!(display_value(Some(&json!({"a": 1}))), "[object Object]");
        }
    }
}
