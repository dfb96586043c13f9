/// Rewrites the compute service's raw trace body into standard JSON.
///
/// The backend serializes unreached distances as the bare token `inf`,
/// which no JSON parser accepts; the whole response would fail to parse
/// without this pass. Every `inf` standing in a value position (outside
/// any string literal) is replaced with the literal `null`, which the
/// trace model reads as "unreached". String contents that happen to
/// contain `inf` as free text are left alone, and a payload without the
/// sentinel comes back unchanged.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;

    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == 'i' && raw[i..].starts_with("inf") && at_value_boundary(raw, i + 3) {
            out.push_str("null");
            // skip the remaining "nf"
            chars.next();
            chars.next();
        } else {
            out.push(c);
        }
    }

    out
}

// The sentinel must be followed by a JSON delimiter (or the end of the
// body) to count as a value, so identifiers merely starting with "inf"
// are never rewritten.
fn at_value_boundary(raw: &str, end: usize) -> bool {
    match raw[end..].chars().next() {
        None => true,
        Some(c) => matches!(c, ',' | '}' | ']') || c.is_ascii_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_sentinel_values_to_null() {
        let raw = r#"{"distances": {"GMMN": 0, "GMFF": inf, "FES": 120.5}}"#;
        let clean = sanitize(raw);
        assert_eq!(
            clean,
            r#"{"distances": {"GMMN": 0, "GMFF": null, "FES": 120.5}}"#
        );
        assert!(serde_json::from_str::<serde_json::Value>(&clean).is_ok());
    }

    #[test]
    fn rewrites_sentinels_inside_arrays_and_at_end_of_input() {
        assert_eq!(sanitize("[inf, 1, inf]"), "[null, 1, null]");
        assert_eq!(sanitize(r#"{"d":inf}"#), r#"{"d":null}"#);
        assert_eq!(sanitize("inf"), "null");
    }

    #[test]
    fn never_touches_string_contents() {
        let raw = r#"{"name": "infinite loop airfield", "code": "inf"}"#;
        assert_eq!(sanitize(raw), raw);

        let escaped = r#"{"note": "say \"inf\" aloud", "d": inf}"#;
        assert_eq!(sanitize(escaped), r#"{"note": "say \"inf\" aloud", "d": null}"#);
    }

    #[test]
    fn leaves_longer_identifiers_alone() {
        let raw = r#"{"d": information}"#;
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn is_idempotent_on_clean_input() {
        let clean = r#"{"path": ["GMMN"], "totalDistance": 0, "steps": []}"#;
        assert_eq!(sanitize(clean), clean);
        let once = sanitize(r#"{"d": inf}"#);
        assert_eq!(sanitize(&once), once);
    }
}
