// Contact form normalization and validation
//
// Pure functions so the submission rules can be tested without a runtime or a network.

/// Canonical phone normalization, applied once when the connect payload is built.
///
/// Removes every `+` and every whitespace character (not just a leading `+`). Digits and any
/// other punctuation are kept exactly as typed.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '+' && !c.is_whitespace())
        .collect()
}

/// Required-field rule for a share submission: Full Name and Phone must both be non-empty.
///
/// Mirrors the form's required markers; whitespace-only input counts as filled.
pub fn has_required_contact(full_name: &str, phone: &str) -> bool {
    !full_name.is_empty() && !phone.is_empty()
}

/// A view id is usable only when present and non-empty. Whitespace is passed through as sent.
pub fn usable_view_id(view_id: Option<&str>) -> Option<&str> {
    view_id.filter(|v| !v.is_empty())
}

/// Characters a phone input accepts while typing.
pub fn is_phone_input_char(c: char) -> bool {
    c.is_ascii_digit() || c == '+' || c == ' '
}

/// International phone shape: a leading `+`, then 1 to 15 digits (E.164), spaces allowed.
/// Empty passes; whether the field is required is a separate rule.
pub fn is_international_phone(raw: &str) -> bool {
    let t = raw.trim();
    if t.is_empty() {
        return true;
    }
    let Some(rest) = t.strip_prefix('+') else {
        return false;
    };
    let digits = rest.chars().filter(|c| c.is_ascii_digit()).count();
    rest.chars().all(|c| c.is_ascii_digit() || c == ' ') && (1..=15).contains(&digits)
}

/// Shape check for an optional email, as a browser `type="email"` input does it:
/// `local@domain` with no whitespace and non-empty dot-separated domain labels. Empty passes.
pub fn is_plausible_email(raw: &str) -> bool {
    let t = raw.trim();
    if t.is_empty() {
        return true;
    }
    let Some((local, domain)) = t.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.chars().any(char::is_whitespace)
        && domain.split('.').all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_phone_strips_all_plus_and_spaces() {
        assert_eq!(normalize_phone("+91 98765 43210"), "919876543210");
    }

    #[test]
    fn normalize_phone_strips_every_plus_not_just_leading() {
        assert_eq!(normalize_phone("++1 +202"), "1202");
    }

    #[test]
    fn normalize_phone_strips_tabs_and_newlines() {
        assert_eq!(normalize_phone("\t+44\n20 7946\u{00A0}0958 "), "442079460958");
    }

    #[test]
    fn normalize_phone_keeps_other_punctuation() {
        // Only `+` and whitespace are removed; dashes stay as typed.
        assert_eq!(normalize_phone("+1 (555) 010-9999"), "1(555)010-9999");
    }

    #[test]
    fn normalize_phone_empty_stays_empty() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone(" + "), "");
    }

    #[test]
    fn required_contact_needs_name_and_phone() {
        assert!(has_required_contact("Jane", "+91 98765 43210"));
        assert!(!has_required_contact("", "+91 98765 43210"));
        assert!(!has_required_contact("Jane", ""));
        assert!(!has_required_contact("", ""));
    }

    #[test]
    fn usable_view_id_rejects_only_empty_or_missing() {
        assert_eq!(usable_view_id(Some("abc123")), Some("abc123"));
        assert_eq!(usable_view_id(Some("")), None);
        assert_eq!(usable_view_id(None), None);
        assert_eq!(usable_view_id(Some("   ")), Some("   "));
    }

    #[test]
    fn phone_input_chars() {
        assert!("+91 98765".chars().all(is_phone_input_char));
        for c in ['a', '-', '(', '.', '\n'] {
            assert!(!is_phone_input_char(c), "char {:?}", c);
        }
    }

    #[test]
    fn international_phone_needs_leading_plus() {
        assert!(is_international_phone(""));
        assert!(is_international_phone("+91 98765 43210"));
        assert!(is_international_phone("+1"));
        assert!(!is_international_phone("98765 43210"));
        assert!(!is_international_phone("+"));
        assert!(!is_international_phone("+91 abc"));
        assert!(!is_international_phone("+1 2+3"));
        assert!(!is_international_phone("+1234567890123456"));
    }

    #[test]
    fn email_shape_check() {
        assert!(is_plausible_email(""));
        assert!(is_plausible_email("jane@example.com"));
        assert!(is_plausible_email("jane@localhost"));
        assert!(!is_plausible_email("not-an-email"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("jane@"));
        assert!(!is_plausible_email("jane@example..com"));
        assert!(!is_plausible_email("ja ne@example.com"));
        assert!(!is_plausible_email("jane@ex@ample.com"));
    }
}
