//! Field codecs
//!
//! Pure `raw input -> canonical value` functions applied on every keystroke.
//! They never fail: malformed input is corrected or constrained, and the
//! step validators decide later whether the result is complete.

/// Country code every company telephone number must start with
pub const TELEPHONE_PREFIX: &str = "92";

/// Seed value written when the applicant declares a website
pub const WEBSITE_PREFIX: &str = "www.";

/// Full length of a well-formed NTN (`AB12345-6`)
pub const NTN_LEN: usize = 9;

/// Full length of a well-formed CNIC (`12345-1234567-1`)
pub const CNIC_LEN: usize = 15;

/// Tax identifier discriminator selected before the identifier is typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxIdFormat {
    Ntn,
    Cnic,
}

impl TaxIdFormat {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ntn => "NTN",
            Self::Cnic => "CNIC",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Ntn => "e.g. AB12345-6",
            Self::Cnic => "e.g. 12345-1234567-1",
        }
    }

    /// Whether `value` is a complete identifier in this format
    pub fn is_complete(&self, value: &str) -> bool {
        match self {
            Self::Ntn => is_valid_ntn(value),
            Self::Cnic => is_valid_cnic(value),
        }
    }
}

/// Normalize a tax identifier for the selected format
///
/// With no format selected the input is stored untouched (the field is
/// disabled in that state anyway).
pub fn tax_id(raw: &str, format: Option<TaxIdFormat>) -> String {
    match format {
        Some(TaxIdFormat::Ntn) => ntn(raw),
        Some(TaxIdFormat::Cnic) => cnic(raw),
        None => raw.to_string(),
    }
}

fn ntn(raw: &str) -> String {
    let value: String = raw
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    let value = split_ntn(&value)
        .map(|(head, digit)| {
            let mut joined = head.to_string();
            if head.len() == 7 {
                joined.push('-');
            }
            joined.push_str(digit);
            joined
        })
        .unwrap_or(value);

    value.chars().take(NTN_LEN).collect()
}

/// Split `value` as `^([A-Z0-9]{0,7})(-?)(\d?)$`, preferring the longest head.
fn split_ntn(value: &str) -> Option<(&str, &str)> {
    let alnum = value
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count()
        .min(7);

    (0..=alnum).rev().find_map(|head_len| {
        let (head, rest) = value.split_at(head_len);
        let rest = rest.strip_prefix('-').unwrap_or(rest);
        match rest.len() {
            0 => Some((head, rest)),
            1 if rest.chars().all(|c| c.is_ascii_digit()) => Some((head, rest)),
            _ => None,
        }
    })
}

fn cnic(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let value = match digits.len() {
        0..=5 => digits,
        6..=12 => format!("{}-{}", &digits[..5], &digits[5..]),
        _ => format!("{}-{}-{}", &digits[..5], &digits[5..12], &digits[12..13]),
    };
    value.chars().take(CNIC_LEN).collect()
}

/// `[A-Z0-9]{7}-[0-9]`
pub fn is_valid_ntn(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == NTN_LEN
        && bytes[..7]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && bytes[7] == b'-'
        && bytes[8].is_ascii_digit()
}

/// `[0-9]{5}-[0-9]{7}-[0-9]`
pub fn is_valid_cnic(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == CNIC_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            5 | 13 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Strip non-digits and pin the country code prefix
pub fn telephone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with(TELEPHONE_PREFIX) {
        digits
    } else {
        TELEPHONE_PREFIX.to_string()
    }
}

/// What the telephone input shows; an untouched field already shows the prefix
pub fn telephone_display(stored: &str) -> &str {
    if stored.starts_with(TELEPHONE_PREFIX) {
        stored
    } else {
        TELEPHONE_PREFIX
    }
}

/// Digits only; anything else leaves the current value in place
pub fn postal_code(current: &str, raw: &str) -> String {
    digits_only(current, raw)
}

/// Numeric inputs (employee count, GTIN-8 count) refuse non-digit keystrokes
pub fn digits_only(current: &str, raw: &str) -> String {
    if raw.chars().all(|c| c.is_ascii_digit()) {
        raw.to_string()
    } else {
        current.to_string()
    }
}

/// Letters and spaces, first letter capitalized and the rest lowercased
pub fn city(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => {
            let mut value: String = first.to_uppercase().collect();
            value.push_str(&chars.as_str().to_lowercase());
            value
        }
        None => String::new(),
    }
}

/// Capitalize the first character when it is a letter
pub fn company_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            let mut value = first.to_ascii_uppercase().to_string();
            value.push_str(chars.as_str());
            value
        }
        _ => raw.to_string(),
    }
}

/// Value written by the "Do you have a website?" selector
pub fn website_toggle(has_website: bool) -> String {
    if has_website {
        WEBSITE_PREFIX.to_string()
    } else {
        String::new()
    }
}

/// `local@domain.tld` with no whitespace and a single `@`
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let well_formed = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('@');
    if !well_formed(local) || !well_formed(domain) {
        return false;
    }
    // Some dot must have text on both sides
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Company telephone: prefix present and at least seven digits overall
pub fn is_valid_telephone(value: &str) -> bool {
    value.starts_with(TELEPHONE_PREFIX) && value.len() >= 7
}

/// Empty means "no website"; otherwise it must be more than the bare prefix
pub fn is_valid_website(value: &str) -> bool {
    value.is_empty() || (value.starts_with(WEBSITE_PREFIX) && value.len() > 8)
}

/// Append a keystroke and run the codec over the result
pub fn push_char(current: &str, c: char, codec: impl Fn(&str) -> String) -> String {
    let mut raw = current.to_string();
    raw.push(c);
    codec(&raw)
}

/// Remove the last character and run the codec over the result
///
/// If the codec puts back exactly what was removed (an auto-inserted
/// separator), the character before it goes too.
pub fn pop_char(current: &str, codec: impl Fn(&str) -> String) -> String {
    let mut raw = current.to_string();
    raw.pop();
    let value = codec(&raw);
    if value == current && !raw.is_empty() {
        raw.pop();
        return codec(&raw);
    }
    value
}
