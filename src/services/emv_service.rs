use std::sync::OnceLock;

use regex::Regex;

fn tag54_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"54(\d{2})(\d+)").expect("tag-54 pattern is valid"))
}

pub struct EmvService;

impl EmvService {
    /// Best-effort read of the tag-54 (transaction amount) TLV triplet.
    /// Trusts the first match and does not walk the full TLV structure, so a
    /// `54` inside another field's value can misparse. Returns 0 when the
    /// tag is absent or the amount does not parse.
    pub fn parse_amount(emv: &str) -> u64 {
        let Some(caps) = tag54_pattern().captures(emv) else {
            return 0;
        };
        let Ok(len) = caps[1].parse::<usize>() else {
            return 0;
        };

        let digits = &caps[2];
        let take = len.min(digits.len());
        digits[..take].parse::<u64>().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::EmvService;

    #[test]
    fn parses_well_formed_tag54() {
        assert_eq!(EmvService::parse_amount("54055000054030"), 50000);
    }

    #[test]
    fn parses_amount_inside_longer_emv_string() {
        let emv = "000201010212520448995303360540750000005802ID";
        assert_eq!(EmvService::parse_amount(emv), 5000000);
    }

    #[test]
    fn returns_zero_without_tag54() {
        assert_eq!(EmvService::parse_amount("000201010212"), 0);
        assert_eq!(EmvService::parse_amount(""), 0);
    }

    #[test]
    fn clamps_declared_length_to_available_digits() {
        // Declared length 5 but only three digits captured
        assert_eq!(EmvService::parse_amount("5405500"), 500);
    }

    #[test]
    fn zero_length_amount_is_zero() {
        assert_eq!(EmvService::parse_amount("5400"), 0);
    }
}
