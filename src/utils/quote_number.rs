//! Human-readable quote folios, `COT-YYYYMMDD-XXXXXX`.

use chrono::NaiveDate;
use rand::Rng;

const SUFFIX_LEN: usize = 6;
const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Build a quote number for a date plus a random 6-character
/// alphanumeric suffix. Display identifier only; uniqueness is backed
/// by the unique index on the quotes table.
pub fn generate_quote_number(date: NaiveDate) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET[idx] as char
        })
        .collect();

    format!("COT-{}-{}", date.format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_date_and_six_char_suffix() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let number = generate_quote_number(date);

        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "COT");
        assert_eq!(parts[1], "20250307");
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn single_digit_months_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let number = generate_quote_number(date);
        assert!(number.starts_with("COT-20250102-"));
    }
}
