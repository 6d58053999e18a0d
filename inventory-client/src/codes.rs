//! QR / barcode identifier generation
//!
//! Client-side fallback only: the backend may overwrite both values on create.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Generated identifier pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCodes {
    pub qr_code: String,
    pub barcode: String,
}

/// Derive codes from a product name and the current time
pub fn generate_codes(name: &str, now: DateTime<Utc>) -> ProductCodes {
    generate_codes_with(name, now, &mut rand::thread_rng())
}

/// Same as [`generate_codes`] with an explicit random source
pub fn generate_codes_with<R: Rng + ?Sized>(
    name: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ProductCodes {
    let millis = now.timestamp_millis();
    let compact: String = name.split_whitespace().collect();
    let suffix: u16 = rng.gen_range(0..1000);

    ProductCodes {
        qr_code: format!("QR-{}-{}", compact.to_uppercase(), millis),
        barcode: format!("{millis}{suffix:03}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_time() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_718_000_000_123).unwrap()
    }

    #[test]
    fn test_qr_code_strips_whitespace_and_uppercases() {
        let codes = generate_codes("Blue Shirt", fixed_time());
        assert_eq!(codes.qr_code, "QR-BLUESHIRT-1718000000123");
    }

    #[test]
    fn test_qr_code_collapses_every_whitespace_run() {
        let codes = generate_codes("  red\tsummer   dress ", fixed_time());
        assert_eq!(codes.qr_code, "QR-REDSUMMERDRESS-1718000000123");
    }

    #[test]
    fn test_barcode_is_timestamp_plus_three_digits() {
        let t = fixed_time();
        let digits = t.timestamp_millis().to_string();
        for _ in 0..50 {
            let codes = generate_codes("Blue Shirt", t);
            assert_eq!(codes.barcode.len(), digits.len() + 3);
            assert!(codes.barcode.starts_with(&digits));
            assert!(codes.barcode.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_codes_with("Hat", fixed_time(), &mut StdRng::seed_from_u64(7));
        let b = generate_codes_with("Hat", fixed_time(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
