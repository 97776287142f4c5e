//! Formatting of peso amounts for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

const CENTAVOS_PER_PESO: u64 = 100;

/// numfmt switches to scientific notation from this many pesos onwards.
const SCIENTIFIC_NOTATION_CUTOFF: u64 = 1_000_000_000_000;

/// Format `number` as pesos with thousands separators and two decimal
/// places, e.g. "Php 1,234.50" or "-Php 60.00".
///
/// The amount is rounded to the nearest centavo first, so sums such as
/// 100.10 + 200.20 are shown as "Php 300.30" and anything that rounds to
/// zero is shown as "Php 0.00".
pub fn format_currency(number: f64) -> String {
    if !number.is_finite() {
        tracing::warn!("Cannot format {number} as pesos");
        return format!("Php {number}");
    }

    // Saturates for amounts far beyond anything a wallet can hold.
    let centavos = (number.abs() * CENTAVOS_PER_PESO as f64).round() as u64;

    if centavos == 0 {
        return "Php 0.00".to_owned();
    }

    let sign = if number < 0.0 { "-" } else { "" };
    let pesos = format_pesos(centavos / CENTAVOS_PER_PESO);
    let centavos = centavos % CENTAVOS_PER_PESO;

    format!("{sign}Php {pesos}.{centavos:02}")
}

/// Format a whole number of pesos with thousands separators.
///
/// numfmt only sees whole numbers here: it truncates rather than rounds
/// fractions, and whole numbers below the cutoff are exact in an f64.
fn format_pesos(pesos: u64) -> String {
    static PESO_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let peso_fmt = PESO_FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
    });

    match peso_fmt {
        Some(peso_fmt) if pesos < SCIENTIFIC_NOTATION_CUTOFF => peso_fmt.fmt_string(pesos),
        Some(_) => {
            let trillions = pesos / SCIENTIFIC_NOTATION_CUTOFF;
            let rest = pesos % SCIENTIFIC_NOTATION_CUTOFF;

            format!(
                "{},{:03},{:03},{:03},{:03}",
                format_pesos(trillions),
                rest / 1_000_000_000,
                rest / 1_000_000 % 1_000,
                rest / 1_000 % 1_000,
                rest % 1_000,
            )
        }
        None => {
            tracing::warn!("Could not create currency formatter, falling back to plain format");
            pesos.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn zero_has_two_decimal_places() {
        assert_eq!(format_currency(0.0), "Php 0.00");
    }

    #[test]
    fn adds_thousands_separators_and_trailing_zeros() {
        assert_eq!(format_currency(1234.5), "Php 1,234.50");
        assert_eq!(format_currency(500.0), "Php 500.00");
        assert_eq!(format_currency(1_234_567.89), "Php 1,234,567.89");
    }

    #[test]
    fn negative_amount_has_negative_peso_prefix() {
        assert_eq!(format_currency(-60.0), "-Php 60.00");
        assert_eq!(format_currency(-1234.5), "-Php 1,234.50");
    }

    #[test]
    fn rounds_to_the_nearest_centavo() {
        assert_eq!(format_currency(300.29999999999995), "Php 300.30");
        assert_eq!(format_currency(999.999), "Php 1,000.00");
        assert_eq!(format_currency(0.29), "Php 0.29");
        assert_eq!(format_currency(1.005), "Php 1.00");
    }

    #[test]
    fn amounts_that_round_to_zero_are_zero() {
        assert_eq!(format_currency(0.004), "Php 0.00");
        assert_eq!(format_currency(-0.004), "Php 0.00");
        assert_eq!(format_currency(5.684341886080802e-14), "Php 0.00");
    }

    #[test]
    fn small_amounts_are_not_in_scientific_notation() {
        assert_eq!(format_currency(0.01), "Php 0.01");
        assert_eq!(format_currency(0.5), "Php 0.50");
    }

    #[test]
    fn large_amounts_are_not_in_scientific_notation() {
        assert_eq!(format_currency(999_999_999_999.0), "Php 999,999,999,999.00");
        assert_eq!(format_currency(1e12), "Php 1,000,000,000,000.00");
        assert_eq!(
            format_currency(-1_234_005_006_007.5),
            "-Php 1,234,005,006,007.50"
        );
    }
}
