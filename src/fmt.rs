/// Format a won amount with thousands separators: 1304689660 -> "1,304,689,660원".
/// Won has no fractional unit; values round to the nearest whole won.
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let grouped = group_digits(val.abs().round() as i64);
    if negative {
        format!("-{grouped}원")
    } else {
        format!("{grouped}원")
    }
}

/// Format a plain count with thousands separators.
pub fn number(val: i64) -> String {
    let negative = val < 0;
    let grouped = group_digits(val.abs());
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(val: i64) -> String {
    let digits = val.to_string();
    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    with_commas.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1304689660.0), "1,304,689,660원");
        assert_eq!(money(-500000.0), "-500,000원");
        assert_eq!(money(0.0), "0원");
        assert_eq!(money(999.0), "999원");
        assert_eq!(money(1234.6), "1,235원");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(0), "0");
        assert_eq!(number(12345), "12,345");
        assert_eq!(number(-1000), "-1,000");
    }
}
