//! Rupee display strings for growth-table labels.
//!
//! Amounts are grouped the Indian way: the last three integer digits, then
//! pairs (`₹1,00,00,000.00`), always with two decimals.

use crate::types::{round_money, Money};

const RUPEE: char = '₹';

/// Format an amount as an INR currency string, e.g. `₹12,34,567.89`.
pub fn format_inr(amount: Money) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + 8);
    if negative {
        out.push('-');
    }
    out.push(RUPEE);
    out.push_str(&group_indian(int_part));
    out.push('.');
    out.push_str(frac_part);
    out
}

/// Label for a recurring contribution, e.g. `₹10,000.00 x 12`.
pub fn periodic_label(amount: Money, periods: u32) -> String {
    format!("{} x {}", format_inr(amount), periods)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);

    let mut pairs: Vec<&str> = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        pairs.push(pair);
        head = rest;
    }
    pairs.push(head);
    pairs.reverse();

    format!("{},{}", pairs.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_amounts_are_not_grouped() {
        assert_eq!(format_inr(Decimal::ZERO), "₹0.00");
        assert_eq!(format_inr(dec!(999.5)), "₹999.50");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(dec!(1000)), "₹1,000.00");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000.00");
        assert_eq!(format_inr(dec!(10000000)), "₹1,00,00,000.00");
        assert_eq!(format_inr(dec!(1234567.891)), "₹12,34,567.89");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_inr(dec!(-25000)), "-₹25,000.00");
        assert_eq!(format_inr(dec!(-0.001)), "₹0.00");
    }

    #[test]
    fn test_periodic_label() {
        assert_eq!(periodic_label(dec!(10000), 12), "₹10,000.00 x 12");
        assert_eq!(periodic_label(Decimal::ZERO, 12), "₹0.00 x 12");
    }
}
