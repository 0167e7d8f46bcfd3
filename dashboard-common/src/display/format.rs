use rust_decimal::Decimal;

/// Shorten a base58 key to `ABCD...WXYZ`; keys of 8 chars or fewer are
/// returned as-is.
pub fn format_pub_key(pubkey: &str) -> String {
    let chars: Vec<char> = pubkey.chars().collect();
    if chars.len() <= 8 {
        return pubkey.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// `$1,234.56`-style amount, at most two decimals.
pub fn format_money(value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{}${}", sign, group_thousands(value.abs().round_dp(2).normalize()))
}

/// Quantity with thousands separators and no trailing zeros.
pub fn format_quantity(value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{}{}", sign, group_thousands(value.abs().normalize()))
}

fn group_thousands(value: Decimal) -> String {
    let text = value.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
