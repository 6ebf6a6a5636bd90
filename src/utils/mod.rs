//! Formatting utilities for consistent display of amounts in the CLI.

use rust_decimal::Decimal;

/// Format a Decimal using Italian conventions: `.` for thousands, `,` for
/// decimals, two decimal places.
pub fn format_amount(value: Decimal) -> String {
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    let formatted = format!("{:.2}", abs_value);
    let parts: Vec<&str> = formatted.split('.').collect();

    let integer_part = parts[0];
    let decimal_part = parts.get(1).unwrap_or(&"00");

    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec!['.', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    format!("{}{},{}", sign, with_separators, decimal_part)
}

/// Format as euro: "1.234,56 €"
pub fn format_currency(value: Decimal) -> String {
    format!("{} €", format_amount(value))
}
