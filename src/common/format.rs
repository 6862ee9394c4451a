// src/common/format.rs
//
// Formatação pt-BR usada por todas as views. Cada tipo de campo tem UMA função,
// e campos opcionais viram "-" apenas aqui (nunca 0).

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

pub const EMPTY: &str = "-";

// Horário de Brasília: UTC-3 fixo (sem horário de verão desde 2019)
const BRT_OFFSET_HOURS: i64 = 3;

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `12345.6` -> `R$ 12.345,60`
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, group_thousands(int_part), frac_part)
}

/// `12.5` -> `12,5%` (até duas casas, sem zeros à direita)
pub fn format_percent(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let sign = if negative { "-" } else { "" };
    match text.split_once('.') {
        Some((int_part, frac)) => format!("{}{},{}%", sign, group_thousands(int_part), frac),
        None => format!("{}{}%", sign, group_thousands(&text)),
    }
}

/// Quantidade de itens: `1234` -> `1.234 un.`
pub fn format_units(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{} un.", sign, group_thousands(&rounded.abs().trunc().to_string()))
}

pub fn format_int_opt(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| EMPTY.to_string())
}

pub fn format_text_opt(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => EMPTY.to_string(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| EMPTY.to_string())
}

/// Data/hora no fuso de Brasília: `dd/mm/aaaa HH:MM`
pub fn format_datetime(value: DateTime<Utc>) -> String {
    (value - Duration::hours(BRT_OFFSET_HOURS))
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

pub fn format_datetime_opt(value: Option<DateTime<Utc>>) -> String {
    value.map(format_datetime).unwrap_or_else(|| EMPTY.to_string())
}
