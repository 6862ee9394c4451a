// src/common/serde_utils.rs
//
// Desserializadores tolerantes para números opcionais.
// O backend (Sequelize) manda DECIMAL como string, e os formulários mandam "" quando
// o campo fica em branco. Tudo isso vira `None`, nunca 0.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Aceita "1234.5", "1.234,50", "12,5" e "".
pub fn parse_decimal_text(raw: &str) -> Option<Decimal> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    let normalized = if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

fn decimal_from_value(value: Value) -> Result<Option<Decimal>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(Some)
                .map_err(|e| format!("número inválido '{}': {}", text, e))
        }
        Value::String(s) => {
            if s.trim().is_empty() {
                return Ok(None);
            }
            parse_decimal_text(&s)
                .map(Some)
                .ok_or_else(|| format!("número inválido '{}'", s))
        }
        other => Err(format!("esperado número, recebido {}", other)),
    }
}

pub fn decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    decimal_from_value(value).map_err(serde::de::Error::custom)
}

/// Igual a `decimal_opt`, mas ausência/branco vira zero. Só para totais agregados do relatório.
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    decimal_opt(deserializer).map(|v| v.unwrap_or(Decimal::ZERO))
}

pub fn int_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("inteiro inválido '{}'", n))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("inteiro inválido '{}'", s))),
        other => Err(serde::de::Error::custom(format!("esperado inteiro, recebido {}", other))),
    }
}

// `datetime-local` do navegador não tem fuso; tratamos como horário de Brasília.
const LOCAL_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// RFC 3339, `2024-03-07T10:00` (local) ou só a data `2024-03-07` (meia-noite local).
pub fn parse_datetime_text(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    let local = LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some((local + Duration::hours(3)).and_utc())
}

pub fn datetime_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_datetime_text(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("data/hora inválida '{}'", s))),
    }
}

/// Aceita `2024-03-07` ou um timestamp completo (fica só a data).
pub fn date_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let text = s.trim();
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("data inválida '{}'", s)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "decimal_opt")]
        valor: Option<Decimal>,
        #[serde(default, deserialize_with = "int_opt")]
        fichas: Option<i64>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn blank_and_null_become_none() {
        let p = probe(r#"{ "valor": "", "fichas": null }"#);
        assert_eq!(p.valor, None);
        assert_eq!(p.fichas, None);

        let p = probe("{}");
        assert_eq!(p.valor, None);
        assert_eq!(p.fichas, None);
    }

    #[test]
    fn zero_is_kept_as_zero() {
        let p = probe(r#"{ "valor": 0, "fichas": "0" }"#);
        assert_eq!(p.valor, Some(Decimal::ZERO));
        assert_eq!(p.fichas, Some(0));
    }

    #[test]
    fn accepts_sequelize_strings_and_brazilian_notation() {
        assert_eq!(probe(r#"{ "valor": "1234.50" }"#).valor, Some(Decimal::new(123450, 2)));
        assert_eq!(probe(r#"{ "valor": "1.234,50" }"#).valor, Some(Decimal::new(123450, 2)));
        assert_eq!(probe(r#"{ "valor": 12345.6 }"#).valor, Some(Decimal::new(123456, 1)));
    }

    #[test]
    fn local_datetime_inputs_are_brasilia_time() {
        let dt = parse_datetime_text("2024-03-07T10:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-07T13:00:00+00:00");

        let dt = parse_datetime_text("2024-03-07T10:00:00-03:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-07T13:00:00+00:00");

        let dt = parse_datetime_text("2024-03-07").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-07T03:00:00+00:00");

        assert!(parse_datetime_text("ontem").is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{ "valor": "abc" }"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{ "fichas": true }"#).is_err());
    }
}
