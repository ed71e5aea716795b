//! Input parsing for mutation forms.
//!
//! Every parser returns an explicit `Result`; nothing silently substitutes a default.
//! All checks run before a request is built.

use chrono::NaiveDate;

use crate::errors::ClientError;

/// Trim a raw form value.
pub fn clean_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trimmed value, or `None` when blank.
pub fn optional_text(raw: &str) -> Option<String> {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Parse an integer field that may be left blank.
pub fn parse_optional_int(raw: &str) -> Option<i64> {
    clean_text(raw).parse::<i64>().ok()
}

/// Parse a required integer field, naming the field on failure.
pub fn parse_required_int(raw: &str, label: &str) -> Result<i64, ClientError> {
    parse_optional_int(raw)
        .ok_or_else(|| ClientError::Validation(format!("{} 값을 입력하세요.", label)))
}

/// Parse a comma-separated list of integers.
///
/// Items that are not integers are dropped. Returns `None` when nothing usable remains.
pub fn parse_csv_numbers(raw: &str) -> Option<Vec<i64>> {
    let parsed: Vec<i64> = raw
        .split(',')
        .filter_map(|item| item.trim().parse::<i64>().ok())
        .collect();

    if parsed.is_empty() {
        None
    } else {
        Some(parsed)
    }
}

/// Parse a required ISO date (`YYYY-MM-DD`).
pub fn parse_required_date(raw: &str, label: &str) -> Result<NaiveDate, ClientError> {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        return Err(ClientError::Validation(format!("{} 값을 입력하세요.", label)));
    }
    NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d").map_err(|_| {
        ClientError::Validation(format!("{} 형식이 올바르지 않습니다: {}", label, cleaned))
    })
}

/// The two sides of a trade must be different assignments.
pub fn ensure_distinct_roles(requester: i64, target: i64) -> Result<(), ClientError> {
    if requester == target {
        return Err(ClientError::Validation(
            "신청자 배정과 대상 배정은 달라야 합니다.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required_int() {
        assert_eq!(parse_required_int(" 12 ", "배정 ID"), Ok(12));
        assert_eq!(
            parse_required_int("", "배정 ID"),
            Err(ClientError::Validation("배정 ID 값을 입력하세요.".to_string()))
        );
        assert!(parse_required_int("abc", "학년").is_err());
    }

    #[test]
    fn test_parse_csv_numbers() {
        assert_eq!(parse_csv_numbers("1, 2,3"), Some(vec![1, 2, 3]));
        assert_eq!(parse_csv_numbers("1,x,3"), Some(vec![1, 3]));
        assert_eq!(parse_csv_numbers("  "), None);
        assert_eq!(parse_csv_numbers("a,b"), None);
    }

    #[test]
    fn test_parse_required_date() {
        assert_eq!(
            parse_required_date("2025-03-04", "시작일"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
        );
        assert!(parse_required_date("", "시작일").is_err());
        assert!(parse_required_date("03/04/2025", "시작일").is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" 휴학 "), Some("휴학".to_string()));
    }

    #[test]
    fn test_ensure_distinct_roles() {
        assert!(ensure_distinct_roles(7, 7).is_err());
        assert!(ensure_distinct_roles(7, 8).is_ok());
    }
}
