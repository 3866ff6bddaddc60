use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 印度手机号：6-9 开头共 10 位
static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").expect("Invalid mobile regex"));

pub const MIN_PASSWORD_LEN: usize = 9;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() || username.len() > 150 {
        return Err("Username length must be between 1 and 150 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, digits and @/./+/-/_");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

/// 联系电话可为空，非空时必须是 10 位有效手机号
pub fn validate_mobile(contact: &str) -> Result<(), &'static str> {
    if contact.is_empty() || MOBILE_RE.is_match(contact) {
        Ok(())
    } else {
        Err("Enter a valid 10-digit mobile number.")
    }
}

/// 注册密码：长度必须大于 8
pub fn validate_password_length(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be longer than 8 characters");
    }
    Ok(())
}

/// 首字母大写，其余小写
pub fn capitalize(value: &str) -> String {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), &'static str> {
    if start >= end {
        return Err("End Time must be later than Start Time.");
    }
    Ok(())
}

/// 进度日期：有结束日期必须有开始日期，且开始不晚于结束
pub fn validate_progress_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), &'static str> {
    match (start, end) {
        (None, Some(_)) => Err("Start Date is required when End Date is set."),
        (Some(s), Some(e)) if s > e => Err("Start Date cannot be after End Date."),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_mobile() {
        assert!(validate_mobile("").is_ok());
        assert!(validate_mobile("9876543210").is_ok());
        assert!(validate_mobile("5876543210").is_err());
        assert!(validate_mobile("987654321").is_err());
        assert!(validate_mobile("98765432100").is_err());
    }

    #[test]
    fn test_password_length_boundary() {
        assert!(validate_password_length("12345678").is_err());
        assert!(validate_password_length("123456789").is_ok());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("python BASICS"), "Python basics");
        assert_eq!(capitalize("  java "), "Java");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_time_range() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert!(validate_time_range(nine, ten).is_ok());
        assert!(validate_time_range(ten, nine).is_err());
        assert!(validate_time_range(nine, nine).is_err());
    }

    #[test]
    fn test_progress_dates() {
        assert!(validate_progress_dates(None, None).is_ok());
        assert!(validate_progress_dates(Some(d("2024-01-01")), None).is_ok());
        assert!(validate_progress_dates(None, Some(d("2024-01-01"))).is_err());
        assert!(validate_progress_dates(Some(d("2024-01-02")), Some(d("2024-01-01"))).is_err());
        assert!(validate_progress_dates(Some(d("2024-01-01")), Some(d("2024-01-01"))).is_ok());
    }

    #[test]
    fn test_email_and_username() {
        assert!(validate_email("a.b@college.edu").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_username("staff.one").is_ok());
        assert!(validate_username("bad name").is_err());
    }
}
