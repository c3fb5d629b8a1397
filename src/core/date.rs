use chrono::NaiveDate;

const ROC_ERA: &str = "中華民國";
const ROC_YEAR_OFFSET: i32 = 1911;

/// Interpret a document date such as `中華民國113年5月1日`, `113年5月1日` or `2024-05-01`.
///
/// Full-width digits are accepted. Returns `None` for anything that does not name a real day.
pub fn parse_issue_date(raw: &str) -> Option<NaiveDate> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(to_ascii_digit)
        .collect();

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_roc_date(&normalized))
}

fn parse_roc_date(text: &str) -> Option<NaiveDate> {
    let text = text.strip_prefix(ROC_ERA).unwrap_or(text);
    let (year, rest) = text.split_once('年')?;
    let (month, rest) = rest.split_once('月')?;
    let day = rest.strip_suffix('日')?;

    // Years far outside chrono's range would overflow the offset
    let year = year.parse::<i32>().ok()?.checked_add(ROC_YEAR_OFFSET)?;
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn to_ascii_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_roc_dates() {
        assert_eq!(parse_issue_date("中華民國113年5月1日"), ymd(2024, 5, 1));
        assert_eq!(parse_issue_date("  112年12月31日 "), ymd(2023, 12, 31));
        assert_eq!(parse_issue_date("中華民國 １１３ 年 ２ 月 ２９ 日"), ymd(2024, 2, 29));
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_issue_date("2024-05-01"), ymd(2024, 5, 1));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_issue_date(""), None);
        assert_eq!(parse_issue_date("113年2月30日"), None);
        assert_eq!(parse_issue_date("113年5月"), None);
        assert_eq!(parse_issue_date("明年五月"), None);
        assert_eq!(parse_issue_date("2147483000年1月1日"), None);
        assert_eq!(parse_issue_date("中華民國99999999999年1月1日"), None);
    }
}
