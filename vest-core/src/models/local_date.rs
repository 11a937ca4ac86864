use chrono::NaiveDate;

/// Parses a `D/M/YY` or `D/M/YYYY` date string into a calendar date.
///
/// Two-digit years resolve to `2000 + yy`. Whitespace around each field is
/// tolerated. Anything else (wrong field count, non-numeric fields, an
/// impossible calendar date) yields `None`; callers degrade rather than
/// fail (an unparseable grant date simply means "not matured").
///
/// This is the only place the application interprets date strings;
/// everything downstream works on [`chrono::NaiveDate`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vest_core::parse_local_date;
///
/// assert_eq!(
///     parse_local_date("15/3/24"),
///     NaiveDate::from_ymd_opt(2024, 3, 15)
/// );
/// assert_eq!(
///     parse_local_date("1/12/2023"),
///     NaiveDate::from_ymd_opt(2023, 12, 1)
/// );
/// assert_eq!(parse_local_date("31/2/24"), None);
/// assert_eq!(parse_local_date("not a date"), None);
/// ```
pub fn parse_local_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('/');

    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let year_field = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }

    let year = year_field.parse::<i32>().ok()?;
    let year = if year_field.len() <= 2 { 2000 + year } else { year };

    NaiveDate::from_ymd_opt(year, month, day)
}
