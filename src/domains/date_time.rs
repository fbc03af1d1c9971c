//! Date and time formulas.
//!
//! Formulas relative to the present read "today" and "now" from the
//! [`EvalContext`](crate::context::EvalContext) carried by their inputs, so
//! the same inputs and context always give the same answer.

use crate::error::{CalcError, Result};
use crate::formula::{Category, Domain, FormulaSpec};
use crate::input::InputSpec;
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};

const MINUTES_PER_DAY: i64 = 24 * 60;
const DAYS_PER_MONTH: f64 = 30.44;
const DAYS_PER_YEAR: f64 = 365.25;

pub fn domain() -> Domain {
    Domain::new(
        "date-time",
        "Date & Time",
        vec![
            age(),
            duration(),
            business(),
            timezone(),
            calendar(),
            countdown(),
        ],
    )
}

/// Render a date as `March 15, 2024`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Shift a date by a signed number of days.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| CalcError::compute("date out of range"))
}

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count weekdays in the inclusive range `[start, end]`.
///
/// An empty range (end before start) counts zero.
///
/// # Examples
///
/// ```rust
/// use calckit::domains::date_time::business_days;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
/// assert_eq!(business_days(monday, friday), 5);
/// assert_eq!(business_days(monday, monday), 1);
/// ```
pub fn business_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    let span = (end - start).num_days() + 1;
    let full_weeks = span / 7;
    let first_weekday = i64::from(start.weekday().num_days_from_monday());
    let tail = (0..span % 7)
        .filter(|offset| (first_weekday + offset) % 7 < 5)
        .count() as i64;
    full_weeks * 5 + tail
}

/// Add `count` business days to `start`, counting from the day after.
///
/// Weekends are skipped. A non-positive count returns `start` unchanged,
/// even when it falls on a weekend.
///
/// # Examples
///
/// ```rust
/// use calckit::domains::date_time::add_business_days;
/// use chrono::NaiveDate;
///
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
/// assert_eq!(add_business_days(friday, 1).unwrap(), monday);
/// ```
pub fn add_business_days(start: NaiveDate, count: i64) -> Result<NaiveDate> {
    if count <= 0 {
        return Ok(start);
    }
    // Any seven consecutive days hold exactly five weekdays.
    let mut weeks = count / 5;
    let mut remaining = count % 5;
    if remaining == 0 {
        weeks -= 1;
        remaining = 5;
    }
    let mut date = add_days(start, weeks.saturating_mul(7))?;
    while remaining > 0 {
        date = add_days(date, 1)?;
        if is_business_day(date) {
            remaining -= 1;
        }
    }
    Ok(date)
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month, `month` in 1-12.
pub fn days_in_month(year: i64, month: i64) -> Result<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(CalcError::compute(format!("month {} is outside 1-12", month))),
    }
}

/// The month and day of `date` in `year`.
///
/// February 29 rolls over to March 1 in common years.
fn same_day_in_year(date: NaiveDate, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .ok_or_else(|| CalcError::compute("date out of range"))
}

/// Next occurrence of `date`'s month and day on or after `today`.
fn next_occurrence(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    let this_year = same_day_in_year(date, today.year())?;
    if this_year < today {
        same_day_in_year(date, today.year() + 1)
    } else {
        Ok(this_year)
    }
}

/// Minutes from `start` to `end`, wrapping past midnight.
fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes().rem_euclid(MINUTES_PER_DAY)
}

/// Insert thousands separators into an integer.
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn age_breakdown(birth: NaiveDate, today: NaiveDate) -> (i32, i32, i32) {
    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;
    if days < 0 {
        months -= 1;
        let previous_month_length = today
            .with_day(1)
            .and_then(|first| first.pred_opt())
            .map_or(31, |last| last.day() as i32);
        days += previous_month_length;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }
    (years, months, days)
}

fn age() -> Category {
    Category::new(
        "age",
        "Age & Date Calculations",
        vec![
            FormulaSpec {
                id: "ageCalculator",
                name: "Age Calculator",
                formula: "Age = Today - Birth Date",
                inputs: vec![InputSpec::date("birthDate", "Birth Date", "DOB")],
                compute: |i| {
                    let birth = i.date("birthDate")?;
                    let ctx = i.context();
                    if birth > ctx.today() {
                        return Err(CalcError::compute("birth date is in the future"));
                    }
                    let (years, months, days) = age_breakdown(birth, ctx.today());
                    let elapsed = ctx.now() - birth.and_time(NaiveTime::MIN);
                    let total_months =
                        (elapsed.num_days() as f64 / DAYS_PER_MONTH).floor() as i64;
                    let lines = [
                        format!("{} years, {} months, {} days", years, months, days),
                        format!("Decades: {}", group_thousands(i64::from(years / 10))),
                        format!("Months: {}", group_thousands(total_months)),
                        format!("Weeks: {}", group_thousands(elapsed.num_weeks())),
                        format!("Days: {}", group_thousands(elapsed.num_days())),
                        format!("Hours: {}", group_thousands(elapsed.num_hours())),
                        format!("Minutes: {}", group_thousands(elapsed.num_minutes())),
                        format!("Seconds: {}", group_thousands(elapsed.num_seconds())),
                    ];
                    Ok(lines.join("\n").into())
                },
                result_unit: "",
                explanation: "Age in years, months and days, plus the total time alive in every unit.",
            },
            FormulaSpec {
                id: "dateDifference",
                name: "Date Difference",
                formula: "Difference = End Date - Start Date",
                inputs: vec![
                    InputSpec::date("startDate", "Start Date", "Start"),
                    InputSpec::date("endDate", "End Date", "End"),
                ],
                compute: |i| {
                    let days = (i.date("endDate")? - i.date("startDate")?).num_days();
                    let months = (days as f64 / DAYS_PER_MONTH).floor();
                    let years = (days as f64 / DAYS_PER_YEAR).floor();
                    Ok(format!(
                        "{} days ({} weeks, {} months, {} years)",
                        days,
                        days.div_euclid(7),
                        months,
                        years
                    )
                    .into())
                },
                result_unit: "",
                explanation: "Difference between two dates in days, weeks, months and years.",
            },
            FormulaSpec {
                id: "addDays",
                name: "Add Days to Date",
                formula: "New Date = Start Date + Days",
                inputs: vec![
                    InputSpec::date("startDate", "Start Date", "Start"),
                    InputSpec::numeric("days", "Days to Add", "Days", "days"),
                ],
                compute: |i| Ok(long_date(add_days(i.date("startDate")?, i.integer("days")?)?).into()),
                result_unit: "",
                explanation: "Adds days to a date across month and year boundaries. Negative values subtract.",
            },
            FormulaSpec {
                id: "daysUntil",
                name: "Days Until Date",
                formula: "Days = Target Date - Today",
                inputs: vec![InputSpec::date("targetDate", "Target Date", "Target")],
                compute: |i| {
                    let days = (i.date("targetDate")? - i.context().today()).num_days();
                    Ok(days.into())
                },
                result_unit: "days",
                explanation: "Days from today until the target. Negative for dates in the past.",
            },
        ],
    )
}

fn duration() -> Category {
    Category::new(
        "duration",
        "Time Duration",
        vec![
            FormulaSpec {
                id: "timeDifference",
                name: "Time Difference",
                formula: "Duration = End Time - Start Time",
                inputs: vec![
                    InputSpec::time("startTime", "Start Time", "Start"),
                    InputSpec::time("endTime", "End Time", "End"),
                ],
                compute: |i| {
                    let minutes = minutes_between(i.time("startTime")?, i.time("endTime")?);
                    Ok(format!("{} hours, {} minutes", minutes / 60, minutes % 60).into())
                },
                result_unit: "",
                explanation: "Duration between two times. An end time before the start runs past midnight.",
            },
            FormulaSpec {
                id: "hoursToTime",
                name: "Hours to Time Format",
                formula: "Convert decimal hours to HH:MM",
                inputs: vec![InputSpec::numeric("hours", "Hours (decimal)", "H", "hours")],
                compute: |i| {
                    let total = (i.number("hours")? * 60.0).round();
                    if total.abs() >= i64::MAX as f64 {
                        return Err(CalcError::compute("hours out of range"));
                    }
                    let total = total as i64;
                    Ok(format!("{}:{:02}", total.div_euclid(60), total.rem_euclid(60)).into())
                },
                result_unit: "",
                explanation: "Decimal hours as a clock duration, 2.5 hours is 2:30.",
            },
            FormulaSpec {
                id: "minutesToHours",
                name: "Minutes to Hours",
                formula: "Hours = Minutes / 60",
                inputs: vec![InputSpec::numeric("minutes", "Minutes", "M", "minutes")],
                compute: |i| Ok((i.number("minutes")? / 60.0).into()),
                result_unit: "hours",
                explanation: "90 minutes is 1.5 hours.",
            },
            FormulaSpec {
                id: "workHours",
                name: "Work Hours Calculator",
                formula: "Work Hours = (End - Start) - Break",
                inputs: vec![
                    InputSpec::time("startTime", "Start Time", "Start"),
                    InputSpec::time("endTime", "End Time", "End"),
                    InputSpec::numeric("breakMinutes", "Break (minutes)", "Break", "min"),
                ],
                compute: |i| {
                    let worked = minutes_between(i.time("startTime")?, i.time("endTime")?) as f64
                        - i.number("breakMinutes")?;
                    Ok(((worked / 60.0 * 100.0).round() / 100.0).into())
                },
                result_unit: "hours",
                explanation: "Shift length minus breaks, rounded to hundredths of an hour.",
            },
        ],
    )
}

fn business() -> Category {
    Category::new(
        "business",
        "Business Days",
        vec![
            FormulaSpec {
                id: "businessDays",
                name: "Business Days Between Dates",
                formula: "Count weekdays (Mon-Fri)",
                inputs: vec![
                    InputSpec::date("startDate", "Start Date", "Start"),
                    InputSpec::date("endDate", "End Date", "End"),
                ],
                compute: |i| Ok(business_days(i.date("startDate")?, i.date("endDate")?).into()),
                result_unit: "business days",
                explanation: "Weekdays from start to end, both dates included.",
            },
            FormulaSpec {
                id: "addBusinessDays",
                name: "Add Business Days",
                formula: "Add N business days to date",
                inputs: vec![
                    InputSpec::date("startDate", "Start Date", "Start"),
                    InputSpec::numeric("days", "Business Days", "Days", "days"),
                ],
                compute: |i| {
                    let date = add_business_days(i.date("startDate")?, i.integer("days")?)?;
                    Ok(long_date(date).into())
                },
                result_unit: "",
                explanation: "Counts forward from the day after the start date, skipping weekends.",
            },
            FormulaSpec {
                id: "weekNumber",
                name: "Week Number of Year",
                formula: "ISO week number calculation",
                inputs: vec![InputSpec::date("date", "Date", "Date")],
                compute: |i| Ok(i64::from(i.date("date")?.iso_week().week()).into()),
                result_unit: "",
                explanation: "ISO week number, 1-53. Week 1 contains the year's first Thursday.",
            },
        ],
    )
}

fn timezone() -> Category {
    Category::new(
        "timezone",
        "Time Zone Conversions",
        vec![
            FormulaSpec {
                id: "utcOffset",
                name: "Time Zone Offset",
                formula: "Local Time = UTC + Offset",
                inputs: vec![InputSpec::numeric("offset", "UTC Offset (hours)", "Offset", "hours")],
                compute: |i| {
                    let offset = i.number("offset")?;
                    if offset.abs() > 24.0 {
                        return Err(CalcError::compute("offset exceeds 24 hours"));
                    }
                    let seconds = (offset * 3600.0).round() as i64;
                    let local = i.context().utc_now() + chrono::Duration::seconds(seconds);
                    Ok(local.format("%I:%M %p").to_string().into())
                },
                result_unit: "",
                explanation: "Current time at a UTC offset. Positive is east of UTC, India is +5.5.",
            },
            FormulaSpec {
                id: "timezoneConvert",
                name: "Time Zone Difference",
                formula: "Time Difference = Offset₂ - Offset₁",
                inputs: vec![
                    InputSpec::numeric("offset1", "Zone 1 Offset", "UTC₁", "hours"),
                    InputSpec::numeric("offset2", "Zone 2 Offset", "UTC₂", "hours"),
                ],
                compute: |i| Ok((i.number("offset2")? - i.number("offset1")?).into()),
                result_unit: "hours",
                explanation: "New York (UTC-5) to Tokyo (UTC+9) is 14 hours.",
            },
        ],
    )
}

fn calendar() -> Category {
    Category::new(
        "calendar",
        "Calendar Utilities",
        vec![
            FormulaSpec {
                id: "dayOfWeek",
                name: "Day of Week Finder",
                formula: "Zeller's congruence algorithm",
                inputs: vec![InputSpec::date("date", "Date", "Date")],
                compute: |i| Ok(i.date("date")?.format("%A").to_string().into()),
                result_unit: "",
                explanation: "The weekday any date falls on.",
            },
            FormulaSpec {
                id: "leapYear",
                name: "Leap Year Checker",
                formula: "Divisible by 4, except centuries unless divisible by 400",
                inputs: vec![InputSpec::numeric("year", "Year", "Year", "")],
                compute: |i| {
                    let answer = if is_leap_year(i.integer("year")?) {
                        "Yes (366 days)"
                    } else {
                        "No (365 days)"
                    };
                    Ok(answer.into())
                },
                result_unit: "",
                explanation: "Leap years have 366 days and a February 29.",
            },
            FormulaSpec {
                id: "daysInMonth",
                name: "Days in Month",
                formula: "Days vary by month and leap year",
                inputs: vec![
                    InputSpec::numeric("month", "Month (1-12)", "Month", ""),
                    InputSpec::numeric("year", "Year", "Year", ""),
                ],
                compute: |i| {
                    let days = days_in_month(i.integer("year")?, i.integer("month")?)?;
                    Ok(f64::from(days).into())
                },
                result_unit: "days",
                explanation: "Days in a month, with 29 for February in leap years.",
            },
            FormulaSpec {
                id: "quarterOfYear",
                name: "Quarter of Year",
                formula: "Q1=Jan-Mar, Q2=Apr-Jun, Q3=Jul-Sep, Q4=Oct-Dec",
                inputs: vec![InputSpec::date("date", "Date", "Date")],
                compute: |i| {
                    let date = i.date("date")?;
                    Ok(format!("Q{} {}", date.month0() / 3 + 1, date.year()).into())
                },
                result_unit: "",
                explanation: "Calendar quarter of a date, as used in business reporting.",
            },
        ],
    )
}

fn countdown() -> Category {
    Category::new(
        "countdown",
        "Countdown & Events",
        vec![
            FormulaSpec {
                id: "birthday",
                name: "Next Birthday",
                formula: "Days until next occurrence",
                inputs: vec![InputSpec::date("birthDate", "Birth Date", "DOB")],
                compute: |i| {
                    let today = i.context().today();
                    let next = next_occurrence(i.date("birthDate")?, today)?;
                    let days = (next - today).num_days();
                    Ok(format!("{} days ({})", days, long_date(next)).into())
                },
                result_unit: "",
                explanation: "Days until the next birthday and its date. Zero on the day itself.",
            },
            FormulaSpec {
                id: "anniversary",
                name: "Anniversary Calculator",
                formula: "Years since event",
                inputs: vec![InputSpec::date("eventDate", "Event Date", "Event")],
                compute: |i| {
                    let event = i.date("eventDate")?;
                    let today = i.context().today();
                    let next = next_occurrence(event, today)?;
                    let mut years = today.year() - event.year();
                    if next.year() == today.year() && next > today {
                        years -= 1;
                    }
                    let days = (next - today).num_days();
                    Ok(format!("{} years completed, next in {} days", years.max(0), days).into())
                },
                result_unit: "",
                explanation: "Whole years since an event and days until its next anniversary.",
            },
            FormulaSpec {
                id: "retirement",
                name: "Days to Retirement",
                formula: "Days until target age",
                inputs: vec![
                    InputSpec::date("birthDate", "Birth Date", "DOB"),
                    InputSpec::numeric("retirementAge", "Retirement Age", "Age", "years"),
                ],
                compute: |i| {
                    let birth = i.date("birthDate")?;
                    let age = i32::try_from(i.integer("retirementAge")?)
                        .map_err(|_| CalcError::compute("retirement age out of range"))?;
                    let target_year = birth
                        .year()
                        .checked_add(age)
                        .ok_or_else(|| CalcError::compute("retirement age out of range"))?;
                    let retirement = same_day_in_year(birth, target_year)?;
                    let days = (retirement - i.context().today()).num_days();
                    Ok(format!(
                        "{} days ({:.1} years) until {}",
                        group_thousands(days),
                        days as f64 / DAYS_PER_YEAR,
                        long_date(retirement)
                    )
                    .into())
                },
                result_unit: "",
                explanation: "Countdown to the date you reach the retirement age.",
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EvalContext;
    use crate::input::{InputValue, Inputs};
    use crate::value::Value;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> EvalContext {
        EvalContext::fixed(ymd(2024, 3, 15), NaiveTime::from_hms_opt(12, 0, 0).unwrap())
    }

    fn eval(category: &str, id: &str, bindings: &[(&'static str, InputValue)]) -> Value {
        let domain = domain();
        let spec = domain.category(category).unwrap().formula(id).unwrap();
        let mut inputs = Inputs::new(ctx());
        for (key, value) in bindings {
            inputs.insert(*key, value.clone());
        }
        (spec.compute)(&inputs).unwrap()
    }

    #[test]
    fn test_business_days_inclusive() {
        // Monday to next Monday covers six weekdays.
        assert_eq!(business_days(ymd(2024, 3, 4), ymd(2024, 3, 11)), 6);
        assert_eq!(business_days(ymd(2024, 3, 9), ymd(2024, 3, 10)), 0);
        assert_eq!(business_days(ymd(2024, 3, 8), ymd(2024, 3, 4)), 0);
        assert_eq!(business_days(ymd(2024, 1, 1), ymd(2024, 12, 31)), 262);
    }

    #[test]
    fn test_add_business_days_starts_after_start() {
        let saturday = ymd(2024, 3, 9);
        assert_eq!(add_business_days(saturday, 1).unwrap(), ymd(2024, 3, 11));
        assert_eq!(add_business_days(saturday, 5).unwrap(), ymd(2024, 3, 15));
        assert_eq!(add_business_days(saturday, 10).unwrap(), ymd(2024, 3, 22));
        assert_eq!(add_business_days(ymd(2024, 3, 4), 5).unwrap(), ymd(2024, 3, 11));
        assert_eq!(add_business_days(saturday, 0).unwrap(), saturday);
    }

    #[test]
    fn test_add_business_days_matches_stepping() {
        let start = ymd(2024, 3, 6);
        for count in 1..30 {
            let mut expected = start;
            let mut left = count;
            while left > 0 {
                expected = expected.succ_opt().unwrap();
                if is_business_day(expected) {
                    left -= 1;
                }
            }
            assert_eq!(add_business_days(start, count).unwrap(), expected);
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert!(days_in_month(2024, 13).is_err());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-12_000), "-12,000");
    }

    #[test]
    fn test_age_breakdown_borrows() {
        assert_eq!(age_breakdown(ymd(1990, 3, 20), ymd(2024, 3, 15)), (33, 11, 24));
        assert_eq!(age_breakdown(ymd(1990, 3, 15), ymd(2024, 3, 15)), (34, 0, 0));
    }

    #[test]
    fn test_days_until_uses_context() {
        let value = eval(
            "age",
            "daysUntil",
            &[("targetDate", InputValue::Date(ymd(2024, 3, 25)))],
        );
        assert_eq!(value, Value::from(10.0));
    }

    #[test]
    fn test_birthday_today_is_zero() {
        let value = eval(
            "countdown",
            "birthday",
            &[("birthDate", InputValue::Date(ymd(1990, 3, 15)))],
        );
        assert_eq!(value, Value::from("0 days (March 15, 2024)"));
    }

    #[test]
    fn test_time_difference_overnight() {
        let value = eval(
            "duration",
            "timeDifference",
            &[
                ("startTime", InputValue::Time(NaiveTime::from_hms_opt(22, 0, 0).unwrap())),
                ("endTime", InputValue::Time(NaiveTime::from_hms_opt(6, 30, 0).unwrap())),
            ],
        );
        assert_eq!(value, Value::from("8 hours, 30 minutes"));
    }

    #[test]
    fn test_day_of_week_and_quarter() {
        let date = [("date", InputValue::Date(ymd(2024, 3, 15)))];
        assert_eq!(eval("calendar", "dayOfWeek", &date), Value::from("Friday"));
        assert_eq!(eval("calendar", "quarterOfYear", &date), Value::from("Q1 2024"));
    }

    #[test]
    fn test_utc_offset_formats_clock() {
        let value = eval("timezone", "utcOffset", &[("offset", InputValue::Number(5.5))]);
        assert_eq!(value, Value::from("05:30 PM"));
    }
}
