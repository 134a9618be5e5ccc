//! Embargo-terms and metadata date parsing.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

/// What the item's embargo-terms metadata declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbargoTerms {
    /// No value: no embargo asserted.
    Absent,
    /// The configured open sentinel: the item is open, no protection required.
    Open,
    /// Embargoed until this date.
    Until(Date),
    /// A value that is neither the sentinel nor a date.
    Unparseable(String),
}

impl EmbargoTerms {
    pub fn date(&self) -> Option<Date> {
        match self {
            EmbargoTerms::Until(d) => Some(*d),
            _ => None,
        }
    }

    /// True while the declared embargo date is still ahead of `today`.
    pub fn is_embargoed_on(&self, today: Date) -> bool {
        self.date().is_some_and(|d| d > today)
    }
}

pub fn parse_terms(raw: Option<&str>, open_sentinel: Option<&str>) -> EmbargoTerms {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return EmbargoTerms::Absent;
    };
    if open_sentinel.is_some_and(|s| s == raw) {
        return EmbargoTerms::Open;
    }
    match parse_metadata_date(raw) {
        Some(d) => EmbargoTerms::Until(d),
        None => EmbargoTerms::Unparseable(raw.to_string()),
    }
}

/// Parse a repository metadata date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and the partial forms `YYYY-MM` and `YYYY`
/// (first day of the period).
pub fn parse_metadata_date(raw: &str) -> Option<Date> {
    let s = raw.trim();
    if let Ok(d) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Some(d);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt.date());
    }

    let mut parts = s.split('-');
    let year: i32 = parts.next().filter(|y| y.len() == 4)?.parse().ok()?;
    let month = match parts.next() {
        Some(m) if m.len() == 2 => Month::try_from(m.parse::<u8>().ok()?).ok()?,
        Some(_) => return None,
        None => Month::January,
    };
    if parts.next().is_some() {
        return None;
    }
    Date::from_calendar_date(year, month, 1).ok()
}

/// Where the item's availability date stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    Missing,
    InFuture(Date),
    Known(Date),
}

impl Availability {
    pub fn from_raw(raw: Option<&str>, today: Date) -> Self {
        match raw.and_then(parse_metadata_date) {
            None => Availability::Missing,
            Some(d) if d > today => Availability::InFuture(d),
            Some(d) => Availability::Known(d),
        }
    }

    pub fn known(self) -> Option<Date> {
        match self {
            Availability::Known(d) => Some(d),
            _ => None,
        }
    }
}

/// `date` moved forward by whole years; Feb 29 lands on Feb 28 in non-leap years.
pub fn add_years(date: Date, years: u16) -> Option<Date> {
    let year = date.year().checked_add(i32::from(years))?;
    date.replace_year(year)
        .ok()
        .or_else(|| Date::from_calendar_date(year, date.month(), 28).ok())
}
