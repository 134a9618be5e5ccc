//! Fuzz target for embargo metadata parsing.
//!
//! Goal: terms and availability parsing should **never panic**, including near the ends of
//! the supported date range.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_embargo_terms
//! ```

#![no_main]

use arbitrary::Arbitrary;
use embargo_domain::terms::{add_years, parse_terms, Availability};
use libfuzzer_sys::fuzz_target;
use time::Date;

#[derive(Arbitrary, Debug)]
struct TermsInput {
    raw: Option<String>,
    sentinel: Option<String>,
    /// Julian day of the audit date.
    today: i32,
    years: u16,
}

fuzz_target!(|input: TermsInput| {
    if input.raw.as_ref().is_some_and(|r| r.len() > 256) {
        return;
    }
    let Ok(today) = Date::from_julian_day(input.today) else {
        return;
    };

    let terms = parse_terms(input.raw.as_deref(), input.sentinel.as_deref());
    let _ = terms.is_embargoed_on(today);

    if let Some(known) = Availability::from_raw(input.raw.as_deref(), today).known() {
        let _ = add_years(known, input.years);
    }
});
