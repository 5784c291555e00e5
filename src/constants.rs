use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Plain `local@domain.tld` shape required of addresses we mail to or from.
pub static EMAIL_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Letters, digits, whitespace, apostrophes and hyphens.
pub static CONTACT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9\s'-]*$").expect("valid name regex")
});

pub static SLUG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex")
});
