use std::collections::BTreeSet;

use crate::config::*;
use crate::table::{Row, Table};

/// The rows of the given year, in table order.
/// An absent year yields an empty table.
pub fn filter_by_year<R: Row>(table: &Table<R>, year: Year) -> Table<R> {
    table.iter().filter(|r| r.year() == year).cloned().collect()
}

/// The rows of the given country, in table order.
pub fn filter_by_country<R: Row>(table: &Table<R>, country: &str) -> Table<R> {
    table
        .iter()
        .filter(|r| r.country() == country)
        .cloned()
        .collect()
}

pub fn exclude_years<R: Row>(table: &Table<R>, excluded: &[Year]) -> Table<R> {
    table
        .iter()
        .filter(|r| !excluded.contains(&r.year()))
        .cloned()
        .collect()
}

/// The distinct years of the table, in increasing order.
pub fn years<R: Row>(table: &Table<R>) -> Vec<Year> {
    let s: BTreeSet<Year> = table.iter().map(|r| r.year()).collect();
    s.into_iter().collect()
}

/// The distinct countries of the table, in alphabetical order.
pub fn countries<R: Row>(table: &Table<R>) -> Vec<String> {
    let s: BTreeSet<&str> = table.iter().map(|r| r.country()).collect();
    s.into_iter().map(|c| c.to_string()).collect()
}
