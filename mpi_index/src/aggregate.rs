use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::config::*;
use crate::table::{Row, RowSignature, Table};

/// Removes the rows that are exact copies of an earlier row.
pub fn dedup<R: Row>(table: &Table<R>) -> Table<R> {
    let mut seen: HashSet<RowSignature> = HashSet::new();
    table
        .iter()
        .filter(|r| seen.insert(r.signature()))
        .cloned()
        .collect()
}

/// Sums a numeric column after removing duplicated rows.
///
/// Empty cells are skipped and an empty table sums to zero.
pub fn sum_field<R: Row>(table: &Table<R>, field: &str) -> Result<f64, IndexError> {
    let unique = dedup(table);
    debug!(
        "sum_field: {:?}: {} rows, {} after dedup",
        field,
        table.len(),
        unique.len()
    );
    let mut total = 0.0;
    for row in unique.iter() {
        match row.field(field) {
            Some(Some(x)) => total += x,
            Some(None) => {}
            None => return Err(IndexError::UnknownField(field.to_string())),
        }
    }
    Ok(total)
}

/// The 1-based position of the country when the rows are sorted by decreasing
/// MPI, and the number of rows.
///
/// The sort is stable: rows with the same MPI keep their table order.
pub fn rank_country(table: &Table<MpiRow>, country: &str) -> Result<CountryRank, IndexError> {
    let mut sorted: Vec<&MpiRow> = table.iter().collect();
    sorted.sort_by(|a, b| b.mpi.total_cmp(&a.mpi));
    let position = sorted
        .iter()
        .position(|r| r.country == country)
        .ok_or_else(|| IndexError::CountryNotRanked(country.to_string()))?;
    Ok(CountryRank {
        rank: position + 1,
        total: sorted.len(),
    })
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum GroupBy {
    Year,
    Country,
}

#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd, Serialize)]
pub enum GroupKey {
    Year(Year),
    Country(String),
}

/// The median of a numeric column for each distinct group.
///
/// Empty cells are skipped. A group without any value is left out.
pub fn median_by_group<R: Row>(
    table: &Table<R>,
    group: GroupBy,
    field: &str,
) -> Result<BTreeMap<GroupKey, f64>, IndexError> {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for row in table.iter() {
        let key = match group {
            GroupBy::Year => GroupKey::Year(row.year()),
            GroupBy::Country => GroupKey::Country(row.country().to_string()),
        };
        let values = groups.entry(key).or_default();
        match row.field(field) {
            Some(Some(x)) => values.push(x),
            Some(None) => {}
            None => return Err(IndexError::UnknownField(field.to_string())),
        }
    }
    Ok(groups
        .into_iter()
        .filter_map(|(k, vs)| median(&vs).map(|m| (k, m)))
        .collect())
}

/// Per-year medians, keyed directly by year.
pub fn median_by_year<R: Row>(
    table: &Table<R>,
    field: &str,
) -> Result<BTreeMap<Year, f64>, IndexError> {
    let medians = median_by_group(table, GroupBy::Year, field)?;
    Ok(medians
        .into_iter()
        .filter_map(|(k, m)| match k {
            GroupKey::Year(y) => Some((y, m)),
            GroupKey::Country(_) => None,
        })
        .collect())
}
