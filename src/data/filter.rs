use super::model::SalesRecord;
use crate::error::InvalidSelection;

/// Widget label meaning "do not constrain this dimension".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter selection: one optional equality constraint per dimension
// ---------------------------------------------------------------------------

/// The three dropdown constraints. `None` is the "All" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub region: Option<String>,
    pub category: Option<String>,
    pub year: Option<i32>,
}

impl FilterSelection {
    /// Build a selection from widget display text. Year text is parsed into
    /// an integer; `"All"` on any dimension clears that constraint.
    pub fn from_labels(region: &str, category: &str, year: &str) -> Result<Self, InvalidSelection> {
        let year = if year == ALL {
            None
        } else {
            Some(
                year.trim()
                    .parse::<i32>()
                    .map_err(|_| InvalidSelection::Year(year.to_string()))?,
            )
        };
        Ok(Self {
            region: label_constraint(region),
            category: label_constraint(category),
            year,
        })
    }

    /// True when no dimension is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.region.is_none() && self.category.is_none() && self.year.is_none()
    }

    /// Conjunction of the active equality predicates.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.region.as_ref().map_or(true, |r| record.region == *r)
            && self.category.as_ref().map_or(true, |c| record.category == *c)
            && self.year.map_or(true, |y| record.year == y)
    }
}

fn label_constraint(label: &str) -> Option<String> {
    (label != ALL).then(|| label.to_string())
}

// ---------------------------------------------------------------------------
// Subset – rows passing the current selection
// ---------------------------------------------------------------------------

/// Borrowed view of the rows that satisfy a selection, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subset<'a> {
    rows: Vec<&'a SalesRecord>,
}

impl<'a> Subset<'a> {
    pub fn rows(&self) -> &[&'a SalesRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> FromIterator<&'a SalesRecord> for Subset<'a> {
    fn from_iter<I: IntoIterator<Item = &'a SalesRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'s, 'a> IntoIterator for &'s Subset<'a> {
    type Item = &'a SalesRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a SalesRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}

/// Keep the rows that satisfy every active constraint.
///
/// Works on a full [`Dataset`](super::model::Dataset) or on an existing
/// [`Subset`]; an empty input or a selection matching nothing gives an empty
/// subset.
pub fn apply<'a>(
    rows: impl IntoIterator<Item = &'a SalesRecord>,
    selection: &FilterSelection,
) -> Subset<'a> {
    rows.into_iter().filter(|r| selection.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::{Dataset, Month};

    fn sample() -> Dataset {
        Dataset::new(vec![
            record("East", "Tech", "Phones", "A", 2022, Month::March, 10.0, 2.0),
            record("West", "Tech", "Phones", "B", 2023, Month::April, 20.0, 4.0),
            record("East", "Office", "Paper", "C", 2023, Month::May, 30.0, -1.0),
            record("South", "Office", "Binders", "D", 2022, Month::June, 40.0, 8.0),
            record("East", "Tech", "Chairs", "E", 2023, Month::July, 50.0, 5.0),
        ])
    }

    fn sel(region: &str, category: &str, year: &str) -> FilterSelection {
        FilterSelection::from_labels(region, category, year).expect("valid labels")
    }

    #[test]
    fn all_sentinels_are_identity() {
        let ds = sample();
        let s = sel(ALL, ALL, ALL);
        assert!(s.is_unconstrained());
        let subset = apply(&ds, &s);
        let all: Vec<&SalesRecord> = ds.iter().collect();
        assert_eq!(subset.rows(), all.as_slice());
    }

    #[test]
    fn constraints_are_conjunctive() {
        let ds = sample();
        let subset = apply(&ds, &sel("East", "Tech", "2023"));
        let products: Vec<&str> = subset.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(products, vec!["E"]);
    }

    #[test]
    fn single_dimension_preserves_order() {
        let ds = sample();
        let subset = apply(&ds, &sel("East", ALL, ALL));
        let products: Vec<&str> = subset.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(products, vec!["A", "C", "E"]);
    }

    #[test]
    fn year_compares_numerically() {
        let ds = sample();
        let subset = apply(&ds, &sel(ALL, ALL, " 2022"));
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|r| r.year == 2022));
    }

    #[test]
    fn region_match_is_exact() {
        let ds = sample();
        assert!(apply(&ds, &sel("east", ALL, ALL)).is_empty());
        assert!(apply(&ds, &sel("East ", ALL, ALL)).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let s = sel(ALL, "Office", ALL);
        let once = apply(&ds, &s);
        let twice = apply(&once, &s);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_match_and_empty_input_give_empty_subset() {
        let ds = sample();
        assert!(apply(&ds, &sel("North", ALL, ALL)).is_empty());
        assert!(apply(&Dataset::default(), &sel("East", "Tech", "2023")).is_empty());
    }

    #[test]
    fn bad_year_label_is_rejected() {
        assert_eq!(
            FilterSelection::from_labels(ALL, ALL, "last year"),
            Err(InvalidSelection::Year("last year".to_string()))
        );
    }
}
