//! Derived views over the fetched market records.
//!
//! Everything here is a pure function of the fetched set and the current
//! [`MarketFilters`]; filtering only ever narrows the set.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Deserialize;

use agrow_core::Price;

use super::MarketRecord;

/// Current filter selections. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketFilters {
    pub state: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
}

/// Query string of the crop-prices page.
///
/// `applied_state` and `applied_district` echo the selections the page was
/// rendered with, so a changed state or district can be told apart from an
/// unchanged one.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub commodity: String,
    pub applied_state: Option<String>,
    pub applied_district: Option<String>,
}

impl MarketFilters {
    /// Resolve a submitted query into filters, applying the cascade rule.
    ///
    /// Without the `applied_*` fields (a plain link) the query is taken as is.
    #[must_use]
    pub fn from_query(query: FilterQuery) -> Self {
        let commodity = query.commodity.trim().to_string();

        let (Some(applied_state), Some(applied_district)) =
            (query.applied_state, query.applied_district)
        else {
            return Self {
                state: query.state,
                district: query.district,
                market: query.market,
                commodity,
            };
        };

        let mut filters = Self {
            state: applied_state,
            district: applied_district,
            market: String::new(),
            commodity,
        };

        if filters.select_state(&query.state) {
            return filters;
        }
        if filters.select_district(&query.district) {
            return filters;
        }
        filters.market = query.market;
        filters
    }

    /// Select a state. A change clears the district and market.
    ///
    /// Returns whether the state changed.
    pub fn select_state(&mut self, state: &str) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state.to_string();
        self.district.clear();
        self.market.clear();
        true
    }

    /// Select a district. A change clears the market.
    ///
    /// Returns whether the district changed.
    pub fn select_district(&mut self, district: &str) -> bool {
        if self.district == district {
            return false;
        }
        self.district = district.to_string();
        self.market.clear();
        true
    }

    /// Whether `record` satisfies every non-empty filter.
    #[must_use]
    pub fn matches(&self, record: &MarketRecord) -> bool {
        (self.state.is_empty() || record.state == self.state)
            && (self.district.is_empty() || record.district == self.district)
            && (self.market.is_empty() || record.market == self.market)
            && (self.commodity.is_empty()
                || record
                    .commodity
                    .to_lowercase()
                    .contains(&self.commodity.to_lowercase()))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !(self.state.is_empty()
            && self.district.is_empty()
            && self.market.is_empty()
            && self.commodity.is_empty())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct non-empty states, sorted.
#[must_use]
pub fn states(records: &[MarketRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.state.as_str()))
}

/// Districts of `state`. Empty when no state is selected.
#[must_use]
pub fn districts(records: &[MarketRecord], state: &str) -> Vec<String> {
    if state.is_empty() {
        return Vec::new();
    }
    distinct(
        records
            .iter()
            .filter(|r| r.state == state)
            .map(|r| r.district.as_str()),
    )
}

/// Markets of `state` and `district`. Empty unless both are selected.
#[must_use]
pub fn markets(records: &[MarketRecord], state: &str, district: &str) -> Vec<String> {
    if state.is_empty() || district.is_empty() {
        return Vec::new();
    }
    distinct(
        records
            .iter()
            .filter(|r| r.state == state && r.district == district)
            .map(|r| r.market.as_str()),
    )
}

/// Records satisfying every filter, in fetched order.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [MarketRecord],
    filters: &MarketFilters,
) -> Vec<&'a MarketRecord> {
    records.iter().filter(|r| filters.matches(r)).collect()
}

/// Summary figures over a record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketStats {
    pub records: usize,
    pub states: usize,
    pub commodities: usize,
    /// Mean modal price, whole rupees.
    pub average_modal_price: Decimal,
}

impl MarketStats {
    #[must_use]
    pub fn from_records(records: &[&MarketRecord]) -> Self {
        let states: BTreeSet<_> = records.iter().map(|r| r.state.as_str()).collect();
        let commodities: BTreeSet<_> = records.iter().map(|r| r.commodity.as_str()).collect();

        Self {
            records: records.len(),
            states: states.len(),
            commodities: commodities.len(),
            average_modal_price: Price::mean_rounded(records.iter().map(|r| &r.modal_price)),
        }
    }

    /// Average formatted as a price.
    #[must_use]
    pub fn average_modal(&self) -> Price {
        Price::new(self.average_modal_price)
    }
}

/// Everything the crop-prices page renders for one set of filters.
#[derive(Debug, Clone)]
pub struct MarketView {
    pub filters: MarketFilters,
    pub states: Vec<String>,
    pub districts: Vec<String>,
    pub markets: Vec<String>,
    pub records: Vec<MarketRecord>,
    pub stats: MarketStats,
}

impl MarketView {
    #[must_use]
    pub fn build(all: &[MarketRecord], filters: MarketFilters) -> Self {
        let filtered = filter_records(all, &filters);
        let stats = MarketStats::from_records(&filtered);

        Self {
            states: states(all),
            districts: districts(all, &filters.state),
            markets: markets(all, &filters.state, &filters.district),
            records: filtered.into_iter().cloned().collect(),
            stats,
            filters,
        }
    }
}
