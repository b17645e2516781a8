//! Summary table assembly and ranking.

use fxbench_core::Symbol;
use serde::Serialize;
use std::cmp::Ordering;

use crate::returns::SummaryRecord;

/// A ranking the presentation layer can ask the table about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    /// Highest total return.
    BestReturn,
    /// Lowest annualized volatility.
    LowestRisk,
}

/// Summary records with extremum flags.
///
/// Records are kept in request order; both sorts are stable, so ties keep
/// that order and the leader of each ranking is the first extremum in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    records: Vec<SummaryRecord>,
    best_return: Option<Symbol>,
    lowest_risk: Option<Symbol>,
}

/// One presentation row: a record plus its extremum flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Underlying metrics.
    #[serde(flatten)]
    pub record: SummaryRecord,
    /// True for the best-return leader.
    pub best_return: bool,
    /// True for the lowest-risk leader.
    pub lowest_risk: bool,
}

impl SummaryTable {
    /// Builds the table from records in request order.
    #[must_use]
    pub fn new(records: Vec<SummaryRecord>) -> Self {
        let mut table = Self {
            records,
            best_return: None,
            lowest_risk: None,
        };
        table.best_return = table.by_return().first().map(|r| r.symbol.clone());
        table.lowest_risk = table.by_volatility().first().map(|r| r.symbol.clone());
        table
    }

    /// Records in request order.
    #[must_use]
    pub fn records(&self) -> &[SummaryRecord] {
        &self.records
    }

    /// Records sorted by total return, descending.
    #[must_use]
    pub fn by_return(&self) -> Vec<&SummaryRecord> {
        let mut sorted: Vec<&SummaryRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| {
            b.total_return_pct
                .partial_cmp(&a.total_return_pct)
                .unwrap_or(Ordering::Equal)
        });
        sorted
    }

    /// Records sorted by annualized volatility, ascending.
    #[must_use]
    pub fn by_volatility(&self) -> Vec<&SummaryRecord> {
        let mut sorted: Vec<&SummaryRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| {
            a.annualized_volatility_pct
                .partial_cmp(&b.annualized_volatility_pct)
                .unwrap_or(Ordering::Equal)
        });
        sorted
    }

    /// Symbol leading `ranking`, if the table is non-empty.
    #[must_use]
    pub fn leader(&self, ranking: Ranking) -> Option<&Symbol> {
        match ranking {
            Ranking::BestReturn => self.best_return.as_ref(),
            Ranking::LowestRisk => self.lowest_risk.as_ref(),
        }
    }

    /// Rows sorted by `ranking`, each flagged with the rankings it leads.
    #[must_use]
    pub fn rows(&self, ranking: Ranking) -> Vec<SummaryRow> {
        let sorted = match ranking {
            Ranking::BestReturn => self.by_return(),
            Ranking::LowestRisk => self.by_volatility(),
        };
        sorted
            .into_iter()
            .map(|record| SummaryRow {
                best_return: self.best_return.as_ref() == Some(&record.symbol),
                lowest_risk: self.lowest_risk.as_ref() == Some(&record.symbol),
                record: record.clone(),
            })
            .collect()
    }

    /// Record for `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&SummaryRecord> {
        self.records.iter().find(|r| &r.symbol == symbol)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxbench_core::Date;

    fn record(symbol: &str, ret: f64, vol: f64) -> SummaryRecord {
        SummaryRecord {
            symbol: Symbol::parse(symbol).unwrap(),
            total_return_pct: ret,
            annualized_volatility_pct: vol,
            start: Date::from_ymd(2024, 1, 2).unwrap(),
            end: Date::from_ymd(2024, 6, 28).unwrap(),
            observations: 120,
        }
    }

    fn names(records: &[&SummaryRecord]) -> Vec<String> {
        records.iter().map(|r| r.symbol.to_string()).collect()
    }

    #[test]
    fn test_sorted_by_return_descending() {
        let table = SummaryTable::new(vec![
            record("A", 5.0, 20.0),
            record("B", 30.0, 35.0),
            record("C", -4.0, 10.0),
        ]);
        assert_eq!(names(&table.by_return()), ["B", "A", "C"]);
        assert_eq!(names(&table.by_volatility()), ["C", "A", "B"]);
        assert_eq!(table.leader(Ranking::BestReturn).unwrap().as_str(), "B");
        assert_eq!(table.leader(Ranking::LowestRisk).unwrap().as_str(), "C");
    }

    #[test]
    fn test_ties_keep_request_order() {
        let table = SummaryTable::new(vec![
            record("X", 10.0, 15.0),
            record("Y", 10.0, 15.0),
            record("Z", 12.0, 15.0),
        ]);
        assert_eq!(names(&table.by_return()), ["Z", "X", "Y"]);
        assert_eq!(names(&table.by_volatility()), ["X", "Y", "Z"]);
        assert_eq!(table.leader(Ranking::LowestRisk).unwrap().as_str(), "X");
    }

    #[test]
    fn test_rows_flag_leaders() {
        let table = SummaryTable::new(vec![record("A", 5.0, 20.0), record("B", 30.0, 35.0)]);
        let rows = table.rows(Ranking::BestReturn);
        assert!(rows[0].best_return && !rows[0].lowest_risk);
        assert!(!rows[1].best_return && rows[1].lowest_risk);

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["symbol"], "B");
        assert_eq!(json["best_return"], true);
    }

    #[test]
    fn test_empty_table() {
        let table = SummaryTable::new(Vec::new());
        assert!(table.is_empty());
        assert!(table.leader(Ranking::BestReturn).is_none());
        assert!(table.rows(Ranking::LowestRisk).is_empty());
    }
}
