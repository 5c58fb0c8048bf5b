//! Sorting of the in-memory row collection by a derived total
//!
//! One `SortState` drives the single row ordering. The two column selectors
//! are views onto it: choosing a direction on one selector resets the other
//! to "No Filter". Choosing "No Filter" leaves the current order as it is; it
//! does not restore server order.

use std::cmp::Ordering;

use crate::pricing::models::DisplayRow;

/// Derived column the rows are ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    None,
    TotalCost,
    MonthlyTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Option shown by one column selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorChoice {
    #[default]
    NoFilter,
    LowToHigh,
    HighToLow,
}

impl SelectorChoice {
    pub fn next(&self) -> Self {
        match self {
            Self::NoFilter => Self::LowToHigh,
            Self::LowToHigh => Self::HighToLow,
            Self::HighToLow => Self::NoFilter,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoFilter => "No Filter",
            Self::LowToHigh => "Low to High",
            Self::HighToLow => "High to Low",
        }
    }

    /// Arrow appended to a column header
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::NoFilter => "",
            Self::LowToHigh => " ▲",
            Self::HighToLow => " ▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// No active sort; rows stay in whatever order they have
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// State resulting from picking `choice` on the selector for `field`
    pub fn select(field: SortField, choice: SelectorChoice) -> Self {
        match choice {
            SelectorChoice::NoFilter => Self::none(),
            SelectorChoice::LowToHigh => Self::by(field, SortDirection::Ascending),
            SelectorChoice::HighToLow => Self::by(field, SortDirection::Descending),
        }
    }

    /// What the selector for `field` currently shows
    pub fn choice_for(&self, field: SortField) -> SelectorChoice {
        if field == SortField::None || self.field != field {
            return SelectorChoice::NoFilter;
        }
        match self.direction {
            SortDirection::Ascending => SelectorChoice::LowToHigh,
            SortDirection::Descending => SelectorChoice::HighToLow,
        }
    }

    pub fn describe(&self) -> String {
        let column = match self.field {
            SortField::None => return "source order".to_string(),
            SortField::TotalCost => "Total",
            SortField::MonthlyTotal => "Monthly Total",
        };
        format!("{} ({})", column, self.choice_for(self.field).label())
    }
}

fn sort_key(row: &DisplayRow, field: SortField) -> f64 {
    match field {
        SortField::TotalCost => row.total_cost,
        SortField::MonthlyTotal => row.total_monthly_cost,
        SortField::None => 0.0,
    }
}

/// Reorder rows in place by the state's field and direction
///
/// The sort is stable: rows with equal keys keep their relative order, so
/// sorting an already sorted collection again is a no-op.
pub fn sort_rows(rows: &mut [DisplayRow], state: SortState) {
    if state.field == SortField::None {
        return;
    }

    let field = state.field;
    rows.sort_by(|a, b| {
        let ordering: Ordering = sort_key(a, field).total_cmp(&sort_key(b, field));
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::DisplayValue;

    fn row(zone: &str, total: f64, monthly: f64) -> DisplayRow {
        DisplayRow {
            zone: zone.to_string(),
            zone_type: "standard".to_string(),
            cost_per_gb: DisplayValue::Missing,
            cpm: DisplayValue::Missing,
            spend_limit: DisplayValue::Missing,
            current_usage: "0".to_string(),
            total_cost: total,
            total_monthly_cost: monthly,
        }
    }

    fn zones(rows: &[DisplayRow]) -> Vec<&str> {
        rows.iter().map(|r| r.zone.as_str()).collect()
    }

    #[test]
    fn test_sort_by_total_ascending_and_descending() {
        let mut rows = vec![row("b", 2.0, 1.0), row("c", 3.0, 0.0), row("a", 1.0, 2.0)];

        sort_rows(&mut rows, SortState::by(SortField::TotalCost, SortDirection::Ascending));
        assert_eq!(zones(&rows), vec!["a", "b", "c"]);

        sort_rows(&mut rows, SortState::by(SortField::TotalCost, SortDirection::Descending));
        assert_eq!(zones(&rows), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_monthly() {
        let mut rows = vec![row("b", 2.0, 1.0), row("c", 3.0, 0.0), row("a", 1.0, 2.0)];
        sort_rows(&mut rows, SortState::by(SortField::MonthlyTotal, SortDirection::Ascending));
        assert_eq!(zones(&rows), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_ties_keep_relative_order() {
        let mut rows = vec![row("x", 1.0, 0.0), row("y", 0.5, 0.0), row("z", 1.0, 0.0)];

        sort_rows(&mut rows, SortState::by(SortField::TotalCost, SortDirection::Descending));
        assert_eq!(zones(&rows), vec!["x", "z", "y"]);

        sort_rows(&mut rows, SortState::by(SortField::TotalCost, SortDirection::Ascending));
        assert_eq!(zones(&rows), vec!["y", "x", "z"]);

        let before = rows.clone();
        sort_rows(&mut rows, SortState::by(SortField::TotalCost, SortDirection::Ascending));
        assert_eq!(rows, before);
    }

    #[test]
    fn test_none_freezes_order() {
        let mut rows = vec![row("b", 2.0, 0.0), row("a", 1.0, 0.0)];
        sort_rows(&mut rows, SortState::none());
        assert_eq!(zones(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_selectors_share_one_state() {
        let state = SortState::select(SortField::TotalCost, SelectorChoice::HighToLow);
        assert_eq!(state.choice_for(SortField::TotalCost), SelectorChoice::HighToLow);
        assert_eq!(state.choice_for(SortField::MonthlyTotal), SelectorChoice::NoFilter);

        let state = SortState::select(SortField::MonthlyTotal, SelectorChoice::LowToHigh);
        assert_eq!(state.choice_for(SortField::TotalCost), SelectorChoice::NoFilter);
        assert_eq!(state.choice_for(SortField::MonthlyTotal), SelectorChoice::LowToHigh);

        assert_eq!(
            SortState::select(SortField::MonthlyTotal, SelectorChoice::NoFilter),
            SortState::none()
        );
    }

    #[test]
    fn test_selector_cycle_and_describe() {
        assert_eq!(SelectorChoice::NoFilter.next(), SelectorChoice::LowToHigh);
        assert_eq!(SelectorChoice::HighToLow.next(), SelectorChoice::NoFilter);
        assert_eq!(SortState::none().describe(), "source order");
        assert_eq!(
            SortState::by(SortField::MonthlyTotal, SortDirection::Descending).describe(),
            "Monthly Total (High to Low)"
        );
    }
}
