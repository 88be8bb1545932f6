use std::collections::BTreeMap;

use super::model::{Category, WasteRecord};

/// Base year of the fixed growth comparison.
pub const GROWTH_BASE_PERIOD: i32 = 2014;
/// Target year of the fixed growth comparison.
pub const GROWTH_TARGET_PERIOD: i32 = 2022;

// ---------------------------------------------------------------------------
// Derived-view rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentTotal {
    pub department: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NationalSummary {
    /// Country-wide municipal tonnage, all periods.
    pub total_municipal: f64,
    /// Department with the largest municipal total.
    pub top_department: String,
    /// Department with the smallest municipal total.
    pub bottom_department: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerCapitaRow {
    pub district: String,
    pub kg_per_person: f64,
}

/// Three-category tonnage totals for one (department, period) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTotals {
    pub household: f64,
    pub non_household: f64,
    pub municipal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthRow {
    pub department: String,
    pub base_total: f64,
    pub target_total: f64,
    pub growth_pct: f64,
}

// ---------------------------------------------------------------------------
// The five derived views
// ---------------------------------------------------------------------------
//
// Every function here is a pure function of (records, parameters): no
// hidden state, no randomness, re-evaluated on each filter change.

/// Sum one category per department across all periods, sorted descending.
///
/// Grouping runs over a `BTreeMap`, so equal sums keep alphabetical order
/// under the stable sort and the output is identical run-to-run.
pub fn category_totals_by_department(
    records: &[WasteRecord],
    category: Category,
) -> Vec<DepartmentTotal> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *sums.entry(r.department.as_str()).or_insert(0.0) += r.amount(category);
    }

    let mut totals: Vec<DepartmentTotal> = sums
        .into_iter()
        .map(|(department, total)| DepartmentTotal {
            department: department.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// National municipal total plus the departments at both ends of the
/// ranking. `None` for an empty record set.
pub fn national_summary(records: &[WasteRecord]) -> Option<NationalSummary> {
    let totals = category_totals_by_department(records, Category::Municipal);
    let top = totals.first()?;
    let bottom = totals.last()?;
    Some(NationalSummary {
        total_municipal: totals.iter().map(|t| t.total).sum(),
        top_department: top.department.clone(),
        bottom_department: bottom.department.clone(),
    })
}

/// Kilograms of waste per person, per district, for one exact
/// (department, province, period) filter and one category.
///
/// Waste is stored in tonnes; the `* 1000.0` converts to kilograms before
/// dividing by the district population. Rows with `population <= 0` are
/// dropped. An empty result is a normal outcome, not an error.
pub fn percapita_by_district(
    records: &[WasteRecord],
    department: &str,
    province: &str,
    period: i32,
    category: Category,
) -> Vec<PerCapitaRow> {
    let mut rows: Vec<PerCapitaRow> = records
        .iter()
        .filter(|r| {
            r.department == department
                && r.province == province
                && r.period == period
                && r.population > 0
        })
        .map(|r| PerCapitaRow {
            district: r.district.clone(),
            kg_per_person: (r.amount(category) * 1000.0) / r.population as f64,
        })
        .collect();
    rows.sort_by(|a, b| b.kg_per_person.total_cmp(&a.kg_per_person));
    rows
}

/// Per-category sums for one (department, period) pair.
///
/// `None` means no row matched; callers must not conflate that with a
/// department that reported zeros.
pub fn totals_by_department_and_period(
    records: &[WasteRecord],
    department: &str,
    period: i32,
) -> Option<CategoryTotals> {
    let mut totals = CategoryTotals {
        household: 0.0,
        non_household: 0.0,
        municipal: 0.0,
    };
    let mut matched = false;
    for r in records {
        if r.department == department && r.period == period {
            matched = true;
            totals.household += r.household;
            totals.non_household += r.non_household;
            totals.municipal += r.municipal;
        }
    }
    matched.then_some(totals)
}

/// Percentage growth of a category's departmental total between two
/// periods, sorted descending.
///
/// This is an intersection join: departments missing from either period
/// are dropped, and so are departments whose base-period total is exactly
/// zero, since the ratio is undefined for them.
pub fn growth_by_department(
    records: &[WasteRecord],
    category: Category,
    period_a: i32,
    period_b: i32,
) -> Vec<GrowthRow> {
    let mut base: BTreeMap<&str, f64> = BTreeMap::new();
    let mut target: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        if r.period == period_a {
            *base.entry(r.department.as_str()).or_insert(0.0) += r.amount(category);
        } else if r.period == period_b {
            *target.entry(r.department.as_str()).or_insert(0.0) += r.amount(category);
        }
    }

    let mut rows: Vec<GrowthRow> = base
        .into_iter()
        .filter_map(|(department, base_total)| {
            if base_total == 0.0 {
                return None;
            }
            let target_total = *target.get(department)?;
            Some(GrowthRow {
                department: department.to_string(),
                base_total,
                target_total,
                growth_pct: ((target_total - base_total) / base_total) * 100.0,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.growth_pct.total_cmp(&a.growth_pct));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(
        dept: &str,
        prov: &str,
        district: &str,
        period: i32,
        municipal: f64,
        population: i64,
    ) -> WasteRecord {
        WasteRecord {
            department: dept.to_string(),
            province: prov.to_string(),
            district: district.to_string(),
            period,
            household: municipal * 0.5,
            non_household: municipal * 0.25,
            municipal,
            population,
        }
    }

    #[test]
    fn department_totals_preserve_the_grand_total() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 100.0, 1000),
            rec("LIMA", "CANTA", "CANTA", 2014, 40.0, 500),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014, 70.0, 800),
        ];
        for category in Category::ALL {
            let totals = category_totals_by_department(&records, category);
            let summed: f64 = totals.iter().map(|t| t.total).sum();
            let expected: f64 = records.iter().map(|r| r.amount(category)).sum();
            assert!((summed - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn department_totals_are_sorted_descending() {
        let records = vec![
            rec("ANCASH", "HUARAZ", "HUARAZ", 2014, 10.0, 100),
            rec("LIMA", "LIMA", "ATE", 2014, 100.0, 100),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014, 50.0, 100),
        ];
        let totals = category_totals_by_department(&records, Category::Municipal);
        for pair in totals.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
        assert_eq!(totals[0].department, "LIMA");
        assert_eq!(totals[2].department, "ANCASH");
    }

    #[test]
    fn tied_departments_keep_alphabetical_order() {
        let records = vec![
            rec("PUNO", "PUNO", "PUNO", 2014, 25.0, 100),
            rec("ICA", "ICA", "ICA", 2014, 25.0, 100),
        ];
        let totals = category_totals_by_department(&records, Category::Municipal);
        assert_eq!(totals[0].department, "ICA");
        assert_eq!(totals[1].department, "PUNO");
    }

    #[test]
    fn empty_record_set_yields_empty_views() {
        assert!(category_totals_by_department(&[], Category::Household).is_empty());
        assert_eq!(national_summary(&[]), None);
    }

    #[test]
    fn national_summary_picks_both_extremes() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 100.0, 100),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014, 30.0, 100),
            rec("PUNO", "PUNO", "PUNO", 2014, 5.0, 100),
        ];
        let summary = national_summary(&records).expect("non-empty");
        assert!((summary.total_municipal - 135.0).abs() < 1e-9);
        assert_eq!(summary.top_department, "LIMA");
        assert_eq!(summary.bottom_department, "PUNO");
    }

    #[test]
    fn percapita_excludes_non_positive_population() {
        // Populations [0, 500] with municipal waste [10, 20] tonnes:
        // only the populated district survives, at 20*1000/500 = 40 kg/person.
        let records = vec![
            rec("LIMA", "LIMA", "GHOST TOWN", 2014, 10.0, 0),
            rec("LIMA", "LIMA", "ATE", 2014, 20.0, 500),
        ];
        let rows = percapita_by_district(&records, "LIMA", "LIMA", 2014, Category::Municipal);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district, "ATE");
        assert_eq!(rows[0].kg_per_person, 40.0);
    }

    #[test]
    fn percapita_values_match_the_formula_exactly() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 12.0, 300),
            rec("LIMA", "LIMA", "SURCO", 2014, 7.0, 350),
        ];
        let rows = percapita_by_district(&records, "LIMA", "LIMA", 2014, Category::Municipal);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            let src = records.iter().find(|r| r.district == row.district).unwrap();
            assert_eq!(
                row.kg_per_person,
                (src.municipal * 1000.0) / src.population as f64
            );
        }
        assert!(rows[0].kg_per_person >= rows[1].kg_per_person);
    }

    #[test]
    fn percapita_with_no_match_is_empty_not_an_error() {
        let records = vec![rec("LIMA", "LIMA", "ATE", 2014, 10.0, 100)];
        let rows = percapita_by_district(&records, "LIMA", "CANTA", 2014, Category::Household);
        assert!(rows.is_empty());
    }

    #[test]
    fn department_period_totals_sum_across_districts() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 10.0, 100),
            rec("LIMA", "CANTA", "CANTA", 2014, 6.0, 100),
            rec("LIMA", "LIMA", "ATE", 2022, 99.0, 100),
        ];
        let totals = totals_by_department_and_period(&records, "LIMA", 2014).expect("has data");
        assert!((totals.municipal - 16.0).abs() < 1e-9);
        assert!((totals.household - 8.0).abs() < 1e-9);
        assert!((totals.non_household - 4.0).abs() < 1e-9);
    }

    #[test]
    fn no_matching_rows_is_reported_as_no_data() {
        let records = vec![rec("LIMA", "LIMA", "ATE", 2014, 10.0, 100)];
        // "No data" must stay distinguishable from a legitimate zero tuple.
        assert_eq!(totals_by_department_and_period(&records, "LIMA", 2019), None);
        assert_eq!(totals_by_department_and_period(&records, "PUNO", 2014), None);
    }

    #[test]
    fn growth_is_relative_change_between_the_two_periods() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 100.0, 100),
            rec("LIMA", "LIMA", "ATE", 2022, 150.0, 100),
        ];
        let rows = growth_by_department(
            &records,
            Category::Municipal,
            GROWTH_BASE_PERIOD,
            GROWTH_TARGET_PERIOD,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].growth_pct, 50.0);
    }

    #[test]
    fn growth_only_includes_departments_present_in_both_periods() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 100.0, 100),
            rec("LIMA", "LIMA", "ATE", 2022, 110.0, 100),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014, 50.0, 100),
            rec("PUNO", "PUNO", "PUNO", 2022, 80.0, 100),
        ];
        let rows = growth_by_department(&records, Category::Municipal, 2014, 2022);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].department, "LIMA");
    }

    #[test]
    fn growth_drops_zero_base_departments() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 0.0, 100),
            rec("LIMA", "LIMA", "ATE", 2022, 80.0, 100),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014, 40.0, 100),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2022, 30.0, 100),
        ];
        let rows = growth_by_department(&records, Category::Municipal, 2014, 2022);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].department, "CUSCO");
        assert_eq!(rows[0].growth_pct, -25.0);
    }

    #[test]
    fn growth_ranking_is_sorted_descending() {
        let records = vec![
            rec("LIMA", "LIMA", "ATE", 2014, 100.0, 100),
            rec("LIMA", "LIMA", "ATE", 2022, 120.0, 100),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014, 100.0, 100),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2022, 180.0, 100),
        ];
        let rows = growth_by_department(&records, Category::Municipal, 2014, 2022);
        assert_eq!(rows[0].department, "CUSCO");
        assert_eq!(rows[1].department, "LIMA");
        for pair in rows.windows(2) {
            assert!(pair[0].growth_pct >= pair[1].growth_pct);
        }
    }
}
