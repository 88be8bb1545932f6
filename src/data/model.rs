use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Category – the three waste columns of the source file
// ---------------------------------------------------------------------------

/// One of the three waste-quantity columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Household,
    NonHousehold,
    Municipal,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Household,
        Category::NonHousehold,
        Category::Municipal,
    ];

    /// Column name in the raw CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Category::Household => "QRESIDUOS_DOM",
            Category::NonHousehold => "QRESIDUOS_NO_DOM",
            Category::Municipal => "QRESIDUOS_MUN",
        }
    }

    /// Human-readable label for widgets and chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Household => "Household",
            Category::NonHousehold => "Non-household",
            Category::Municipal => "Municipal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// WasteRecord – one row of the source file
// ---------------------------------------------------------------------------

/// One (department, province, district, period) row.
///
/// Waste quantities are in tonnes, already normalized to decimal-point
/// floats by the loader. Rows with `population <= 0` are kept here but
/// excluded from per-capita derivations.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteRecord {
    pub department: String,
    pub province: String,
    pub district: String,
    pub period: i32,
    pub household: f64,
    pub non_household: f64,
    pub municipal: f64,
    pub population: i64,
}

impl WasteRecord {
    /// Tonnage for the given category.
    pub fn amount(&self, category: Category) -> f64 {
        match category {
            Category::Household => self.household,
            Category::NonHousehold => self.non_household,
            Category::Municipal => self.municipal,
        }
    }
}

// ---------------------------------------------------------------------------
// WasteDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed selector lists.
///
/// Built once by the loader and treated as immutable afterwards; every
/// derived view is recomputed from `records` on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteDataset {
    /// All rows, in file order.
    pub records: Vec<WasteRecord>,
    /// Sorted unique department names.
    pub departments: Vec<String>,
    /// Sorted unique periods across the whole dataset.
    pub periods: Vec<i32>,
    /// Sorted unique provinces per department.
    provinces_by_department: BTreeMap<String, Vec<String>>,
    /// Sorted unique periods per department.
    periods_by_department: BTreeMap<String, Vec<i32>>,
}

impl WasteDataset {
    /// Build the selector indices from the loaded rows.
    pub fn from_records(records: Vec<WasteRecord>) -> Self {
        let mut departments: BTreeSet<String> = BTreeSet::new();
        let mut periods: BTreeSet<i32> = BTreeSet::new();
        let mut provinces: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut dept_periods: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();

        for rec in &records {
            departments.insert(rec.department.clone());
            periods.insert(rec.period);
            provinces
                .entry(rec.department.clone())
                .or_default()
                .insert(rec.province.clone());
            dept_periods
                .entry(rec.department.clone())
                .or_default()
                .insert(rec.period);
        }

        WasteDataset {
            records,
            departments: departments.into_iter().collect(),
            periods: periods.into_iter().collect(),
            provinces_by_department: provinces
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().collect()))
                .collect(),
            periods_by_department: dept_periods
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().collect()))
                .collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted provinces of one department (empty for an unknown department).
    pub fn provinces_of(&self, department: &str) -> &[String] {
        self.provinces_by_department
            .get(department)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sorted periods with data for one department.
    pub fn periods_of(&self, department: &str) -> &[i32] {
        self.periods_by_department
            .get(department)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(dept: &str, prov: &str, district: &str, period: i32) -> WasteRecord {
        WasteRecord {
            department: dept.to_string(),
            province: prov.to_string(),
            district: district.to_string(),
            period,
            household: 1.0,
            non_household: 2.0,
            municipal: 3.0,
            population: 100,
        }
    }

    #[test]
    fn selector_lists_are_sorted_and_unique() {
        let ds = WasteDataset::from_records(vec![
            rec("LIMA", "LIMA", "MIRAFLORES", 2022),
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014),
            rec("LIMA", "CANTA", "CANTA", 2014),
            rec("LIMA", "LIMA", "SURCO", 2014),
        ]);

        assert_eq!(ds.departments, vec!["CUSCO", "LIMA"]);
        assert_eq!(ds.periods, vec![2014, 2022]);
        assert_eq!(ds.provinces_of("LIMA"), ["CANTA", "LIMA"]);
        assert_eq!(ds.periods_of("CUSCO"), [2014]);
        assert_eq!(ds.periods_of("LIMA"), [2014, 2022]);
    }

    #[test]
    fn unknown_department_has_no_provinces() {
        let ds = WasteDataset::from_records(vec![rec("LIMA", "LIMA", "ATE", 2014)]);
        assert!(ds.provinces_of("PUNO").is_empty());
        assert!(ds.periods_of("PUNO").is_empty());
    }

    #[test]
    fn category_accessor_matches_fields() {
        let r = rec("LIMA", "LIMA", "ATE", 2014);
        assert_eq!(r.amount(Category::Household), 1.0);
        assert_eq!(r.amount(Category::NonHousehold), 2.0);
        assert_eq!(r.amount(Category::Municipal), 3.0);
    }
}
