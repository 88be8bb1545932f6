use crate::data::model::{Category, WasteDataset};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The seven fixed views, selected from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    HouseholdByDepartment,
    NonHouseholdByDepartment,
    MunicipalByDepartment,
    PerCapitaByDistrict,
    DepartmentAndYear,
    Growth,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::HouseholdByDepartment,
        Page::NonHouseholdByDepartment,
        Page::MunicipalByDepartment,
        Page::PerCapitaByDistrict,
        Page::DepartmentAndYear,
        Page::Growth,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::HouseholdByDepartment => "Household waste by department",
            Page::NonHouseholdByDepartment => "Non-household waste by department",
            Page::MunicipalByDepartment => "Municipal waste by department",
            Page::PerCapitaByDistrict => "Per-capita by district",
            Page::DepartmentAndYear => "Department and year",
            Page::Growth => "Growth 2014-2022",
        }
    }

    /// Which category the three per-department chart pages show.
    pub fn chart_category(&self) -> Option<Category> {
        match self {
            Page::HouseholdByDepartment => Some(Category::Household),
            Page::NonHouseholdByDepartment => Some(Category::NonHousehold),
            Page::MunicipalByDepartment => Some(Category::Municipal),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once and never mutated; every filter change just
/// re-runs the relevant aggregation over it.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<WasteDataset>,

    /// Currently selected page.
    pub page: Page,

    /// Whether the per-department chart pages also show the data table.
    pub show_table: bool,

    // Per-capita page filters.
    pub percapita_department: Option<String>,
    pub percapita_province: Option<String>,
    pub percapita_period: Option<i32>,
    pub percapita_category: Category,

    // Department+year page filters.
    pub dy_department: Option<String>,
    pub dy_period: Option<i32>,

    // Growth page filter.
    pub growth_category: Category,

    // Cosmetic contact form on the home page; nothing is stored or sent.
    pub contact_email: String,
    pub contact_ack: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            page: Page::Home,
            show_table: true,
            percapita_department: None,
            percapita_province: None,
            percapita_period: None,
            percapita_category: Category::Household,
            dy_department: None,
            dy_period: None,
            growth_category: Category::Household,
            contact_email: String::new(),
            contact_ack: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and point every selector at its first
    /// valid entry.
    pub fn set_dataset(&mut self, dataset: WasteDataset) {
        self.percapita_department = dataset.departments.first().cloned();
        self.percapita_province = None;
        self.percapita_period = None;
        self.dy_department = dataset.departments.first().cloned();
        self.dy_period = dataset.periods.first().copied();
        self.dataset = Some(dataset);
        self.sync_percapita_dependents();
        self.status_message = None;
    }

    /// Change the per-capita department and revalidate the dependent
    /// province/period selections.
    pub fn set_percapita_department(&mut self, department: String) {
        self.percapita_department = Some(department);
        self.sync_percapita_dependents();
    }

    /// Keep province and period selections consistent with the selected
    /// department; falls back to the first valid entry when stale.
    fn sync_percapita_dependents(&mut self) {
        let Some(ds) = &self.dataset else { return };
        let Some(dept) = &self.percapita_department else {
            return;
        };

        let provinces = ds.provinces_of(dept);
        let province_ok = self
            .percapita_province
            .as_deref()
            .is_some_and(|p| provinces.iter().any(|x| x == p));
        if !province_ok {
            self.percapita_province = provinces.first().cloned();
        }

        let periods = ds.periods_of(dept);
        let period_ok = self.percapita_period.is_some_and(|p| periods.contains(&p));
        if !period_ok {
            self.percapita_period = periods.first().copied();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::WasteRecord;

    fn rec(dept: &str, prov: &str, district: &str, period: i32) -> WasteRecord {
        WasteRecord {
            department: dept.to_string(),
            province: prov.to_string(),
            district: district.to_string(),
            period,
            household: 1.0,
            non_household: 1.0,
            municipal: 2.0,
            population: 100,
        }
    }

    fn dataset() -> WasteDataset {
        WasteDataset::from_records(vec![
            rec("CUSCO", "CUSCO", "WANCHAQ", 2014),
            rec("LIMA", "CANTA", "CANTA", 2018),
            rec("LIMA", "LIMA", "ATE", 2022),
        ])
    }

    #[test]
    fn set_dataset_initialises_all_selectors() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.percapita_department.as_deref(), Some("CUSCO"));
        assert_eq!(state.percapita_province.as_deref(), Some("CUSCO"));
        assert_eq!(state.percapita_period, Some(2014));
        assert_eq!(state.dy_department.as_deref(), Some("CUSCO"));
        assert_eq!(state.dy_period, Some(2014));
    }

    #[test]
    fn changing_department_resets_stale_dependents() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_percapita_department("LIMA".to_string());
        assert_eq!(state.percapita_province.as_deref(), Some("CANTA"));
        assert_eq!(state.percapita_period, Some(2018));
    }

    #[test]
    fn valid_dependents_survive_a_department_change() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.set_percapita_department("LIMA".to_string());
        state.percapita_province = Some("LIMA".to_string());
        state.percapita_period = Some(2022);
        // Re-selecting the same department must not clobber valid choices.
        state.set_percapita_department("LIMA".to_string());
        assert_eq!(state.percapita_province.as_deref(), Some("LIMA"));
        assert_eq!(state.percapita_period, Some(2022));
    }
}
