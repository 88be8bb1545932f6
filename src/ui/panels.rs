use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Category;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – page radio + per-page filters
// ---------------------------------------------------------------------------

/// Render the sidebar: analysis selector on top, then the filter widgets
/// belonging to the active page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Waste analysis");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for page in Page::ALL {
                if ui
                    .selectable_label(state.page == page, page.title())
                    .clicked()
                {
                    state.page = page;
                }
            }
            ui.separator();
            page_filters(ui, state);
        });
}

fn page_filters(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    match state.page {
        Page::HouseholdByDepartment
        | Page::NonHouseholdByDepartment
        | Page::MunicipalByDepartment => {
            ui.strong("View options");
            ui.checkbox(&mut state.show_table, "Show data table");
        }
        Page::PerCapitaByDistrict => percapita_filters(ui, state),
        Page::DepartmentAndYear => department_year_filters(ui, state),
        // Home needs no filters; the growth category lives in the page body.
        Page::Home | Page::Growth => {}
    }
}

fn percapita_filters(ui: &mut Ui, state: &mut AppState) {
    // Clone the selector lists so the combo closures may mutate state.
    let (departments, provinces, periods) = match &state.dataset {
        Some(ds) => (
            ds.departments.clone(),
            state
                .percapita_department
                .as_deref()
                .map(|d| ds.provinces_of(d).to_vec())
                .unwrap_or_default(),
            state
                .percapita_department
                .as_deref()
                .map(|d| ds.periods_of(d).to_vec())
                .unwrap_or_default(),
        ),
        None => return,
    };

    ui.strong("Filters");

    let current_dept = state.percapita_department.clone().unwrap_or_default();
    egui::ComboBox::from_label("Department")
        .selected_text(&current_dept)
        .show_ui(ui, |ui: &mut Ui| {
            for dept in &departments {
                if ui
                    .selectable_label(current_dept == *dept, dept)
                    .clicked()
                {
                    state.set_percapita_department(dept.clone());
                }
            }
        });

    let current_prov = state.percapita_province.clone().unwrap_or_default();
    egui::ComboBox::from_label("Province")
        .selected_text(&current_prov)
        .show_ui(ui, |ui: &mut Ui| {
            for prov in &provinces {
                if ui
                    .selectable_label(current_prov == *prov, prov)
                    .clicked()
                {
                    state.percapita_province = Some(prov.clone());
                }
            }
        });

    let current_period = state.percapita_period;
    egui::ComboBox::from_label("Period")
        .selected_text(
            current_period
                .map(|p| p.to_string())
                .unwrap_or_default(),
        )
        .show_ui(ui, |ui: &mut Ui| {
            for &period in &periods {
                if ui
                    .selectable_label(current_period == Some(period), period.to_string())
                    .clicked()
                {
                    state.percapita_period = Some(period);
                }
            }
        });

    ui.add_space(4.0);
    ui.label("Category:");
    for category in Category::ALL {
        ui.radio_value(&mut state.percapita_category, category, category.label());
    }
}

fn department_year_filters(ui: &mut Ui, state: &mut AppState) {
    let (departments, periods) = match &state.dataset {
        Some(ds) => (ds.departments.clone(), ds.periods.clone()),
        None => return,
    };

    ui.strong("Filters");

    let current_dept = state.dy_department.clone().unwrap_or_default();
    egui::ComboBox::from_label("Department")
        .selected_text(&current_dept)
        .show_ui(ui, |ui: &mut Ui| {
            for dept in &departments {
                if ui
                    .selectable_label(current_dept == *dept, dept)
                    .clicked()
                {
                    state.dy_department = Some(dept.clone());
                }
            }
        });

    let current_period = state.dy_period;
    egui::ComboBox::from_label("Period")
        .selected_text(
            current_period
                .map(|p| p.to_string())
                .unwrap_or_default(),
        )
        .show_ui(ui, |ui: &mut Ui| {
            for &period in &periods {
                if ui
                    .selectable_label(current_period == Some(period), period.to_string())
                    .clicked()
                {
                    state.dy_period = Some(period);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} departments, periods {:?}",
                ds.len(),
                ds.departments.len(),
                ds.periods,
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open waste dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load(&path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} rows across {} departments",
                    dataset.len(),
                    dataset.departments.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load dataset: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
