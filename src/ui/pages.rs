use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use num_format::{Locale, ToFormattedString};

use crate::color;
use crate::data::aggregate::{self, GROWTH_BASE_PERIOD, GROWTH_TARGET_PERIOD};
use crate::data::model::Category;
use crate::state::{AppState, Page};
use crate::ui::plot::labeled_bar_chart;

const CHART_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the body of the currently selected page.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    match state.page {
        Page::Home => home(ui, state),
        Page::HouseholdByDepartment
        | Page::NonHouseholdByDepartment
        | Page::MunicipalByDepartment => {
            // chart_category is Some for exactly these three pages
            let category = state.page.chart_category().unwrap_or(Category::Municipal);
            department_chart(ui, state, category);
        }
        Page::PerCapitaByDistrict => percapita(ui, state),
        Page::DepartmentAndYear => department_and_year(ui, state),
        Page::Growth => growth(ui, state),
    }
}

fn no_dataset(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a dataset to start  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

fn home(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Municipal solid-waste analysis");
    ui.label("Visual overview of the solid waste generated per department in Peru, 2014-2022.");
    ui.separator();

    ui.strong("National summary");
    ui.add_space(4.0);
    match &state.dataset {
        None => {
            ui.label("No dataset loaded.");
        }
        Some(ds) => match aggregate::national_summary(&ds.records) {
            Some(summary) => {
                ui.columns(3, |cols: &mut [Ui]| {
                    metric(
                        &mut cols[0],
                        "National total",
                        &format!("{} tonnes", fmt_tonnes(summary.total_municipal)),
                    );
                    metric(&mut cols[1], "Most waste", &summary.top_department);
                    metric(&mut cols[2], "Least waste", &summary.bottom_department);
                });
            }
            None => {
                ui.columns(3, |cols: &mut [Ui]| {
                    metric(&mut cols[0], "National total", "—");
                    metric(&mut cols[1], "Most waste", "—");
                    metric(&mut cols[2], "Least waste", "—");
                });
            }
        },
    }

    ui.separator();
    ui.strong("Project goal");
    ui.label(
        "Analyse and visualise the generation of municipal solid waste per department, \
         to understand its territorial distribution and support informed decisions.",
    );

    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Want more information? Leave your email:");
        ui.text_edit_singleline(&mut state.contact_email);
        if ui.button("Send").clicked() {
            // Cosmetic acknowledgment only; nothing is stored or delivered.
            state.contact_ack = Some(format!(
                "Thanks! We'll send more information to: {}",
                state.contact_email
            ));
        }
    });
    if let Some(ack) = &state.contact_ack {
        ui.colored_label(Color32::from_rgb(46, 139, 87), ack);
    }

    ui.separator();
    ui.label("Use the sidebar to navigate between the analyses.");
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.label(label);
    ui.label(RichText::new(value).strong().size(20.0));
}

// ---------------------------------------------------------------------------
// Per-department category charts
// ---------------------------------------------------------------------------

fn department_chart(ui: &mut Ui, state: &AppState, category: Category) {
    ui.heading(state.page.title());
    let Some(ds) = &state.dataset else {
        no_dataset(ui);
        return;
    };

    let totals = aggregate::category_totals_by_department(&ds.records, category);
    if totals.is_empty() {
        ui.label("The dataset is empty.");
        return;
    }

    let labels: Vec<String> = totals.iter().map(|t| t.department.clone()).collect();
    let values: Vec<f64> = totals.iter().map(|t| t.total).collect();
    let colors = vec![color::DEPARTMENT_BAR; values.len()];
    labeled_bar_chart(
        ui,
        "department_totals",
        &labels,
        &values,
        &colors,
        "Waste (tonnes)",
        CHART_HEIGHT,
    );

    if state.show_table {
        ui.add_space(8.0);
        ui.strong("Data table");
        ui.push_id("department_totals_table", |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(160.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Department");
                    });
                    header.col(|ui| {
                        ui.strong("Waste (tonnes)");
                    });
                })
                .body(|mut body| {
                    for t in &totals {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(&t.department);
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.2}", t.total));
                            });
                        });
                    }
                });
        });
    }
}

// ---------------------------------------------------------------------------
// Per-capita by district
// ---------------------------------------------------------------------------

fn percapita(ui: &mut Ui, state: &AppState) {
    ui.heading("Waste per capita by district");
    ui.label("Pick a department, province, period and category in the sidebar to see kilograms generated per person.");
    let Some(ds) = &state.dataset else {
        no_dataset(ui);
        return;
    };

    let (Some(department), Some(province), Some(period)) = (
        state.percapita_department.as_deref(),
        state.percapita_province.as_deref(),
        state.percapita_period,
    ) else {
        ui.label("The dataset is empty.");
        return;
    };
    let category = state.percapita_category;

    ui.add_space(4.0);
    ui.strong(format!(
        "{category} – province of {province} ({department}) – {period}"
    ));

    let rows = aggregate::percapita_by_district(&ds.records, department, province, period, category);
    if rows.is_empty() {
        ui.add_space(8.0);
        ui.colored_label(
            Color32::from_rgb(218, 165, 32),
            "No records match the selected filters.",
        );
        return;
    }

    let labels: Vec<String> = rows.iter().map(|r| r.district.clone()).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.kg_per_person).collect();
    let colors = color::generate_palette(rows.len());
    labeled_bar_chart(
        ui,
        "percapita",
        &labels,
        &values,
        &colors,
        "kg per person",
        CHART_HEIGHT,
    );

    ui.add_space(8.0);
    ui.strong("Data table");
    ui.push_id("percapita_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("District");
                });
                header.col(|ui| {
                    ui.strong("kg per person");
                });
            })
            .body(|mut body| {
                for r in &rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&r.district);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", r.kg_per_person));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Department + year breakdown
// ---------------------------------------------------------------------------

fn department_and_year(ui: &mut Ui, state: &AppState) {
    ui.heading("Waste by department and year");
    ui.label("Pick a department and period in the sidebar to see the generation per category.");
    let Some(ds) = &state.dataset else {
        no_dataset(ui);
        return;
    };

    let (Some(department), Some(period)) = (state.dy_department.as_deref(), state.dy_period)
    else {
        ui.label("The dataset is empty.");
        return;
    };

    ui.add_space(4.0);
    ui.strong(format!("{department} – period {period}"));

    // None is the distinguished "no data" state; an all-zero total still
    // renders as a chart.
    let Some(totals) = aggregate::totals_by_department_and_period(&ds.records, department, period)
    else {
        ui.add_space(8.0);
        ui.colored_label(
            Color32::from_rgb(218, 165, 32),
            "No data found for the selected department and period.",
        );
        return;
    };

    let labels: Vec<String> = Category::ALL.iter().map(|c| c.label().to_string()).collect();
    let values = vec![totals.household, totals.non_household, totals.municipal];
    let colors: Vec<Color32> = Category::ALL.iter().map(|&c| color::category_color(c)).collect();
    labeled_bar_chart(
        ui,
        "department_year",
        &labels,
        &values,
        &colors,
        "Tonnes",
        CHART_HEIGHT,
    );

    ui.add_space(8.0);
    ui.strong("Data table");
    ui.push_id("department_year_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Category");
                });
                header.col(|ui| {
                    ui.strong("Waste (tonnes)");
                });
            })
            .body(|mut body| {
                for (label, value) in labels.iter().zip(&values) {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(label);
                        });
                        row.col(|ui| {
                            ui.label(format!("{value:.2}"));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Growth 2014 → 2022
// ---------------------------------------------------------------------------

fn growth(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!(
        "Percentage growth by department ({GROWTH_BASE_PERIOD}-{GROWTH_TARGET_PERIOD})"
    ));
    ui.label(format!(
        "Growth % = ((waste {GROWTH_TARGET_PERIOD} - waste {GROWTH_BASE_PERIOD}) / waste {GROWTH_BASE_PERIOD}) × 100, \
         per department. Departments without data in both years are left out."
    ));
    let Some(ds) = &state.dataset else {
        no_dataset(ui);
        return;
    };

    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Category:");
        for category in Category::ALL {
            ui.radio_value(&mut state.growth_category, category, category.label());
        }
    });

    let rows = aggregate::growth_by_department(
        &ds.records,
        state.growth_category,
        GROWTH_BASE_PERIOD,
        GROWTH_TARGET_PERIOD,
    );
    if rows.is_empty() {
        ui.add_space(8.0);
        ui.colored_label(
            Color32::from_rgb(218, 165, 32),
            format!(
                "No department has {} data in both {GROWTH_BASE_PERIOD} and {GROWTH_TARGET_PERIOD}.",
                state.growth_category.label().to_lowercase()
            ),
        );
        return;
    }

    let labels: Vec<String> = rows.iter().map(|r| r.department.clone()).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.growth_pct).collect();
    let colors: Vec<Color32> = values
        .iter()
        .map(|&v| if v >= 0.0 { color::GROWTH_UP } else { color::GROWTH_DOWN })
        .collect();
    labeled_bar_chart(
        ui,
        "growth",
        &labels,
        &values,
        &colors,
        "Growth (%)",
        CHART_HEIGHT,
    );

    ui.add_space(8.0);
    ui.strong("Growth table");
    ui.push_id("growth_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Department");
                });
                header.col(|ui| {
                    ui.strong(GROWTH_BASE_PERIOD.to_string());
                });
                header.col(|ui| {
                    ui.strong(GROWTH_TARGET_PERIOD.to_string());
                });
                header.col(|ui| {
                    ui.strong("Growth %");
                });
            })
            .body(|mut body| {
                for r in &rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&r.department);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", r.base_total));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", r.target_total));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", r.growth_pct));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Thousands-separated whole tonnes for the summary metrics.
fn fmt_tonnes(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tonnes_are_rounded_and_grouped() {
        assert_eq!(fmt_tonnes(1_234_567.8), "1,234,568");
        assert_eq!(fmt_tonnes(999.2), "999");
        assert_eq!(fmt_tonnes(0.0), "0");
    }
}
