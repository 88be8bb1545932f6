use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

// ---------------------------------------------------------------------------
// Labelled bar chart
// ---------------------------------------------------------------------------

/// Render one bar per entry with the entry names on the x axis.
///
/// `colors` is indexed per bar; a shorter slice leaves the remaining bars
/// with the plot default.
pub fn labeled_bar_chart(
    ui: &mut Ui,
    id: &str,
    labels: &[String],
    values: &[f64],
    colors: &[Color32],
    y_label: &str,
    height: f32,
) {
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let mut bar = Bar::new(i as f64, value).width(0.6);
            if let Some(name) = labels.get(i) {
                bar = bar.name(name);
            }
            if let Some(color) = colors.get(i) {
                bar = bar.fill(*color);
            }
            bar
        })
        .collect();

    // Axis ticks land on integers; everything else stays unlabelled.
    let axis_labels: Vec<String> = labels.to_vec();
    let formatter = move |mark: egui_plot::GridMark,
                          _range: &std::ops::RangeInclusive<f64>|
          -> String {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        axis_labels
            .get(rounded as usize)
            .cloned()
            .unwrap_or_default()
    };

    Plot::new(id.to_string())
        .height(height)
        .y_axis_label(y_label)
        .x_axis_formatter(formatter)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
