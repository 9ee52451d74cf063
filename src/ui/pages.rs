use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::spec::ChartKind;
use crate::state::{AppState, Page};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Page dispatch
// ---------------------------------------------------------------------------

/// Render the page currently selected in the sidebar.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Home => home(ui),
            Page::DataOverview => data_overview(ui, state),
            Page::Eda => exploratory_analysis(ui, state),
        });
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

fn home(ui: &mut Ui) {
    ui.heading(RichText::new("📊 Starbucks Mini Project").size(28.0));
    ui.add_space(4.0);
    ui.label(RichText::new("Welcome to the Starbucks dataset overview!").size(18.0));
    ui.add_space(8.0);
    ui.label(
        "This app provides an interactive platform to explore the Starbucks dataset. \
         You can visualize the distribution of data and explore relationships between features. \
         Use the sidebar to navigate through the sections.",
    );
    ui.add_space(8.0);
    ui.label("Use the sidebar to navigate between different sections");
}

// ---------------------------------------------------------------------------
// Data Overview
// ---------------------------------------------------------------------------

fn data_overview(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("🔢 Data Overview").size(28.0));
    ui.add_space(4.0);

    ui.strong("About the Data");
    ui.label(
        "This dataset serves as a comprehensive guide to the nutritional content of Starbucks \
         beverages, making it a valuable resource for researchers, dietitians, and health-conscious \
         consumers. There are three text variables: Beverage_category, Beverage, and Beverage_prep, \
         while the rest are numerical variables of various nutritional stats.",
    );
    ui.add_space(8.0);

    ui.strong("Quick Glance at the Data");
    ui.checkbox(&mut state.show_table, "Show DataFrame");
    if state.show_table {
        table::dataset_table(ui, &state.dataset);
    }

    ui.checkbox(&mut state.show_shape, "Show Shape of Data");
    if state.show_shape {
        ui.label(state.shape_message());
    }
}

// ---------------------------------------------------------------------------
// Exploratory Data Analysis
// ---------------------------------------------------------------------------

fn exploratory_analysis(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("📊 Exploratory Data Analysis (EDA)").size(28.0));
    ui.add_space(4.0);

    ui.strong("Select the type of visualization you'd like to explore:");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for kind in ChartKind::ALL {
            let ticked = state.selected_charts.contains(&kind);
            if ui.selectable_label(ticked, kind.label()).clicked() {
                state.toggle_chart(kind);
            }
        }
    });

    let selected: Vec<ChartKind> = state.selected_charts.iter().copied().collect();
    for kind in selected {
        ui.add_space(12.0);
        ui.separator();
        ui.heading(kind.heading());
        chart_section(ui, state, kind);
    }
}

/// Column pickers for one chart kind followed by the chart itself.
fn chart_section(ui: &mut Ui, state: &mut AppState, kind: ChartKind) {
    for (i, slot) in kind.rule().slots.iter().enumerate() {
        let options = state.classification.of_kind(slot.domain).to_vec();
        let mut current = state.choice(kind, i).to_string();

        ui.label(slot.prompt);
        egui::ComboBox::from_id_salt(("column_select", kind, i))
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &options {
                    ui.selectable_value(&mut current, col.clone(), col);
                }
            });
        state.set_choice(kind, i, current);
    }

    let Some(request) = state.request(kind) else {
        ui.label("No suitable columns in this dataset.");
        return;
    };

    match state.selector().build(&request) {
        Ok(spec) => plot::chart(ui, &spec, state.histogram_bins),
        Err(e) => {
            log::error!("Chart construction failed: {e}");
            ui.label(RichText::new(format!("Internal error: {e}")).color(Color32::RED));
        }
    }
}
