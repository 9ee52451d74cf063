use eframe::egui::{self, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – page navigation
// ---------------------------------------------------------------------------

/// Render the sidebar with the page selector.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("☕ Navigation");
    ui.separator();

    ui.strong("Select a Page");
    egui::ComboBox::from_id_salt("page_select")
        .selected_text(state.page.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for page in Page::ALL {
                ui.selectable_value(&mut state.page, page, page.label());
            }
        });

    ui.add_space(8.0);
    ui.separator();

    let (rows, cols) = state.dataset.shape();
    ui.label(format!("{rows} rows × {cols} columns loaded"));
}
