use eframe::egui::{self, Color32, RichText, Ui};

use cord_explorer::data::filter::YearRange;

use crate::state::AppState;

const WARNING_COLOR: Color32 = Color32::from_rgb(200, 140, 0);

// ---------------------------------------------------------------------------
// Left side panel – year filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let total = dataset.len();

    ui.strong("Select year range");
    if dataset.year_bounds.is_none() {
        ui.label(RichText::new("No valid publication years; showing default range.").weak());
    }

    let bounds = state.bounds;
    let shown = state.shown_range();
    let mut lo = shown.lo;
    let mut hi = shown.hi;

    let lo_response = ui.add(egui::Slider::new(&mut lo, bounds.lo..=bounds.hi).text("From"));
    let hi_response = ui.add(egui::Slider::new(&mut hi, bounds.lo..=bounds.hi).text("To"));
    let lo_changed = lo_response.changed();
    let hi_changed = hi_response.changed();

    // Dragging one handle past the other pushes the other along.
    if lo_changed && lo > hi {
        hi = lo;
    }
    if hi_changed && hi < lo {
        lo = hi;
    }

    // Panels are rebuilt once the handle is released, not on every drag frame.
    let dragging = lo_response.dragged() || hi_response.dragged();
    if lo_changed || hi_changed {
        let range = YearRange::new(lo, hi);
        if dragging {
            state.drag_year_range(range);
        } else {
            state.set_year_range(range);
        }
    }
    if lo_response.drag_stopped() || hi_response.drag_stopped() {
        state.commit_draft();
    }

    ui.separator();
    ui.label(format!("{total} papers after cleaning"));
    ui.label(format!("{} in selected range", state.visible_indices.len()));
    if let Some(outcome) = &state.outcome {
        ui.label(RichText::new(format!("Source: {}", outcome.source.display())).weak());
    }
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

        if let Some(outcome) = &state.outcome {
            ui.label(format!(
                "{} rows loaded, {} visible",
                outcome.table.len(),
                state.visible_indices.len()
            ));
        }

        for warning in state.warnings() {
            ui.separator();
            ui.label(RichText::new(warning.to_string()).color(WARNING_COLOR));
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
        .set_title("Open paper metadata")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        let config = state.config.with_primary(path);
        state.load(config);
    }
}
