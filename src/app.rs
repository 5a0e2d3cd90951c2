use eframe::egui::{self, RichText, ScrollArea, Ui};

use cord_explorer::color::Ramp;
use cord_explorer::config::ExplorerConfig;
use cord_explorer::stats::Panels;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    /// Create the app and perform the initial load.
    pub fn new(config: ExplorerConfig) -> Self {
        let mut state = AppState::new(config.clone());
        state.load(config);
        Self { state }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("CORD-19 Data Explorer");
                    ui.label("Interactive exploration of COVID-19 research papers");
                    ui.add_space(8.0);

                    match &self.state.panels {
                        Some(panels) => dashboard(ui, panels),
                        None => {
                            ui.label("No data loaded. Use File → Open… to choose a metadata CSV.");
                        }
                    }
                });
        });
    }
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).size(18.0).strong());
    ui.separator();
}

/// The five chart sections and the preview, top to bottom.
fn dashboard(ui: &mut Ui, panels: &Panels) {
    if panels.is_empty() {
        ui.label(RichText::new("No papers in the selected year range.").italics());
    }

    section(ui, "Publications by Year");
    plot::year_chart(ui, &panels.year_counts);

    section(ui, "Top 10 Journals");
    plot::ranking_chart(
        ui,
        "top_journals",
        "Top Journals Publishing COVID-19 Research",
        "Journal",
        &panels.top_journals,
        Ramp::MAGMA,
    );

    section(ui, "Word Cloud of Paper Titles");
    plot::word_cloud(ui, &panels.word_cloud);

    section(ui, "Distribution of Paper Counts by Source");
    plot::ranking_chart(
        ui,
        "top_sources",
        "Top Sources of COVID-19 Papers",
        "Source",
        &panels.top_sources,
        Ramp::COOLWARM,
    );

    section(ui, "Abstract Word Count Distribution");
    plot::abstract_histogram(ui, &panels.abstract_lengths);

    section(ui, "Sample of Papers");
    table::preview_table(ui, &panels.preview);
}
