use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct HrLensApp {
    pub state: AppState,
}

impl eframe::App for HrLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: analytics tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a roster to view analytics  (File → Open…)");
                });
                return;
            }

            ui.horizontal(|ui: &mut egui::Ui| {
                for tab in Tab::ALL {
                    if ui
                        .selectable_label(self.state.tab == tab, tab.label())
                        .clicked()
                    {
                        self.state.tab = tab;
                    }
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut egui::Ui| match self.state.tab {
                    Tab::Overview => charts::overview_tab(ui, &self.state),
                    Tab::Performance => charts::performance_tab(ui, &self.state),
                    Tab::Diversity => charts::diversity_tab(ui, &self.state),
                });
        });
    }
}
