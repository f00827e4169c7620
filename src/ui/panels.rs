use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::filter::Selection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No roster loaded.");
            return;
        }
    };

    // Clone the universes and extents so we can mutate state in the loop.
    let departments: Vec<String> = dataset.departments.iter().cloned().collect();
    let genders: Vec<String> = dataset.genders.iter().cloned().collect();
    let salary_extent = dataset.salary_extent;
    let age_extent = dataset.age_extent;
    let performance_extent = dataset.performance_extent;

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Name search ----
            ui.strong("Name search");
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.criteria.name_query)
                    .hint_text("e.g. John Smith"),
            );
            changed |= response.changed();
            ui.separator();

            // ---- Department multi-select ----
            categorical_section(
                ui,
                "Department",
                &departments,
                &mut state.criteria.departments,
                &mut changed,
            );

            // ---- Gender multi-select ----
            categorical_section(
                ui,
                "Gender",
                &genders,
                &mut state.criteria.genders,
                &mut changed,
            );

            // ---- Numeric ranges ----
            ui.strong("Salary range");
            ui.horizontal(|ui: &mut Ui| {
                changed |= ui
                    .add(
                        DragValue::new(&mut state.criteria.salary.min)
                            .speed(500.0)
                            .range(salary_extent.0..=salary_extent.1)
                            .prefix("min "),
                    )
                    .changed();
                changed |= ui
                    .add(
                        DragValue::new(&mut state.criteria.salary.max)
                            .speed(500.0)
                            .range(salary_extent.0..=salary_extent.1)
                            .prefix("max "),
                    )
                    .changed();
            });
            ui.separator();

            ui.strong("Age range");
            ui.horizontal(|ui: &mut Ui| {
                changed |= ui
                    .add(
                        DragValue::new(&mut state.criteria.age.min)
                            .range(age_extent.0..=age_extent.1)
                            .prefix("min "),
                    )
                    .changed();
                changed |= ui
                    .add(
                        DragValue::new(&mut state.criteria.age.max)
                            .range(age_extent.0..=age_extent.1)
                            .prefix("max "),
                    )
                    .changed();
            });
            ui.separator();

            ui.strong("Performance score");
            ui.horizontal(|ui: &mut Ui| {
                changed |= ui
                    .add(
                        DragValue::new(&mut state.criteria.performance.min)
                            .range(performance_extent.0..=performance_extent.1)
                            .prefix("min "),
                    )
                    .changed();
                changed |= ui
                    .add(
                        DragValue::new(&mut state.criteria.performance.max)
                            .range(performance_extent.0..=performance_extent.1)
                            .prefix("max "),
                    )
                    .changed();
            });
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });

    if changed {
        state.refilter();
    }
}

/// One collapsible multi-select: All/None buttons plus a checkbox per
/// value. Ticking behaviour lives in [`Selection::toggle`].
fn categorical_section(
    ui: &mut Ui,
    title: &str,
    values: &[String],
    selection: &mut Selection,
    changed: &mut bool,
) {
    let n_selected = match selection {
        Selection::Unrestricted => values.len(),
        Selection::RestrictedTo(set) => set.len(),
    };
    let header_text = format!("{title}  ({n_selected}/{})", values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selection = Selection::Unrestricted;
                    *changed = true;
                }
                if ui.small_button("None").clicked() {
                    *selection = Selection::RestrictedTo(Default::default());
                    *changed = true;
                }
            });

            for value in values {
                let mut checked = selection.is_selected(value);
                if ui.checkbox(&mut checked, value).changed() {
                    selection.toggle(value);
                    *changed = true;
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
                "{} employees loaded, {} selected",
                ds.len(),
                state.visible_indices.len()
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
        .set_title("Open employee roster")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} employees across {} departments (fingerprint {:016x})",
                    dataset.len(),
                    dataset.departments.len(),
                    dataset.fingerprint
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load roster: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
