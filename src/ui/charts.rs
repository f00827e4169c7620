use eframe::egui::{CollapsingHeader, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::data::model::{AgeBand, EmployeeDataset};
use crate::data::stats;
use crate::state::AppState;

const SALARY_BINS: usize = 15;
const HISTOGRAM_GREEN: Color32 = Color32::from_rgb(46, 204, 113);

// ---------------------------------------------------------------------------
// Overview tab – KPI row, departments, hierarchy, detail table
// ---------------------------------------------------------------------------

pub fn overview_tab(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let indices = &state.visible_indices;

    let summary = stats::Summary::compute(ds, indices);
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Employees", summary.count.to_string());
        metric(
            &mut cols[1],
            "Avg. salary",
            format!("${}", thousands(summary.mean_salary)),
        );
        metric(&mut cols[2], "Avg. age", format!("{:.1} years", summary.mean_age));
        metric(
            &mut cols[3],
            "Avg. tenure",
            format!("{:.1} years", summary.mean_tenure),
        );
    });
    ui.separator();

    if indices.is_empty() {
        empty_notice(ui);
        return;
    }

    ui.strong("Employees per department");
    let counts = stats::department_counts(ds, indices);
    let entries: Vec<(String, f64, Color32)> = counts
        .iter()
        .map(|(dept, &n)| (dept.clone(), n as f64, department_color(state, dept)))
        .collect();
    labeled_bar_chart(ui, "dept_counts", 220.0, &entries);

    ui.add_space(8.0);

    // Hierarchy breakdown: department → positions with head counts.
    ui.strong("Organisation structure");
    let hierarchy = stats::department_position_counts(ds, indices);
    for (dept, positions) in &hierarchy {
        let total: usize = positions.values().sum();
        let header = RichText::new(format!("{dept}  ({total})"))
            .color(department_color(state, dept));
        CollapsingHeader::new(header)
            .id_salt(dept)
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                for (position, n) in positions {
                    ui.label(format!("{position} ({n})"));
                }
            });
    }

    ui.add_space(8.0);

    CollapsingHeader::new(RichText::new("Employee detail").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            detail_table(ui, ds, indices);
        });
}

/// Detail table over the filtered subset, best performers first.
fn detail_table(ui: &mut Ui, ds: &EmployeeDataset, indices: &[usize]) {
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_by_key(|&i| std::cmp::Reverse(ds.employees[i].performance_score));

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), 8)
        .header(18.0, |mut header| {
            for title in [
                "Name",
                "Department",
                "Position",
                "Gender",
                "Salary",
                "Age",
                "Tenure",
                "Score",
            ] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, sorted.len(), |mut row| {
                let emp = &ds.employees[sorted[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(emp.name.as_deref().unwrap_or("—"));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&emp.department);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&emp.position);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(emp.gender.as_deref().unwrap_or("—"));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("${}", thousands(emp.salary)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(emp.age.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(emp.years_at_company.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(emp.performance_score.to_string());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Performance tab – salary histogram + tenure/performance scatter
// ---------------------------------------------------------------------------

pub fn performance_tab(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let indices = &state.visible_indices;

    if indices.is_empty() {
        empty_notice(ui);
        return;
    }

    ui.columns(2, |cols: &mut [Ui]| {
        let ui = &mut cols[0];
        ui.strong("Salary distribution");
        let bins = stats::salary_histogram(ds, indices, SALARY_BINS);
        let bars: Vec<Bar> = bins
            .iter()
            .map(|b| {
                Bar::new(b.center(), b.count as f64)
                    .width(b.width() * 0.95)
                    .fill(HISTOGRAM_GREEN)
            })
            .collect();
        Plot::new("salary_histogram")
            .height(280.0)
            .allow_drag(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Employees"));
            });

        let ui = &mut cols[1];
        ui.strong("Performance vs. tenure (bubble size = salary)");
        scatter_plot(ui, state, ds);
    });
}

/// One bubble per employee; colour by department, radius scaled by salary.
fn scatter_plot(ui: &mut Ui, state: &AppState, ds: &EmployeeDataset) {
    let points = stats::scatter_points(ds, &state.visible_indices);
    let (lo, hi) = ds.salary_extent;
    let span = (hi - lo).max(1.0);

    Plot::new("performance_scatter")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label("Years at company")
        .y_axis_label("Performance score")
        .show(ui, |plot_ui| {
            for pt in &points {
                let radius = 2.0 + 6.0 * ((pt.salary - lo) / span) as f32;
                plot_ui.points(
                    Points::new(vec![[pt.tenure as f64, pt.performance as f64]])
                        .radius(radius)
                        .color(department_color(state, &pt.department))
                        .name(&pt.department),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Diversity tab – gender mix, age bands, pay gap
// ---------------------------------------------------------------------------

pub fn diversity_tab(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let indices = &state.visible_indices;

    if indices.is_empty() {
        empty_notice(ui);
        return;
    }

    ui.columns(2, |cols: &mut [Ui]| {
        let ui = &mut cols[0];
        ui.strong("Gender composition");
        let counts = stats::gender_counts(ds, indices);
        let entries: Vec<(String, f64, Color32)> = counts
            .iter()
            .enumerate()
            .map(|(i, (g, &n))| (g.clone(), n as f64, series_color(i)))
            .collect();
        labeled_bar_chart(ui, "gender_counts", 240.0, &entries);

        let ui = &mut cols[1];
        ui.strong("Age band distribution");
        let bands = stats::age_band_counts(ds, indices);
        let mut entries: Vec<(String, f64, Color32)> = Vec::new();
        for (i, band) in AgeBand::ALL.iter().enumerate() {
            let n = bands.get(&Some(*band)).copied().unwrap_or(0);
            entries.push((band.to_string(), n as f64, series_color(i)));
        }
        if let Some(&n) = bands.get(&None) {
            entries.push(("Sin rango".to_string(), n as f64, Color32::GRAY));
        }
        labeled_bar_chart(ui, "age_bands", 240.0, &entries);
    });

    ui.separator();

    ui.strong("Average salary by gender");
    let means = stats::mean_salary_by_gender(ds, indices);
    let entries: Vec<(String, f64, Color32)> = means
        .iter()
        .enumerate()
        .map(|(i, (g, &mean))| (g.clone(), mean, series_color(i)))
        .collect();
    labeled_bar_chart(ui, "pay_gap", 240.0, &entries);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Categorical bar chart: one single-bar series per entry so the legend
/// carries the category labels.
fn labeled_bar_chart(ui: &mut Ui, id: &str, height: f32, entries: &[(String, f64, Color32)]) {
    Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (label, value, color)) in entries.iter().enumerate() {
                let bar = Bar::new(i as f64, *value).width(0.7).fill(*color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(*color));
            }
        });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.heading(value);
    });
}

fn empty_notice(ui: &mut Ui) {
    ui.add_space(12.0);
    ui.label(
        RichText::new("No employees match the current filters.")
            .color(Color32::LIGHT_YELLOW),
    );
}

fn department_color(state: &AppState, department: &str) -> Color32 {
    state
        .colors
        .as_ref()
        .map(|c| c.color_for(department))
        .unwrap_or(Color32::GRAY)
}

fn series_color(i: usize) -> Color32 {
    const CYCLE: [Color32; 4] = [
        Color32::from_rgb(52, 152, 219),
        Color32::from_rgb(231, 76, 60),
        Color32::from_rgb(155, 89, 182),
        Color32::from_rgb(241, 196, 15),
    ];
    CYCLE[i % CYCLE.len()]
}

/// Round to the nearest integer and insert thousands separators.
fn thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::thousands;

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(52_000.0), "52,000");
        assert_eq!(thousands(1_234_567.8), "1,234,568");
        assert_eq!(thousands(-52_000.0), "-52,000");
    }
}
