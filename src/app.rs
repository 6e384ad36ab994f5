use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::format::{format_count, format_usd};
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
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

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn metric_card(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(title);
        ui.heading(value);
    });
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("Data-industry salary dashboard");
    ui.label(
        "Explore data-industry salaries over recent years. \
         Use the filters on the left to narrow the analysis.",
    );

    let snap = &state.snapshot;
    let m = &snap.metrics;

    ui.add_space(8.0);
    ui.strong("General metrics (annual salary in USD)");
    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Average salary", format_usd(m.mean_salary));
        metric_card(&mut cols[1], "Maximum salary", format_usd(m.max_salary));
        metric_card(&mut cols[2], "Total records", format_count(m.total_records));
        metric_card(&mut cols[3], "Most frequent job", m.top_job_title.clone());
    });

    ui.separator();
    ui.strong("Charts");
    ui.columns(2, |cols: &mut [Ui]| {
        charts::top_jobs_chart(&mut cols[0], snap.top_jobs.as_deref(), state.config.top_jobs);
        charts::salary_histogram_chart(&mut cols[1], snap.salary_histogram.as_deref());
    });
    ui.add_space(8.0);
    ui.columns(2, |cols: &mut [Ui]| {
        charts::remote_work_donut(&mut cols[0], snap.remote_shares.as_deref());
        charts::country_salary_chart(
            &mut cols[1],
            snap.country_salaries.as_deref(),
            &state.config.job_title,
        );
    });

    ui.separator();
    ui.strong("Detailed data");
    table::records_table(ui, &state.visible_records());
}
