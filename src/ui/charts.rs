use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::analysis::charts::{CategoryShare, CountrySalary, HistogramBin, JobSalary};
use crate::color::{CategoryColors, normalise, red_yellow_green};

use super::format::{format_count, format_usd};

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Shown in place of a chart whose preparer had nothing to aggregate.
fn no_data(ui: &mut Ui, what: &str) {
    ui.add_sized(
        [ui.available_width(), CHART_HEIGHT],
        egui::Label::new(
            egui::RichText::new(format!("No data to display in the {what} chart."))
                .color(Color32::from_rgb(230, 170, 40)),
        ),
    );
}

/// Axis labels for bars placed at integer positions `0..labels.len()`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value;
        if pos.fract() != 0.0 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn horizontal_bars(ui: &mut Ui, id: &str, x_label: &str, bars: Vec<Bar>, labels: Vec<String>) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_formatter(category_axis(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Top jobs by mean salary
// ---------------------------------------------------------------------------

pub fn top_jobs_chart(ui: &mut Ui, jobs: Option<&[JobSalary]>, limit: usize) {
    ui.strong(format!("Top {limit} job titles by mean salary"));
    let Some(jobs) = jobs else {
        no_data(ui, "job titles");
        return;
    };

    let bars = jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            Bar::new(i as f64, job.mean_salary)
                .name(format!("{}: {}", job.job_title, format_usd(job.mean_salary)))
                .fill(BAR_COLOR)
                .width(0.7)
        })
        .collect();
    let labels = jobs.iter().map(|j| j.job_title.clone()).collect();

    horizontal_bars(ui, "top_jobs", "Mean annual salary (USD)", bars, labels);
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

pub fn salary_histogram_chart(ui: &mut Ui, bins: Option<&[HistogramBin]>) {
    ui.strong("Distribution of annual salaries");
    let Some(bins) = bins else {
        no_data(ui, "distribution");
        return;
    };

    let bars = bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .name(format!(
                    "{} – {}: {}",
                    format_usd(bin.start),
                    format_usd(bin.end),
                    format_count(bin.count)
                ))
                .width(bin.width())
                .fill(BAR_COLOR)
        })
        .collect();

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Remote-work donut
// ---------------------------------------------------------------------------

pub fn remote_work_donut(ui: &mut Ui, shares: Option<&[CategoryShare]>) {
    ui.strong("Share of remote-work modes");
    let Some(shares) = shares else {
        no_data(ui, "remote-work");
        return;
    };

    let colors = CategoryColors::new(shares.iter().map(|s| s.category.as_str()));
    let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());

    let rect = response.rect;
    let center = rect.center();
    let outer = (rect.height().min(rect.width()) / 2.0 - 8.0).max(10.0);
    let inner = outer * 0.5;
    let at = |angle: f32, radius: f32| -> Pos2 {
        center + radius * egui::vec2(angle.cos(), angle.sin())
    };

    // Start at twelve o'clock, clockwise.
    let mut start = -TAU / 4.0;
    for share in shares {
        let sweep = share.share as f32 * TAU;
        let color = colors.color_for(&share.category);

        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        for step in 0..steps {
            let a0 = start + sweep * step as f32 / steps as f32;
            let a1 = start + sweep * (step + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![at(a0, outer), at(a1, outer), at(a1, inner), at(a0, inner)],
                color,
                Stroke::NONE,
            ));
        }

        if share.share >= 0.04 {
            let mid = start + sweep / 2.0;
            painter.text(
                at(mid, (outer + inner) / 2.0),
                Align2::CENTER_CENTER,
                format!("{}\n{:.1}%", share.category, share.share * 100.0),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }
        start += sweep;
    }

    response.on_hover_ui(|ui: &mut Ui| {
        for share in shares {
            ui.colored_label(
                colors.color_for(&share.category),
                format!("{}: {}", share.category, format_count(share.count)),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Mean salary per country
// ---------------------------------------------------------------------------

/// Countries as bars coloured on a red → green scale by mean salary.
pub fn country_salary_chart(ui: &mut Ui, countries: Option<&[CountrySalary]>, job_title: &str) {
    ui.strong(format!("Mean {job_title} salary by country"));
    let Some(countries) = countries else {
        no_data(ui, "country");
        return;
    };
    if countries.is_empty() {
        no_data(ui, &format!("{job_title} country"));
        return;
    }

    let mut sorted: Vec<&CountrySalary> = countries.iter().collect();
    sorted.sort_by(|a, b| a.mean_salary.total_cmp(&b.mean_salary));

    let min = sorted.first().map_or(0.0, |c| c.mean_salary);
    let max = sorted.last().map_or(0.0, |c| c.mean_salary);

    let bars = sorted
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.mean_salary)
                .name(format!("{}: {}", c.iso3, format_usd(c.mean_salary)))
                .fill(red_yellow_green(normalise(c.mean_salary, min, max)))
                .width(0.8)
        })
        .collect();
    let labels = sorted.iter().map(|c| c.iso3.clone()).collect();

    horizontal_bars(ui, "country_salaries", "Mean salary (USD)", bars, labels);
}
