//! Renders the results figure: one row of panels per benchmarked function,
//! speedup on the left, log-scaled execution time on the right.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::RenderError;
use crate::results::ResultSet;

pub const FIGURE_WIDTH: u32 = 1400;
pub const PANEL_HEIGHT: u32 = 520;

/// Pixel dimensions of the composed figure: a fixed width and one panel row
/// per distinct function. A table with zero functions still yields a small
/// blank figure.
pub fn figure_size(function_count: usize) -> (u32, u32) {
    let height = if function_count == 0 {
        PANEL_HEIGHT / 2
    } else {
        PANEL_HEIGHT * function_count as u32
    };
    (FIGURE_WIDTH, height)
}

/// Draw every function's speedup and execution-time panels into one image.
pub fn render_charts(results: &ResultSet, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    let functions = results.functions();
    let sizes = results.sizes();

    let render_span = tracing::debug_span!("rendering charts", ?path, functions = functions.len());
    let _render_span_guard = render_span.enter();

    let (width, height) = figure_size(functions.len());
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    if functions.is_empty() {
        tracing::debug!("no functions in results table; writing blank figure.");
        root.present()?;
        return Ok(());
    }

    let max_threads = results.max_threads().unwrap_or(1);
    let panels = root.split_evenly((functions.len(), 2));

    for (idx, function) in functions.iter().enumerate() {
        draw_speedup_panel(&panels[2 * idx], function, &sizes, results, max_threads)?;
        draw_time_panel(&panels[2 * idx + 1], function, &sizes, results, max_threads)?;
    }

    root.present()?;
    tracing::debug!("rendered {} panel rows to {:?}.", functions.len(), path);
    Ok(())
}

fn draw_speedup_panel<DB>(
    area: &DrawingArea<DB, Shift>, function: &str, sizes: &[u64], results: &ResultSet, max_threads: u32,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
{
    let rows = results.rows_for_function(function);
    let max_speedup = rows
        .iter()
        .map(|row| row.speedup)
        .fold(f64::from(max_threads), f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{function} - Speedup vs Threads"), ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0_f64..f64::from(max_threads) + 1., 0_f64..max_speedup * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Number of Threads")
        .y_desc("Speedup")
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&BLACK.mix(0.1))
        .draw()?;

    for (series_idx, &size) in sizes.iter().enumerate() {
        let series = results.rows_for(function, size);
        if series.is_empty() {
            continue;
        }

        let color = Palette99::pick(series_idx).to_rgba();
        chart
            .draw_series(
                LineSeries::new(
                    series.iter().map(|row| (f64::from(row.threads), row.speedup)),
                    color.stroke_width(2),
                )
                .point_size(3),
            )?
            .label(format!("{} orders", thousands(size)))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .draw_series(DashedLineSeries::new(
            vec![(1., 1.), (f64::from(max_threads), f64::from(max_threads))],
            5,
            5,
            BLACK.mix(0.3).stroke_width(1),
        ))?
        .label("Ideal")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.3)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_time_panel<DB>(
    area: &DrawingArea<DB, Shift>, function: &str, sizes: &[u64], results: &ResultSet, max_threads: u32,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
{
    let rows = results.rows_for_function(function);

    // log axis needs a strictly positive range even when times are degenerate
    let min_time = rows
        .iter()
        .map(|row| row.time_ms)
        .filter(|time| *time > 0.)
        .fold(f64::INFINITY, f64::min);
    let min_time = if min_time.is_finite() { min_time } else { 1e-3 };
    let max_time = rows
        .iter()
        .map(|row| row.time_ms)
        .fold(min_time, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{function} - Execution Time vs Threads"), ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            0_f64..f64::from(max_threads) + 1.,
            (min_time * 0.5..max_time * 2.).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("Number of Threads")
        .y_desc("Time (ms)")
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&BLACK.mix(0.1))
        .draw()?;

    for (series_idx, &size) in sizes.iter().enumerate() {
        let series = results.rows_for(function, size);
        if series.is_empty() {
            continue;
        }

        let color = Palette99::pick(series_idx).to_rgba();
        chart
            .draw_series(
                LineSeries::new(
                    series.iter().map(|row| (f64::from(row.threads), row.time_ms)),
                    color.stroke_width(2),
                )
                .point_size(3),
            )?
            .label(format!("{} orders", thousands(size)))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
