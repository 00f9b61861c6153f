//! PNG renderings of the figures and compositions derived by normalization.

use crate::config::PlotConfig;
use anyhow::{Context, Result};
use matproc_schemas::{combinatorial::ScatterFigure, solution::Solution};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Padded axis range covering `values`.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if max > min { (max - min) * 0.1 } else { min.abs().max(1e-3) * 0.1 };
    (min - pad, max + pad)
}

/// Draws the sample positions of a combinatorial library figure.
pub fn plot_scatter_figure(
    output_dir: &Path,
    name: &str,
    figure: &ScatterFigure,
    size: PlotConfig,
) -> Result<PathBuf> {
    let path = output_dir.join(format!("{name}_samples.png"));
    draw_scatter_figure(&path, figure, size)
        .with_context(|| format!("Failed to draw {:?}", path))?;
    Ok(path)
}

fn draw_scatter_figure(path: &Path, figure: &ScatterFigure, size: PlotConfig) -> Result<()> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let points: Vec<(f64, f64)> = figure
        .points
        .iter()
        .filter_map(|p| Some((p.x?, p.y?)))
        .collect();
    let (x_min, x_max) = axis_range(points.iter().map(|p| p.0));
    let (y_min, y_max) = axis_range(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, ("sans-serif", 30).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .draw()?;

    chart
        .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 5, BLUE.filled())))?
        .label(figure.label.as_str())
        .legend(|(x, y)| Circle::new((x + 10, y), 5, BLUE.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Bar chart of the calculated molar concentration of every solvent and solute.
pub fn plot_solution_composition(
    output_dir: &Path,
    name: &str,
    solution: &Solution,
    size: PlotConfig,
) -> Result<PathBuf> {
    let path = output_dir.join(format!("{name}_composition.png"));
    draw_solution_composition(&path, solution, size)
        .with_context(|| format!("Failed to draw {:?}", path))?;
    Ok(path)
}

fn draw_solution_composition(path: &Path, solution: &Solution, size: PlotConfig) -> Result<()> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let bars: Vec<(String, f64, bool)> = solution
        .solvents
        .iter()
        .map(|c| (c, false))
        .chain(solution.solutes.iter().map(|c| (c, true)))
        .map(|(component, is_solute)| {
            let label = component
                .name
                .clone()
                .or_else(|| component.substance_name.clone())
                .unwrap_or_else(|| "?".to_string());
            let concentration = component
                .molar_concentration
                .as_ref()
                .and_then(|c| c.calculated_concentration.as_ref())
                .map_or(0.0, |m| m.value);
            (label, concentration, is_solute)
        })
        .collect();
    let max_concentration = bars.iter().map(|b| b.1).fold(0.0, f64::max);
    let caption = format!(
        "Composition of {}",
        solution.info.name.as_deref().unwrap_or("solution")
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0..bars.len().max(1)).into_segmented(),
            0f64..(max_concentration * 1.1).max(1e-9),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Component")
        .y_desc("Concentration (mol/L)")
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                bars.get(*i).map(|b| b.0.clone()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    for (style, solutes) in [(BLUE.filled(), false), (RED.filled(), true)] {
        chart
            .draw_series(
                Histogram::vertical(&chart).style(style).margin(10).data(
                    bars.iter()
                        .enumerate()
                        .filter(|(_, b)| b.2 == solutes)
                        .map(|(i, b)| (i, b.1)),
                ),
            )?
            .label(if solutes { "Solutes" } else { "Solvents" })
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_range_pads_the_data() {
        let (lo, hi) = axis_range([0.0, 10.0].into_iter());
        assert!((lo + 1.0).abs() < 1e-12);
        assert!((hi - 11.0).abs() < 1e-12);
    }

    #[test]
    fn axis_range_of_nothing_or_one_value() {
        assert_eq!(axis_range(std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = axis_range(std::iter::once(0.02));
        assert!(lo < 0.02 && hi > 0.02);
    }
}
