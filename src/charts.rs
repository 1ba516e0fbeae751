// src/charts.rs
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 720;

/// Renders a labeled vertical bar chart to `path` as a PNG. Bars keep
/// the order they arrive in; the y axis gets ten percent headroom.
pub fn bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(String, u32)],
    label_font: i32,
) -> Result<()> {
    anyhow::ensure!(!bars.is_empty(), "chart {:?} has no bars to draw", title);

    let y_max = bars.iter().map(|&(_, count)| count).max().unwrap_or(1);
    let y_top = y_max + y_max / 10 + 1;

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("filling chart background for {}", path.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars.len() as i32).into_segmented(), 0u32..y_top)
        .with_context(|| format!("building chart axes for {}", path.display()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(idx) => bars
                .get(*idx as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", label_font))
        .draw()
        .with_context(|| format!("drawing chart mesh for {}", path.display()))?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, &(_, count))| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i as i32), 0),
                    (SegmentValue::Exact(i as i32 + 1), count),
                ],
                BLUE.filled(),
            )
        }))
        .with_context(|| format!("drawing bars for {}", path.display()))?;

    root.present()
        .with_context(|| format!("writing chart {}", path.display()))?;
    debug!("Chart written - path={}, bars={}", path.display(), bars.len());
    Ok(())
}
