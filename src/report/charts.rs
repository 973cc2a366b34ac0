use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;

/// Line chart of the (k, inertia) elbow curve.
pub fn elbow_chart(curve: &[(usize, f64)], path: &Path) -> Result<()> {
    if curve.is_empty() {
        return Ok(());
    }

    let max_k = curve.last().map(|&(k, _)| k).unwrap_or(1);
    let max_sse = curve.iter().map(|&(_, sse)| sse).fold(0.0, f64::max);
    let y_top = if max_sse > 0.0 { max_sse * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Elbow Method for Optimal k", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0.5..max_k as f64 + 0.5, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_labels(max_k)
        .x_label_formatter(&|x| format!("{}", x.round() as i64))
        .x_desc("Number of Clusters (k)")
        .y_desc("Sum of Squared Errors (SSE)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        curve.iter().map(|&(k, sse)| (k as f64, sse)),
        BLUE.stroke_width(2),
    ))?;
    chart.draw_series(
        curve
            .iter()
            .map(|&(k, sse)| Circle::new((k as f64, sse), 4, BLUE.filled())),
    )?;

    root.present()
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    println!("Chart saved as {}", path.display());
    Ok(())
}

/// Scatter of the 2D-projected repositories, colored by cluster label.
pub fn scatter_chart(points: &[(f64, f64)], labels: &[usize], k: usize, path: &Path) -> Result<()> {
    if points.is_empty() {
        return Ok(());
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    let x_pad = ((x_max - x_min) * 0.08).max(0.1);
    let y_pad = ((y_max - y_min) * 0.08).max(0.1);

    let root = BitMapBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("K-means Clusters (PCA 2D)", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)?;

    chart.configure_mesh().x_desc("PC1").y_desc("PC2").draw()?;

    for cluster in 0..k {
        let color = Palette99::pick(cluster).mix(0.8);
        chart
            .draw_series(
                points
                    .iter()
                    .zip(labels)
                    .filter(|(_, &label)| label == cluster)
                    .map(|(&(x, y), _)| Circle::new((x, y), 5, color.filled())),
            )?
            .label(format!("Cluster {}", cluster + 1))
            .legend(move |(x, y)| Circle::new((x, y), 5, Palette99::pick(cluster).filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    println!("Chart saved as {}", path.display());
    Ok(())
}

/// One bar chart per cluster of its top packages by frequency. Returns the
/// paths written.
pub fn cluster_bar_charts(
    summaries: &BTreeMap<usize, Vec<(String, usize)>>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (&label, top) in summaries {
        if top.is_empty() {
            continue;
        }
        let path = out_dir.join(format!("top_packages_cluster{}.png", label + 1));
        bar_chart(label, top, &path)?;
        println!("Chart saved as {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn bar_chart(label: usize, top: &[(String, usize)], path: &Path) -> Result<()> {
    let names: Vec<String> = top.iter().map(|(pkg, _)| pkg.clone()).collect();
    let max_freq = top.iter().map(|&(_, freq)| freq).max().unwrap_or(1);

    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top Packages in Cluster {}", label + 1),
            ("sans-serif", 26),
        )
        .margin(20)
        .x_label_area_size(110)
        .y_label_area_size(50)
        .build_cartesian_2d(
            -0.5..top.len() as f64 - 0.5,
            0.0..max_freq as f64 * 1.1,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(top.len())
        .x_label_formatter(&|x| {
            let i = x.round();
            if i >= 0.0 && (i as usize) < names.len() {
                names[i as usize].clone()
            } else {
                String::new()
            }
        })
        .y_desc("Frequency")
        .draw()?;

    let color = Palette99::pick(label);
    chart.draw_series(top.iter().enumerate().map(|(i, &(_, freq))| {
        Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, freq as f64)],
            color.filled(),
        )
    }))?;

    root.present()
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    Ok(())
}
