//! SVG charts of the dataset and its graphs.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use crate::analysis::UserPair;
use crate::dataset::UserRecord;
use crate::error::Result;
use crate::graph::SocialGraph;
use crate::layout::Point;

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const SKYBLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHTGREEN: RGBColor = RGBColor(144, 238, 144);
const FONT: &str = "sans-serif";

/// Writes each chart into one directory and remembers what it wrote.
pub struct Reporter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl Reporter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Reporter {
            dir,
            written: Vec::new(),
        })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn top_words(&mut self, words: &[(String, usize)]) -> Result<PathBuf> {
        let path = self.dir.join("top_words.svg");
        draw_word_bars(&path, words)?;
        Ok(self.record(path))
    }

    pub fn followers(&mut self, dataset: &[UserRecord]) -> Result<PathBuf> {
        let path = self.dir.join("followers.svg");
        draw_follower_bars(&path, dataset)?;
        Ok(self.record(path))
    }

    pub fn followers_histogram(
        &mut self,
        dataset: &[UserRecord],
        bins: usize,
    ) -> Result<PathBuf> {
        let path = self.dir.join("followers_histogram.svg");
        let counts: Vec<f64> = dataset.iter().map(|u| u.followers_count as f64).collect();
        draw_histogram(&path, &histogram(&counts, bins))?;
        Ok(self.record(path))
    }

    pub fn top_similarities(&mut self, top: &[(UserPair, f64)]) -> Result<PathBuf> {
        let path = self.dir.join("top_similarities.svg");
        draw_similarity_bars(&path, top)?;
        Ok(self.record(path))
    }

    pub fn graph(
        &mut self,
        name: &str,
        title: &str,
        social: &SocialGraph,
        layout: &HashMap<String, Point>,
    ) -> Result<PathBuf> {
        let path = self.dir.join(format!("{name}.svg"));
        draw_graph(&path, title, social, layout)?;
        Ok(self.record(path))
    }

    fn record(&mut self, path: PathBuf) -> PathBuf {
        info!(path = %path.display(), "chart rendered");
        self.written.push(path.clone());
        path
    }
}

/// `bins` equal-width buckets spanning min..=max, as `(start, end, count)`.
/// The last bucket includes the maximum.
pub fn histogram(values: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in values {
        let slot = (((v - lo) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, n)| (lo + i as f64 * width, lo + (i + 1) as f64 * width, n))
        .collect()
}

fn draw_word_bars(path: &Path, words: &[(String, usize)]) -> DrawResult<()> {
    let labels: Vec<&str> = words.iter().map(|(w, _)| w.as_str()).collect();
    let values: Vec<f64> = words.iter().map(|(_, n)| *n as f64).collect();
    draw_labelled_bars(
        path,
        (1000, 600),
        "Most frequent words in tweets",
        ("Words", "Occurrences"),
        &labels,
        &values,
        SKYBLUE,
    )
}

fn draw_follower_bars(path: &Path, dataset: &[UserRecord]) -> DrawResult<()> {
    let labels: Vec<&str> = dataset.iter().map(|u| u.username.as_str()).collect();
    let values: Vec<f64> = dataset.iter().map(|u| u.followers_count as f64).collect();
    draw_labelled_bars(
        path,
        (1000, 600),
        "Follower count per user",
        ("Users", "Followers"),
        &labels,
        &values,
        SKYBLUE,
    )
}

/// Vertical bars with a rotated category label under each one and its value
/// printed on top.
fn draw_labelled_bars(
    path: &Path,
    size: (u32, u32),
    title: &str,
    (x_desc, y_desc): (&str, &str),
    labels: &[&str],
    values: &[f64],
    color: RGBColor,
) -> DrawResult<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let n = values.len().max(1) as f64;
    let top = values.iter().copied().fold(1.0, f64::max) * 1.1;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(15)
        .x_label_area_size(130)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..n, 0f64..top)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        let x = i as f64;
        Rectangle::new([(x + 0.1, 0.0), (x + 0.9, *v)], color.filled())
    }))?;
    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        let style = (FONT, 10.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        Text::new(format!("{}", v.round()), (i as f64 + 0.5, *v), style)
    }))?;

    for (i, label) in labels.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(i as f64 + 0.5, 0.0));
        let style = (FONT, 10.0)
            .into_font()
            .transform(FontTransform::Rotate90)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(label.to_string(), (px, py + 6), style))?;
    }

    root.present()?;
    Ok(())
}

fn draw_histogram(path: &Path, buckets: &[(f64, f64, usize)]) -> DrawResult<()> {
    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let lo = buckets.first().map_or(0.0, |b| b.0);
    let hi = buckets.last().map_or(1.0, |b| b.1);
    let tallest = buckets.iter().map(|b| b.2).max().unwrap_or(0).max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption("Follower count distribution", (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0f64..tallest * 1.1)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Followers")
        .y_desc("Users")
        .draw()?;

    chart.draw_series(buckets.iter().map(|(start, end, count)| {
        Rectangle::new([(*start, 0.0), (*end, *count as f64)], LIGHTGREEN.filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Horizontal bars, best pair at the top, score to two decimals at each
/// bar's end.
fn draw_similarity_bars(path: &Path, top: &[(UserPair, f64)]) -> DrawResult<()> {
    let rows = top.len().max(1);
    let height = (rows as u32 * 16 + 120).max(400);
    let root = SVGBackend::new(path, (1200, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Highest similarity scores", (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(300)
        .build_cartesian_2d(0f64..1.15, 0f64..rows as f64)?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_label_formatter(&|_| String::new())
        .x_desc("Similarity score")
        .draw()?;

    let row_of = |i: usize| (rows - 1 - i) as f64;
    chart.draw_series(top.iter().enumerate().map(|(i, (_, score))| {
        let y = row_of(i);
        Rectangle::new([(0.0, y + 0.15), (*score, y + 0.85)], SKYBLUE.filled())
    }))?;
    chart.draw_series(top.iter().enumerate().map(|(i, (_, score))| {
        let style = (FONT, 10.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        Text::new(format!("{:.2}", score), (score + 0.01, row_of(i) + 0.5), style)
    }))?;

    for (i, (pair, _)) in top.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(0.0, row_of(i) + 0.5));
        let style = (FONT, 10.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        root.draw(&Text::new(pair.label(), (px - 6, py), style))?;
    }

    root.present()?;
    Ok(())
}

fn draw_graph(
    path: &Path,
    title: &str,
    social: &SocialGraph,
    layout: &HashMap<String, Point>,
) -> DrawResult<()> {
    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .build_cartesian_2d(-1.2f64..1.2, -1.2f64..1.2)?;

    let at = |name: &str| layout.get(name).map(|p| (p.x, p.y));
    chart.draw_series(social.edges().filter_map(|(a, b, _)| {
        Some(PathElement::new(vec![at(a)?, at(b)?], BLACK.mix(0.3).stroke_width(1)))
    }))?;
    chart.draw_series(
        layout
            .values()
            .map(|p| Circle::new((p.x, p.y), 4, SKYBLUE.filled())),
    )?;
    chart.draw_series(layout.iter().map(|(name, p)| {
        let style = (FONT, 8.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        Text::new(name.clone(), (p.x, p.y), style)
    }))?;

    root.present()?;
    Ok(())
}

/// Hand each chart to the platform viewer, one at a time.
///
/// This waits for the opener command, not for the viewer window: `xdg-open`
/// and `open` usually return as soon as the viewer starts, so the run does
/// not block until the charts are closed.
pub fn open_charts(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let status = if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", "start", ""]).arg(path).status()?
        } else if cfg!(target_os = "macos") {
            Command::new("open").arg(path).status()?
        } else {
            Command::new("xdg-open").arg(path).status()?
        };
        if !status.success() {
            warn!(path = %path.display(), %status, "viewer exited with an error");
        }
    }
    Ok(())
}
