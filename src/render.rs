use crate::error::{Error, Result};
use crate::solver::{round_to, PROBABILITY_DECIMALS};
use crate::stats::Normal;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage, RgbaImage};
use once_cell::sync::Lazy;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::str::FromStr;

/// Width and height of the figure, in inches.
pub const FIGURE_INCHES: (u32, u32) = (9, 7);
/// Range over which the standard density is sampled.
pub const SAMPLE_DOMAIN: (f64, f64) = (-10.0, 10.0);
pub const SAMPLE_STEP: f64 = 0.001;
/// Visible portion of the x axis, in standard deviations.
pub const VISIBLE_WINDOW: (f64, f64) = (-4.0, 4.0);

const TITLE: &str = "Normal Gaussian Curve";
const FONT_FAMILY: &str = "sans-serif";
const SHADE: RGBColor = RGBColor(255, 127, 14);

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

// The bitmap backend only knows the fonts registered here.
static FONT: Lazy<std::result::Result<(), String>> = Lazy::new(|| {
    register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
        .map_err(|_| "invalid font data".to_owned())
});

/// Fully resolved input of the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSpec {
    pub mean: f64,
    pub deviation: f64,
    pub score: f64,
    pub probability: f64,
}

impl PlotSpec {
    pub fn z(&self) -> f64 {
        (self.score - self.mean) / self.deviation
    }

    pub fn caption_lines(&self) -> [String; 3] {
        let mut probability = format!("Cumulative Probability: {:.5}", self.probability);
        // odds of drawing something above the score, meaningless once the
        // shown probability reads as 1
        if round_to(self.probability, PROBABILITY_DECIMALS) < 1.0 {
            let odds = (1.0 / (1.0 - self.probability)).round();
            probability.push_str(&format!(" -- 1/{:.0}", odds));
        }
        [
            format!(
                "# of Standard Deviations Outside the Mean: {:.2}",
                self.z().abs()
            ),
            format!("Score: {:.1}", self.score),
            probability,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn scaled(&self, fraction: f64) -> (f64, f64) {
        (self.width as f64 * fraction, self.height as f64 * fraction)
    }
}

impl FromStr for Viewport {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
        let w: u32 = w.trim().parse().map_err(|e| format!("width {:?}: {}", w, e))?;
        let h: u32 = h.trim().parse().map_err(|e| format!("height {:?}: {}", h, e))?;
        if w == 0 || h == 0 {
            return Err(format!("viewport must not be empty, got {}x{}", w, h));
        }
        Ok(Self::new(w, h))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Resolution at which the figure is rasterized before being scaled down.
    pub dpi: u32,
    /// Fraction of the viewport the scaled figure may occupy on each axis.
    pub viewport_fraction: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: 900,
            viewport_fraction: 0.56,
        }
    }
}

impl RenderOptions {
    pub fn base_size(&self) -> (u32, u32) {
        (FIGURE_INCHES.0 * self.dpi, FIGURE_INCHES.1 * self.dpi)
    }
}

#[derive(Debug, Clone)]
pub struct RenderedFigure {
    image: RgbaImage,
    spec: PlotSpec,
}

impl RenderedFigure {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn spec(&self) -> &PlotSpec {
        &self.spec
    }
}

/// Samples the density of `normal` over `SAMPLE_DOMAIN`.
pub fn density_samples(normal: &Normal) -> Vec<(f64, f64)> {
    let (lo, hi) = SAMPLE_DOMAIN;
    let n = ((hi - lo) / SAMPLE_STEP).round() as usize;
    (0..n)
        .map(|i| {
            let x = lo + i as f64 * SAMPLE_STEP;
            (x, normal.pdf(x))
        })
        .collect()
}

/// Largest size with the aspect ratio of `size` that fits in `bound`.
pub fn fit_within(size: (u32, u32), bound: (f64, f64)) -> (u32, u32) {
    let scale = (bound.0 / size.0 as f64).min(bound.1 / size.1 as f64);
    // the epsilon absorbs products like 559.9999999 that are meant to be exact
    let w = (size.0 as f64 * scale + 1e-9).floor().max(1.0);
    let h = (size.1 as f64 * scale + 1e-9).floor().max(1.0);
    (w as u32, h as u32)
}

pub fn render(spec: &PlotSpec, viewport: Viewport, options: &RenderOptions) -> Result<RenderedFigure> {
    if let Err(e) = &*FONT {
        return Err(Error::Render(format!("cannot load the bundled font: {}", e)));
    }
    let (width, height) = options.base_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    draw(spec, options.dpi, &mut buffer, (width, height))
        .map_err(|e| Error::Render(e.to_string()))?;
    let base = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| Error::Render("pixel buffer does not match the figure size".to_owned()))?;

    let (w, h) = fit_within((width, height), viewport.scaled(options.viewport_fraction));
    let image = DynamicImage::ImageRgb8(base)
        .resize_exact(w, h, FilterType::Lanczos3)
        .to_rgba8();
    log::info!(
        "rendered z={:.3} at {}x{}, scaled to {}x{}",
        spec.z(),
        width,
        height,
        w,
        h
    );
    Ok(RenderedFigure { image, spec: *spec })
}

fn draw(
    spec: &PlotSpec,
    dpi: u32,
    buffer: &mut [u8],
    size: (u32, u32),
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    // typographic points to pixels
    let pt = |points: f64| points * dpi as f64 / 72.0;
    let px = |points: f64| (pt(points).round() as u32).max(1);

    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    root.fill(&WHITE)?;
    let caption_height = px(60.0) as i32;
    let (upper, lower) = root.split_vertically(size.1 as i32 - caption_height);

    let standard = Normal::standard();
    let (lo, hi) = VISIBLE_WINDOW;
    let z = spec.z();
    let visible: Vec<(f64, f64)> = density_samples(&standard)
        .into_iter()
        .filter(|(x, _)| *x >= lo && *x <= hi)
        .collect();

    let mut chart = ChartBuilder::on(&upper)
        .caption(TITLE, (FONT_FAMILY, pt(14.0)))
        .margin(px(12.0))
        .x_label_area_size(px(24.0))
        .y_label_area_size(px(12.0))
        .build_cartesian_2d(lo..hi, 0.0..standard.pdf(0.0) * 1.05)?;

    chart
        .configure_mesh()
        .x_labels(9)
        .x_label_formatter(&|x: &f64| format!("{:.0}", x))
        .y_label_formatter(&|_: &f64| String::new())
        .x_desc("Standard deviations from the mean")
        .label_style((FONT_FAMILY, pt(10.0)))
        .axis_desc_style((FONT_FAMILY, pt(11.0)))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(WHITE)
        .draw()?;

    chart.draw_series(AreaSeries::new(
        visible.iter().copied(),
        0.0,
        BLUE.mix(0.1),
    ))?;

    if z >= lo {
        let edge = z.min(hi);
        let shaded: Vec<(f64, f64)> = visible
            .iter()
            .copied()
            .filter(|(x, _)| *x < edge)
            .chain(std::iter::once((edge, standard.pdf(edge))))
            .collect();
        chart.draw_series(AreaSeries::new(shaded, 0.0, SHADE.mix(0.3)))?;
    }

    chart.draw_series(LineSeries::new(
        visible.iter().copied(),
        BLUE.stroke_width(px(1.5)),
    ))?;

    if z >= lo && z <= hi {
        chart.draw_series(std::iter::once(Circle::new(
            (z, standard.pdf(z)),
            px(4.0),
            RED.filled(),
        )))?;
    }

    let text = (FONT_FAMILY, pt(11.0))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let line_height = pt(16.0) as i32;
    for (i, line) in spec.caption_lines().iter().enumerate() {
        lower.draw_text(
            line,
            &text,
            ((size.0 / 2) as i32, px(4.0) as i32 + i as i32 * line_height),
        )?;
    }

    root.present()?;
    Ok(())
}
