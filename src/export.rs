use crate::error::{Error, Result};
use crate::render::RenderedFigure;
use chrono::{DateTime, Local, TimeZone};
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Suggested file name for a figure saved at `now`.
pub fn default_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("figure_{}.png", now.format("%Y%m%d_%H.%M"))
}

/// The user's desktop, or the working directory when there is no home.
pub fn default_directory() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join("Desktop"))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_path() -> PathBuf {
    default_directory().join(default_filename(&Local::now()))
}

/// Appends `.png` unless the path already ends with it. Other extensions are
/// kept, so `plot.jpg` becomes `plot.jpg.png`.
pub fn with_png_extension<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.to_string_lossy().ends_with(".png") {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".png");
        PathBuf::from(name)
    }
}

/// Writes the figure as a PNG and returns the path actually written.
pub fn save_png<P: AsRef<Path>>(figure: &RenderedFigure, path: P) -> Result<PathBuf> {
    let path = with_png_extension(path);
    figure
        .image()
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| {
            log::warn!("could not save figure to {:?}: {}", path, e);
            Error::Export {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;
    log::info!(
        "saved {}x{} figure to {:?}",
        figure.width(),
        figure.height(),
        path
    );
    Ok(path)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::render::{render, PlotSpec, RenderOptions, Viewport};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn figure() -> RenderedFigure {
        let spec = PlotSpec {
            mean: 0.0,
            deviation: 1.0,
            score: 1.0,
            probability: 0.8413447460685429,
        };
        let options = RenderOptions {
            dpi: 30,
            ..Default::default()
        };
        render(&spec, Viewport::new(600, 400), &options).unwrap()
    }

    #[test]
    fn test_default_filename() {
        let when = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        assert_eq!(default_filename(&when), "figure_20240307_09.05.png");
    }

    #[test]
    fn test_default_path() {
        let path = default_path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("figure_") && name.ends_with(".png"), "{}", name);
    }

    #[test]
    fn test_png_extension() {
        assert_eq!(with_png_extension("a/b.png"), PathBuf::from("a/b.png"));
        assert_eq!(with_png_extension("a/b"), PathBuf::from("a/b.png"));
        assert_eq!(with_png_extension("b.jpg"), PathBuf::from("b.jpg.png"));
    }

    #[test]
    fn test_save_and_reload() {
        let figure = figure();
        let dir = std::env::temp_dir().join(format!("bellplot-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let written = save_png(&figure, dir.join("curve")).unwrap();
        assert_eq!(written, dir.join("curve.png"));
        let back = image::open(&written).unwrap();
        assert_eq!((back.width(), back.height()), (figure.width(), figure.height()));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_to_missing_directory() {
        let figure = figure();
        let target = std::env::temp_dir()
            .join("bellplot-definitely-missing-dir")
            .join("nested")
            .join("figure.png");
        match save_png(&figure, &target) {
            Err(Error::Export { path, .. }) => assert_eq!(path, target),
            other => panic!("expected an export error, got {:?}", other),
        }
    }
}
