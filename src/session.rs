use crate::error::{Error, Result};
use crate::export;
use crate::input::Fields;
use crate::render::{render, RenderOptions, RenderedFigure, Viewport};
use crate::solver::{solve, Solution};
use std::path::{Path, PathBuf};

/// State shared by consecutive calculations: the plot toggle and the single
/// figure currently on display.
pub struct Session {
    viewport: Viewport,
    options: RenderOptions,
    show_plot: bool,
    figure: Option<RenderedFigure>,
}

impl Session {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_options(viewport, RenderOptions::default())
    }

    pub fn with_options(viewport: Viewport, options: RenderOptions) -> Self {
        Self {
            viewport,
            options,
            show_plot: false,
            figure: None,
        }
    }

    pub fn show_plot(&self) -> bool {
        self.show_plot
    }

    /// Turning plotting off retracts the current figure.
    pub fn set_show_plot(&mut self, show: bool) {
        self.show_plot = show;
        if !show {
            self.clear_figure();
        }
    }

    pub fn figure(&self) -> Option<&RenderedFigure> {
        self.figure.as_ref()
    }

    pub fn clear_figure(&mut self) -> Option<RenderedFigure> {
        let old = self.figure.take();
        if old.is_some() {
            log::debug!("figure cleared");
        }
        old
    }

    /// Solves the form and, when plotting is on, replaces the figure.
    /// Whatever happens, the previous figure does not survive the call.
    pub fn calculate(&mut self, fields: &Fields) -> Result<Solution> {
        self.clear_figure();
        let (parameters, query) = fields.parse()?;
        let solution = solve(parameters, query)?;
        if self.show_plot {
            let figure = render(&solution.plot_spec(), self.viewport, &self.options)?;
            self.figure = Some(figure);
        }
        Ok(solution)
    }

    /// Saves the current figure; the figure stays in place even on failure.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        match &self.figure {
            Some(figure) => export::save_png(figure, path),
            None => Err(Error::Export {
                path: export::with_png_extension(path),
                reason: "there is no figure to save".to_owned(),
            }),
        }
    }
}
