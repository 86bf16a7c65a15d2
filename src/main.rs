use anyhow::{Context, Result};
use argh::FromArgs;
use bellplot::{export, Fields, RenderOptions, Session, Viewport};
use std::path::PathBuf;

#[derive(FromArgs)]
/// BellPlot converts between a normal score and its cumulative probability.
/// Fill in the mean, the deviation and exactly one of score or probability.
struct Config {
    #[argh(option, short = 'm', default = "String::new()")]
    /// mean of the distribution
    pub mean: String,

    #[argh(option, short = 'd', default = "String::new()")]
    /// standard deviation of the distribution
    pub deviation: String,

    #[argh(option, short = 's', default = "String::new()")]
    /// the score, leave out to compute it
    pub score: String,

    #[argh(option, short = 'p', default = "String::new()")]
    /// the cumulative probability, leave out to compute it
    pub probability: String,

    #[argh(switch)]
    /// render the bell curve and save it as a PNG
    pub plot: bool,

    #[argh(option, short = 'o')]
    /// where to save the figure, defaults to figure_<date>_<time>.png on the desktop
    pub output: Option<PathBuf>,

    #[argh(option, default = "default_viewport()")]
    /// size of the screen the figure is scaled for, as WIDTHxHEIGHT
    pub viewport: Viewport,

    #[argh(option, default = "default_dpi()")]
    /// resolution of the figure before scaling
    pub dpi: u32,
}

fn default_viewport() -> Viewport {
    Viewport::new(1920, 1080)
}

fn default_dpi() -> u32 {
    900
}

fn main() -> Result<()> {
    env_logger::init();

    let config: Config = argh::from_env();
    let fields = Fields::new(
        config.mean,
        config.deviation,
        config.score,
        config.probability,
    );
    let options = RenderOptions {
        dpi: config.dpi,
        ..Default::default()
    };
    let mut session = Session::with_options(config.viewport, options);
    session.set_show_plot(config.plot);

    let solution = session
        .calculate(&fields)
        .map_err(|e| anyhow::anyhow!("{}: {}", e.title(), e))?;
    let filled = fields.filled_with(&solution);
    println!("Mean: {}", filled.mean.trim());
    println!("Deviation: {}", filled.deviation.trim());
    println!("Score: {}", filled.score.trim());
    println!("Cumulative probability: {}", filled.probability.trim());

    if session.figure().is_some() {
        let path = config.output.unwrap_or_else(export::default_path);
        let saved = session
            .export(&path)
            .with_context(|| format!("saving figure to {:?}", path))?;
        println!("Figure saved to {}", saved.display());
    }
    Ok(())
}
