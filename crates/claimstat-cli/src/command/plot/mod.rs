use claimstat_frame::columns;

use self::{app::App, data::PlotData};
use crate::util::DataArg;

mod app;
mod data;
mod screens;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlotArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// X axis of the scatter plot
    #[arg(long, default_value = columns::TOTAL_PREMIUM)]
    pub x: String,
    /// Y axis of the scatter plot
    #[arg(long, default_value = columns::TOTAL_CLAIMS)]
    pub y: String,
    /// Column coloring the scatter plot
    #[arg(long, default_value = columns::VEHICLE_TYPE)]
    pub hue: String,
    /// Category axis of the box plot
    #[arg(long, default_value = columns::PROVINCE)]
    pub box_category: String,
    /// Value axis of the box plot
    #[arg(long, default_value = columns::TOTAL_CLAIMS)]
    pub box_value: String,
    /// Heatmap columns (comma-separated), every numeric column by default
    #[arg(long, value_delimiter = ',')]
    pub heatmap_columns: Vec<String>,
}

pub(crate) fn run(arg: &PlotArg) -> anyhow::Result<()> {
    let data = arg.data.load()?;

    log::info!("Computing plot data...");
    let plot_data = PlotData::new(
        &data,
        &arg.x,
        &arg.y,
        &arg.hue,
        &arg.box_category,
        &arg.box_value,
        &arg.heatmap_columns,
    )?;
    log::info!("Plot data computed");

    let mut app = App::new(plot_data);
    ratatui::run(|terminal| app.run(terminal))?;
    Ok(())
}
