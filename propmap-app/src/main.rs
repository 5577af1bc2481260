use anyhow::Context as _;
use clap::Parser;
use propmap::{
    core::constants::WELCOME_TITLE,
    data::loader::PendingLoad,
    ui::{EguiSurface, HelpPanel, LegendPanel, MapCanvas, MapControls, SequenceControls, WelcomeOverlay},
    DataSource, InputEvent, Map, MapConfig, Point, ViewState,
};
use std::path::PathBuf;

const DEFAULT_SOURCE: &str = "data/deposits.geojson";
const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];

#[derive(Parser)]
#[command(
    name = "propmap-app",
    about = "Proportional symbol map of bank deposits by city and year"
)]
struct Cli {
    /// GeoJSON file or http(s) URL
    source: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render one frame to this SVG file instead of opening a window
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Year index of the headless frame
    #[arg(long, default_value = "0")]
    year_index: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MapConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => MapConfig::default(),
    };
    let source: DataSource = cli
        .source
        .clone()
        .or_else(|| config.data_source.clone())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
        .parse()?;

    if let Some(out) = &cli.svg {
        return export_svg(source, config, cli.year_index, out).await;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(WELCOME_TITLE),
        ..Default::default()
    };

    let handle = tokio::runtime::Handle::current();
    eframe::run_native(
        "propmap-app",
        options,
        Box::new(move |_cc| Box::new(PropMapApp::new(&handle, source, config))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))?;

    Ok(())
}

async fn export_svg(
    source: DataSource,
    config: MapConfig,
    year_index: usize,
    out: &PathBuf,
) -> anyhow::Result<()> {
    let dataset = propmap::load_dataset(&source, &config)
        .await
        .with_context(|| format!("loading {source}"))?;
    let size = Point::new(WINDOW_SIZE[0] as f64, WINDOW_SIZE[1] as f64);
    let mut map = Map::new(dataset, config, size)?;
    map.handle_input(InputEvent::SliderInput { index: year_index })?;

    std::fs::write(out, map.export_svg())
        .with_context(|| format!("writing {}", out.display()))?;
    log::info!("wrote {} for {}", out.display(), map.current_key());
    Ok(())
}

struct PropMapApp {
    config: MapConfig,
    state: ViewState,
    pending: Option<PendingLoad>,
    controls: MapControls,
    sequence: SequenceControls,
    welcome: WelcomeOverlay,
}

impl PropMapApp {
    fn new(handle: &tokio::runtime::Handle, source: DataSource, config: MapConfig) -> Self {
        log::info!("loading {}", source);
        let pending = PendingLoad::spawn(handle, source, config.clone());
        Self {
            config,
            state: ViewState::Loading,
            pending: Some(pending),
            controls: MapControls::default(),
            sequence: SequenceControls::default(),
            welcome: WelcomeOverlay::default(),
        }
    }

    fn poll_load(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        match pending.try_take() {
            Some(result) => {
                let size = ctx.screen_rect().size();
                self.state = ViewState::from_load(
                    result,
                    self.config.clone(),
                    Point::new(size.x as f64, size.y as f64),
                );
                self.pending = None;
            }
            None => ctx.request_repaint_after(std::time::Duration::from_millis(100)),
        }
    }

    fn dispatch(map: &mut Map, input: InputEvent) {
        match map.handle_input(input) {
            Ok(events) => {
                for event in events {
                    log::debug!("{:?}", event);
                }
            }
            Err(e) => log::warn!("input dropped: {}", e),
        }
    }
}

impl eframe::App for PropMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let home = self.controls.show(ui);
                if let Some(map) = self.state.map_mut() {
                    if let Some(input) = home {
                        Self::dispatch(map, input);
                    }
                    ui.separator();
                    if let Some(input) = self.sequence.show(ui, map) {
                        Self::dispatch(map, input);
                    }
                }
            });
        });

        if let Some(map) = self.state.map() {
            let (view, legend) = (map.legend().clone(), map.config().legend.clone());
            egui::SidePanel::right("legend")
                .resizable(false)
                .show(ctx, |ui| LegendPanel::new(&view, &legend).show(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| match self.state.map_mut() {
                Some(map) => {
                    MapCanvas::new(map).show(ui);
                }
                None => {
                    let rect = ui.available_rect_before_wrap();
                    let painter = ui.painter_at(rect);
                    self.state.render(&mut EguiSurface::new(&painter, rect));
                }
            });

        HelpPanel::show(ctx, &mut self.controls.show_info);
        self.welcome.show(ctx);
    }
}
