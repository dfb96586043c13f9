use std::{
    cell::RefCell,
    path::Path,
    rc::Rc,
    time::{Duration, Instant},
};

use egui::Context;
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Position, Tiles};

use logger::Logger;
use replay::derive_visuals;

use crate::{
    net::{NetClient, NetResponse},
    plugins,
    state::{SelectionState, Session},
    widgets::{ControlsAction, WidgetFlightControls, WidgetNodeInfo, WidgetRouteProgress},
    windows,
};

// Center of Morocco, where the airway dataset lives.
const INITIAL_LAT: f64 = 31.7917;
const INITIAL_LON: f64 = -7.0926;
const INITIAL_ZOOM: f64 = 6.0;

const REPAINT_MS: u64 = 100;

/// The main application: owns the map, the network client, the session
/// (graph + trace + replay engine) and the floating panels around the map.
pub struct App {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    selection: Rc<RefCell<SelectionState>>,
    session: Session,
    net: NetClient,
    node_widget: Option<WidgetNodeInfo>,
    notice: Option<String>,
    logger: Option<Logger>,
}

impl App {
    /// Creates the application and kicks off the initial graph fetch.
    pub fn new(egui_ctx: Context) -> Self {
        let mut map_memory = MapMemory::default();
        let _ = map_memory.set_zoom(INITIAL_ZOOM);

        let base_url = std::env::var("BACKEND_URL")
            .unwrap_or_else(|_| backend_driver::DEFAULT_BASE_URL.to_string());
        let mut net = NetClient::new(base_url);
        net.fetch_graph();

        let logger = Logger::new(Path::new("logs"), "visualizer").ok();
        if let Some(logger) = &logger {
            let _ = logger.info("fetching airway graph");
        }

        Self {
            tiles: Box::new(HttpTiles::with_options(
                walkers::sources::OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            )),
            map_memory,
            selection: Rc::new(RefCell::new(SelectionState::new())),
            session: Session::new(),
            net,
            node_widget: None,
            notice: None,
            logger,
        }
    }

    fn log_info(&self, message: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.info(message);
        }
    }

    fn log_error(&self, message: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.error(message);
        }
    }

    fn handle_responses(&mut self, now: Instant) {
        for response in self.net.poll() {
            match response {
                NetResponse::Graph(Ok(graph)) => {
                    self.log_info(&format!(
                        "airway graph loaded: {} nodes, {} edges",
                        graph.nodes().len(),
                        graph.edges().len()
                    ));
                    self.session.install_graph(graph);
                }
                NetResponse::Graph(Err(e)) => {
                    self.log_error(&format!("graph fetch failed: {}", e));
                    self.notice = Some("Failed to load airport data".to_string());
                }
                NetResponse::Trace(Ok(trace)) => {
                    self.log_info(&format!(
                        "trace received: {} steps, path of {} nodes",
                        trace.step_count(),
                        trace.path.len()
                    ));
                    self.session.install_trace(trace, now);
                }
                NetResponse::Trace(Err(e)) => {
                    self.log_error(&format!("trace request failed: {}", e));
                    self.notice = Some(format!("Failed to calculate route: {}", e));
                }
            }
        }
    }

    fn show_notice(&mut self, ctx: &Context) {
        let Some(notice) = self.notice.clone() else {
            return;
        };
        let mut dismissed = false;
        let mut retry_graph = false;
        let graph_missing = self.session.graph.is_none();

        egui::Window::new("notice")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, notice);
                    if graph_missing && !self.net.graph_pending() && ui.button("Retry").clicked() {
                        retry_graph = true;
                    }
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });

        if retry_graph {
            self.log_info("retrying graph fetch");
            self.net.fetch_graph();
            dismissed = true;
        }
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.handle_responses(now);

        if let Some(engine) = &mut self.session.engine {
            engine.tick(now);
        }
        ctx.request_repaint_after(Duration::from_millis(REPAINT_MS));

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| match &self.session.graph {
                Some(graph) => {
                    let (start, end) = {
                        let selection = self.selection.borrow();
                        (selection.start.clone(), selection.end.clone())
                    };
                    let visuals = derive_visuals(
                        graph,
                        self.session.trace.as_ref(),
                        self.session.current_step_index(),
                        start.as_deref(),
                        end.as_deref(),
                    );

                    let airways_plugin = plugins::Airways::new(graph, &visuals);
                    let nodes_plugin =
                        plugins::Nodes::new(graph, &visuals, self.selection.clone());

                    let map = Map::new(
                        Some(self.tiles.as_mut()),
                        &mut self.map_memory,
                        Position::from_lat_lon(INITIAL_LAT, INITIAL_LON),
                    )
                    .with_plugin(airways_plugin)
                    .with_plugin(nodes_plugin);

                    ui.add(map);

                    windows::zoom(ui, &mut self.map_memory);
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.label("Loading airport data...");
                        });
                    });
                }
            });

        let mut route_request = None;
        let mut clear_flight = false;
        if let Some(graph) = &self.session.graph {
            let mut selection = self.selection.borrow_mut();
            match WidgetFlightControls::show(ctx, graph, &mut selection, self.net.trace_pending())
            {
                Some(ControlsAction::FindRoute) => {
                    if let (Some(start), Some(end)) =
                        (selection.start.clone(), selection.end.clone())
                    {
                        route_request = Some((start, end, selection.algorithm));
                    }
                }
                Some(ControlsAction::ClearFlight) => clear_flight = true,
                None => {}
            }
        }
        if let Some((start, end, algorithm)) = route_request {
            self.log_info(&format!(
                "requesting {} route from {} to {}",
                algorithm.as_str(),
                start,
                end
            ));
            self.net.request_path(start, end, algorithm);
        }
        if clear_flight {
            self.session.clear_flight();
            self.selection.borrow_mut().clear_route();
            self.notice = None;
        }

        if let (Some(trace), Some(engine)) = (&self.session.trace, &mut self.session.engine) {
            WidgetRouteProgress::show(ctx, trace, engine, now);
        }

        let inspected = self.selection.borrow().inspected.clone();
        match inspected {
            Some(id) => {
                if self.node_widget.as_ref().map(|w| w.node_id.as_str()) != Some(id.as_str()) {
                    self.node_widget = Some(WidgetNodeInfo::new(id));
                }
                if let (Some(widget), Some(graph)) = (&self.node_widget, &self.session.graph) {
                    let mut selection = self.selection.borrow_mut();
                    if !widget.show(ctx, graph, &mut selection) {
                        selection.inspected = None;
                        drop(selection);
                        self.node_widget = None;
                    }
                }
            }
            None => self.node_widget = None,
        }

        self.show_notice(ctx);
    }
}
