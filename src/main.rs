//! citydash - smart city dashboard TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use citydash::action::Action;
use citydash::api;
use citydash::api::GeocodeError;
use citydash::components::{
    CitySearchOverlay, CitySearchOverlayProps, Component, Dashboard, DashboardProps,
};
use citydash::config::{Config, OPENWEATHER_KEY_VAR, TOMTOM_KEY_VAR};
use citydash::effect::Effect;
use citydash::reducer::reducer;
use citydash::state::{AppState, SPINNER_TICK_MS};

/// Smart city dashboard: weather, air quality, traffic, and alerts for one city
#[derive(Parser, Debug)]
#[command(name = "citydash")]
#[command(about = "Weather, air quality, traffic, and alert panels for a city")]
struct Args {
    /// City to watch (resolved via OpenWeatherMap geocoding)
    #[arg(long, short, default_value = "Delhi")]
    city: String,

    /// Refresh interval in seconds (minimum 1)
    #[arg(long, short, default_value = "120", value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: u64,

    /// Traffic incident bounding radius in km (minimum 1)
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..))]
    radius: u32,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CityDashComponentId {
    Dashboard,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CityDashContext {
    Main,
    Search,
}

impl EventRoutingState<CityDashComponentId, CityDashContext> for AppState {
    fn focused(&self) -> Option<CityDashComponentId> {
        if self.search_mode {
            Some(CityDashComponentId::Search)
        } else {
            Some(CityDashComponentId::Dashboard)
        }
    }

    fn modal(&self) -> Option<CityDashComponentId> {
        if self.search_mode {
            Some(CityDashComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: CityDashComponentId) -> CityDashContext {
        match id {
            CityDashComponentId::Dashboard => CityDashContext::Main,
            CityDashComponentId::Search => CityDashContext::Search,
        }
    }

    fn default_context(&self) -> CityDashContext {
        CityDashContext::Main
    }
}

/// Initialize tracing with optional file output.
///
/// The TUI owns the terminal, so logging is off unless CITYDASH_LOG
/// names a file to write to (level controlled via RUST_LOG).
fn init_tracing() {
    let Some(log_path) = std::env::var("CITYDASH_LOG").ok() else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&log_path) else {
        eprintln!("Warning: failed to create log file: {}", log_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        refresh_interval,
        radius,
        debug: debug_args,
    } = Args::parse();

    init_tracing();

    let config = match Config::from_env(radius) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}.", e);
            eprintln!(
                "Set {} and {} before starting the dashboard.",
                OPENWEATHER_KEY_VAR, TOMTOM_KEY_VAR
            );
            std::process::exit(1);
        }
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let geocode_key = config.openweather_key.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            let location = match api::geocode_city(geocode_key.expose(), &city).await {
                Ok(loc) => loc,
                Err(e) => {
                    match e {
                        GeocodeError::NotFound(city) => {
                            eprintln!(
                                "Error: City '{}' not found. Please check the spelling.",
                                city
                            );
                            eprintln!("Examples: 'Delhi', 'Mumbai', 'London'");
                        }
                        GeocodeError::Fetch(e) => {
                            eprintln!("Error: Could not reach the geocoding service.");
                            eprintln!("Details: {}", e);
                        }
                    }
                    std::process::exit(1);
                }
            };

            Ok::<AppState, io::Error>(AppState::new(location))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        config,
        refresh_interval,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct CityDashUi {
    dashboard: Dashboard,
    search: CitySearchOverlay,
}

impl CityDashUi {
    fn new() -> Self {
        Self {
            dashboard: Dashboard::default(),
            search: CitySearchOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CityDashComponentId>,
    ) {
        event_ctx.set_component_area(CityDashComponentId::Dashboard, area);

        let props = DashboardProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.dashboard.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(58, 14, area);
            event_ctx.set_component_area(CityDashComponentId::Search, modal_area);
            let props = CitySearchOverlayProps {
                query: &state.search_query,
                results: &state.search_results,
                selected: state.search_selected,
                is_focused: render_ctx.is_focused(),
                error: state.search_error.as_deref(),
                on_query_change: Action::SearchQueryChange,
                on_query_submit: Action::SearchQuerySubmit,
                on_select: Action::SearchSelect,
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&CityDashComponentId::Search);
        }
    }

    fn handle_dashboard_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .dashboard
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let props = CitySearchOverlayProps {
            query: &state.search_query,
            results: &state.search_results,
            selected: state.search_selected,
            is_focused: true,
            error: state.search_error.as_deref(),
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
            on_select: Action::SearchSelect,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    config: Config,
    refresh_interval: u64,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CityDashUi::new()));
    let mut bus: EventBus<AppState, Action, CityDashComponentId, CityDashContext> = EventBus::new();
    let keybindings: Keybindings<CityDashContext> = Keybindings::new();

    let ui_dashboard = Rc::clone(&ui);
    bus.register(CityDashComponentId::Dashboard, move |event, state| {
        ui_dashboard
            .borrow_mut()
            .handle_dashboard_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(CityDashComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::FetchAll),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );

                runtime.subscriptions().interval(
                    "refresh",
                    Duration::from_secs(refresh_interval),
                    || Action::FetchAll,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &config),
        )
        .await
}

/// Handle effects by spawning keyed tasks. Re-spawning a key cancels the
/// in-flight request, so a superseded fetch can never deliver a stale
/// completion over a newer one.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: &Config) {
    match effect {
        Effect::FetchWeather { lat, lon } => {
            let appid = config.openweather_key.clone();
            ctx.tasks().spawn("fetch_weather", async move {
                match api::fetch_weather(appid.expose(), lat, lon).await {
                    Ok(report) => Action::WeatherDidLoad(report),
                    Err(e) => {
                        tracing::warn!(error = %e, "weather fetch failed");
                        Action::WeatherDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchAirQuality { lat, lon } => {
            let appid = config.openweather_key.clone();
            ctx.tasks().spawn("fetch_air_quality", async move {
                match api::fetch_air_quality(appid.expose(), lat, lon).await {
                    Ok(air) => Action::AirDidLoad(air),
                    Err(e) => {
                        tracing::warn!(error = %e, "air quality fetch failed");
                        Action::AirDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchTraffic { lat, lon } => {
            let key = config.tomtom_key.clone();
            let radius = config.traffic_radius_km;
            ctx.tasks().spawn("fetch_traffic", async move {
                match api::fetch_traffic(key.expose(), lat, lon, radius).await {
                    Ok(incidents) => Action::TrafficDidLoad(incidents),
                    Err(e) => {
                        tracing::warn!(error = %e, "traffic fetch failed");
                        Action::TrafficDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchAlerts { lat, lon } => {
            let appid = config.openweather_key.clone();
            ctx.tasks().spawn("fetch_alerts", async move {
                match api::fetch_alerts(appid.expose(), lat, lon).await {
                    Ok(alerts) => Action::AlertsDidLoad(alerts),
                    Err(e) => {
                        tracing::warn!(error = %e, "alerts fetch failed");
                        Action::AlertsDidError(e.to_string())
                    }
                }
            });
        }
        Effect::SearchCities { query } => {
            let query = query.trim().to_string();
            if query.is_empty() {
                ctx.tasks().cancel(&TaskKey::new("city_search"));
                return;
            }
            let appid = config.openweather_key.clone();
            ctx.tasks()
                .debounce("city_search", Duration::from_millis(300), async move {
                    match api::search_cities(appid.expose(), &query).await {
                        Ok(results) => Action::SearchDidLoad(results),
                        Err(e) => Action::SearchDidError(e.to_string()),
                    }
                });
        }
    }
}
