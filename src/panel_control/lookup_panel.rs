use super::panel_state::PanelState;
use crate::formatter::{self, LookupView};
use crate::gateway::NeoGateway;
use crate::http_handler::GatewayError;
use crate::http_handler::http_response::asteroid::AsteroidRecord;
use crate::{error, warn};
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The single-lookup surface, plus its nested factsheet sub-flow.
///
/// Each trigger bumps the surface's request generation; a completion whose
/// generation went stale is discarded, so a superseded request can never
/// overwrite a newer one's outcome.
pub struct LookupPanel {
    state: PanelState<LookupResult>,
    factsheet: PanelState<String>,
    generation: u64,
    factsheet_generation: u64,
}

pub struct LookupResult {
    record: AsteroidRecord,
    view: LookupView,
}

impl LookupResult {
    fn new(record: AsteroidRecord) -> Self {
        let view = formatter::lookup_view(&record);
        Self { record, view }
    }

    pub fn view(&self) -> &LookupView { &self.view }
}

impl LookupPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::Idle,
            factsheet: PanelState::Idle,
            generation: 0,
            factsheet_generation: 0,
        }
    }

    pub fn state(&self) -> &PanelState<LookupResult> { &self.state }
    pub fn factsheet(&self) -> &PanelState<String> { &self.factsheet }

    /// Handles the lookup trigger. Whitespace-only ids are rejected locally,
    /// presented exactly like a backend error and never reach the network.
    pub async fn on_search(panel: Arc<RwLock<Self>>, gateway: Arc<NeoGateway>, raw_id: String) {
        let id = String::from(raw_id.trim());
        if id.is_empty() {
            let mut lock = panel.write().await;
            lock.generation += 1;
            lock.factsheet = PanelState::Idle;
            lock.state = PanelState::Error(
                GatewayError::Validation(String::from("Please enter an Asteroid SPK-ID."))
                    .to_string(),
            );
            lock.render();
            return;
        }

        let generation = {
            let mut lock = panel.write().await;
            lock.generation += 1;
            lock.state = PanelState::Loading;
            lock.factsheet = PanelState::Idle;
            lock.render();
            lock.generation
        };

        let result = gateway.lookup_asteroid(&id).await;

        let mut lock = panel.write().await;
        if lock.generation != generation {
            // superseded by a newer trigger
            return;
        }
        lock.state = match result {
            Ok(record) => PanelState::Success(LookupResult::new(record)),
            Err(e) => PanelState::Error(e.to_string()),
        };
        lock.render();
    }

    /// Handles the factsheet trigger. Requires a current lookup result; the
    /// trigger is disabled while a factsheet request is in flight and stays
    /// enabled after a failure.
    pub async fn on_generate_factsheet(panel: Arc<RwLock<Self>>, gateway: Arc<NeoGateway>) {
        let (generation, prompt) = {
            let mut lock = panel.write().await;
            let Some(result) = lock.state.success() else {
                warn!("no lookup result to generate a factsheet for");
                return;
            };
            if lock.factsheet.is_loading() {
                return;
            }
            let prompt = formatter::factsheet_prompt(&result.record);
            lock.factsheet_generation += 1;
            lock.factsheet = PanelState::Loading;
            lock.render();
            (lock.factsheet_generation, prompt)
        };

        let result = gateway.generate_text(&prompt).await;

        let mut lock = panel.write().await;
        if lock.factsheet_generation != generation {
            return;
        }
        lock.factsheet = match result {
            Ok(text) => PanelState::Success(text),
            Err(e) => {
                error!("factsheet generation failed: {e}");
                PanelState::Error(String::from(
                    "Failed to generate factsheet. Please try again.",
                ))
            }
        };
        lock.render();
    }

    pub fn view_text(&self) -> String {
        let mut out = String::from("── Asteroid Lookup ──────────────────────\n");
        match &self.state {
            PanelState::Idle => out.push_str("Enter `lookup <spk-id>` to begin.\n"),
            PanelState::Loading => out.push_str("Loading...\n"),
            PanelState::Error(message) => {
                let _ = writeln!(out, "\x1b[31m{message}\x1b[0m");
            }
            PanelState::Success(result) => {
                let view = &result.view;
                let hazard_color = if view.hazardous { "\x1b[31m" } else { "\x1b[32m" };
                let _ = writeln!(out, "{}", view.name);
                let _ = writeln!(
                    out,
                    "Potentially Hazardous: {hazard_color}{}\x1b[0m",
                    view.hazard_text
                );
                let _ = writeln!(out, "Max. Diameter: {} km", view.diameter_km);
                let _ = writeln!(out, "Abs. Magnitude (H): {}", view.magnitude);
                if let Some(orbital) = &view.orbital {
                    let _ = writeln!(out, "Orbit Class: {}", orbital.class_type);
                    let _ = writeln!(out, "Eccentricity: {}", orbital.eccentricity);
                    let _ = writeln!(out, "Semi-Major Axis: {} AU", orbital.semi_major_axis);
                    let _ = writeln!(out, "Orbital Period: {} days", orbital.orbital_period);
                    let _ = writeln!(out, "Perihelion: {} AU", orbital.perihelion);
                    let _ = writeln!(out, "Aphelion: {} AU", orbital.aphelion);
                    let _ = writeln!(out, "Inclination: {}°", orbital.inclination);
                }
                match &self.factsheet {
                    PanelState::Idle => {
                        out.push_str("Type `factsheet` for a generated summary.\n");
                    }
                    PanelState::Loading => out.push_str("Generating factsheet...\n"),
                    PanelState::Success(text) => {
                        let _ = writeln!(out, "✨ Fun Factsheet: {text}");
                    }
                    PanelState::Error(message) => {
                        let _ = writeln!(out, "\x1b[31m{message}\x1b[0m");
                        out.push_str("Type `factsheet` to try again.\n");
                    }
                }
            }
        }
        out
    }

    fn render(&self) {
        println!("{}", self.view_text());
    }
}

impl Default for LookupPanel {
    fn default() -> Self { Self::new() }
}
