use super::panel_state::PanelState;
use crate::formatter::{self, FeedCardView};
use crate::gateway::NeoGateway;
use crate::http_handler::http_response::asteroid::AsteroidRecord;
use crate::{error, warn};
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// The weekly-feed surface: one card per asteroid, sorted by earliest close
/// approach, with an independent impact-assessment sub-state per hazardous
/// card.
pub struct FeedPanel {
    state: PanelState<Vec<FeedCard>>,
    generation: u64,
}

pub struct FeedCard {
    record: AsteroidRecord,
    view: FeedCardView,
    assessment: PanelState<String>,
    assessment_generation: u64,
}

impl FeedCard {
    fn new(record: AsteroidRecord) -> Self {
        let view = formatter::feed_card(&record);
        Self { record, view, assessment: PanelState::Idle, assessment_generation: 0 }
    }

    pub fn view(&self) -> &FeedCardView { &self.view }
    pub fn assessment(&self) -> &PanelState<String> { &self.assessment }
}

impl FeedPanel {
    /// How long a failed impact assessment stays on screen before the card's
    /// pre-loading content is restored.
    const ASSESS_FAILURE_LINGER: Duration = Duration::from_secs(3);

    pub fn new() -> Self {
        Self { state: PanelState::Idle, generation: 0 }
    }

    pub fn state(&self) -> &PanelState<Vec<FeedCard>> { &self.state }

    pub fn card(&self, id: &str) -> Option<&FeedCard> {
        self.state.success().and_then(|cards| cards.iter().find(|c| c.view.id == id))
    }

    fn card_mut(&mut self, id: &str) -> Option<&mut FeedCard> {
        match &mut self.state {
            PanelState::Success(cards) => cards.iter_mut().find(|c| c.view.id == id),
            _ => None,
        }
    }

    /// Handles the feed trigger: fetches the week starting today and replaces
    /// any prior feed result entirely.
    pub async fn on_fetch(panel: Arc<RwLock<Self>>, gateway: Arc<NeoGateway>) {
        let generation = {
            let mut lock = panel.write().await;
            lock.generation += 1;
            lock.state = PanelState::Loading;
            lock.render();
            lock.generation
        };

        let start_date = chrono::Utc::now().date_naive();
        let result = gateway.fetch_weekly_feed(start_date).await;

        let mut lock = panel.write().await;
        if lock.generation != generation {
            return;
        }
        lock.state = match result {
            Ok(feed) => {
                let records = formatter::flatten_feed(&feed);
                if records.is_empty() {
                    PanelState::Error(String::from(
                        "No Near-Earth Objects found for the upcoming week.",
                    ))
                } else {
                    PanelState::Success(
                        records.into_iter().map(|r| FeedCard::new(r.clone())).collect(),
                    )
                }
            }
            Err(e) => PanelState::Error(e.to_string()),
        };
        lock.render();
    }

    /// Handles the impact trigger for one hazardous card. On failure the
    /// message lingers for [`Self::ASSESS_FAILURE_LINGER`], then the card's
    /// original content (trigger controls included) is restored exactly.
    pub async fn on_assess_impact(panel: Arc<RwLock<Self>>, gateway: Arc<NeoGateway>, id: String) {
        let (feed_generation, card_generation, prompt) = {
            let mut lock = panel.write().await;
            let feed_generation = lock.generation;
            let Some(card) = lock.card_mut(&id) else {
                warn!("no feed card with SPK-ID {id}");
                return;
            };
            if !card.record.is_hazardous() {
                warn!("impact assessment is only available for hazardous entries");
                return;
            }
            if card.assessment.is_loading() {
                return;
            }
            card.assessment_generation += 1;
            card.assessment = PanelState::Loading;
            let prompt = formatter::impact_prompt(&card.record);
            let card_generation = card.assessment_generation;
            lock.render();
            (feed_generation, card_generation, prompt)
        };

        let result = gateway.generate_text(&prompt).await;

        let failed = {
            let mut lock = panel.write().await;
            if lock.generation != feed_generation {
                return;
            }
            let Some(card) = lock.card_mut(&id) else { return };
            if card.assessment_generation != card_generation {
                return;
            }
            let failed = match result {
                Ok(text) => {
                    card.assessment = PanelState::Success(text);
                    false
                }
                Err(e) => {
                    error!("impact assessment failed: {e}");
                    card.assessment =
                        PanelState::Error(String::from("Failed to generate assessment."));
                    true
                }
            };
            lock.render();
            failed
        };
        if !failed {
            return;
        }

        tokio::time::sleep(Self::ASSESS_FAILURE_LINGER).await;

        let mut lock = panel.write().await;
        if lock.generation != feed_generation {
            return;
        }
        let Some(card) = lock.card_mut(&id) else { return };
        if card.assessment_generation != card_generation || card.assessment.error().is_none() {
            return;
        }
        card.assessment = PanelState::Idle;
        lock.render();
    }

    pub fn view_text(&self) -> String {
        let mut out = String::from("── Upcoming Close Approaches ────────────\n");
        match &self.state {
            PanelState::Idle => out.push_str("Enter `feed` to fetch this week's objects.\n"),
            PanelState::Loading => out.push_str("Loading...\n"),
            PanelState::Error(message) => {
                let _ = writeln!(out, "\x1b[31m{message}\x1b[0m");
            }
            PanelState::Success(cards) => {
                for card in cards {
                    out.push_str(&card.card_text());
                }
            }
        }
        out
    }

    fn render(&self) {
        println!("{}", self.view_text());
    }
}

impl Default for FeedPanel {
    fn default() -> Self { Self::new() }
}

impl FeedCard {
    fn card_text(&self) -> String {
        let view = &self.view;
        let (color, hazard_line) = if view.hazardous {
            ("\x1b[31m", "Potentially Hazardous")
        } else {
            ("\x1b[32m", "Not Hazardous")
        };
        let mut out = String::new();
        let _ = writeln!(out, "{color}{}\x1b[0m ({hazard_line})", view.name);
        let _ = writeln!(out, "  SPK-ID: {}", view.id);
        let _ = writeln!(out, "  Diameter: {} - {} m", view.diameter_min_m, view.diameter_max_m);
        let _ = writeln!(out, "  Closest Approach: {}", view.approach);
        let _ = writeln!(out, "  Velocity: {} km/s", view.velocity_kms);
        let _ = writeln!(out, "  Miss Distance: {} km", view.miss_distance_km);
        if view.hazardous {
            match &self.assessment {
                PanelState::Idle => {
                    let _ = writeln!(out, "  Type `impact {}` to assess impact.", view.id);
                    if let Some(url) = &view.simulator_url {
                        let _ = writeln!(out, "  🛰 Simulate: {url}");
                    }
                }
                PanelState::Loading => out.push_str("  Assessing impact...\n"),
                PanelState::Success(text) => {
                    let _ = writeln!(out, "  ✨ Impact Assessment: {text}");
                }
                PanelState::Error(message) => {
                    let _ = writeln!(out, "  \x1b[31m{message}\x1b[0m");
                }
            }
        }
        out
    }
}
