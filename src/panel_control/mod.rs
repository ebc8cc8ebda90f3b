mod feed_panel;
mod lookup_panel;
mod panel_state;

pub use feed_panel::FeedPanel;
pub use lookup_panel::LookupPanel;
pub(crate) use panel_state::PanelState;
