pub(crate) mod input;
pub(crate) mod phone_input;

use color_eyre::eyre::Result;
use ratatui::{Frame, layout::Rect};

use crate::{actions::Action, app::RootState, tui::Event};

/// A reusable widget embedded in a page. Components are keyed by id so
/// several instances can share the action channel without stealing each
/// other's messages.
pub(crate) trait Component {
    fn get_id(&self) -> u64;

    fn handle_events(&self, event: &Event, app: &RootState) -> Result<()>;

    fn update(&mut self, action: &Action, app: &RootState) -> Result<()>;

    fn draw(&self, frame: &mut Frame, area: &Rect, app: &RootState);
}
