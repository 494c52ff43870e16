//! Page module handles different UI pages and their behaviors.
//!
//! A page is one layer of the UI. Full-screen pages (home, phone entry) sit
//! at the bottom of the stack; popups (country selector, help) are pushed on
//! top and rendered over their parent.

use color_eyre::eyre::Result;
use ratatui::Frame;

use crate::{actions::Action, app::RootState, tui::Event, utils::help_msg::HelpMsg};

pub(crate) mod country_select;
pub(crate) mod help_popup;
pub(crate) mod home;
pub(crate) mod phone_form;

pub(crate) trait Page {
    fn render(&mut self, frame: &mut Frame, app: &RootState);

    fn handle_events(&self, app: &RootState, event: Event) -> Result<()>;

    fn update(&mut self, app: &RootState, action: Action);

    fn get_name(&self) -> String;

    fn init(&mut self, _app: &RootState) {}

    fn get_help_msg(&self, _app: &RootState) -> HelpMsg {
        HelpMsg::default()
    }

    /// Popups receive every key themselves; the app's global bindings only
    /// apply to full-screen pages.
    fn is_popup(&self) -> bool {
        false
    }
}
