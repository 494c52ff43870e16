use std::cmp::{max, min};

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, palette::tailwind},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Clear, HighlightSpacing, List, ListItem, Padding},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    actions::{Action, LayerAction},
    app::RootState,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::Page;

pub(crate) struct HelpPopup {
    help_msg: HelpMsg,

    longest_entry_size: u16,
    list_state: ratatui::widgets::ListState,
}

impl HelpPopup {
    pub fn new(msg: HelpMsg) -> Option<Self> {
        if msg.is_empty() {
            return None;
        }
        let longest = msg
            .iter()
            .map(|entry| UnicodeWidthStr::width(String::from(entry.clone()).as_str()))
            .max()
            .unwrap();

        Some(Self {
            help_msg: msg,
            longest_entry_size: longest as u16,
            list_state: ratatui::widgets::ListState::default(),
        })
    }
}

#[derive(Clone, Debug)]
pub enum HelpPopupAction {
    Up,
    Down,
    Start,
    End,
}
impl From<HelpPopupAction> for Action {
    fn from(value: HelpPopupAction) -> Self {
        Action::HelpPopup(value)
    }
}

impl Page for HelpPopup {
    fn render(&mut self, frame: &mut Frame, _app: &RootState) {
        let area = frame.area();
        let width = max(
            self.longest_entry_size + 8,
            min(50, area.width.saturating_sub(4)),
        );
        let show_area = Rect {
            x: area.width.saturating_sub(width) / 2,
            y: area.height / 6,
            width,
            height: area.height * 2 / 3,
        };
        let bottom_help_area = Rect {
            x: 0,
            y: area.height.saturating_sub(3),
            width: area.width,
            height: 3,
        };

        frame.render_widget(Clear, bottom_help_area);
        HelpPopup::get_self_help_msg().render(frame, bottom_help_area);

        frame.render_widget(Clear, show_area);
        self.render_list(frame, show_area);
    }

    fn handle_events(&self, app: &RootState, event: Event) -> color_eyre::eyre::Result<()> {
        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Esc => app.send_action(LayerAction::Pop),
                KeyCode::Char('j') => app.send_action(HelpPopupAction::Down),
                KeyCode::Char('k') => app.send_action(HelpPopupAction::Up),
                KeyCode::Char('g') => app.send_action(HelpPopupAction::Start),
                KeyCode::Char('G') => app.send_action(HelpPopupAction::End),
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self, _app: &RootState, action: Action) {
        let Action::HelpPopup(action) = action else {
            return;
        };
        match action {
            HelpPopupAction::Up => {
                self.list_state.select_previous();
            }
            HelpPopupAction::Down => {
                self.list_state.select_next();
            }
            HelpPopupAction::Start => {
                self.list_state.select_first();
            }
            HelpPopupAction::End => {
                self.list_state.select_last();
            }
        }
    }

    fn get_name(&self) -> String {
        "Help".to_string()
    }

    fn is_popup(&self) -> bool {
        true
    }
}

impl HelpPopup {
    pub fn get_self_help_msg() -> HelpMsg {
        let help_msg = vec![
            HelpEntry::new('j', "Go Down"),
            HelpEntry::new('k', "Go Up"),
            HelpEntry::new('g', "Go to Top"),
            HelpEntry::new('G', "Go to Bottom"),
            HelpEntry::new(KeyCode::Esc, "Close help"),
        ];
        help_msg.into()
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(LIST_COLORS.selected_row_style_fg);

        let block = Block::new()
            .title(Line::raw("Help").centered())
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .padding(Padding::vertical(1));

        let items: Vec<ListItem> = self
            .help_msg
            .iter()
            .map(|entry| ListItem::from(Text::raw(format!("  {}  ", entry))))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(selected_row_style)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

struct ListColors {
    selected_row_style_fg: Color,
}

impl Default for ListColors {
    fn default() -> Self {
        Self {
            selected_row_style_fg: tailwind::INDIGO.c400,
        }
    }
}

lazy_static::lazy_static! {
    static ref LIST_COLORS: ListColors = ListColors::default();
}
