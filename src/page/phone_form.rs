//! The phone entry page: embeds the composite phone input, shows the
//! normalized value the input announces, and keeps an in-session history of
//! saved numbers.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::{
    actions::{Action, LayerAction, NaviTarget},
    app::RootState,
    component::{Component, input::InputMode, phone_input::PhoneInputComp},
    libs::phone::PhoneValue,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::Page;

pub(crate) struct PhoneForm {
    phone: PhoneInputComp,

    value: PhoneValue,
    history: Vec<String>,
}

impl PhoneForm {
    pub fn new(app: &RootState) -> Self {
        let mut comp_ids = vec![rand::random::<u64>()];
        loop {
            let rand2 = rand::random::<u64>();
            if !comp_ids.contains(&rand2) {
                comp_ids.push(rand2);
                break;
            }
        }

        Self {
            // the config was resolved and validated at startup
            phone: PhoneInputComp::new(comp_ids[0], comp_ids[1], app.phone_config.clone())
                .unwrap(),
            value: PhoneValue::Empty,
            history: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum PhoneFormAction {
    OpenCountrySelect,
    Save,
}

impl From<PhoneFormAction> for Action {
    fn from(value: PhoneFormAction) -> Self {
        Action::PhoneForm(value)
    }
}

impl Page for PhoneForm {
    fn render(&mut self, frame: &mut Frame, app: &RootState) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .margin(1)
        .split(frame.area());

        self.phone.draw(frame, &chunks[0], app);

        let status = if self.value.is_empty() {
            Line::from(Span::raw(""))
        } else if self.phone.is_valid() {
            Line::from(vec![
                Span::raw(self.value.as_str().to_string()),
                Span::styled("  valid", Style::default().green()),
            ])
        } else {
            Line::from(vec![
                Span::raw(self.value.as_str().to_string()),
                Span::styled("  incomplete", Style::default().dark_gray()),
            ])
        };
        frame.render_widget(
            Paragraph::new(status).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Normalized"),
            ),
            chunks[1],
        );

        let items: Vec<ListItem> = self
            .history
            .iter()
            .rev()
            .map(|number| ListItem::from(Line::raw(number.clone())))
            .collect();
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Saved"),
            ),
            chunks[2],
        );

        self.get_help_msg(app).render(frame, chunks[3]);
    }

    fn handle_events(&self, app: &RootState, event: crate::tui::Event) -> color_eyre::eyre::Result<()> {
        if let crate::tui::Event::Key(key) = &event {
            if !app.input_mode() {
                match key.code {
                    KeyCode::Char('c') => {
                        if !self.phone.disabled() {
                            app.send_action(PhoneFormAction::OpenCountrySelect);
                        }
                    }
                    KeyCode::Char('s') => app.send_action(PhoneFormAction::Save),
                    KeyCode::Esc => {
                        app.send_action(LayerAction::Replace(NaviTarget::Home));
                    }
                    _ => (),
                }
            }
        }
        self.phone.handle_events(&event, app)?;
        Ok(())
    }

    fn update(&mut self, app: &RootState, action: Action) {
        if let Some(value) = self.phone.parse_change_action(&action) {
            self.value = value;
        }

        if let Action::PhoneForm(form_action) = &action {
            match form_action {
                PhoneFormAction::OpenCountrySelect => {
                    app.send_action(LayerAction::Push(NaviTarget::CountrySelect {
                        selected: self.phone.country(),
                        reply: self.phone.get_id(),
                    }));
                }
                PhoneFormAction::Save => {
                    if self.phone.is_valid() && !self.value.is_empty() {
                        self.history.push(self.value.as_str().to_string());
                    }
                }
            }
        }

        self.phone.update(&action, app).unwrap();
    }

    fn get_name(&self) -> String {
        "Phone Entry".to_string()
    }

    fn init(&mut self, app: &RootState) {
        app.send_action(self.phone.get_switch_mode_action(InputMode::Focused));
    }

    fn get_help_msg(&self, app: &RootState) -> HelpMsg {
        let mut msg: HelpMsg = if app.input_mode() {
            HelpMsg::default()
        } else {
            vec![
                HelpEntry::new('c', "Change country"),
                HelpEntry::new('s', "Save number"),
                HelpEntry::new(KeyCode::Esc, "Back"),
            ]
            .into()
        };
        msg.extend(&self.phone.get_help_msg(app.input_mode()));
        msg
    }
}

#[cfg(test)]
mod tests {
    use phonenumber::country::Id;
    use ratatui::{Terminal, backend::TestBackend};

    use crate::utils::key_events::test_utils::{get_char_evt, get_key_evt};

    use super::*;

    fn get_test_objs() -> (RootState, PhoneForm) {
        let mut app = RootState::new_test();
        let mut page = PhoneForm::new(&app);
        page.init(&app);
        while let Ok(action) = app.try_recv() {
            app.update(&action).unwrap();
            page.update(&app, action);
        }
        (app, page)
    }

    fn type_str(app: &mut RootState, page: &mut PhoneForm, s: &str) {
        for c in s.chars() {
            app.handle_event_and_update(page, get_char_evt(c));
        }
    }

    #[test]
    fn typing_updates_the_observed_value() {
        let (mut app, mut page) = get_test_objs();
        assert!(page.value.is_empty());

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert!(app.input_mode());
        type_str(&mut app, &mut page, "2024561414");

        assert_eq!(page.value, PhoneValue::Value("+12024561414".to_string()));
    }

    #[test]
    fn save_appends_valid_numbers_to_history() {
        let (mut app, mut page) = get_test_objs();

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        type_str(&mut app, &mut page, "2024561414");
        // leave input mode so 's' is a page key
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert!(!app.input_mode());

        app.handle_event_and_update(&mut page, get_char_evt('s'));
        assert_eq!(page.history, vec!["+12024561414".to_string()]);
    }

    #[test]
    fn save_ignores_incomplete_numbers() {
        let (mut app, mut page) = get_test_objs();

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        type_str(&mut app, &mut page, "202");
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));

        app.handle_event_and_update(&mut page, get_char_evt('s'));
        assert!(page.history.is_empty());
    }

    #[test]
    fn change_country_key_opens_the_selector() {
        let (mut app, mut page) = get_test_objs();

        app.handle_event_and_update(&mut page, get_char_evt('c'));

        let pushed = app.recorded().iter().find_map(|a| match a {
            Action::Layer(LayerAction::Push(NaviTarget::CountrySelect { selected, reply })) => {
                Some((*selected, *reply))
            }
            _ => None,
        });
        let (selected, reply) = pushed.expect("selector not opened");
        assert_eq!(selected, Id::US);
        assert_eq!(reply, page.phone.get_id());
    }

    #[test]
    fn render_shows_trigger_value_and_history() {
        let (mut app, mut page) = get_test_objs();

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        type_str(&mut app, &mut page, "2024561414");
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        app.handle_event_and_update(&mut page, get_char_evt('s'));

        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        terminal.draw(|f| page.render(f, &app)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("🇺🇸"));
        assert!(text.contains("US"));
        assert!(text.contains("(202) 456-1414"));
        assert!(text.contains("+12024561414"));
        assert!(text.contains("valid"));
    }
}
