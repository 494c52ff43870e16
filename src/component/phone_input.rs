//! The composite phone input.
//!
//! Wires a text field, a country trigger and a flag glyph around the
//! [`phonenumber`] engine. The component never interprets phone numbers
//! itself: every keystroke is handed to the engine adapter, and whoever
//! embeds the component observes the result through
//! [`PhoneInputComp::parse_change_action`].

use color_eyre::Result;
use color_eyre::eyre::bail;
use phonenumber::country::Id;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    actions::{Action, CompAction},
    app::RootState,
    libs::{countries, flags, phone, phone::PhoneValue},
    tui::Event,
};

use super::{
    Component,
    input::{InputComp, InputCompCtrlKeys, InputMode},
};

/// Every option the composite input recognizes, spelled out. Checked once at
/// construction so a bad country code fails before the UI starts.
#[derive(Clone, Debug)]
pub(crate) struct PhoneInputConfig {
    pub default_country: Id,
    pub preferred_countries: Vec<Id>,
    pub placeholder: String,
    /// Keep the cursor's visual position across engine reformats. Off by
    /// default, matching the upstream tuning this replaces.
    pub smart_caret: bool,
    pub disabled: bool,
}

impl Default for PhoneInputConfig {
    fn default() -> Self {
        Self {
            default_country: Id::US,
            preferred_countries: Vec::new(),
            placeholder: "Enter phone number".to_string(),
            smart_caret: false,
            disabled: false,
        }
    }
}

impl PhoneInputConfig {
    /// Resolve the string-typed settings layer into checked country ids.
    pub fn from_settings(settings: &crate::config::PhoneConfig) -> Result<Self> {
        let Some(default_country) = countries::by_code(&settings.default_country) else {
            bail!("unknown default country {:?}", settings.default_country);
        };
        let preferred_countries = settings
            .preferred_countries
            .iter()
            .map(|code| {
                countries::by_code(code)
                    .ok_or_else(|| color_eyre::eyre::eyre!("unknown preferred country {code:?}"))
            })
            .collect::<Result<Vec<_>>>()?;
        let config = Self {
            default_country,
            preferred_countries,
            smart_caret: settings.smart_caret,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if countries::lookup(self.default_country).is_none() {
            bail!("default country {:?} is not in the country table", self.default_country);
        }
        for id in &self.preferred_countries {
            if countries::lookup(*id).is_none() {
                bail!("preferred country {id:?} is not in the country table");
            }
        }
        Ok(())
    }
}

/// The three visual slots of the composite input. The default adapter draws
/// them with the built-in widgets; tests or alternative skins can inject
/// their own.
pub(crate) trait SlotRenderer {
    fn render_flag(&self, frame: &mut Frame, area: Rect, country: Id);

    fn render_country_trigger(&self, frame: &mut Frame, area: Rect, country: Id, disabled: bool);

    fn render_text_field(&self, frame: &mut Frame, area: Rect, input: &InputComp, app: &RootState);
}

pub(crate) struct DefaultSlots;

impl SlotRenderer for DefaultSlots {
    fn render_flag(&self, frame: &mut Frame, area: Rect, country: Id) {
        frame.render_widget(Paragraph::new(flags::flag_or_placeholder(country)), area);
    }

    fn render_country_trigger(&self, frame: &mut Frame, area: Rect, country: Id, disabled: bool) {
        let style = if disabled {
            Style::default().dark_gray()
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::horizontal([Constraint::Length(3), Constraint::Min(0)]).split(inner);
        self.render_flag(frame, chunks[0], country);

        // no chevron on a trigger that cannot be activated
        let chevron = if disabled { " " } else { "⇅" };
        frame.render_widget(
            Paragraph::new(Line::from(format!("{} {}", country.as_ref(), chevron))),
            chunks[1],
        );
    }

    fn render_text_field(&self, frame: &mut Frame, area: Rect, input: &InputComp, app: &RootState) {
        input.draw(frame, &area, app);
    }
}

#[derive(Clone, Debug)]
pub(crate) enum PhoneInputAction {
    SetCountry(Id),
    /// The typed change surface. Carries the normalized value; never an
    /// absent one.
    Changed(PhoneValue),
}

pub(crate) struct PhoneInputComp {
    id: u64,
    country: Id,
    input: InputComp,
    config: PhoneInputConfig,
    slots: Box<dyn SlotRenderer>,
}

impl PhoneInputComp {
    pub fn new(id: u64, input_id: u64, config: PhoneInputConfig) -> Result<Self> {
        Self::with_slots(id, input_id, config, Box::new(DefaultSlots))
    }

    pub fn with_slots(
        id: u64,
        input_id: u64,
        config: PhoneInputConfig,
        slots: Box<dyn SlotRenderer>,
    ) -> Result<Self> {
        config.validate()?;
        let input = InputComp::new(
            input_id,
            None::<String>,
            "Phone number",
            InputCompCtrlKeys::default(),
        )
        .set_auto_submit(true)
        .set_placeholder(config.placeholder.clone());
        Ok(Self {
            id,
            country: config.default_country,
            input,
            config,
            slots,
        })
    }

    pub fn country(&self) -> Id {
        self.country
    }

    pub fn disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn raw_value(&self) -> &str {
        self.input.value()
    }

    pub fn is_valid(&self) -> bool {
        phone::is_valid(self.country, self.input.value())
    }

    pub fn get_switch_mode_action(&self, mode: InputMode) -> Action {
        self.input.get_switch_mode_action(mode)
    }

    /// The typed `onChange`: the owner matches incoming actions with this to
    /// observe the normalized value.
    pub fn parse_change_action(&self, action: &Action) -> Option<PhoneValue> {
        match self.unwrap_action(action)? {
            PhoneInputAction::Changed(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_help_msg(&self, inputing: bool) -> crate::utils::help_msg::HelpMsg {
        self.input.get_help_msg(inputing)
    }

    #[cfg(test)]
    pub fn input_cursor(&self) -> usize {
        self.input.cursor()
    }

    fn get_action(&self, action: PhoneInputAction) -> Action {
        Action::Comp((CompAction::Phone(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<PhoneInputAction> {
        if let Action::Comp((comp_action, id)) = action {
            if *id != self.id {
                return None;
            }
            if let CompAction::Phone(action) = comp_action {
                return Some(action.clone());
            }
        }
        None
    }

    /// Runs on every edit. The engine may recognize a typed `+` calling code
    /// and move the selected country; the displayed text is then replaced by
    /// the engine's formatting and the normalized value is announced.
    fn on_raw_changed(&mut self, raw: &str, app: &RootState) {
        if let Some(detected) = phone::detect_country(raw) {
            if countries::lookup(detected).is_some() {
                self.country = detected;
            }
        }

        let formatted = phone::format_partial(self.country, raw);
        if formatted != raw {
            // Smart caret keeps the cursor behind the same dialed digit when
            // the engine reformats; punctuation shifts around it. Without it
            // the cursor snaps to the end.
            let cursor = if self.config.smart_caret {
                let digits_before = raw
                    .chars()
                    .take(self.input.cursor())
                    .filter(char::is_ascii_digit)
                    .count();
                Some(cursor_after_digits(&formatted, digits_before))
            } else {
                None
            };
            app.send_action(self.input.get_set_value_action(formatted, cursor));
        }

        app.send_action(self.get_action(PhoneInputAction::Changed(phone::normalize(
            self.country,
            raw,
        ))));
    }
}

/// Char position right after the `digits`-th digit of `formatted`, or the
/// end when there are fewer digits.
fn cursor_after_digits(formatted: &str, digits: usize) -> usize {
    if digits == 0 {
        return 0;
    }
    let mut seen = 0;
    for (idx, c) in formatted.chars().enumerate() {
        if c.is_ascii_digit() {
            seen += 1;
            if seen == digits {
                return idx + 1;
            }
        }
    }
    formatted.chars().count()
}

impl Component for PhoneInputComp {
    fn get_id(&self) -> u64 {
        self.id
    }

    fn handle_events(&self, event: &Event, app: &RootState) -> Result<()> {
        if self.config.disabled {
            return Ok(());
        }
        self.input.handle_events(event, app)
    }

    fn update(&mut self, action: &Action, app: &RootState) -> Result<()> {
        if let Some(raw) = self.input.parse_submit_action(action) {
            self.on_raw_changed(&raw, app);
        }

        if let Some(action) = self.unwrap_action(action) {
            match action {
                PhoneInputAction::SetCountry(id) => {
                    if countries::lookup(id).is_some() && id != self.country {
                        self.country = id;
                        let raw = self.input.value().to_string();
                        let formatted = phone::format_partial(self.country, &raw);
                        if formatted != raw {
                            app.send_action(self.input.get_set_value_action(formatted, None));
                        }
                        app.send_action(self.get_action(PhoneInputAction::Changed(
                            phone::normalize(self.country, &raw),
                        )));
                    }
                }
                PhoneInputAction::Changed(_) => {}
            }
        }

        self.input.update(action, app)
    }

    fn draw(&self, frame: &mut Frame, area: &Rect, app: &RootState) {
        let chunks = Layout::horizontal([Constraint::Length(11), Constraint::Min(10)]).split(*area);
        self.slots
            .render_country_trigger(frame, chunks[0], self.country, self.config.disabled);
        self.slots.render_text_field(frame, chunks[1], &self.input, app);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::{
        config::PhoneConfig,
        page::Page,
        utils::key_events::test_utils::{get_char_evt, get_key_evt},
    };

    use super::*;

    struct TestPhonePage {
        observed: Vec<PhoneValue>,
        phone: PhoneInputComp,
    }

    impl TestPhonePage {
        fn new(config: PhoneInputConfig) -> Self {
            Self {
                observed: Vec::new(),
                phone: PhoneInputComp::new(1, 2, config).unwrap(),
            }
        }
    }

    impl Page for TestPhonePage {
        fn render(&mut self, frame: &mut Frame, app: &RootState) {
            self.phone.draw(frame, &frame.area(), app);
        }

        fn handle_events(&self, app: &RootState, event: Event) -> Result<()> {
            self.phone.handle_events(&event, app)
        }

        fn update(&mut self, app: &RootState, action: Action) {
            if let Some(value) = self.phone.parse_change_action(&action) {
                self.observed.push(value);
            }
            self.phone.update(&action, app).unwrap();
        }

        fn get_name(&self) -> String {
            "Test Phone Page".into()
        }

        fn init(&mut self, app: &RootState) {
            app.send_action(self.phone.get_switch_mode_action(InputMode::Focused));
        }
    }

    fn get_test_page(config: PhoneInputConfig) -> (TestPhonePage, RootState) {
        let mut app = RootState::new_test();
        let mut page = TestPhonePage::new(config);
        page.init(&app);
        while let Ok(action) = app.try_recv() {
            app.update(&action).unwrap();
            page.update(&app, action);
        }
        (page, app)
    }

    fn type_str(app: &mut RootState, page: &mut TestPhonePage, s: &str) {
        for c in s.chars() {
            app.handle_event_and_update(page, get_char_evt(c));
        }
    }

    #[test]
    fn typing_produces_normalized_values() {
        let (mut page, mut app) = get_test_page(PhoneInputConfig::default());

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert!(app.input_mode());

        type_str(&mut app, &mut page, "2024561414");

        let last = page.observed.last().unwrap();
        assert_eq!(last, &PhoneValue::Value("+12024561414".to_string()));
        assert!(page.phone.is_valid());
        assert_eq!(page.phone.raw_value(), "(202) 456-1414");
    }

    #[test]
    fn clearing_input_observes_empty_not_absent() {
        let (mut page, mut app) = get_test_page(PhoneInputConfig::default());

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        type_str(&mut app, &mut page, "20");
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Backspace));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Backspace));

        let last = page.observed.last().unwrap();
        assert_eq!(last, &PhoneValue::Empty);
        assert_eq!(last.as_str(), "");
    }

    #[test]
    fn escape_resets_to_empty() {
        let (mut page, mut app) = get_test_page(PhoneInputConfig::default());

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        type_str(&mut app, &mut page, "202");
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Esc));

        assert_eq!(page.observed.last().unwrap(), &PhoneValue::Empty);
        assert_eq!(page.phone.raw_value(), "");
    }

    #[test]
    fn set_country_reformats_and_announces() {
        let (mut page, mut app) = get_test_page(PhoneInputConfig::default());
        assert_eq!(page.phone.country(), Id::US);

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        type_str(&mut app, &mut page, "2079460958");

        app.send_action(Action::Comp((
            CompAction::Phone(PhoneInputAction::SetCountry(Id::GB)),
            1,
        )));
        while let Ok(action) = app.try_recv() {
            app.update(&action).unwrap();
            page.update(&app, action);
        }

        assert_eq!(page.phone.country(), Id::GB);
        let last = page.observed.last().unwrap();
        assert_eq!(last, &PhoneValue::Value("+442079460958".to_string()));
    }

    #[test]
    fn typed_calling_code_moves_country() {
        let (mut page, mut app) = get_test_page(PhoneInputConfig::default());

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        type_str(&mut app, &mut page, "+442079460958");

        assert_eq!(page.phone.country(), Id::GB);
    }

    #[test]
    fn set_country_outside_table_is_ignored() {
        let (mut page, mut app) = get_test_page(PhoneInputConfig::default());

        app.send_action(Action::Comp((
            CompAction::Phone(PhoneInputAction::SetCountry(Id::MC)),
            1,
        )));
        while let Ok(action) = app.try_recv() {
            app.update(&action).unwrap();
            page.update(&app, action);
        }

        assert_eq!(page.phone.country(), Id::US);
    }

    #[test]
    fn disabled_input_ignores_events() {
        let config = PhoneInputConfig {
            disabled: true,
            ..Default::default()
        };
        let (mut page, mut app) = get_test_page(config);

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert!(!app.input_mode());
        assert!(page.observed.is_empty());
    }

    #[test]
    fn settings_resolution_rejects_unknown_codes() {
        let settings = PhoneConfig {
            default_country: "XX".to_string(),
            preferred_countries: vec![],
            smart_caret: false,
        };
        assert!(PhoneInputConfig::from_settings(&settings).is_err());

        let settings = PhoneConfig {
            default_country: "US".to_string(),
            preferred_countries: vec!["GB".to_string(), "nope".to_string()],
            smart_caret: false,
        };
        assert!(PhoneInputConfig::from_settings(&settings).is_err());

        let settings = PhoneConfig {
            default_country: "gb".to_string(),
            preferred_countries: vec!["US".to_string()],
            smart_caret: true,
        };
        let config = PhoneInputConfig::from_settings(&settings).unwrap();
        assert_eq!(config.default_country, Id::GB);
        assert_eq!(config.preferred_countries, vec![Id::US]);
        assert!(config.smart_caret);
    }

    // Edit the middle of a formatted number: delete the sixth digit. The
    // engine reformats the leftover nine digits to a bare digit string.
    fn delete_sixth_digit(app: &mut RootState, page: &mut TestPhonePage) {
        app.handle_event_and_update(page, get_key_evt(KeyCode::Enter));
        type_str(app, page, "2024561414");
        assert_eq!(page.phone.raw_value(), "(202) 456-1414");

        for _ in 0..5 {
            app.handle_event_and_update(page, get_key_evt(KeyCode::Left));
        }
        app.handle_event_and_update(page, get_key_evt(KeyCode::Backspace));
        assert_eq!(page.phone.raw_value(), "202451414");
    }

    #[test]
    fn caret_snaps_to_end_without_smart_caret() {
        let (mut page, mut app) = get_test_page(PhoneInputConfig::default());
        delete_sixth_digit(&mut app, &mut page);

        assert_eq!(page.phone.input_cursor(), "202451414".chars().count());
    }

    #[test]
    fn smart_caret_keeps_cursor_behind_same_digit() {
        let config = PhoneInputConfig {
            smart_caret: true,
            ..Default::default()
        };
        let (mut page, mut app) = get_test_page(config);
        delete_sixth_digit(&mut app, &mut page);

        // five digits were left of the cursor, so it lands after "20245"
        assert_eq!(page.phone.input_cursor(), 5);
    }

    #[test]
    fn injected_slots_receive_render_calls() {
        use std::{cell::RefCell, rc::Rc};

        use ratatui::{Terminal, backend::TestBackend};

        struct RecordingSlots(Rc<RefCell<Vec<&'static str>>>);

        impl SlotRenderer for RecordingSlots {
            fn render_flag(&self, _frame: &mut Frame, _area: Rect, _country: Id) {
                self.0.borrow_mut().push("flag");
            }

            fn render_country_trigger(
                &self,
                _frame: &mut Frame,
                _area: Rect,
                _country: Id,
                _disabled: bool,
            ) {
                self.0.borrow_mut().push("trigger");
            }

            fn render_text_field(
                &self,
                _frame: &mut Frame,
                _area: Rect,
                _input: &InputComp,
                _app: &RootState,
            ) {
                self.0.borrow_mut().push("text");
            }
        }

        let calls = Rc::new(RefCell::new(Vec::new()));
        let phone = PhoneInputComp::with_slots(
            1,
            2,
            PhoneInputConfig::default(),
            Box::new(RecordingSlots(calls.clone())),
        )
        .unwrap();

        let app = RootState::new_test();
        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        terminal
            .draw(|f| phone.draw(f, &f.area(), &app))
            .unwrap();

        assert_eq!(calls.borrow().as_slice(), &["trigger", "text"]);
    }

    #[test]
    fn default_flag_slot_keeps_footprint_when_flag_is_missing() {
        use ratatui::{Terminal, backend::TestBackend, layout::Rect as R};

        let mut terminal = Terminal::new(TestBackend::new(10, 1)).unwrap();
        let area = R::new(0, 0, 3, 1);

        terminal
            .draw(|f| DefaultSlots.render_flag(f, area, Id::US))
            .unwrap();
        let with_flag: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(with_flag.contains("🇺🇸"));

        // Monaco is not in the flag table; the slot renders blank cells of
        // the same footprint and must not panic
        terminal
            .draw(|f| DefaultSlots.render_flag(f, area, Id::MC))
            .unwrap();
        let without_flag: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(!without_flag.contains("🇺🇸"));
        assert!(without_flag.chars().all(|c| c == ' '));
    }

    #[test]
    fn validate_rejects_countries_outside_table() {
        let config = PhoneInputConfig {
            default_country: Id::MC,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PhoneInputConfig {
            preferred_countries: vec![Id::MC],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
