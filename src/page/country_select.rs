//! The country selector popup.
//!
//! Opened from the phone entry page, it shows the candidate list with a
//! filter line on top. Picking a row reports the country back to the
//! owning phone input and closes the popup.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize, palette::tailwind},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, HighlightSpacing, List, ListItem, Padding, Paragraph,
    },
};
use tui_input::{Input, backend::crossterm::EventHandler};
use unicode_width::UnicodeWidthStr;

use phonenumber::country::Id;

use crate::{
    actions::{Action, CompAction, LayerAction},
    app::RootState,
    component::phone_input::PhoneInputAction,
    libs::{countries, countries::CountryListEntry, flags},
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
    utils::key_events::KeyEvent,
};

use super::Page;

const EMPTY_TEXT: &str = "No country found.";

pub(crate) struct CountrySelect {
    selected: Id,
    /// Component id of the phone input that gets the picked country.
    reply: u64,
    entries: Vec<CountryListEntry>,

    filter: Input,
    list_state: ratatui::widgets::ListState,
}

impl CountrySelect {
    pub fn new(selected: Id, reply: u64, preferred: &[Id]) -> Self {
        Self::with_entries(selected, reply, countries::country_list(preferred))
    }

    pub fn with_entries(selected: Id, reply: u64, entries: Vec<CountryListEntry>) -> Self {
        let mut list_state = ratatui::widgets::ListState::default();
        list_state.select_first();
        Self {
            selected,
            reply,
            entries,
            filter: Input::default(),
            list_state,
        }
    }

    /// Divider entries are dropped here, never rendered. The filter matches
    /// names case-insensitively and calling codes by prefix.
    fn filtered_entries(&self) -> Vec<&CountryListEntry> {
        let needle = self.filter.value().trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.id.is_some())
            .filter(|e| {
                if needle.is_empty() {
                    return true;
                }
                if e.label.to_lowercase().contains(&needle) {
                    return true;
                }
                let digits = needle.trim_start_matches('+');
                !digits.is_empty()
                    && digits.chars().all(|c| c.is_ascii_digit())
                    && e.id
                        .and_then(countries::calling_code)
                        .is_some_and(|code| code.to_string().starts_with(digits))
            })
            .collect()
    }

    fn render_row(&self, entry: &CountryListEntry, name_width: usize) -> ListItem<'static> {
        // entries reaching here always carry an id
        let id = entry.id.expect("divider entry in rendered rows");
        let flag = flags::flag_or_placeholder(id);
        let code = countries::calling_code(id)
            .map(|code| format!("+{code}"))
            .unwrap_or_default();
        // The checkmark cell is always present so row width never changes
        // with selection; non-selected rows just leave it blank.
        let check = if id == self.selected { "✓" } else { " " };

        let mut name = entry.label.clone();
        while name.width() > name_width {
            name.pop();
        }
        let pad = name_width.saturating_sub(name.width());

        ListItem::from(Line::from(vec![
            Span::raw(format!(" {flag} ")),
            Span::raw(name),
            Span::raw(" ".repeat(pad)),
            Span::styled(format!("{code:>5} "), Style::default().dark_gray()),
            Span::raw(check),
            Span::raw(" "),
        ]))
    }
}

#[derive(Clone, Debug)]
pub(crate) enum CountrySelectAction {
    Up,
    Down,
    Start,
    End,
    FilterKey(KeyEvent),
    FilterPaste(String),
    Select,
}

impl From<CountrySelectAction> for Action {
    fn from(value: CountrySelectAction) -> Self {
        Action::CountrySelect(value)
    }
}

impl Page for CountrySelect {
    fn render(&mut self, frame: &mut Frame, _app: &RootState) {
        let area = frame.area();
        let width = 48.min(area.width.saturating_sub(4)).max(20);
        let height = (area.height * 2 / 3).max(9);
        let show_area = Rect {
            x: area.width.saturating_sub(width) / 2,
            y: area.height.saturating_sub(height) / 3,
            width,
            height,
        };
        frame.render_widget(Clear, show_area);

        let block = Block::new()
            .title(Line::raw("Select country").centered())
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1));
        let inner = block.inner(show_area);
        frame.render_widget(block, show_area);

        let chunks =
            Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(inner);

        let filter_widget = if self.filter.value().is_empty() {
            Paragraph::new("Search country...").style(Style::default().dark_gray())
        } else {
            Paragraph::new(self.filter.value())
        }
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(filter_widget, chunks[0]);

        let rows = self.filtered_entries();
        if rows.is_empty() {
            frame.render_widget(Paragraph::new(EMPTY_TEXT), chunks[1]);
            return;
        }

        // flag(3) + spacing + code column(6) + check(2) booked per row
        let name_width = (chunks[1].width as usize).saturating_sub(13);
        let items: Vec<ListItem> = rows
            .iter()
            .map(|entry| self.render_row(entry, name_width))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::REVERSED)
                    .fg(tailwind::INDIGO.c400),
            )
            .highlight_spacing(HighlightSpacing::Always);
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    fn handle_events(&self, app: &RootState, event: Event) -> color_eyre::eyre::Result<()> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => app.send_action(LayerAction::Pop),
                KeyCode::Up => app.send_action(CountrySelectAction::Up),
                KeyCode::Down => app.send_action(CountrySelectAction::Down),
                KeyCode::Home => app.send_action(CountrySelectAction::Start),
                KeyCode::End => app.send_action(CountrySelectAction::End),
                KeyCode::Enter => app.send_action(CountrySelectAction::Select),
                _ => app.send_action(CountrySelectAction::FilterKey(key.into())),
            },
            Event::Paste(s) => app.send_action(CountrySelectAction::FilterPaste(s)),
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self, app: &RootState, action: Action) {
        let Action::CountrySelect(action) = action else {
            return;
        };
        match action {
            CountrySelectAction::Up => self.list_state.select_previous(),
            CountrySelectAction::Down => self.list_state.select_next(),
            CountrySelectAction::Start => self.list_state.select_first(),
            CountrySelectAction::End => self.list_state.select_last(),
            CountrySelectAction::FilterKey(key) => {
                self.filter
                    .handle_event(&crossterm::event::Event::Key(key.into()));
                self.reset_selection();
            }
            CountrySelectAction::FilterPaste(s) => {
                s.chars().for_each(|c| {
                    self.filter.handle(tui_input::InputRequest::InsertChar(c));
                });
                self.reset_selection();
            }
            CountrySelectAction::Select => {
                let rows = self.filtered_entries();
                let Some(entry) = self.list_state.selected().and_then(|i| rows.get(i)) else {
                    return;
                };
                let Some(id) = entry.id else {
                    return;
                };
                app.send_action(Action::Comp((
                    CompAction::Phone(PhoneInputAction::SetCountry(id)),
                    self.reply,
                )));
                app.send_action(LayerAction::Pop);
            }
        }
    }

    fn get_name(&self) -> String {
        "Country Select".to_string()
    }

    fn get_help_msg(&self, _app: &RootState) -> HelpMsg {
        vec![
            HelpEntry::new_plain("type", "Filter countries"),
            HelpEntry::new(KeyCode::Up, "Previous"),
            HelpEntry::new(KeyCode::Down, "Next"),
            HelpEntry::new(KeyCode::Enter, "Pick country"),
            HelpEntry::new(KeyCode::Esc, "Close"),
        ]
        .into()
    }

    fn is_popup(&self) -> bool {
        true
    }
}

impl CountrySelect {
    fn reset_selection(&mut self) {
        if self.filtered_entries().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select_first();
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use crate::utils::key_events::test_utils::{get_char_evt, get_key_evt};

    use super::*;

    fn entry(id: Id, label: &str) -> CountryListEntry {
        CountryListEntry {
            label: label.to_string(),
            id: Some(id),
        }
    }

    fn divider() -> CountryListEntry {
        CountryListEntry {
            label: String::new(),
            id: None,
        }
    }

    fn get_test_objs(entries: Vec<CountryListEntry>) -> (RootState, CountrySelect) {
        let mut app = RootState::new_test();
        let mut page = CountrySelect::with_entries(Id::GB, 7, entries);
        page.init(&app);
        while let Ok(action) = app.try_recv() {
            page.update(&app, action);
        }
        (app, page)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn dividers_are_not_selectable_rows() {
        let (_, page) = get_test_objs(vec![
            entry(Id::US, "United States"),
            divider(),
            entry(Id::GB, "United Kingdom"),
        ]);
        let rows = page.filtered_entries();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|e| e.id.is_some()));
    }

    #[test]
    fn selecting_a_row_reports_the_country_and_closes() {
        let (mut app, mut page) = get_test_objs(vec![
            entry(Id::US, "United States"),
            divider(),
            entry(Id::GB, "United Kingdom"),
        ]);

        // selected country is GB, first row is US
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));

        let reported: Vec<Action> = app
            .recorded()
            .iter()
            .filter(|a| !matches!(a, Action::CountrySelect(_)))
            .cloned()
            .collect();
        assert!(matches!(
            reported.first(),
            Some(Action::Comp((
                CompAction::Phone(PhoneInputAction::SetCountry(Id::US)),
                7
            )))
        ));
        assert!(matches!(reported.get(1), Some(Action::Layer(LayerAction::Pop))));
    }

    #[test]
    fn filter_narrows_and_enter_picks_match() {
        let (mut app, mut page) = get_test_objs(countries::country_list(&[]));

        for c in "kingdom".chars() {
            app.handle_event_and_update(&mut page, get_char_evt(c));
        }
        assert_eq!(page.filtered_entries().len(), 1);

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert!(matches!(
            app.recorded().last(),
            Some(Action::Layer(LayerAction::Pop))
        ));
        assert!(app.recorded().iter().any(|a| matches!(
            a,
            Action::Comp((CompAction::Phone(PhoneInputAction::SetCountry(Id::GB)), 7))
        )));
    }

    #[test]
    fn filter_matches_calling_code_prefix() {
        let (mut app, mut page) = get_test_objs(vec![
            entry(Id::US, "United States"),
            entry(Id::GB, "United Kingdom"),
            entry(Id::FR, "France"),
        ]);

        for c in "+44".chars() {
            app.handle_event_and_update(&mut page, get_char_evt(c));
        }
        let rows = page.filtered_entries();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, Some(Id::GB));
    }

    #[test]
    fn no_match_renders_empty_text_and_zero_rows() {
        let (mut app, mut page) = get_test_objs(vec![
            entry(Id::US, "United States"),
            entry(Id::GB, "United Kingdom"),
            entry(Id::FR, "France"),
        ]);

        for c in "zzz".chars() {
            app.handle_event_and_update(&mut page, get_char_evt(c));
        }
        assert!(page.filtered_entries().is_empty());

        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        terminal.draw(|f| page.render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains(EMPTY_TEXT));
        assert!(!text.contains("United States"));
        assert!(!text.contains("France"));

        // Enter with nothing selected must not report anything
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert!(app.recorded().iter().all(|a| !matches!(a, Action::Comp(_))));
    }

    #[test]
    fn checkmark_only_on_selected_country_same_footprint() {
        let (app, mut page) = get_test_objs(vec![
            entry(Id::US, "United States"),
            entry(Id::GB, "United Kingdom"),
        ]);

        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        terminal.draw(|f| page.render(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut check_cells = Vec::new();
        for y in 0..25 {
            for x in 0..80 {
                if buffer.cell((x, y)).unwrap().symbol() == "✓" {
                    check_cells.push((x, y));
                }
            }
        }
        // exactly one checkmark, on the selected (GB) row
        assert_eq!(check_cells.len(), 1);

        let (x, y) = check_cells[0];
        let row: String = (0..80)
            .map(|col| buffer.cell((col, y)).unwrap().symbol().to_string())
            .collect();
        assert!(row.contains("United Kingdom"));

        // the US row keeps a blank cell in the same column
        let us_row = (0..25)
            .find(|row_y| {
                let row: String = (0..80)
                    .map(|col| buffer.cell((col, *row_y)).unwrap().symbol().to_string())
                    .collect();
                row.contains("United States")
            })
            .unwrap();
        assert_eq!(buffer.cell((x, us_row)).unwrap().symbol(), " ");
    }

    #[test]
    fn rows_show_flag_name_and_dialing_prefix() {
        let (app, mut page) = get_test_objs(vec![entry(Id::US, "United States")]);

        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        terminal.draw(|f| page.render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("🇺🇸"));
        assert!(text.contains("United States"));
        assert!(text.contains("+1"));
    }

    #[test]
    fn navigation_moves_selection() {
        let (mut app, mut page) = get_test_objs(vec![
            entry(Id::US, "United States"),
            entry(Id::GB, "United Kingdom"),
            entry(Id::FR, "France"),
        ]);
        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        assert_eq!(page.list_state.selected(), Some(0));

        // the list offset is clamped during rendering, so draw between steps
        // the way the app loop would
        let mut test_loop = |app: &mut RootState, page: &mut CountrySelect, key, expected| {
            app.handle_event_and_update(page, get_key_evt(key));
            terminal.draw(|f| page.render(f, app)).unwrap();
            assert_eq!(page.list_state.selected(), expected);
        };

        test_loop(&mut app, &mut page, KeyCode::Down, Some(1));
        test_loop(&mut app, &mut page, KeyCode::End, Some(2));
        test_loop(&mut app, &mut page, KeyCode::Up, Some(1));
        test_loop(&mut app, &mut page, KeyCode::Home, Some(0));
    }
}
