use color_eyre::Result;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    actions::{Action, CompAction},
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
    utils::key_events::KeyEvent,
};

/// A single-line text field.
///
/// Set the focus state: send a [`InputComp::get_switch_mode_action()`] Action
///
/// Get value: parse an action with [`InputComp::parse_submit_action`]
#[derive(Clone, Debug)]
pub(crate) struct InputComp {
    id: u64,
    input: Input,
    mode: InputMode,

    title: String,
    placeholder: String,

    auto_submit: bool,
    control_keys: InputCompCtrlKeys,
}

#[derive(Default, Clone, Debug)]
pub(crate) enum InputMode {
    #[default]
    Idle,
    Focused,
}

#[derive(Clone, Debug)]
pub(crate) struct InputCompCtrlKeys {
    enter_keys: Vec<KeyEvent>,
    submit_keys: Vec<KeyEvent>,
    exit_keys: Vec<KeyEvent>,
}

impl Default for InputCompCtrlKeys {
    fn default() -> Self {
        Self {
            enter_keys: vec![KeyCode::Enter.into()],
            submit_keys: vec![KeyCode::Enter.into()],
            exit_keys: vec![KeyCode::Esc.into()],
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum InputAction {
    SwitchMode(InputMode),
    HandleKey(KeyEvent),
    HandlePaste(String),
    /// Replace the text from outside, optionally pinning the cursor. Emits no
    /// submit; used by owners that reformat what the user typed.
    SetValue(String, Option<usize>),
    Exit(),
    DirectExit(),
    SubmitExit(String),

    /// the event owner should pay attention to
    Submit(String),
}

impl InputComp {
    pub fn new<T: Into<String>, K: Into<String>>(
        id: u64,
        from: Option<T>,
        title: K,
        ctrl_keys: InputCompCtrlKeys,
    ) -> Self {
        Self {
            id,
            input: if let Some(from) = from {
                Input::from(from.into())
            } else {
                Input::default()
            },
            mode: InputMode::default(),
            title: title.into(),
            placeholder: String::new(),
            auto_submit: false,
            control_keys: ctrl_keys,
        }
    }

    pub fn get_switch_mode_action(&self, mode: InputMode) -> Action {
        Action::Comp((CompAction::Input(InputAction::SwitchMode(mode)), self.id))
    }

    pub fn get_set_value_action(&self, value: String, cursor: Option<usize>) -> Action {
        self.get_action(InputAction::SetValue(value, cursor))
    }

    pub fn parse_submit_action(&self, action: &Action) -> Option<String> {
        if let Some(input_action) = self.unwrap_action(action) {
            match input_action {
                InputAction::Submit(s) => Some(s),
                _ => None,
            }
        } else {
            None
        }
    }

    fn get_action(&self, action: InputAction) -> Action {
        Action::Comp((CompAction::Input(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<InputAction> {
        if let Action::Comp((comp_action, id)) = action {
            if *id != self.id {
                return None;
            };
            if let CompAction::Input(action) = comp_action {
                Some(action.clone())
            } else {
                None
            }
        } else {
            None
        }
    }

    pub fn set_auto_submit(self, b: bool) -> Self {
        Self {
            auto_submit: b,
            ..self
        }
    }

    pub fn set_placeholder<T: Into<String>>(self, placeholder: T) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..self
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn get_help_msg(&self, inputing: bool) -> HelpMsg {
        let mut msg = HelpMsg::default();
        if matches!(self.mode, InputMode::Focused) {
            if inputing {
                if self.auto_submit {
                    msg.push(HelpEntry::new(
                        self.control_keys.submit_keys[0].clone(),
                        "quit input",
                    ));
                } else {
                    msg.push(HelpEntry::new(
                        self.control_keys.exit_keys[0].clone(),
                        "quit input",
                    ));
                    msg.push(HelpEntry::new(
                        self.control_keys.submit_keys[0].clone(),
                        "submit input",
                    ));
                }
            } else {
                msg.push(HelpEntry::new(
                    self.control_keys.enter_keys[0].clone(),
                    "Start input",
                ));
            }
        }
        msg
    }
}

impl super::Component for InputComp {
    fn get_id(&self) -> u64 {
        self.id
    }

    fn handle_events(&self, event: &Event, app: &crate::app::RootState) -> Result<()> {
        match self.mode {
            InputMode::Idle => (),
            InputMode::Focused => {
                if app.input_mode() {
                    match event {
                        Event::Key(key) => {
                            if self.control_keys.submit_keys.contains(&(*key).into()) {
                                app.send_action(self.get_action(InputAction::SubmitExit(
                                    self.input.value().to_string(),
                                )))
                            } else if self.control_keys.exit_keys.contains(&(*key).into()) {
                                app.send_action(self.get_action(InputAction::DirectExit()))
                            } else {
                                app.send_action(
                                    self.get_action(InputAction::HandleKey((*key).into())),
                                )
                            }
                        }
                        Event::Paste(s) => {
                            app.send_action(self.get_action(InputAction::HandlePaste(s.clone())))
                        }
                        _ => (),
                    }
                } else if let Event::Key(key) = event {
                    if self.control_keys.enter_keys.contains(&(*key).into()) {
                        app.send_action(Action::SwitchInputMode(true))
                    }
                }
            }
        };
        Ok(())
    }

    fn update(&mut self, action: &Action, app: &crate::app::RootState) -> Result<()> {
        let Some(action) = self.unwrap_action(action) else {
            return Ok(());
        };

        match action {
            InputAction::SwitchMode(input_mode) => {
                self.mode = input_mode;
                Ok(())
            }
            InputAction::HandleKey(key_event) => {
                self.input
                    .handle_event(&crossterm::event::Event::Key(key_event.into()));
                if self.auto_submit {
                    app.send_action(
                        self.get_action(InputAction::Submit(self.input.value().to_string())),
                    )
                }
                Ok(())
            }
            InputAction::HandlePaste(string) => {
                string.chars().for_each(|c| {
                    self.input.handle(tui_input::InputRequest::InsertChar(c));
                });
                if self.auto_submit {
                    app.send_action(
                        self.get_action(InputAction::Submit(self.input.value().to_string())),
                    )
                }
                Ok(())
            }
            InputAction::SetValue(value, cursor) => {
                let cursor = cursor.unwrap_or(value.chars().count());
                self.input = Input::new(value).with_cursor(cursor);
                Ok(())
            }
            InputAction::SubmitExit(string) => {
                app.send_action(self.get_action(InputAction::Submit(string)));
                app.send_action(self.get_action(InputAction::Exit()));
                Ok(())
            }
            InputAction::DirectExit() => {
                self.input.reset();
                if self.auto_submit {
                    app.send_action(
                        self.get_action(InputAction::Submit(self.input.value().to_string())),
                    )
                }
                app.send_action(self.get_action(InputAction::Exit()));
                Ok(())
            }
            InputAction::Exit() => {
                app.send_action(Action::SwitchInputMode(false));
                Ok(())
            }
            InputAction::Submit(_) => Ok(()),
        }
    }

    fn draw(&self, frame: &mut Frame, area: &ratatui::prelude::Rect, app: &crate::app::RootState) {
        let width = area.width.max(3) - 3;
        let scroll = self.input.visual_scroll(width as usize);
        let style = match self.mode {
            InputMode::Focused => {
                if app.input_mode() {
                    Color::Yellow.into()
                } else {
                    Color::Cyan.into()
                }
            }
            InputMode::Idle => Style::default(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title.as_str());

        let input_widget = if self.input.value().is_empty() && !self.placeholder.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().dark_gray())
                .block(block)
        } else {
            Paragraph::new(self.input.value())
                .style(style)
                .scroll((0, scroll as u16))
                .block(block)
        };
        frame.render_widget(input_widget, *area);

        if matches!(self.mode, InputMode::Focused) && app.input_mode() {
            // Ratatui hides the cursor unless it's explicitly set. Position the cursor past the
            // end of the input text and one line down from the border to the input line
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            frame.set_cursor_position((area.x + x as u16, area.y + 1))
        }
    }
}
