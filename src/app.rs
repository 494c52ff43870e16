use color_eyre::eyre::{Context, Result};
use crossterm::event::KeyCode::Char;

use crate::{
    actions::{Action, LayerAction, NaviTarget},
    component::phone_input::PhoneInputConfig,
    page::{
        Page, country_select::CountrySelect, help_popup::HelpPopup, home::Home,
        phone_form::PhoneForm,
    },
    tui,
    tui::Event,
};

pub struct RootState {
    pub should_quit: bool,
    action_tx: tokio::sync::mpsc::UnboundedSender<Action>,
    action_rx: tokio::sync::mpsc::UnboundedReceiver<Action>,
    input_mode: bool,

    pub phone_config: PhoneInputConfig,

    #[cfg(test)]
    recorded: Vec<Action>,
}

impl RootState {
    pub fn new(phone_config: PhoneInputConfig) -> Self {
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            should_quit: false,
            action_tx,
            action_rx,
            input_mode: false,
            phone_config,
            #[cfg(test)]
            recorded: Vec::new(),
        }
    }

    pub fn send_action<T: Into<Action>>(&self, action: T) {
        self.action_tx
            .send(action.into())
            .with_context(|| "Action Receiver is dropped or closed, which should not happen if app is still running.")
            .unwrap();
    }

    pub fn try_recv(&mut self) -> Result<Action, tokio::sync::mpsc::error::TryRecvError> {
        self.action_rx.try_recv()
    }

    pub fn input_mode(&self) -> bool {
        self.input_mode
    }

    /// The only place application-wide state changes.
    pub fn update(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwitchInputMode(mode) => self.input_mode = *mode,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
impl RootState {
    pub fn new_test() -> Self {
        Self::new(PhoneInputConfig::default())
    }

    /// Run one event through a page and drain the resulting actions, the way
    /// the app loop would.
    pub fn handle_event_and_update(&mut self, page: &mut dyn Page, event: Event) {
        page.handle_events(self, event).unwrap();
        while let Ok(action) = self.try_recv() {
            self.recorded.push(action.clone());
            self.update(&action).unwrap();
            page.update(self, action);
        }
    }

    /// Every action drained by [`Self::handle_event_and_update`], in order.
    pub fn recorded(&self) -> &[Action] {
        &self.recorded
    }
}

pub struct App {
    pub pages: Vec<Box<dyn Page>>,
    pub state: RootState,
    pub tui: tui::TuiEnum,
}

impl App {
    pub fn new(state: RootState, tui: tui::TuiEnum) -> Self {
        Self {
            pages: vec![Box::new(Home::default())],
            state,
            tui,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        loop {
            let e = self.tui.next().await?;

            self.handle_event(e)?;

            while let Ok(action) = self.state.try_recv() {
                self.perform_action(action)?;
            }

            // application exit
            if self.state.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Convert a [`tui::Event`] into actions.
    ///
    /// Application-wide keys (quit, page switching, help) are handled here
    /// for full-screen pages; popups and focused inputs get every key
    /// themselves.
    fn handle_event(&mut self, event: Event) -> Result<()> {
        let page = self.pages.last().expect("page stack is never empty");
        match event {
            Event::Tick => self.state.send_action(Action::Tick),
            Event::Init | Event::FocusGained | Event::FocusLost | Event::Mouse(_) => {}
            Event::Render | Event::Resize(_, _) => self.state.send_action(Action::Render),
            Event::Error => self.state.send_action(Action::Quit),
            Event::Key(key) if !self.state.input_mode() && !page.is_popup() => match key.code {
                Char('q') => self.state.send_action(Action::Quit),
                Char('H') if page.get_name() != "Home" => self
                    .state
                    .send_action(LayerAction::Replace(NaviTarget::Home)),
                Char('P') if page.get_name() != "Phone Entry" => self
                    .state
                    .send_action(LayerAction::Replace(NaviTarget::PhoneForm)),
                Char('?') => self
                    .state
                    .send_action(LayerAction::Push(NaviTarget::Help(
                        page.get_help_msg(&self.state),
                    ))),
                _ => page.handle_events(&self.state, event)?,
            },
            _ => page.handle_events(&self.state, event)?,
        }
        Ok(())
    }

    /// Perform an action (changing the state of the application).
    ///
    /// Application-wide actions are applied here; everything else is routed
    /// to every page on the stack, so a popup's reply still reaches the page
    /// below it after the popup closed itself.
    fn perform_action(&mut self, action: Action) -> Result<()> {
        self.state.update(&action)?;
        match action {
            Action::Quit | Action::Tick | Action::SwitchInputMode(_) => {}
            Action::Render => {
                let App { pages, state, tui } = self;
                tui.draw(|f| {
                    for page in pages.iter_mut() {
                        page.render(f, state);
                    }
                })?;
            }
            Action::Layer(layer) => match layer {
                LayerAction::Push(target) => {
                    if let Some(mut page) = self.build_page(target) {
                        page.init(&self.state);
                        self.pages.push(page);
                    }
                }
                LayerAction::Pop => {
                    if self.pages.len() > 1 {
                        self.pages.pop();
                    }
                }
                LayerAction::Replace(target) => {
                    if let Some(mut page) = self.build_page(target) {
                        page.init(&self.state);
                        *self.pages.last_mut().expect("page stack is never empty") = page;
                    }
                }
            },
            action => {
                for page in self.pages.iter_mut() {
                    page.update(&self.state, action.clone());
                }
            }
        }
        Ok(())
    }

    fn build_page(&self, target: NaviTarget) -> Option<Box<dyn Page>> {
        match target {
            NaviTarget::Home => Some(Box::new(Home::default())),
            NaviTarget::PhoneForm => Some(Box::new(PhoneForm::new(&self.state))),
            NaviTarget::CountrySelect { selected, reply } => Some(Box::new(CountrySelect::new(
                selected,
                reply,
                &self.state.phone_config.preferred_countries,
            ))),
            NaviTarget::Help(msg) => {
                HelpPopup::new(msg).map(|popup| Box::new(popup) as Box<dyn Page>)
            }
        }
    }
}
