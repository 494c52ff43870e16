use phonenumber::country::Id;

use crate::{
    component::{input::InputAction, phone_input::PhoneInputAction},
    page::{
        country_select::CountrySelectAction, help_popup::HelpPopupAction,
        phone_form::PhoneFormAction,
    },
    utils::help_msg::HelpMsg,
};

#[derive(Clone, Debug)]
pub enum Action {
    Tick,
    Render,
    Quit,
    SwitchInputMode(bool),

    Layer(LayerAction),

    PhoneForm(PhoneFormAction),
    CountrySelect(CountrySelectAction),
    HelpPopup(HelpPopupAction),

    Comp((CompAction, u64)),

    #[cfg(test)]
    TestPage(crate::component::input::test::TestInputPageAction),
}

/// Page-stack management. Popups (country selector, help) are pushed on top
/// of their parent page and popped on selection or Esc.
#[derive(Clone, Debug)]
pub enum LayerAction {
    Push(NaviTarget),
    Pop,
    Replace(NaviTarget),
}

#[derive(Clone, Debug)]
pub enum NaviTarget {
    Home,
    PhoneForm,
    CountrySelect { selected: Id, reply: u64 },
    Help(HelpMsg),
}

#[derive(Clone, Debug)]
pub enum CompAction {
    Input(InputAction),
    Phone(PhoneInputAction),
}

impl From<LayerAction> for Action {
    fn from(value: LayerAction) -> Self {
        Action::Layer(value)
    }
}
