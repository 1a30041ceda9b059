//! Display state machine and the UI port it renders through.
//!
//! The machine holds exactly one [`DisplayState`]. Every transition renders
//! a complete [`View`], so whatever the port drew before is replaced.

use tracing::trace;

use crate::model::{DEFAULT_ICON_URL_TEMPLATE, WeatherResult};

pub const LOADING_TEXT: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Empty,
    Loading,
    Result(WeatherResult),
    Error(String),
}

/// One renderable element of the output region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading(String),
    Text(String),
    Image { src: String, alt: String },
    ErrorText(String),
}

/// Everything the surface should show after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub loading: bool,
    pub nodes: Vec<Node>,
}

/// Rendering surface plus the city input field.
pub trait UiPort {
    fn render(&mut self, view: &View);
    fn read_input(&self) -> String;
    fn clear_input(&mut self);
}

#[derive(Debug)]
pub struct Display<U> {
    state: DisplayState,
    icon_url_template: String,
    ui: U,
}

impl<U: UiPort> Display<U> {
    pub fn new(ui: U) -> Self {
        Self::with_icon_template(ui, DEFAULT_ICON_URL_TEMPLATE.to_string())
    }

    pub fn with_icon_template(ui: U, icon_url_template: String) -> Self {
        Self {
            state: DisplayState::Empty,
            icon_url_template,
            ui,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == DisplayState::Loading
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn show_loading(&mut self) {
        self.transition(DisplayState::Loading);
    }

    pub fn show_result(&mut self, result: WeatherResult) {
        self.transition(DisplayState::Result(result));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.transition(DisplayState::Error(message.into()));
    }

    /// Hide the loading indicator if it is still up.
    pub fn clear_loading(&mut self) {
        if self.is_loading() {
            self.transition(DisplayState::Empty);
        }
    }

    /// The view for the current state.
    pub fn view(&self) -> View {
        match &self.state {
            DisplayState::Empty => View::default(),
            DisplayState::Loading => View {
                loading: true,
                nodes: Vec::new(),
            },
            DisplayState::Result(result) => View {
                loading: false,
                nodes: vec![
                    Node::Heading(result.city_name.clone()),
                    Node::Text(format!("🌡 Temperature: {}°C", result.temperature_c)),
                    Node::Text(format!("📝 Description: {}", result.description)),
                    Node::Image {
                        src: result.icon_url(&self.icon_url_template),
                        alt: result.description.clone(),
                    },
                ],
            },
            DisplayState::Error(message) => View {
                loading: false,
                nodes: vec![Node::ErrorText(message.clone())],
            },
        }
    }

    fn transition(&mut self, next: DisplayState) {
        trace!(from = ?self.state, to = ?next, "Display transition");
        self.state = next;
        let view = self.view();
        self.ui.render(&view);
    }
}
