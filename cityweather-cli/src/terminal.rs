use std::io::{self, Write};

use cityweather_core::{
    Node, UiPort, View,
    display::LOADING_TEXT,
};

/// UI port that prints each view as a block of lines.
///
/// The city "input field" is a plain string the prompt loop fills in.
#[derive(Debug)]
pub struct TerminalUi<W> {
    out: W,
    input: String,
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            input: String::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    fn draw(&mut self, view: &View) -> io::Result<()> {
        if view.loading {
            writeln!(self.out, "{LOADING_TEXT}")?;
        }

        for node in &view.nodes {
            match node {
                Node::Heading(text) => writeln!(self.out, "\n{text}")?,
                Node::Text(text) => writeln!(self.out, "  {text}")?,
                Node::Image { src, alt } => writeln!(self.out, "  🖼  {alt}: {src}")?,
                Node::ErrorText(text) => writeln!(self.out, "[error] {text}")?,
            }
        }

        self.out.flush()
    }
}

impl<W: Write> UiPort for TerminalUi<W> {
    fn render(&mut self, view: &View) {
        if let Err(err) = self.draw(view) {
            tracing::warn!(error = %err, "Failed to write to terminal");
        }
    }

    fn read_input(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(view: &View) -> String {
        let mut ui = TerminalUi::new(Vec::new());
        ui.render(view);
        String::from_utf8(ui.out).unwrap()
    }

    #[test]
    fn loading_view_prints_indicator() {
        let view = View {
            loading: true,
            nodes: Vec::new(),
        };
        assert_eq!(printed(&view), "Loading...\n");
    }

    #[test]
    fn empty_view_prints_nothing() {
        assert_eq!(printed(&View::default()), "");
    }

    #[test]
    fn result_view_prints_every_node() {
        let view = View {
            loading: false,
            nodes: vec![
                Node::Heading("Paris".into()),
                Node::Text("🌡 Temperature: 18.5°C".into()),
                Node::Image {
                    src: "https://openweathermap.org/img/wn/10d@2x.png".into(),
                    alt: "light rain".into(),
                },
            ],
        };

        let out = printed(&view);
        assert!(out.starts_with("\nParis\n"));
        assert!(out.contains("  🌡 Temperature: 18.5°C\n"));
        assert!(out.contains("light rain: https://openweathermap.org/img/wn/10d@2x.png"));
    }

    #[test]
    fn error_view_is_marked() {
        let view = View {
            loading: false,
            nodes: vec![Node::ErrorText("❌ City not found".into())],
        };
        assert_eq!(printed(&view), "[error] ❌ City not found\n");
    }

    #[test]
    fn input_can_be_read_and_cleared() {
        let mut ui = TerminalUi::new(io::sink()).with_input("Paris");
        assert_eq!(ui.read_input(), "Paris");

        ui.clear_input();
        assert_eq!(ui.input(), "");
    }
}
