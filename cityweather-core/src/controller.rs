//! Wires user triggers to the client, the display and the last-city store.
//!
//! Every operation takes `&mut self`, so a second lookup cannot begin while
//! one is awaiting the provider. Nothing here returns an error: failures end
//! up as a displayed error or, for the startup restore, in the log only.

use tracing::{debug, info, warn};

use crate::{
    client::WeatherClient,
    display::{Display, UiPort},
    messages::{self, MessagePolicy},
    store::LastCityStore,
};

/// Key pressed while the city input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
}

/// Whether the host should suppress the key's default effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    PreventDefault,
    PassThrough,
}

#[derive(Debug)]
pub struct Controller<U, S> {
    client: Box<dyn WeatherClient>,
    display: Display<U>,
    store: S,
    policy: MessagePolicy,
}

impl<U: UiPort, S: LastCityStore> Controller<U, S> {
    pub fn new(client: Box<dyn WeatherClient>, display: Display<U>, store: S) -> Self {
        Self {
            client,
            display,
            store,
            policy: MessagePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MessagePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn display(&self) -> &Display<U> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display<U> {
        &mut self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up the city currently in the input field.
    pub async fn submit(&mut self) {
        let city = self.display.ui().read_input().trim().to_string();

        if city.is_empty() {
            self.display.show_error(messages::EMPTY_INPUT);
            return;
        }

        self.display.show_loading();

        match self.client.fetch_weather(&city).await {
            Ok(result) => {
                info!(city = %city, "Lookup succeeded");
                self.display.show_result(result);
                self.display.ui_mut().clear_input();

                if let Err(err) = self.store.set(&city) {
                    warn!(city = %city, error = ?err, "Failed to remember last city");
                }
            }
            Err(err) => {
                warn!(city = %city, error = ?err, "Lookup failed");
                let message = self.policy.message_for(&err);
                self.display.show_error(message);
            }
        }

        self.display.clear_loading();
    }

    /// Show the last remembered city, if any. Runs once at startup and never
    /// shows loading or errors.
    pub async fn restore(&mut self) {
        let city = match self.store.get() {
            Ok(Some(city)) => city,
            Ok(None) => {
                debug!("No last city to restore");
                return;
            }
            Err(err) => {
                warn!(error = ?err, "Failed to read last city");
                return;
            }
        };

        match self.client.fetch_weather(&city).await {
            Ok(result) => {
                info!(city = %city, "Restored last city");
                self.display.show_result(result);
            }
            Err(err) => warn!(city = %city, error = ?err, "Restoring last city failed"),
        }
    }

    /// Enter behaves exactly like submit; other keys are left to the host.
    pub async fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => {
                self.submit().await;
                KeyOutcome::PreventDefault
            }
            Key::Escape | Key::Char(_) => KeyOutcome::PassThrough,
        }
    }
}
