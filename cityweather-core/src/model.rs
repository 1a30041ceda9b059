use serde::{Deserialize, Serialize};

/// Default URL pattern for OpenWeather condition icons.
pub const DEFAULT_ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

/// Current weather for one city, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city_name: String,
    pub temperature_c: f64,
    pub description: String,
    pub icon_code: String,
}

impl WeatherResult {
    /// Image URL for the condition icon. The URL is never fetched here.
    pub fn icon_url(&self, template: &str) -> String {
        template.replace("{icon}", &self.icon_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> WeatherResult {
        WeatherResult {
            city_name: "Paris".into(),
            temperature_c: 18.5,
            description: "light rain".into(),
            icon_code: "10d".into(),
        }
    }

    #[test]
    fn icon_url_uses_default_template() {
        assert_eq!(
            paris().icon_url(DEFAULT_ICON_URL_TEMPLATE),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn icon_url_with_custom_template() {
        assert_eq!(paris().icon_url("http://icons.local/{icon}.svg"), "http://icons.local/10d.svg");
    }
}
