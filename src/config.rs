use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 8192,
            request_timeout: Duration::from_secs(60),
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.allowed_origins);

        Self {
            api_key: get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            api_base: get("GEMINI_API_BASE").unwrap_or(defaults.api_base),
            model: get("GOOGLE_MODEL").unwrap_or(defaults.model),
            temperature: parse_or(get("TEMPERATURE"), defaults.temperature),
            max_tokens: parse_or(get("MAX_TOKENS"), defaults.max_tokens),
            request_timeout: Duration::from_secs(parse_or(
                get("REQUEST_TIMEOUT"),
                defaults.request_timeout.as_secs(),
            )),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(get("PORT"), defaults.port),
            allowed_origins,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let s = settings_from(&[]);
        assert!(s.api_key.is_none());
        assert_eq!(s.model, DEFAULT_MODEL);
        assert_eq!(s.api_base, DEFAULT_API_BASE);
        assert_eq!(s.port, 8000);
        assert_eq!(s.request_timeout, Duration::from_secs(60));
        assert_eq!(s.allowed_origins, vec!["*"]);
    }

    #[test]
    fn reads_overrides_and_falls_back_on_garbage() {
        let s = settings_from(&[
            ("GEMINI_API_KEY", " secret "),
            ("PORT", "not-a-port"),
            ("MAX_TOKENS", "2048"),
            ("ALLOWED_ORIGINS", "http://localhost:5173, https://app.example"),
        ]);
        assert_eq!(s.api_key.as_deref(), Some("secret"));
        assert_eq!(s.port, 8000);
        assert_eq!(s.max_tokens, 2048);
        assert_eq!(
            s.allowed_origins,
            vec!["http://localhost:5173", "https://app.example"]
        );
    }

    #[test]
    fn google_key_wins_over_gemini_key() {
        let s = settings_from(&[("GOOGLE_API_KEY", "g"), ("GEMINI_API_KEY", "m")]);
        assert_eq!(s.api_key.as_deref(), Some("g"));
    }
}
