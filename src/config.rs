use crate::error::ConfigError;

pub(crate) const MIN_STORIES: usize = 1;
pub(crate) const MAX_STORIES: usize = 500;
pub(crate) const DEFAULT_STORIES: usize = 5;

const DEFAULT_TOP_STORIES_URL: &str = "https://hacker-news.firebaseio.com/v0/topstories.json";
const DEFAULT_ITEM_URL_TEMPLATE: &str = "https://hacker-news.firebaseio.com/v0/item/{id}.json";
const DEFAULT_MAX_RESPONSE_SIZE: usize = 1024 * 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub(crate) const ID_PLACEHOLDER: &str = "{id}";

/// Settings for one run. Built once in `main` and handed to the pipeline.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) top_stories_url: String,
    pub(crate) item_url_template: String,
    pub(crate) max_response_size: usize,
    pub(crate) request_timeout: std::time::Duration,
    pub(crate) log_dir: Option<std::path::PathBuf>,

    pub(crate) num_stories: usize,
    pub(crate) verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_stories_url: DEFAULT_TOP_STORIES_URL.to_string(),
            item_url_template: DEFAULT_ITEM_URL_TEMPLATE.to_string(),
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            request_timeout: std::time::Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_dir: None,
            num_stories: DEFAULT_STORIES,
            verbose: false,
        }
    }
}

impl Config {
    /// Reads the environment, picking up a `.env` file if there is one.
    pub(crate) fn from_env(num_stories: usize, verbose: bool) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: ignoring malformed .env file: {e}");
            }
        }

        Self::from_lookup(num_stories, verbose, |key| std::env::var(key).ok())
    }

    fn from_lookup(
        num_stories: usize,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let item_url_template =
            lookup("HN_ITEM_URL_TEMPLATE").unwrap_or(defaults.item_url_template);
        if !item_url_template.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::MissingIdPlaceholder {
                key: "HN_ITEM_URL_TEMPLATE",
                value: item_url_template,
            });
        }

        let max_response_size = match lookup("HN_MAX_RESPONSE_SIZE") {
            Some(value) => positive("HN_MAX_RESPONSE_SIZE", &value)?,
            None => defaults.max_response_size,
        };

        let request_timeout = match lookup("HN_REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                std::time::Duration::from_secs(positive("HN_REQUEST_TIMEOUT_SECS", &value)? as u64)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            top_stories_url: lookup("HN_TOP_STORIES_URL").unwrap_or(defaults.top_stories_url),
            item_url_template,
            max_response_size,
            request_timeout,
            log_dir: lookup("HN_LOG_DIR")
                .filter(|dir| !dir.is_empty())
                .map(std::path::PathBuf::from),
            num_stories: validate_count(num_stories as i64)?,
            verbose,
        })
    }

    pub(crate) fn item_url(&self, id: i64) -> String {
        self.item_url_template.replace(ID_PLACEHOLDER, &id.to_string())
    }
}

fn positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::NotPositive {
            key,
            value: value.to_string(),
        }),
    }
}

pub(crate) fn validate_count(n: i64) -> Result<usize, ConfigError> {
    match usize::try_from(n) {
        Ok(n) if (MIN_STORIES..=MAX_STORIES).contains(&n) => Ok(n),
        _ => Err(ConfigError::CountOutOfRange {
            got: n.to_string(),
            min: MIN_STORIES,
            max: MAX_STORIES,
        }),
    }
}

/// Parser for the positional story count.
pub(crate) fn parse_count(arg: &str) -> Result<usize, ConfigError> {
    let trimmed = arg.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => validate_count(n),
        // Digits that overflow are still a number, just a very large one.
        Err(_) if is_integer_literal(trimmed) => Err(ConfigError::CountOutOfRange {
            got: trimmed.to_string(),
            min: MIN_STORIES,
            max: MAX_STORIES,
        }),
        Err(_) => Err(ConfigError::CountNotNumeric(arg.to_string())),
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_parse_count_bounds() {
        assert_eq!(parse_count("1").unwrap(), 1);
        assert_eq!(parse_count("500").unwrap(), 500);
        assert_eq!(parse_count(" 42 ").unwrap(), 42);

        for bad in ["0", "501", "-3", "99999999999999999999999"] {
            assert!(
                matches!(parse_count(bad), Err(ConfigError::CountOutOfRange { .. })),
                "{bad} should be out of range"
            );
        }

        for bad in ["abc", "", "5.0", "1e3"] {
            assert!(
                matches!(parse_count(bad), Err(ConfigError::CountNotNumeric(_))),
                "{bad} should not be numeric"
            );
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(5, true, env(&[])).unwrap();

        assert_eq!(config.top_stories_url, DEFAULT_TOP_STORIES_URL);
        assert_eq!(config.max_response_size, 1024 * 1024);
        assert_eq!(config.request_timeout, std::time::Duration::from_secs(30));
        assert!(config.log_dir.is_none());
        assert!(config.verbose);
        assert_eq!(
            config.item_url(8863),
            "https://hacker-news.firebaseio.com/v0/item/8863.json"
        );
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_lookup(
            3,
            false,
            env(&[
                ("HN_TOP_STORIES_URL", "http://localhost:9000/top.json"),
                ("HN_ITEM_URL_TEMPLATE", "http://localhost:9000/item/{id}"),
                ("HN_MAX_RESPONSE_SIZE", "2048"),
                ("HN_REQUEST_TIMEOUT_SECS", "5"),
                ("HN_LOG_DIR", "./log"),
            ]),
        )
        .unwrap();

        assert_eq!(config.top_stories_url, "http://localhost:9000/top.json");
        assert_eq!(config.item_url(12), "http://localhost:9000/item/12");
        assert_eq!(config.max_response_size, 2048);
        assert_eq!(config.request_timeout, std::time::Duration::from_secs(5));
        assert_eq!(config.log_dir, Some(std::path::PathBuf::from("./log")));
        assert_eq!(config.num_stories, 3);
    }

    #[test]
    fn test_invalid_environment_is_rejected() {
        let err = Config::from_lookup(
            5,
            false,
            env(&[("HN_ITEM_URL_TEMPLATE", "http://localhost/item.json")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingIdPlaceholder { .. }));

        let err =
            Config::from_lookup(5, false, env(&[("HN_MAX_RESPONSE_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { .. }));

        let err = Config::from_lookup(0, false, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::CountOutOfRange { .. }));
    }
}
