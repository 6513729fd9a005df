use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub log_events:   bool,
    pub log_interval: Duration,
    pub stats_json:   bool,
    pub log_filter:   String,
    pub verbose:      bool,
}

impl From<&crate::cli::Args> for Config {
    fn from(a: &crate::cli::Args) -> Self {
        Self {
            log_events:   a.log_events,
            log_interval: Duration::from_secs(a.log_interval),
            stats_json:   a.stats_json,
            log_filter:   a.log_filter.clone(),
            verbose:      a.verbose,
        }
    }
}
