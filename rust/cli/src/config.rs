use serde::{Deserialize, Serialize};
use stagedice_engine::outcome::TieRule;
use stagedice_engine::session::SessionConfig;
use std::fs;

use crate::validation::parse_tie_rule;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub sides: u32,
    pub stages: u32,
    pub seed: Option<u64>,
    pub tie_rule: TieRule,
    pub log_level: String,
    pub start_wealth: i64,
    pub ante: u32,
    pub bet_step: u32,
    pub trials: u32,
    pub starting_bias: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub sides: ValueSource,
    pub stages: ValueSource,
    pub seed: ValueSource,
    pub tie_rule: ValueSource,
    pub log_level: ValueSource,
    pub start_wealth: ValueSource,
    pub ante: ValueSource,
    pub bet_step: ValueSource,
    pub trials: ValueSource,
    pub starting_bias: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            sides: ValueSource::Default,
            stages: ValueSource::Default,
            seed: ValueSource::Default,
            tie_rule: ValueSource::Default,
            log_level: ValueSource::Default,
            start_wealth: ValueSource::Default,
            ante: ValueSource::Default,
            bet_step: ValueSource::Default,
            trials: ValueSource::Default,
            starting_bias: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            sides: session.sides,
            stages: session.stages,
            seed: None,
            tie_rule: TieRule::Loss,
            log_level: crate::logging::DEFAULT_FILTER.into(),
            start_wealth: session.start_wealth,
            ante: session.ante,
            bet_step: session.bet_step,
            trials: session.trials,
            starting_bias: session.starting_bias,
        }
    }
}

impl Config {
    /// Session parameters with `seed` as the dice seed.
    pub fn session(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            start_wealth: self.start_wealth,
            ante: self.ante,
            bet_step: self.bet_step,
            trials: self.trials,
            stages: self.stages,
            sides: self.sides,
            starting_bias: self.starting_bias,
            seed,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("STAGEDICE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f)?;
    }

    if let Some(v) = env_value("STAGEDICE_SIDES") {
        cfg.sides = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid sides".into()))?;
        sources.sides = ValueSource::Env;
    }
    if let Some(v) = env_value("STAGEDICE_STAGES") {
        cfg.stages = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid stages".into()))?;
        sources.stages = ValueSource::Env;
    }
    if let Some(v) = env_value("STAGEDICE_SEED") {
        cfg.seed = Some(
            v.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("STAGEDICE_TIE_RULE") {
        cfg.tie_rule = parse_tie_rule(&v).map_err(ConfigError::Invalid)?;
        sources.tie_rule = ValueSource::Env;
    }
    if let Some(v) = env_value("STAGEDICE_LOG_LEVEL") {
        cfg.log_level = v;
        sources.log_level = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    sides: Option<u32>,
    #[serde(default)]
    stages: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    tie_rule: Option<String>,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    start_wealth: Option<i64>,
    #[serde(default)]
    ante: Option<u32>,
    #[serde(default)]
    bet_step: Option<u32>,
    #[serde(default)]
    trials: Option<u32>,
    #[serde(default)]
    starting_bias: Option<i64>,
}

fn apply_file(
    cfg: &mut Config,
    sources: &mut ConfigSources,
    f: FileConfig,
) -> Result<(), ConfigError> {
    if let Some(v) = f.sides {
        cfg.sides = v;
        sources.sides = ValueSource::File;
    }
    if let Some(v) = f.stages {
        cfg.stages = v;
        sources.stages = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.tie_rule {
        cfg.tie_rule = parse_tie_rule(&v).map_err(ConfigError::Invalid)?;
        sources.tie_rule = ValueSource::File;
    }
    if let Some(v) = f.log_level {
        cfg.log_level = v;
        sources.log_level = ValueSource::File;
    }
    if let Some(v) = f.start_wealth {
        cfg.start_wealth = v;
        sources.start_wealth = ValueSource::File;
    }
    if let Some(v) = f.ante {
        cfg.ante = v;
        sources.ante = ValueSource::File;
    }
    if let Some(v) = f.bet_step {
        cfg.bet_step = v;
        sources.bet_step = ValueSource::File;
    }
    if let Some(v) = f.trials {
        cfg.trials = v;
        sources.trials = ValueSource::File;
    }
    if let Some(v) = f.starting_bias {
        cfg.starting_bias = v;
        sources.starting_bias = ValueSource::File;
    }
    Ok(())
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.sides < 2 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: sides must be >=2".into(),
        ));
    }
    if cfg.stages == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: stages must be >=1".into(),
        ));
    }
    if cfg.ante == 0 || cfg.bet_step == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: ante and bet_step must be >0".into(),
        ));
    }
    if cfg.trials == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: trials must be >=1".into(),
        ));
    }
    Ok(())
}
