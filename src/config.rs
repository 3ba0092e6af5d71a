//! Startup configuration
//!
//! Settings come from an optional TOML file (`escape.toml` in the working
//! directory unless `--config` names another) and are then overridden by
//! command-line arguments.

use crate::display::DisplayMode;
use crate::error::GameError;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "escape.toml";
pub const DEFAULT_ROOMS_FILE: &str = "data/rooms.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Room data file (JSON, or TOML by extension)
    pub rooms: PathBuf,
    /// Room to start in instead of the first one in the file
    pub start_room: Option<String>,
    /// Rule book replacing the built-in narrative content
    pub narrative: Option<PathBuf>,
    pub display: DisplayMode,
    /// Seed for predictable random flavour text
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rooms: PathBuf::from(DEFAULT_ROOMS_FILE),
            start_room: None,
            narrative: None,
            display: DisplayMode::Auto,
            seed: None,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Play(Config),
    Help,
}

impl Config {
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, GameError> {
        toml::from_str(source).map_err(|e| GameError::Toml {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let origin = path.display().to_string();
        debug!("Reading configuration from {}", origin);
        let source = fs::read_to_string(path).map_err(|e| GameError::Io {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source, &origin)
    }

    /// Build the configuration from program arguments (without argv[0])
    ///
    /// An explicit `--config` file must exist; the default one is optional.
    pub fn from_args<I, S>(args: I) -> Result<CliAction, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut config_path: Option<PathBuf> = None;
        let mut rooms: Option<PathBuf> = None;
        let mut display: Option<DisplayMode> = None;
        let mut seed: Option<u64> = None;

        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(CliAction::Help),
                "--config" => config_path = Some(PathBuf::from(value_for(&mut it, arg)?)),
                "--display" => {
                    let mode = value_for(&mut it, arg)?
                        .parse::<DisplayMode>()
                        .map_err(GameError::Config)?;
                    display = Some(mode);
                }
                "--headless" => display = Some(DisplayMode::Headless),
                "--seed" => {
                    let raw = value_for(&mut it, arg)?;
                    let value = raw
                        .parse::<u64>()
                        .map_err(|_| GameError::Config(format!("Invalid seed: {}", raw)))?;
                    seed = Some(value);
                }
                other if other.starts_with('-') => {
                    return Err(GameError::Config(format!("Unknown option: {}", other)));
                }
                other => {
                    if rooms.is_some() {
                        return Err(GameError::Config(format!(
                            "Unexpected extra argument: {}",
                            other
                        )));
                    }
                    rooms = Some(PathBuf::from(other));
                }
            }
        }

        let mut config = match config_path {
            Some(path) => Config::load(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Config::load(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Config::default(),
        };

        if let Some(rooms) = rooms {
            config.rooms = rooms;
        }
        if let Some(display) = display {
            config.display = display;
        }
        if seed.is_some() {
            config.seed = seed;
        }

        debug!("Effective configuration: {:?}", config);
        Ok(CliAction::Play(config))
    }
}

fn value_for<'a>(
    it: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a String, GameError> {
    it.next()
        .ok_or_else(|| GameError::Config(format!("{} needs a value", flag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn play(args: &[&str]) -> Config {
        match Config::from_args(args.iter().copied()).unwrap() {
            CliAction::Play(config) => config,
            CliAction::Help => panic!("expected a play action"),
        }
    }

    #[test]
    fn toml_config_with_defaults() {
        let config = Config::from_toml_str(
            r#"
                rooms = "levels/museum.toml"
                start_room = "cafe"
                display = "headless"
            "#,
            "escape.toml",
        )
        .unwrap();
        assert_eq!(config.rooms, PathBuf::from("levels/museum.toml"));
        assert_eq!(config.start_room.as_deref(), Some("cafe"));
        assert_eq!(config.display, DisplayMode::Headless);
        assert_eq!(config.seed, None);
        assert_eq!(config.narrative, None);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        assert!(Config::from_toml_str("save_file = \"x\"", "escape.toml").is_err());
    }

    #[test]
    fn arguments_override_defaults() {
        let config = play(&["rooms.toml", "--seed", "42", "--display", "terminal"]);
        assert_eq!(config.rooms, PathBuf::from("rooms.toml"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.display, DisplayMode::Terminal);
    }

    #[test]
    fn help_flag_wins() {
        assert_eq!(
            Config::from_args(["--seed", "1", "--help"]).unwrap(),
            CliAction::Help
        );
    }

    #[test]
    fn bad_arguments_are_config_errors() {
        for args in [
            vec!["--seed"],
            vec!["--seed", "many"],
            vec!["--display", "fancy"],
            vec!["--verbose"],
            vec!["a.json", "b.json"],
        ] {
            assert!(
                matches!(Config::from_args(args.clone()), Err(GameError::Config(_))),
                "{:?} should fail",
                args
            );
        }
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        assert!(matches!(
            Config::from_args(["--config", "no/such/escape.toml"]),
            Err(GameError::Io { .. })
        ));
    }
}
