use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use crate::error::{EngineError, Result};
use super::board::MIN_BOARD_SIZE;
use super::types::{OpponentMode, Symbol};

pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub board_size: usize,
    pub first_symbol: Symbol,
    pub second_symbol: Symbol,
    pub time_limit: Duration,
    pub opponent: OpponentMode,
}

impl SessionSettings {
    pub fn new(
        board_size: usize,
        first_symbol: Symbol,
        second_symbol: Symbol,
        time_limit_secs: u64,
        opponent_is_heuristic: bool,
    ) -> Self {
        Self {
            board_size,
            first_symbol,
            second_symbol,
            time_limit: Duration::from_secs(time_limit_secs),
            opponent: if opponent_is_heuristic {
                OpponentMode::Heuristic
            } else {
                OpponentMode::Human
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(EngineError::InvalidSize {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.first_symbol == self.second_symbol
            || !self.first_symbol.is_visible()
            || !self.second_symbol.is_visible()
        {
            return Err(EngineError::InvalidSymbols {
                first: self.first_symbol.as_char(),
                second: self.second_symbol.as_char(),
            });
        }
        if self.time_limit.is_zero() {
            return Err(EngineError::InvalidTimeLimit);
        }
        Ok(())
    }

    /// The second participant, when the heuristic plays it.
    pub fn heuristic_symbol(&self) -> Option<Symbol> {
        match self.opponent {
            OpponentMode::Heuristic => Some(self.second_symbol),
            OpponentMode::Human => None,
        }
    }

    pub fn symbols(&self) -> [Symbol; 2] {
        [self.first_symbol, self.second_symbol]
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::new(MIN_BOARD_SIZE, Symbol::X, Symbol::O, DEFAULT_TIME_LIMIT_SECS, true)
    }
}

/// On-disk form of the session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub first_symbol: Symbol,
    pub second_symbol: Symbol,
    pub time_limit_secs: u64,
    pub opponent: OpponentMode,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: MIN_BOARD_SIZE,
            first_symbol: Symbol::X,
            second_symbol: Symbol::O,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            opponent: OpponentMode::Heuristic,
            seed: None,
        }
    }
}

impl From<&GameConfig> for SessionSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            board_size: config.board_size,
            first_symbol: config.first_symbol,
            second_symbol: config.second_symbol,
            time_limit: Duration::from_secs(config.time_limit_secs),
            opponent: config.opponent,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        SessionSettings::from(self)
            .validate()
            .map_err(|e| e.to_string())
    }
}

pub fn get_config_manager(
    path: impl Into<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

/// Reads `path`, falling back to defaults when the file does not exist.
pub fn load_game_config(path: impl Into<PathBuf>) -> Result<GameConfig> {
    get_config_manager(path)
        .get_config()
        .map_err(EngineError::Config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigContentProvider, ConfigSerializer, InlineConfigProvider};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_engine_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(SessionSettings::default().validate(), Ok(()));
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_settings_validation_errors() {
        let mut settings = SessionSettings::default();
        settings.board_size = 2;
        assert_eq!(
            settings.validate(),
            Err(EngineError::InvalidSize { size: 2, min: 3 })
        );

        let settings = SessionSettings::new(3, Symbol::X, Symbol::X, 10, false);
        assert!(matches!(settings.validate(), Err(EngineError::InvalidSymbols { .. })));

        let settings = SessionSettings::new(3, Symbol::new(' '), Symbol::O, 10, false);
        assert!(matches!(settings.validate(), Err(EngineError::InvalidSymbols { .. })));

        let settings = SessionSettings::new(3, Symbol::X, Symbol::O, 0, false);
        assert_eq!(settings.validate(), Err(EngineError::InvalidTimeLimit));
    }

    #[test]
    fn test_heuristic_symbol_is_second() {
        let settings = SessionSettings::new(4, Symbol::new('A'), Symbol::new('B'), 5, true);
        assert_eq!(settings.heuristic_symbol(), Some(Symbol::new('B')));
        let settings = SessionSettings::new(4, Symbol::new('A'), Symbol::new('B'), 5, false);
        assert_eq!(settings.heuristic_symbol(), None);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = GameConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: GameConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: GameConfig = serializer
            .deserialize("board_size: 5\nopponent: human\nfirst_symbol: '#'\n")
            .unwrap();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.opponent, OpponentMode::Human);
        assert_eq!(config.first_symbol, Symbol::new('#'));
        assert_eq!(config.second_symbol, Symbol::O);
        assert_eq!(config.time_limit_secs, DEFAULT_TIME_LIMIT_SECS);
    }

    #[test]
    fn test_config_round_trip_through_file() {
        let config = GameConfig {
            board_size: 4,
            time_limit_secs: 12,
            seed: Some(99),
            ..GameConfig::default()
        };
        let file_path = get_temp_file_path();

        let manager = get_config_manager(&file_path);
        manager.set_config(&config).unwrap();

        let loaded = load_game_config(&file_path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let file_path = get_temp_file_path();
        assert_eq!(load_game_config(&file_path), Ok(GameConfig::default()));
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let provider = InlineConfigProvider::new(Some("board_size: 2\n".to_string()));
        let manager: ConfigManager<_, GameConfig> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        let error = manager.get_config().unwrap_err();
        assert!(error.contains("Config validation error"));
    }

    #[test]
    fn test_invalid_config_cant_be_written() {
        let provider = InlineConfigProvider::default();
        let manager: ConfigManager<_, GameConfig> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        let config = GameConfig {
            second_symbol: Symbol::X,
            ..GameConfig::default()
        };
        assert!(manager.set_config(&config).is_err());
    }

    #[test]
    fn test_manager_caches_until_invalidated() {
        let provider = InlineConfigProvider::new(Some("board_size: 4\n".to_string()));
        let manager: ConfigManager<_, GameConfig> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        assert_eq!(manager.get_config().unwrap().board_size, 4);

        manager.set_config(&GameConfig::default()).unwrap();
        manager.invalidate();
        assert_eq!(manager.get_config().unwrap().board_size, 3);
    }

    #[test]
    fn test_inline_provider_stores_content() {
        let provider = InlineConfigProvider::default();
        assert_eq!(provider.get_config_content(), Ok(None));
        provider.set_config_content("seed: 1\n").unwrap();
        assert_eq!(provider.get_config_content(), Ok(Some("seed: 1\n".to_string())));
    }
}
