use std::time::Duration;

use crate::error::EmonitorError;
use crate::plugin::ConfigLine;

/// Интервал опроса по умолчанию
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(1000);

/// Настройки одного экземпляра emonitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmonitorConfig {
    /// Период опроса внешней команды
    pub update_interval: Duration,
    /// Команда, первая строка вывода которой показывается на панели
    pub external_command: String,
    /// Команда, запускаемая по клику
    pub on_click_command: Option<String>,
    /// Ширина виджета в пикселях, `None` - естественная ширина
    pub width: Option<i32>,
}

impl EmonitorConfig {
    /// Разбирает блок конфигурации плагина. Имена ключей не чувствительны к регистру.
    pub fn from_lines(lines: &[ConfigLine]) -> Result<Self, EmonitorError> {
        let mut update_interval = DEFAULT_UPDATE_INTERVAL;
        let mut external_command = None;
        let mut on_click_command = None;
        let mut width = None;

        for line in lines {
            let (key, value) = match line {
                ConfigLine::Var { key, value } => (key.as_str(), value.as_str()),
                ConfigLine::Block(name) => return Err(EmonitorError::UnknownVar(name.clone())),
                ConfigLine::Illegal(token) => return Err(EmonitorError::IllegalToken(token.clone())),
            };

            if key.eq_ignore_ascii_case("UpdateInterval") {
                let millis: u64 = parse_number(key, value)?;
                if millis == 0 {
                    return Err(invalid(key, value));
                }
                update_interval = Duration::from_millis(millis);
            } else if key.eq_ignore_ascii_case("ExternalCommand") {
                external_command = Some(value.to_string());
            } else if key.eq_ignore_ascii_case("OnClickCommand") {
                on_click_command = Some(value.to_string());
            } else if key.eq_ignore_ascii_case("Width") {
                let pixels: i32 = parse_number(key, value)?;
                width = (pixels > 0).then_some(pixels);
            } else {
                return Err(EmonitorError::UnknownVar(key.to_string()));
            }
        }

        let external_command = external_command
            .filter(|c| !c.trim().is_empty())
            .ok_or(EmonitorError::MissingCommand)?;

        Ok(Self {
            update_interval,
            external_command,
            on_click_command,
            width,
        })
    }
}

fn invalid(key: &str, value: &str) -> EmonitorError {
    EmonitorError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, EmonitorError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let config = EmonitorConfig::from_lines(&[
            ConfigLine::var("UpdateInterval", "2500"),
            ConfigLine::var("ExternalCommand", "acpi -b | cut -d, -f2"),
            ConfigLine::var("OnClickCommand", "xterm -e top"),
            ConfigLine::var("Width", "60"),
        ])
        .unwrap();

        assert_eq!(config.update_interval, Duration::from_millis(2500));
        assert_eq!(config.external_command, "acpi -b | cut -d, -f2");
        assert_eq!(config.on_click_command.as_deref(), Some("xterm -e top"));
        assert_eq!(config.width, Some(60));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let config = EmonitorConfig::from_lines(&[
            ConfigLine::var("externalcommand", "uptime"),
            ConfigLine::var("UPDATEINTERVAL", "100"),
        ])
        .unwrap();

        assert_eq!(config.external_command, "uptime");
        assert_eq!(config.update_interval, Duration::from_millis(100));
    }

    #[test]
    fn defaults_apply() {
        let config = EmonitorConfig::from_lines(&[ConfigLine::var("ExternalCommand", "date")]).unwrap();

        assert_eq!(config.update_interval, DEFAULT_UPDATE_INTERVAL);
        assert_eq!(config.on_click_command, None);
        assert_eq!(config.width, None);
    }

    #[test]
    fn non_positive_width_means_natural() {
        let config = EmonitorConfig::from_lines(&[
            ConfigLine::var("ExternalCommand", "date"),
            ConfigLine::var("Width", "-1"),
        ])
        .unwrap();

        assert_eq!(config.width, None);
    }

    #[test]
    fn unknown_key_aborts() {
        let err = EmonitorConfig::from_lines(&[
            ConfigLine::var("ExternalCommand", "date"),
            ConfigLine::var("Colour", "red"),
        ])
        .unwrap_err();

        assert!(matches!(err, EmonitorError::UnknownVar(ref k) if k == "Colour"));
    }

    #[test]
    fn nested_block_and_illegal_token_abort() {
        let block = EmonitorConfig::from_lines(&[ConfigLine::Block("Config".into())]).unwrap_err();
        let illegal = EmonitorConfig::from_lines(&[ConfigLine::Illegal("}}".into())]).unwrap_err();

        assert!(matches!(block, EmonitorError::UnknownVar(_)));
        assert!(matches!(illegal, EmonitorError::IllegalToken(_)));
    }

    #[test]
    fn malformed_numbers_abort() {
        for (key, value) in [("UpdateInterval", "soon"), ("UpdateInterval", "0"), ("Width", "wide")] {
            let err = EmonitorConfig::from_lines(&[
                ConfigLine::var("ExternalCommand", "date"),
                ConfigLine::var(key, value),
            ])
            .unwrap_err();

            assert!(matches!(err, EmonitorError::InvalidValue { .. }), "{key}={value}");
        }
    }

    #[test]
    fn command_is_required() {
        let missing = EmonitorConfig::from_lines(&[ConfigLine::var("Width", "10")]).unwrap_err();
        let blank = EmonitorConfig::from_lines(&[ConfigLine::var("ExternalCommand", " ")]).unwrap_err();

        assert!(matches!(missing, EmonitorError::MissingCommand));
        assert!(matches!(blank, EmonitorError::MissingCommand));
    }
}
