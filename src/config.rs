//! Configuration management for the lending service

use chrono::Duration;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use thiserror::Error;

use crate::domain::{CatalogItem, DEFAULT_LOAN_PERIOD_SECS, ItemKind};

/// 貸出期間の上限（100年）
pub const MAX_LOAN_PERIOD_SECS: i64 = 100 * 365 * 24 * 60 * 60;

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid catalog entry '{title}': {reason}")]
    InvalidSeed { title: String, reason: String },

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    Book,
    Dvd,
    Magazine,
    Software,
}

/// カタログの初期データ1件
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedItem {
    pub title: String,
    pub kind: SeedKind,
    #[serde(default)]
    pub copies: Option<u64>,
    #[serde(default)]
    pub loan_period_secs: Option<i64>,
}

impl SeedItem {
    fn new(title: &str, kind: SeedKind, copies: Option<u64>) -> Self {
        Self {
            title: title.to_string(),
            kind,
            copies,
            loan_period_secs: None,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidSeed {
            title: self.title.clone(),
            reason: reason.into(),
        }
    }

    fn required_copies(&self) -> Result<u64, ConfigError> {
        self.copies
            .ok_or_else(|| self.invalid("copies is required for finite stock"))
    }

    /// 初期データからカタログ資料を作る
    pub fn to_catalog_item(&self, default_period_secs: i64) -> Result<CatalogItem, ConfigError> {
        match self.kind {
            SeedKind::Book => {
                let secs = self.loan_period_secs.unwrap_or(default_period_secs);
                if secs < 0 {
                    return Err(self.invalid("loan_period_secs must not be negative"));
                }
                if secs > MAX_LOAN_PERIOD_SECS {
                    return Err(self.invalid(format!(
                        "loan_period_secs must not exceed {}",
                        MAX_LOAN_PERIOD_SECS
                    )));
                }
                let loan_period = Duration::try_seconds(secs)
                    .ok_or_else(|| self.invalid("loan_period_secs is out of range"))?;
                Ok(CatalogItem::new(
                    self.title.clone(),
                    ItemKind::Book { loan_period },
                    self.required_copies()?,
                ))
            }
            SeedKind::Dvd => Ok(CatalogItem::dvd(self.title.clone(), self.required_copies()?)),
            SeedKind::Magazine => Ok(CatalogItem::magazine(
                self.title.clone(),
                self.required_copies()?,
            )),
            SeedKind::Software => {
                if self.copies.is_some() {
                    tracing::warn!(title = %self.title, "copies ignored for software; stock is unlimited");
                }
                Ok(CatalogItem::software(self.title.clone()))
            }
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoanSettings {
    pub default_period_secs: i64,
}

impl Default for LoanSettings {
    fn default() -> Self {
        Self {
            default_period_secs: DEFAULT_LOAN_PERIOD_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationSettings {
    pub poll_interval_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MemberSettings {
    pub name: String,
}

impl Default for MemberSettings {
    fn default() -> Self {
        Self {
            name: "guest".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub loans: LoanSettings,
    pub notifications: NotificationSettings,
    pub member: MemberSettings,
    pub catalog: Vec<SeedItem>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            loans: LoanSettings::default(),
            notifications: NotificationSettings::default(),
            member: MemberSettings::default(),
            catalog: default_catalog(),
        }
    }
}

/// 既定の初期カタログ
fn default_catalog() -> Vec<SeedItem> {
    vec![
        SeedItem::new("Harry Potter", SeedKind::Book, Some(8)),
        SeedItem::new("1984", SeedKind::Book, Some(6)),
        SeedItem::new("Sõda ja rahu", SeedKind::Book, Some(12)),
        SeedItem::new("Tähtedevaheline", SeedKind::Dvd, Some(6)),
        SeedItem::new("Maatriks", SeedKind::Dvd, Some(9)),
        SeedItem::new("Teadus ja elu", SeedKind::Magazine, Some(5)),
        SeedItem::new("Üle maailma", SeedKind::Magazine, Some(7)),
        SeedItem::new("Photoshop", SeedKind::Software, None),
        SeedItem::new("AutoCAD", SeedKind::Software, None),
        SeedItem::new("Microsoft Office", SeedKind::Software, None),
    ]
}

impl AppConfig {
    /// Load configuration from files and environment variables
    ///
    /// Layers, later wins: built-in defaults, `config/default`, `config/{RUN_MODE}`,
    /// then `LENDING_*` environment variables (`__` separates nested keys).
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("LENDING")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_source(config)
    }

    /// TOML文字列から読み込む
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_source(config)
    }

    fn from_source(config: Config) -> Result<Self, ConfigError> {
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.notifications.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "notifications.poll_interval_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.loans.default_period_secs < 0 {
            return Err(ConfigError::InvalidSetting {
                key: "loans.default_period_secs",
                reason: "must not be negative".to_string(),
            });
        }
        if self.loans.default_period_secs > MAX_LOAN_PERIOD_SECS {
            return Err(ConfigError::InvalidSetting {
                key: "loans.default_period_secs",
                reason: format!("must not exceed {}", MAX_LOAN_PERIOD_SECS),
            });
        }
        self.catalog_items().map(|_| ())
    }

    /// 初期カタログの資料一覧
    pub fn catalog_items(&self) -> Result<Vec<CatalogItem>, ConfigError> {
        self.catalog
            .iter()
            .map(|seed| seed.to_catalog_item(self.loans.default_period_secs))
            .collect()
    }
}
