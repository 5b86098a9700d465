use crate::adapters::logo::{FileLogo, MemoryLogo, NoLogo};
use crate::domain::ports::LogoSource;
use crate::utils::error::{QrisError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DIMENSION: u32 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub image: ImageConfig,
    pub payload: Option<PayloadConfig>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub requests: Vec<RenderRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// 沒設定就不疊 logo
    pub logo_path: Option<String>,
    pub cache_logo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadConfig {
    pub base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub manifest: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub amount: u64,
    pub filename: Option<String>,
}

impl RenderRequest {
    pub fn filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("qris-{}.png", self.amount))
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QrisError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QrisError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${QRIS_BASE})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QrisError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_dimension("image.width", self.width())?;
        validation::validate_dimension("image.height", self.height())?;

        if let Some(logo_path) = &self.image.logo_path {
            validation::validate_path("image.logo_path", logo_path)?;
        }

        validation::validate_path("output.path", &self.output.path)?;

        let payload = validation::validate_required_field("payload", &self.payload)?;
        validation::validate_non_empty_string("payload.base", &payload.base)?;
        if payload.base.contains("${") {
            return Err(QrisError::InvalidConfigValueError {
                field: "payload.base".to_string(),
                value: payload.base.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }

        validation::validate_positive_number("requests", self.requests.len(), 1)?;
        let filenames: Vec<String> = self.requests.iter().map(RenderRequest::filename).collect();
        for filename in &filenames {
            validation::validate_file_name("requests.filename", filename)?;
        }
        validation::validate_file_extensions("requests.filename", &filenames, &["png"])?;

        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.image.width.unwrap_or(DEFAULT_DIMENSION)
    }

    pub fn height(&self) -> u32 {
        self.image.height.unwrap_or(DEFAULT_DIMENSION)
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn base_payload(&self) -> Option<&str> {
        self.payload.as_ref().map(|p| p.base.as_str())
    }

    pub fn manifest_enabled(&self) -> bool {
        self.output.manifest.unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    /// Logo source for `[image]`: none, read per render, or decoded once.
    pub fn logo_source(&self) -> Result<Box<dyn LogoSource>> {
        let Some(path) = &self.image.logo_path else {
            return Ok(Box::new(NoLogo));
        };

        if self.image.cache_logo.unwrap_or(false) {
            let cached = MemoryLogo::from_path(path)?;
            if cached.is_empty() {
                tracing::warn!(path = %path, "Logo file not found, rendering without overlay");
            }
            Ok(Box::new(cached))
        } else {
            Ok(Box::new(FileLogo::new(path)))
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
