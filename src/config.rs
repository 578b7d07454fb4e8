use serde::Deserialize;

use crate::error::ConfigError;

/// 程序运行配置（来自环境变量）
#[derive(Clone, Debug)]
pub struct Config {
    /// 寻宝配置文件路径
    pub hunt_config_path: String,
    /// 同时解析图片地址的要素数量
    pub max_concurrent_lookups: usize,
    /// 单个 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hunt_config_path: "hunt.toml".to_string(),
            max_concurrent_lookups: 8,
            request_timeout_secs: 30,
            verbose_logging: false,
            output_log_file: "hunt_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            hunt_config_path: std::env::var("HUNT_CONFIG_PATH").unwrap_or(default.hunt_config_path),
            max_concurrent_lookups: std::env::var("MAX_CONCURRENT_LOOKUPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default.max_concurrent_lookups),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}

/// 寻宝活动配置（标题、说明、要素服务地址与地图参数）
#[derive(Clone, Debug, Deserialize)]
pub struct HuntConfig {
    pub title: String,
    pub description: String,
    /// 玩法说明（富文本）
    pub instructions: String,
    /// 要素服务地址，例如 `.../FeatureServer/0`
    pub service_url: String,
    /// 地图初始中心 `[x, y]`
    pub init_center: [f64; 2],
    pub home_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// 介绍页配图，缺省时使用第一题的图片
    #[serde(default)]
    pub intro_image: Option<String>,
    /// 领奖页证书图片
    #[serde(default = "default_certificate_image")]
    pub certificate_image: String,
    /// 证书下载地址
    #[serde(default = "default_certificate_url")]
    pub certificate_url: String,
}

fn default_certificate_image() -> String {
    "./certificate.jpg".to_string()
}

fn default_certificate_url() -> String {
    "./certificate.pdf".to_string()
}

impl HuntConfig {
    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "service_url",
                reason: "不能为空".to_string(),
            });
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid {
                field: "min_zoom",
                reason: format!("{} 大于 max_zoom {}", self.min_zoom, self.max_zoom),
            });
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.home_zoom) {
            return Err(ConfigError::Invalid {
                field: "home_zoom",
                reason: format!(
                    "{} 不在 [{}, {}] 范围内",
                    self.home_zoom, self.min_zoom, self.max_zoom
                ),
            });
        }
        Ok(())
    }

    /// 去掉末尾斜杠的服务地址，便于拼接子路径
    pub fn service_base(&self) -> &str {
        self.service_url.trim_end_matches('/')
    }
}
