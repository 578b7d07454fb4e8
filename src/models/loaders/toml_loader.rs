use crate::config::HuntConfig;
use crate::error::ConfigError;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载寻宝配置并校验
pub async fn load_hunt_config(toml_file_path: &Path) -> Result<HuntConfig, ConfigError> {
    let path = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| ConfigError::ReadFailed {
            path: path.clone(),
            source,
        })?;

    let config: HuntConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.clone(),
            source,
        })?;

    config.validate()?;

    tracing::info!("已加载寻宝配置: {} ({})", config.title, path);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result =
            tokio_test::block_on(load_hunt_config(Path::new("definitely/not/here/hunt.toml")));

        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hunt_config_{}.toml", std::process::id()));
        let content = r#"
title = "T"
description = "D"
instructions = "I"
service_url = "https://example.com/FeatureServer/0"
init_center = [0.0, 0.0]
home_zoom = 3
min_zoom = 1
max_zoom = 5
intro_image = "https://example.com/intro.jpg"
"#;
        tokio::fs::write(&path, content).await.unwrap();

        let config = load_hunt_config(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(config.title, "T");
        assert_eq!(config.intro_image.as_deref(), Some("https://example.com/intro.jpg"));
    }

    #[tokio::test]
    async fn test_load_invalid_toml() {
        let path = std::env::temp_dir().join(format!("hunt_bad_{}.toml", std::process::id()));
        tokio::fs::write(&path, "title = ").await.unwrap();

        let result = load_hunt_config(&path).await;
        let _ = tokio::fs::remove_file(&path).await;

        assert!(matches!(result, Err(ConfigError::TomlParseFailed { .. })));
    }
}
