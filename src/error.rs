//! 错误类型
//!
//! 会话构建阶段（配置 / 要素 / 图片）的失败都会中止整个构建；
//! 导航与作答操作不产生错误。

use thiserror::Error;

use crate::models::RecordId;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置加载或校验失败
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 要素查询失败
    #[error("要素查询失败: {0}")]
    FeatureFetch(#[source] ApiError),
    /// 某个要素的图片地址解析失败
    #[error("图片地址解析失败 (要素 {feature_id}): {source}")]
    ImageResolution {
        feature_id: RecordId,
        #[source]
        source: ApiError,
    },
    /// 要素属性不完整或类型不符
    #[error("要素数据错误: {0}")]
    Feature(#[from] FeatureError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 客户端创建失败
    #[error("HTTP客户端创建失败: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回错误响应
    #[error("API返回错误响应 ({endpoint}): code={code:?}, message={message:?}")]
    BadResponse {
        endpoint: String,
        code: Option<i64>,
        message: Option<String>,
    },
    /// 服务返回空结果
    #[error("API返回空结果: {endpoint}")]
    EmptyResponse { endpoint: String },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 要素数据错误（属性包 → QuizRecord 的转换失败）
#[derive(Debug, Error)]
pub enum FeatureError {
    /// 缺少必需属性
    #[error("第 {index} 个要素缺少属性 {field}")]
    MissingAttribute { index: usize, field: &'static str },
    /// 属性类型不符
    #[error("第 {index} 个要素的属性 {field} 应为 {expected}")]
    InvalidAttribute {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
    /// 缺少几何坐标
    #[error("第 {index} 个要素缺少坐标")]
    MissingGeometry { index: usize },
    /// 标识重复
    #[error("第 {index} 个要素的标识 {id} 与前面的要素重复")]
    DuplicateId { index: usize, id: RecordId },
}

/// 业务逻辑错误
#[derive(Debug, Error)]
pub enum BusinessError {
    /// 服务中没有任何题目
    #[error("寻宝题目为空，无法开始")]
    EmptyHunt,
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
