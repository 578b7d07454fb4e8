//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 reqwest Client，只暴露"GET 一个 JSON 文档"的能力

use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;

/// HTTP 执行器
///
/// 职责：
/// - 持有唯一的 Client 资源（内部为 Arc，clone 代价很小）
/// - 暴露 get_json() 能力
/// - 识别 ArcGIS 风格的 `{"error": {...}}` 响应
/// - 不认识 QuizRecord
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuildFailed)?;
        Ok(Self { client })
    }

    /// 组装 GET 请求（地址 + 查询参数），不发送
    pub(crate) fn request(&self, url: &str, query: &[(&str, &str)]) -> Result<Request, ApiError> {
        self.client
            .get(url)
            .query(query)
            .build()
            .map_err(|source| ApiError::RequestFailed {
                endpoint: url.to_string(),
                source,
            })
    }

    /// 发起 GET 请求并返回 JSON 结果
    ///
    /// # 参数
    /// - `url`: 请求地址
    /// - `query`: 查询参数
    pub async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<JsonValue, ApiError> {
        let request = self.request(url, query)?;
        debug!("GET {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| ApiError::RequestFailed {
                endpoint: url.to_string(),
                source,
            })?;

        let body: JsonValue = response
            .json()
            .await
            .map_err(|source| ApiError::RequestFailed {
                endpoint: url.to_string(),
                source,
            })?;

        check_service_error(url, &body)?;

        Ok(body)
    }

    /// 发起 GET 请求并反序列化为指定类型
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let body = self.get_json(url, query).await?;
        serde_json::from_value(body).map_err(|source| ApiError::JsonParseFailed {
            endpoint: url.to_string(),
            source,
        })
    }
}

/// ArcGIS 服务出错时仍返回 200，错误放在 `error` 字段中
fn check_service_error(endpoint: &str, body: &JsonValue) -> Result<(), ApiError> {
    match body.get("error") {
        Some(error) if !error.is_null() => Err(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            code: error.get("code").and_then(|v| v.as_i64()),
            message: error
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_service_error() {
        let body = json!({"error": {"code": 400, "message": "Invalid URL", "details": []}});

        match check_service_error("https://example.com/query", &body) {
            Err(ApiError::BadResponse { code, message, .. }) => {
                assert_eq!(code, Some(400));
                assert_eq!(message.as_deref(), Some("Invalid URL"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_encodes_query() {
        let http = HttpExecutor::new(Duration::from_secs(5)).unwrap();

        let request = http
            .request("https://example.com/FeatureServer/0/query", &[("where", "1=1"), ("f", "json")])
            .unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().path(), "/FeatureServer/0/query");
        let pairs: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("where".to_string(), "1=1".to_string()),
                ("f".to_string(), "json".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_request_rejects_bad_url() {
        let http = HttpExecutor::new(Duration::from_secs(5)).unwrap();

        match http.request("not a url", &[]) {
            Err(ApiError::RequestFailed { endpoint, .. }) => assert_eq!(endpoint, "not a url"),
            other => panic!("unexpected: {:?}", other.map(|r| r.url().to_string())),
        }
    }

    #[test]
    fn test_client_build_error_message() {
        let source = Client::new().get("not a url").build().unwrap_err();

        let message = ApiError::ClientBuildFailed(source).to_string();

        assert!(message.starts_with("HTTP客户端创建失败: "));
        assert!(!message.contains("()"));
    }

    #[test]
    fn test_check_service_error_passes_normal_body() {
        assert!(check_service_error("u", &json!({"features": []})).is_ok());
        assert!(check_service_error("u", &json!({"error": null})).is_ok());
    }
}
