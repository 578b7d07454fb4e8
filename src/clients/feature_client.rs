/// 要素服务客户端
///
/// 封装所有与 ArcGIS 要素服务相关的调用逻辑
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::infrastructure::HttpExecutor;
use crate::models::{FeatureSet, RawFeature, RecordId};

/// 要素服务能力：查询要素 + 解析图片地址
///
/// 任何数据源（真实服务、测试桩）实现此 trait 即可接入 `record_builder`。
#[allow(async_fn_in_trait)]
pub trait FeatureService {
    /// 按服务原有顺序查询全部要素
    async fn fetch_features(&self, service_url: &str) -> Result<Vec<RawFeature>, ApiError>;

    /// 解析某个要素的图片地址
    async fn image_url(&self, service_url: &str, feature_id: RecordId) -> Result<String, ApiError>;
}

/// ArcGIS FeatureServer 客户端
#[derive(Clone)]
pub struct ArcGisClient {
    http: HttpExecutor,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentInfos {
    #[serde(default)]
    attachment_infos: Vec<AttachmentInfo>,
}

#[derive(Debug, Deserialize)]
struct AttachmentInfo {
    id: i64,
}

/// 全量查询：所有字段 + 几何
const QUERY_PARAMS: [(&str, &str); 4] = [
    ("where", "1=1"),
    ("outFields", "*"),
    ("returnGeometry", "true"),
    ("f", "json"),
];

const ATTACHMENT_PARAMS: [(&str, &str); 1] = [("f", "json")];

fn query_endpoint(service_url: &str) -> String {
    format!("{}/query", service_url.trim_end_matches('/'))
}

fn attachments_endpoint(service_url: &str, feature_id: RecordId) -> String {
    format!("{}/{}/attachments", service_url.trim_end_matches('/'), feature_id.0)
}

impl ArcGisClient {
    /// 创建新的要素服务客户端
    pub fn new(http: HttpExecutor) -> Self {
        Self { http }
    }
}

impl FeatureService for ArcGisClient {
    async fn fetch_features(&self, service_url: &str) -> Result<Vec<RawFeature>, ApiError> {
        let set: FeatureSet = self
            .http
            .get_as(&query_endpoint(service_url), &QUERY_PARAMS)
            .await?;

        debug!("查询到 {} 个要素", set.features.len());

        Ok(set.features)
    }

    async fn image_url(&self, service_url: &str, feature_id: RecordId) -> Result<String, ApiError> {
        let base = attachments_endpoint(service_url, feature_id);

        let infos: AttachmentInfos = self.http.get_as(&base, &ATTACHMENT_PARAMS).await?;

        attachment_url(&base, &infos)
    }
}

/// 取第一个附件作为题目图片
fn attachment_url(base: &str, infos: &AttachmentInfos) -> Result<String, ApiError> {
    infos
        .attachment_infos
        .first()
        .map(|info| format!("{}/{}", base, info.id))
        .ok_or_else(|| ApiError::EmptyResponse {
            endpoint: base.to_string(),
        })
}
