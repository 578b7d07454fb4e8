//! 题目构建服务 - 业务能力层
//!
//! 原始要素（属性包 + 坐标）→ `QuizRecord`。
//! 图片地址并发解析，但输出严格保持输入顺序；任一要素失败则整体失败。

use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::clients::FeatureService;
use crate::error::{AppError, AppResult, FeatureError};
use crate::models::{PhotoCredits, Position, QuizRecord, RawFeature, RecordId};
use crate::utils::logging::truncate_text;

/// 属性包字段名
pub mod fields {
    pub const OBJECT_ID: &str = "objectid";
    pub const PROMPT: &str = "prompt";
    pub const HINT: &str = "hint";
    pub const EXCLAMATION: &str = "exclamation";
    pub const IMAGE_ATTRIBUTION: &str = "image_attribution";
    pub const IMAGE_SOURCE_REFERENCE: &str = "image_source_reference_page";
    pub const IMAGE_LICENSE: &str = "image_license";
    pub const IMAGE_LICENSE_REFERENCE: &str = "image_license_reference_page";
}

/// 已校验、尚缺图片地址的题目
#[derive(Debug)]
struct RecordDraft {
    id: RecordId,
    position: Position,
    prompt: String,
    hint: String,
    exclamation: String,
    credits: PhotoCredits,
}

impl RecordDraft {
    fn from_feature(index: usize, feature: &RawFeature) -> Result<Self, FeatureError> {
        let geometry = feature
            .geometry
            .ok_or(FeatureError::MissingGeometry { index })?;

        Ok(Self {
            id: RecordId(feature.required_i64(index, fields::OBJECT_ID)?),
            position: Position::new(geometry.x, geometry.y),
            prompt: feature.required_str(index, fields::PROMPT)?,
            hint: feature.required_str(index, fields::HINT)?,
            exclamation: feature.required_str(index, fields::EXCLAMATION)?,
            credits: PhotoCredits {
                attribution: feature.optional_str(index, fields::IMAGE_ATTRIBUTION)?,
                source_reference_url: feature.optional_str(index, fields::IMAGE_SOURCE_REFERENCE)?,
                license: feature.optional_str(index, fields::IMAGE_LICENSE)?,
                license_reference_url: feature
                    .optional_str(index, fields::IMAGE_LICENSE_REFERENCE)?,
            },
        })
    }

    fn into_record(self, image_url: String) -> QuizRecord {
        QuizRecord::new(
            self.id,
            self.position,
            self.prompt,
            self.hint,
            self.exclamation,
            image_url,
        )
        .with_credits(self.credits)
    }
}

/// 校验全部要素，标识必须唯一
fn validate_features(features: &[RawFeature]) -> Result<Vec<RecordDraft>, FeatureError> {
    let mut seen = HashSet::with_capacity(features.len());
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let draft = RecordDraft::from_feature(index, feature)?;
            if !seen.insert(draft.id) {
                return Err(FeatureError::DuplicateId { index, id: draft.id });
            }
            Ok(draft)
        })
        .collect()
}

/// 将原始要素构建为题目列表
///
/// # 参数
/// - `service`: 图片地址解析能力
/// - `service_url`: 要素服务地址
/// - `features`: 原始要素（顺序即题目顺序）
/// - `max_concurrent`: 同时进行的图片地址解析数量
///
/// # 返回
/// 与输入同序的题目列表；`solved` / `hint_activated` 均为 false
pub async fn build_records<S: FeatureService>(
    service: &S,
    service_url: &str,
    features: &[RawFeature],
    max_concurrent: usize,
) -> AppResult<Vec<QuizRecord>> {
    let drafts = validate_features(features)?;

    debug!("要素校验通过，开始解析 {} 个图片地址", drafts.len());

    // buffered 按提交顺序产出结果，与完成顺序无关
    let records: Vec<QuizRecord> = stream::iter(drafts)
        .map(|draft| async move {
            let image_url = service
                .image_url(service_url, draft.id)
                .await
                .map_err(|source| AppError::ImageResolution {
                    feature_id: draft.id,
                    source,
                })?;
            debug!(
                "题目 {} 图片: {} | {}",
                draft.id,
                image_url,
                truncate_text(&draft.prompt, 30)
            );
            Ok::<_, AppError>(draft.into_record(image_url))
        })
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await?;

    Ok(records)
}

/// 查询要素并构建题目列表
pub async fn fetch_records<S: FeatureService>(
    service: &S,
    service_url: &str,
    max_concurrent: usize,
) -> AppResult<Vec<QuizRecord>> {
    info!("🔍 正在查询要素服务: {}", service_url);

    let features = service
        .fetch_features(service_url)
        .await
        .map_err(AppError::FeatureFetch)?;

    info!("✓ 查询到 {} 个要素", features.len());

    build_records(service, service_url, &features, max_concurrent).await
}
