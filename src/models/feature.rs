//! 外部要素服务返回的原始数据
//!
//! 属性包保持为无类型的 JSON，只在 `record_builder` 中转换为 `QuizRecord`，
//! 不向外泄漏。

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FeatureError;

/// 要素查询结果（ArcGIS `query` 接口的 `f=json` 响应）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

/// 单个原始要素：属性包 + 坐标
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub geometry: Option<Geometry>,
}

/// 点几何
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
}

impl RawFeature {
    pub fn new(attributes: Map<String, Value>, x: f64, y: f64) -> Self {
        Self {
            attributes,
            geometry: Some(Geometry { x, y }),
        }
    }

    /// 按字段名查找属性（忽略大小写，ArcGIS 服务的字段名大小写并不统一）
    fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field).or_else(|| {
            self.attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(field))
                .map(|(_, value)| value)
        })
    }

    /// 读取必需的整数属性
    pub fn required_i64(&self, index: usize, field: &'static str) -> Result<i64, FeatureError> {
        match self.get(field) {
            None | Some(Value::Null) => Err(FeatureError::MissingAttribute { index, field }),
            Some(value) => value.as_i64().ok_or(FeatureError::InvalidAttribute {
                index,
                field,
                expected: "整数",
            }),
        }
    }

    /// 读取必需的字符串属性
    pub fn required_str(&self, index: usize, field: &'static str) -> Result<String, FeatureError> {
        self.optional_str(index, field)?
            .ok_or(FeatureError::MissingAttribute { index, field })
    }

    /// 读取可选的字符串属性，null 与缺失都视为 None
    pub fn optional_str(
        &self,
        index: usize,
        field: &'static str,
    ) -> Result<Option<String>, FeatureError> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(FeatureError::InvalidAttribute {
                index,
                field,
                expected: "字符串",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_feature_set() {
        let body = json!({
            "objectIdFieldName": "objectid",
            "geometryType": "esriGeometryPoint",
            "features": [
                {
                    "attributes": {"objectid": 3, "prompt": "<b>Where?</b>", "image_license": null},
                    "geometry": {"x": -117.19, "y": 34.05}
                }
            ]
        });

        let set: FeatureSet = serde_json::from_value(body).unwrap();

        assert_eq!(set.features.len(), 1);
        let feature = &set.features[0];
        assert_eq!(feature.required_i64(0, "objectid").unwrap(), 3);
        assert_eq!(feature.required_str(0, "prompt").unwrap(), "<b>Where?</b>");
        assert_eq!(feature.optional_str(0, "image_license").unwrap(), None);
        assert_eq!(feature.geometry, Some(Geometry { x: -117.19, y: 34.05 }));
    }

    #[test]
    fn test_field_lookup_ignores_case() {
        let feature: RawFeature =
            serde_json::from_value(json!({"attributes": {"OBJECTID": 9}})).unwrap();

        assert_eq!(feature.required_i64(0, "objectid").unwrap(), 9);
        assert!(feature.geometry.is_none());
    }

    #[test]
    fn test_wrong_attribute_type() {
        let feature: RawFeature =
            serde_json::from_value(json!({"attributes": {"objectid": "x", "hint": 5}})).unwrap();

        assert!(matches!(
            feature.required_i64(2, "objectid"),
            Err(FeatureError::InvalidAttribute { index: 2, field: "objectid", .. })
        ));
        assert!(matches!(
            feature.required_str(2, "hint"),
            Err(FeatureError::InvalidAttribute { field: "hint", .. })
        ));
        assert!(matches!(
            feature.required_str(2, "prompt"),
            Err(FeatureError::MissingAttribute { field: "prompt", .. })
        ));
    }
}
