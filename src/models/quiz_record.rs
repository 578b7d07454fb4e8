use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 题目的稳定标识（对应要素的 objectid）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 地图空间参考下的二维坐标
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 两点间的欧氏距离
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 图片版权信息，均为可选
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoCredits {
    pub attribution: Option<String>,
    pub source_reference_url: Option<String>,
    pub license: Option<String>,
    pub license_reference_url: Option<String>,
}

impl PhotoCredits {
    pub fn is_empty(&self) -> bool {
        self.attribution.is_none()
            && self.source_reference_url.is_none()
            && self.license.is_none()
            && self.license_reference_url.is_none()
    }
}

/// 一道寻宝题
///
/// 除 `solved` / `hint_activated` 外所有字段在构造后不再变化；
/// 这两个标志只能由 `QuizSession` 从 false 置为 true。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRecord {
    pub id: RecordId,
    pub position: Position,
    /// 题目（富文本）
    pub prompt: String,
    /// 提示（富文本）
    pub hint: String,
    /// 答案揭晓文字（富文本）
    pub exclamation: String,
    pub image_url: String,
    pub credits: PhotoCredits,
    solved: bool,
    hint_activated: bool,
}

impl QuizRecord {
    /// 创建新的题目，两个标志均为 false
    pub fn new(
        id: RecordId,
        position: Position,
        prompt: impl Into<String>,
        hint: impl Into<String>,
        exclamation: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            position,
            prompt: prompt.into(),
            hint: hint.into(),
            exclamation: exclamation.into(),
            image_url: image_url.into(),
            credits: PhotoCredits::default(),
            solved: false,
            hint_activated: false,
        }
    }

    pub fn with_credits(mut self, credits: PhotoCredits) -> Self {
        self.credits = credits;
        self
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_hint_activated(&self) -> bool {
        self.hint_activated
    }

    pub(crate) fn mark_solved(&mut self) {
        self.solved = true;
    }

    pub(crate) fn mark_hint_activated(&mut self) {
        self.hint_activated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_flags_start_false() {
        let record = QuizRecord::new(RecordId(7), Position::new(1.0, 2.0), "q", "h", "a", "img");

        assert!(!record.is_solved());
        assert!(!record.is_hint_activated());
        assert!(record.credits.is_empty());
    }

    #[test]
    fn test_distance_to() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);

        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }
}
