//! 答题会话 - 流程层
//!
//! 持有有序题目列表与当前选中题目，提供导航、作答、提示操作。
//! 会话状态完全由 `(records, selected)` 决定；序号、是否完成等都是
//! 每次现算的派生查询，不单独存储。
//!
//! 创建时校验题目标识唯一；之后所有操作在空会话或越界时都是空操作，不会返回错误。

use std::collections::HashSet;
use tracing::debug;

use crate::error::FeatureError;
use crate::models::{Position, QuizRecord, RecordId};
use crate::services::is_within_tolerance;

/// 答题会话
#[derive(Debug, Clone)]
pub struct QuizSession {
    records: Vec<QuizRecord>,
    selected: Option<RecordId>,
    tolerance_radius: f64,
}

impl QuizSession {
    /// 创建会话，题目顺序在此固定；创建后尚未选中任何题目
    ///
    /// 选中状态按标识定位题目，标识重复时返回 `FeatureError::DuplicateId`
    pub fn new(records: Vec<QuizRecord>, tolerance_radius: f64) -> Result<Self, FeatureError> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some((index, record)) = records.iter().enumerate().find(|(_, r)| !seen.insert(r.id)) {
            return Err(FeatureError::DuplicateId {
                index,
                id: record.id,
            });
        }

        Ok(Self {
            records,
            selected: None,
            tolerance_radius,
        })
    }

    pub fn records(&self) -> &[QuizRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn tolerance_radius(&self) -> f64 {
        self.tolerance_radius
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.selected
    }

    /// 当前选中的题目
    pub fn selected(&self) -> Option<&QuizRecord> {
        self.current_index().map(|idx| &self.records[idx])
    }

    fn index_of(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// 选中第一题；空会话时不做任何事
    pub fn select_first(&mut self) {
        self.selected = self.records.first().map(|r| r.id);
    }

    /// 前进到下一题，已在最后一题时不动
    ///
    /// 调用方需保证当前题已答对（见 `can_advance`），这里不做检查。
    pub fn next(&mut self) {
        if let Some(idx) = self.current_index() {
            if idx + 1 < self.records.len() {
                self.selected = Some(self.records[idx + 1].id);
            }
        }
    }

    /// 回到上一题，已在第一题时不动
    pub fn prev(&mut self) {
        if let Some(idx) = self.current_index() {
            if idx > 0 {
                self.selected = Some(self.records[idx - 1].id);
            }
        }
    }

    /// 标记题目已答对，重复调用无副作用
    ///
    /// # 返回
    /// 是否找到该题目；未知的 id 是空操作
    pub fn mark_solved(&mut self, id: RecordId) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.mark_solved();
                true
            }
            None => {
                debug!("mark_solved: 题目 {} 不存在，忽略", id);
                false
            }
        }
    }

    /// 标记题目已查看提示，重复调用无副作用
    ///
    /// # 返回
    /// 是否找到该题目；未知的 id 是空操作
    pub fn mark_hint_activated(&mut self, id: RecordId) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.mark_hint_activated();
                true
            }
            None => {
                debug!("mark_hint_activated: 题目 {} 不存在，忽略", id);
                false
            }
        }
    }

    /// 在地图上点击某处作答：落在当前题目的判定半径内即标记答对
    ///
    /// # 返回
    /// 本次点击是否命中
    pub fn solve_at(&mut self, click: &Position) -> bool {
        let hit = match self.selected() {
            Some(record) => is_within_tolerance(click, &record.position, self.tolerance_radius),
            None => return false,
        };
        if hit {
            if let Some(id) = self.selected {
                self.mark_solved(id);
            }
        }
        hit
    }

    /// 当前题目在列表中的位置；未选中时为 None
    pub fn current_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.index_of(id))
    }

    pub fn is_last(&self) -> bool {
        matches!(self.current_index(), Some(idx) if idx + 1 == self.records.len())
    }

    /// 所有题目都已答对
    pub fn is_complete(&self) -> bool {
        self.records.iter().all(QuizRecord::is_solved)
    }

    pub fn solved_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_solved()).count()
    }

    /// 当前题已答对且不是最后一题
    pub fn can_advance(&self) -> bool {
        self.selected().is_some_and(QuizRecord::is_solved) && !self.is_last()
    }

    /// 当前题不是第一题
    pub fn can_retreat(&self) -> bool {
        matches!(self.current_index(), Some(idx) if idx != 0)
    }

    /// 全部答对且位于最后一题时才能领奖
    pub fn can_claim(&self) -> bool {
        self.is_complete() && self.is_last()
    }

    /// 题号显示用：`(序号, 总数)`，序号从 1 开始
    pub fn question_number(&self) -> Option<(usize, usize)> {
        self.current_index().map(|idx| (idx + 1, self.records.len()))
    }
}
