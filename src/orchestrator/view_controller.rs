//! 视图控制器 - 编排层
//!
//! 把用户操作转成对 `QuizSession` 的调用，并从会话状态派生出要显示的内容。
//!
//! ## 门控规则
//!
//! - 浮层（介绍 / 领奖）显示时遮住地图和按钮，只接受关闭浮层的操作
//! - Next 只在 `can_advance` 时生效；会话本身不检查，由这里保证
//! - Claim 只在 `can_claim` 时生效
//! - Hint 只在按钮可见时生效（未查看提示且未答对）

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::HuntConfig;
use crate::models::{Position, RecordId};
use crate::workflow::{derive_view, Overlays, QuizSession, ViewState};

/// 用户操作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserAction {
    Next,
    Prev,
    RevealHint,
    ClaimPrize,
    DismissInstructions,
    DismissCongrats,
    /// Esc 键，等同于关闭介绍浮层
    EscapeKey,
    /// 地图点击（来自地图组件的"选中坐标"事件）
    MapClick(Position),
}

/// 操作结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    /// 操作已生效
    Applied,
    /// 点击命中，当前题已答对
    Solved,
    /// 点击未命中
    Missed { distance: f64 },
    /// 按钮不可用或被浮层遮挡，操作被忽略
    Ignored { reason: &'static str },
}

/// 地图重新定位指令，每次选中题目变化时产生一次
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFocus {
    pub record_id: RecordId,
    pub target: Position,
    pub tolerance_radius: f64,
    pub init_center: Position,
    pub home_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

/// 视图控制器
pub struct ViewController {
    hunt: HuntConfig,
    session: QuizSession,
    overlays: Overlays,
    focused: Option<RecordId>,
}

impl ViewController {
    /// 创建视图控制器，会话应已调用过 `select_first`
    pub fn new(hunt: HuntConfig, session: QuizSession) -> Self {
        Self {
            hunt,
            session,
            overlays: Overlays::default(),
            focused: None,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn hunt(&self) -> &HuntConfig {
        &self.hunt
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    /// 当前应显示的内容
    pub fn view(&self) -> ViewState {
        derive_view(&self.session, &self.hunt, &self.overlays)
    }

    fn overlay_visible(&self) -> bool {
        self.overlays.congrats_visible
            || (!self.overlays.instructions_dismissed && self.session.selected().is_some())
    }

    /// 选中题目变化后返回一次地图定位指令，未变化时返回 None
    pub fn take_map_focus(&mut self) -> Option<MapFocus> {
        let selected = self.session.selected_id();
        if selected == self.focused {
            return None;
        }
        self.focused = selected;

        let record = self.session.selected()?;
        debug!("地图定位到题目 {} {}", record.id, record.position);
        Some(MapFocus {
            record_id: record.id,
            target: record.position,
            tolerance_radius: self.session.tolerance_radius(),
            init_center: Position::new(self.hunt.init_center[0], self.hunt.init_center[1]),
            home_zoom: self.hunt.home_zoom,
            min_zoom: self.hunt.min_zoom,
            max_zoom: self.hunt.max_zoom,
        })
    }

    /// 处理一个用户操作
    pub fn dispatch(&mut self, action: UserAction) -> ActionOutcome {
        let outcome = self.apply(action);
        match outcome {
            ActionOutcome::Ignored { reason } => warn!("操作 {:?} 被忽略: {}", action, reason),
            _ => debug!("操作 {:?} → {:?}", action, outcome),
        }
        outcome
    }

    fn apply(&mut self, action: UserAction) -> ActionOutcome {
        match action {
            UserAction::DismissInstructions | UserAction::EscapeKey => {
                self.overlays.instructions_dismissed = true;
                return ActionOutcome::Applied;
            }
            UserAction::DismissCongrats => {
                self.overlays.congrats_visible = false;
                return ActionOutcome::Applied;
            }
            _ if self.overlay_visible() => {
                return ActionOutcome::Ignored {
                    reason: "浮层正在显示",
                };
            }
            _ => {}
        }

        let Some(current) = self.session.selected() else {
            return ActionOutcome::Ignored {
                reason: "没有选中的题目",
            };
        };
        let current_id = current.id;

        match action {
            UserAction::Next => {
                if !self.session.can_advance() {
                    return ActionOutcome::Ignored {
                        reason: "当前题未答对或已是最后一题",
                    };
                }
                self.session.next();
                ActionOutcome::Applied
            }
            UserAction::Prev => {
                if !self.session.can_retreat() {
                    return ActionOutcome::Ignored {
                        reason: "已是第一题",
                    };
                }
                self.session.prev();
                ActionOutcome::Applied
            }
            UserAction::RevealHint => {
                if current.is_solved() || current.is_hint_activated() {
                    return ActionOutcome::Ignored {
                        reason: "提示按钮不可用",
                    };
                }
                self.session.mark_hint_activated(current_id);
                ActionOutcome::Applied
            }
            UserAction::ClaimPrize => {
                if !self.session.can_claim() {
                    return ActionOutcome::Ignored {
                        reason: "尚未完成全部题目",
                    };
                }
                info!("🏆 全部 {} 题已完成，领取奖励", self.session.len());
                self.overlays.congrats_visible = true;
                ActionOutcome::Applied
            }
            UserAction::MapClick(click) => {
                let distance = click.distance_to(&current.position);
                if self.session.solve_at(&click) {
                    info!("✓ 题目 {} 答对 (距离 {:.2})", current_id, distance);
                    ActionOutcome::Solved
                } else {
                    ActionOutcome::Missed { distance }
                }
            }
            UserAction::DismissInstructions | UserAction::EscapeKey | UserAction::DismissCongrats => {
                ActionOutcome::Applied
            }
        }
    }
}
