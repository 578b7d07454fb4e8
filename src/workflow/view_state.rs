//! 视图状态派生
//!
//! 每次渲染都由 `(QuizSession, HuntConfig, Overlays)` 现算出 `ViewState`，
//! 不缓存任何派生值。

use serde::Serialize;

use crate::config::HuntConfig;
use crate::models::{PhotoCredits, QuizRecord, RecordId};
use crate::workflow::QuizSession;

/// 浮层开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overlays {
    /// 介绍浮层已关闭
    pub instructions_dismissed: bool,
    /// 领奖浮层正在显示
    pub congrats_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelKind {
    Answer,
    Hint,
    Question,
}

impl PanelKind {
    pub fn label(self) -> &'static str {
        match self {
            PanelKind::Answer => "Answer:",
            PanelKind::Hint => "Hint:",
            PanelKind::Question => "Question:",
        }
    }
}

/// 面板强调方式：新出现的内容高亮，已过时的内容置灰
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    Highlight,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub html: String,
    pub emphasis: Emphasis,
}

/// 按钮状态；`Option` 为 None 表示按钮不显示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavButtons {
    pub prev_enabled: bool,
    pub hint_visible: bool,
    pub next_enabled: Option<bool>,
    pub claim_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub id: RecordId,
    pub number: usize,
    pub total: usize,
    pub image_url: String,
    pub credits: PhotoCredits,
    /// 自上而下：答案、提示、题目
    pub panels: Vec<Panel>,
    pub buttons: NavButtons,
}

impl QuestionView {
    /// "Question #2 of 5"
    pub fn label(&self) -> String {
        format!("Question #{} of {}", self.number, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroOverlay {
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub hero_image: String,
}

/// 领奖浮层：证书图片 + 下载地址
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CongratsOverlay {
    pub title: String,
    pub hero_image: String,
    pub certificate_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub header: String,
    pub question: Option<QuestionView>,
    pub intro: Option<IntroOverlay>,
    pub congrats: Option<CongratsOverlay>,
}

/// 由会话状态派生出当前应显示的内容
pub fn derive_view(session: &QuizSession, hunt: &HuntConfig, overlays: &Overlays) -> ViewState {
    let selected = session.selected();

    let question = selected.and_then(|record| {
        let (number, total) = session.question_number()?;
        Some(QuestionView {
            id: record.id,
            number,
            total,
            image_url: record.image_url.clone(),
            credits: record.credits.clone(),
            panels: panels(record),
            buttons: buttons(session, record),
        })
    });

    let intro = match selected {
        Some(record) if !overlays.instructions_dismissed => Some(IntroOverlay {
            title: hunt.title.clone(),
            description: hunt.description.clone(),
            instructions: hunt.instructions.clone(),
            hero_image: hunt
                .intro_image
                .clone()
                .unwrap_or_else(|| record.image_url.clone()),
        }),
        _ => None,
    };

    ViewState {
        header: format!("Treasure Hunt: {}", hunt.title),
        question,
        intro,
        congrats: overlays.congrats_visible.then(|| CongratsOverlay {
            title: hunt.title.clone(),
            hero_image: hunt.certificate_image.clone(),
            certificate_url: hunt.certificate_url.clone(),
        }),
    }
}

fn panels(record: &QuizRecord) -> Vec<Panel> {
    let mut panels = Vec::with_capacity(3);

    if record.is_solved() {
        panels.push(Panel {
            kind: PanelKind::Answer,
            html: record.exclamation.clone(),
            emphasis: Emphasis::Highlight,
        });
    }

    if record.is_hint_activated() {
        panels.push(Panel {
            kind: PanelKind::Hint,
            html: record.hint.clone(),
            emphasis: if record.is_solved() {
                Emphasis::Muted
            } else {
                Emphasis::Highlight
            },
        });
    }

    panels.push(Panel {
        kind: PanelKind::Question,
        html: record.prompt.clone(),
        emphasis: if record.is_solved() || record.is_hint_activated() {
            Emphasis::Muted
        } else {
            Emphasis::Highlight
        },
    });

    panels
}

fn buttons(session: &QuizSession, record: &QuizRecord) -> NavButtons {
    let last = session.is_last();
    NavButtons {
        prev_enabled: session.can_retreat(),
        hint_visible: !record.is_hint_activated() && !record.is_solved(),
        next_enabled: (!last).then(|| session.can_advance()),
        claim_enabled: last.then(|| session.is_complete()),
    }
}
