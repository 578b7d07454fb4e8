//! 控制台前端
//!
//! 替代地图组件与页面：从标准输入读取命令，把 `ViewState` 渲染为文本。

use std::fmt::Write;

use crate::models::{PhotoCredits, Position};
use crate::orchestrator::{ActionOutcome, MapFocus, UserAction};
use crate::utils::text::html_to_text;
use crate::workflow::{Emphasis, NavButtons, ViewState};

/// 控制台命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Action(UserAction),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
命令:
  next | n          下一题
  prev | p          上一题
  hint | h          查看提示
  click <x> <y>     在地图上点击
  claim             领取奖励
  ok                关闭介绍
  esc               关闭介绍 (Esc)
  close             关闭领奖页
  show              重新显示当前题目
  help              显示帮助
  quit | q          退出";

/// 解析一行输入
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Show);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "next" | "n" => Command::Action(UserAction::Next),
        "prev" | "p" => Command::Action(UserAction::Prev),
        "hint" | "h" => Command::Action(UserAction::RevealHint),
        "claim" => Command::Action(UserAction::ClaimPrize),
        "ok" | "start" => Command::Action(UserAction::DismissInstructions),
        "esc" | "escape" => Command::Action(UserAction::EscapeKey),
        "close" => Command::Action(UserAction::DismissCongrats),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "click" | "c" => {
            let mut coord = || -> Result<f64, String> {
                parts
                    .next()
                    .ok_or_else(|| "用法: click <x> <y>".to_string())?
                    .parse::<f64>()
                    .map_err(|e| format!("坐标格式错误: {}", e))
            };
            let x = coord()?;
            let y = coord()?;
            Command::Action(UserAction::MapClick(Position::new(x, y)))
        }
        other => return Err(format!("未知命令: {}（输入 help 查看帮助）", other)),
    };

    Ok(command)
}

/// 渲染整个视图
pub fn render_view(view: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(out, "{}", view.header);
    let _ = writeln!(out, "{}", "=".repeat(60));

    if let Some(congrats) = &view.congrats {
        let _ = writeln!(out, "🎉 Congratulations! You completed {}!", congrats.title);
        let _ = writeln!(out, "[image] {}", congrats.hero_image);
        let _ = writeln!(out, "Download your certificate: {}", congrats.certificate_url);
        let _ = writeln!(out, "   (close 关闭)");
        return out;
    }

    if let Some(intro) = &view.intro {
        let _ = writeln!(out, "{}", intro.title);
        let _ = writeln!(out, "{}", html_to_text(&intro.description));
        let _ = writeln!(out, "\n{}", html_to_text(&intro.instructions));
        let _ = writeln!(out, "[image] {}", intro.hero_image);
        let _ = writeln!(out, "   (ok / esc 开始)");
        return out;
    }

    let Some(question) = &view.question else {
        let _ = writeln!(out, "(没有题目)");
        return out;
    };

    let _ = writeln!(out, "{}", question.label());
    let _ = writeln!(out, "[image] {}", question.image_url);
    if let Some(credits) = render_credits(&question.credits) {
        let _ = writeln!(out, "  {}", credits);
    }
    for panel in &question.panels {
        let marker = match panel.emphasis {
            Emphasis::Highlight => "»",
            Emphasis::Muted => " ",
        };
        let _ = writeln!(
            out,
            "{} {} {}",
            marker,
            panel.kind.label(),
            html_to_text(&panel.html)
        );
    }
    let _ = writeln!(out, "{}", render_buttons(&question.buttons));
    out
}

fn render_credits(credits: &PhotoCredits) -> Option<String> {
    if credits.is_empty() {
        return None;
    }
    let mut parts = Vec::new();
    if let Some(attribution) = &credits.attribution {
        parts.push(format!("Photo: {}", attribution));
    }
    if let Some(url) = &credits.source_reference_url {
        parts.push(format!("<{}>", url));
    }
    if let Some(license) = &credits.license {
        parts.push(format!("License: {}", license));
    }
    if let Some(url) = &credits.license_reference_url {
        parts.push(format!("<{}>", url));
    }
    Some(parts.join(" "))
}

fn render_buttons(buttons: &NavButtons) -> String {
    let button = |label: &str, enabled: bool| {
        if enabled {
            format!("[{}]", label)
        } else {
            format!("({})", label)
        }
    };

    let mut row = vec![button("Prev", buttons.prev_enabled)];
    if buttons.hint_visible {
        row.push(button("Psst...need a hint?", true));
    }
    if let Some(enabled) = buttons.next_enabled {
        row.push(button("Next", enabled));
    }
    if let Some(enabled) = buttons.claim_enabled {
        row.push(button("Claim. Your. PRIZE!!!", enabled));
    }
    row.join("  ")
}

/// 地图定位提示
pub fn render_map_focus(focus: &MapFocus) -> String {
    format!(
        "🗺  地图定位: 题目 {}，缩放 {} [{}-{}]，判定半径 {}",
        focus.record_id, focus.home_zoom, focus.min_zoom, focus.max_zoom, focus.tolerance_radius
    )
}

/// 操作结果提示
pub fn render_outcome(outcome: &ActionOutcome) -> Option<String> {
    match outcome {
        ActionOutcome::Solved => Some("✓ 找到了！".to_string()),
        ActionOutcome::Missed { distance } => Some(format!("✗ 不对，再找找（距离 {:.2}）", distance)),
        ActionOutcome::Ignored { reason } => Some(format!("(无效操作: {})", reason)),
        ActionOutcome::Applied => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;
    use crate::workflow::{CongratsOverlay, Panel, PanelKind, QuestionView};

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("n").unwrap(), Command::Action(UserAction::Next));
        assert_eq!(parse_command("  PREV ").unwrap(), Command::Action(UserAction::Prev));
        assert_eq!(parse_command("").unwrap(), Command::Show);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(
            parse_command("click 1.5 -2").unwrap(),
            Command::Action(UserAction::MapClick(Position::new(1.5, -2.0)))
        );
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("click 1").is_err());
        assert!(parse_command("click a b").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_render_question() {
        let view = ViewState {
            header: "Treasure Hunt: Campus".to_string(),
            question: Some(QuestionView {
                id: RecordId(1),
                number: 1,
                total: 2,
                image_url: "img1".to_string(),
                credits: PhotoCredits {
                    attribution: Some("Jane".to_string()),
                    ..Default::default()
                },
                panels: vec![Panel {
                    kind: PanelKind::Question,
                    html: "<b>Where</b> is it?".to_string(),
                    emphasis: Emphasis::Highlight,
                }],
                buttons: NavButtons {
                    prev_enabled: false,
                    hint_visible: true,
                    next_enabled: Some(false),
                    claim_enabled: None,
                },
            }),
            intro: None,
            congrats: None,
        };

        let text = render_view(&view);

        assert!(text.contains("Question #1 of 2"));
        assert!(text.contains("» Question: Where is it?"));
        assert!(text.contains("Photo: Jane"));
        assert!(text.contains("(Prev)  [Psst...need a hint?]  (Next)"));
    }

    #[test]
    fn test_render_congrats() {
        let view = ViewState {
            header: "Treasure Hunt: Campus".to_string(),
            question: None,
            intro: None,
            congrats: Some(CongratsOverlay {
                title: "Campus".to_string(),
                hero_image: "./certificate.jpg".to_string(),
                certificate_url: "./certificate.pdf".to_string(),
            }),
        };

        let text = render_view(&view);

        assert!(text.contains("You completed Campus!"));
        assert!(text.contains("[image] ./certificate.jpg"));
        assert!(text.contains("Download your certificate: ./certificate.pdf"));
    }
}
