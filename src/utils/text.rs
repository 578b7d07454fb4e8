//! 富文本处理
//!
//! 题目、提示、答案都是 HTML 片段，控制台显示前转为纯文本。

use regex::Regex;
use std::sync::OnceLock;

fn break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>").expect("valid regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

fn blank_lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n+").expect("valid regex"))
}

/// HTML 片段转纯文本：换行标签变为换行，其余标签去掉，常见实体还原
pub fn html_to_text(html: &str) -> String {
    let text = break_re().replace_all(html, "\n");
    let text = tag_re().replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    blank_lines_re()
        .replace_all(text.trim(), "\n")
        .into_owned()
}
