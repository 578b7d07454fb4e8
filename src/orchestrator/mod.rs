//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 启动流程：配置 → 要素 → 题目 → 判定半径 → 会话
//! - 控制台交互循环与最终统计
//!
//! ### `view_controller` - 视图控制器
//! - 把用户操作（Next / Prev / Hint / Claim / 关闭浮层 / 地图点击）转交给会话
//! - 负责按钮门控与浮层状态
//! - 选中题目变化时产生地图定位指令
//!
//! ### `console` - 控制台前端
//! - 命令解析与文本渲染
//!
//! ## 层次关系
//!
//! ```text
//! app (启动 + 交互循环)
//!     ↓
//! view_controller (用户操作 → 会话操作)
//!     ↓
//! workflow::QuizSession / view_state (状态机 + 视图派生)
//!     ↓
//! services (能力层：record_builder / extent)
//!     ↓
//! clients → infrastructure (要素服务 / HttpExecutor)
//! ```

pub mod app;
pub mod console;
pub mod view_controller;

// 重新导出主要类型
pub use app::{prepare_session, App};
pub use view_controller::{ActionOutcome, MapFocus, UserAction, ViewController};
