//! # Treasure Hunt
//!
//! 地图寻宝答题：每道题对应一个地点、一张照片、一条提示和一个答案，
//! 玩家在地图上找到答案所在位置即算答对，全部答对后领取奖励。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP Client），只暴露能力
//! - `HttpExecutor` - 唯一的 Client owner，提供 get_json() 能力
//!
//! ### ② 数据源与业务能力层（Clients / Services）
//! - `clients/` - `FeatureService` 要素查询 + 图片地址解析（ArcGIS 实现）
//! - `services/record_builder` - 原始要素 → `QuizRecord`，并发解析、保持顺序
//! - `services/extent` - 由外包矩形宽度计算判定半径
//!
//! ### ③ 流程层（Workflow）
//! - `QuizSession` - 答题状态机（导航、作答、提示、完成判定）
//! - `view_state` - 从会话状态派生显示内容
//!
//! ### ④ 编排层（Orchestration）
//! - `ViewController` - 用户操作路由与按钮门控
//! - `App` - 启动流程与控制台交互循环
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ArcGisClient, FeatureService};
pub use config::{Config, HuntConfig};
pub use error::{AppError, AppResult};
pub use infrastructure::HttpExecutor;
pub use models::{Position, QuizRecord, RecordId};
pub use orchestrator::{prepare_session, App, UserAction, ViewController};
pub use workflow::{QuizSession, ViewState};
