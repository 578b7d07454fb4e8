//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **启动流程**：加载配置 → 查询要素 → 构建题目 → 校准判定半径 → 创建会话
//! 2. **资源管理**：唯一持有 HttpExecutor（经由 ArcGisClient）
//! 3. **交互循环**：读取控制台命令，转交 ViewController，渲染结果
//! 4. **统计输出**：退出时汇总答题情况
//!
//! 构建任一步失败都不会产生可用的会话，错误直接返回给调用方。

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::clients::{ArcGisClient, FeatureService};
use crate::config::{Config, HuntConfig};
use crate::error::{AppResult, BusinessError};
use crate::infrastructure::HttpExecutor;
use crate::models::load_hunt_config;
use crate::orchestrator::console::{self, Command};
use crate::orchestrator::{ActionOutcome, UserAction, ViewController};
use crate::services::{calibrate_tolerance, fetch_records};
use crate::utils::logging;
use crate::workflow::QuizSession;

/// 查询要素、构建题目并创建会话（已选中第一题）
///
/// # 参数
/// - `service`: 要素服务
/// - `hunt`: 寻宝配置
/// - `max_concurrent`: 图片地址解析并发数
pub async fn prepare_session<S: FeatureService>(
    service: &S,
    hunt: &HuntConfig,
    max_concurrent: usize,
) -> AppResult<QuizSession> {
    let records = fetch_records(service, hunt.service_base(), max_concurrent).await?;

    let tolerance_radius = calibrate_tolerance(records.iter().map(|r| &r.position))
        .ok_or(BusinessError::EmptyHunt)?;

    logging::log_records_loaded(records.len(), tolerance_radius);

    let mut session = QuizSession::new(records, tolerance_radius)?;
    session.select_first();
    Ok(session)
}

/// 应用主结构
pub struct App {
    config: Config,
    controller: ViewController,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config.hunt_config_path, config.max_concurrent_lookups);

        // 加载寻宝配置
        let hunt = load_hunt_config(Path::new(&config.hunt_config_path))
            .await
            .context("无法加载寻宝配置")?;

        logging::init_log_file(&config.output_log_file, &hunt.title)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        let http = HttpExecutor::new(Duration::from_secs(config.request_timeout_secs))?;
        let client = ArcGisClient::new(http);

        let session = prepare_session(&client, &hunt, config.max_concurrent_lookups)
            .await
            .map_err(|e| {
                error!("❌ 题目构建失败: {}", e);
                e
            })
            .context("无法开始寻宝")?;

        Ok(Self {
            config,
            controller: ViewController::new(hunt, session),
        })
    }

    /// 运行交互循环，直到输入 quit 或标准输入结束
    pub async fn run(mut self) -> Result<()> {
        println!("{}", console::HELP);
        self.render();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            match console::parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => println!("{}", console::HELP),
                Ok(Command::Show) => self.render(),
                Ok(Command::Action(action)) => self.handle(action),
                Err(msg) => println!("{}", msg),
            }
        }

        self.finish()
    }

    fn handle(&mut self, action: UserAction) {
        let solving = self.controller.session().selected_id();
        let outcome = self.controller.dispatch(action);

        if let Some(msg) = console::render_outcome(&outcome) {
            println!("{}", msg);
        }

        let line = match (outcome, solving) {
            (ActionOutcome::Solved, Some(id)) => Some(format!("题目 {} 答对", id)),
            (ActionOutcome::Applied, Some(id)) if action == UserAction::RevealHint => {
                Some(format!("题目 {} 查看提示", id))
            }
            (ActionOutcome::Applied, _) if action == UserAction::ClaimPrize => {
                Some("全部完成，领取奖励".to_string())
            }
            _ => None,
        };
        if let Some(line) = line {
            if let Err(e) = logging::append_log_line(&self.config.output_log_file, &line) {
                warn!("写入日志文件失败: {}", e);
            }
        }

        if !matches!(outcome, ActionOutcome::Ignored { .. } | ActionOutcome::Missed { .. }) {
            self.render();
        }
    }

    fn render(&mut self) {
        if let Some(focus) = self.controller.take_map_focus() {
            println!("{}", console::render_map_focus(&focus));
        }
        print!("{}", console::render_view(&self.controller.view()));
    }

    fn finish(self) -> Result<()> {
        let session = self.controller.session();
        let hints = session
            .records()
            .iter()
            .filter(|r| r.is_hint_activated())
            .count();

        logging::append_log_line(
            &self.config.output_log_file,
            &format!("结束: 答对 {}/{}，使用提示 {}", session.solved_count(), session.len(), hints),
        )?;
        logging::print_final_stats(
            session.solved_count(),
            hints,
            session.len(),
            &self.config.output_log_file,
        );
        info!("👋 {} 结束，再见", self.controller.hunt().title);
        Ok(())
    }
}
