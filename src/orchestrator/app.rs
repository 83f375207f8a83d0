//! 批量答卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量答卷的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、构建共享 HTTP 客户端、获取审阅人资料
//! 2. **批量加载**：扫描待批改目录下的全部 PDF
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将答卷分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有答卷的处理结果

use crate::clients::{GradingClient, ProfileClient, RecommendationClient, ResultStoreClient};
use crate::config::Config;
use crate::orchestrator::submission_processor::{self, SubmissionOutcome};
use crate::utils::logging;
use crate::workflow::SubmissionCtx;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    grading: GradingClient,
    store: ResultStoreClient,
    recommendations: RecommendationClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(config.max_concurrent_submissions, config.auto_validate);

        // 超时是传输层策略，统一配置在共享的 HTTP 客户端上
        // reqwest::Client 内部是 Arc，克隆进各个客户端的开销极小
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("构建 HTTP 客户端失败")?;

        let grading = GradingClient::new(&config, http.clone());
        let store = ResultStoreClient::new(&config, http.clone());
        let recommendations = RecommendationClient::new(&config, http.clone());
        let profile = ProfileClient::new(&config, http);

        // 获取审阅人展示名；401 属于会话管理问题，原样向上抛出
        match profile.me().await {
            Ok(p) => info!("👤 审阅人: {}", p.name),
            Err(e) if e.is_upstream_auth() => return Err(e.into()),
            Err(e) => warn!("⚠️ 获取审阅人资料失败: {}", e),
        }

        Ok(Self {
            config,
            grading,
            store,
            recommendations,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待批改的答卷
        let all_submissions = self.load_submissions().await?;

        if all_submissions.is_empty() {
            warn!("⚠️ 没有找到待批改的 PDF 文件，程序结束");
            return Ok(());
        }

        let total = all_submissions.len();
        logging::log_submissions_found(total, self.config.max_concurrent_submissions);

        // 处理所有答卷
        let stats = self.process_all_submissions(all_submissions).await?;

        // 输出最终统计
        logging::print_final_stats(
            stats.validated,
            stats.graded,
            stats.no_content,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 扫描待批改目录
    async fn load_submissions(&self) -> Result<Vec<PathBuf>> {
        info!("\n📁 正在扫描待批改的答卷...");

        let folder = PathBuf::from(&self.config.submissions_folder);
        if !folder.exists() {
            anyhow::bail!("目录不存在: {}", self.config.submissions_folder);
        }

        let mut submissions = Vec::new();
        let mut entries = tokio::fs::read_dir(&folder)
            .await
            .with_context(|| format!("无法读取目录: {}", self.config.submissions_folder))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
            {
                submissions.push(path);
            }
        }

        // 固定处理顺序，方便对照日志
        submissions.sort();
        Ok(submissions)
    }

    /// 处理所有答卷
    async fn process_all_submissions(&self, all_submissions: Vec<PathBuf>) -> Result<ProcessingStats> {
        let max_concurrent = self.config.max_concurrent_submissions;
        let semaphore = Arc::new(Semaphore::new(max_concurrent));
        let total = all_submissions.len();
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total).step_by(max_concurrent) {
            let batch_end = (batch_start + max_concurrent).min(total);
            let batch = &all_submissions[batch_start..batch_end];
            let batch_num = (batch_start / max_concurrent) + 1;
            let total_batches = (total + max_concurrent - 1) / max_concurrent;

            logging::log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total);

            let batch_stats = self
                .process_batch(batch, batch_start, semaphore.clone())
                .await;

            stats.validated += batch_stats.validated;
            stats.graded += batch_stats.graded;
            stats.no_content += batch_stats.no_content;
            stats.failed += batch_stats.failed;

            logging::log_batch_complete(
                batch_num,
                batch_stats.validated + batch_stats.graded,
                batch_end - batch_start,
            );
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch: &[PathBuf],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> ProcessingStats {
        let mut handles = Vec::new();

        for (idx, path) in batch.iter().enumerate() {
            let submission_index = batch_start + idx + 1;
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            let ctx = SubmissionCtx::new(submission_index, file_name);

            // 每个任务拿到自己的客户端克隆（共享底层连接池）
            let grading = self.grading.clone();
            let store = self.store.clone();
            let recommendations = self.recommendations.clone();
            let config = self.config.clone();
            let path = path.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match submission_processor::process_submission(
                    grading,
                    store,
                    recommendations,
                    &path,
                    &ctx,
                    &config,
                )
                .await
                {
                    Ok(outcome) => Ok(outcome),
                    Err(e) => {
                        error!("{} ❌ 处理过程中发生错误: {}", ctx, e);
                        Err(e)
                    }
                }
            });
            handles.push((submission_index, handle));
        }

        // 等待本批所有任务完成
        let mut stats = ProcessingStats::default();

        for (submission_index, handle) in handles {
            match handle.await {
                Ok(Ok(SubmissionOutcome::Validated { .. })) => stats.validated += 1,
                Ok(Ok(SubmissionOutcome::Graded)) => stats.graded += 1,
                Ok(Ok(SubmissionOutcome::NoContent)) => stats.no_content += 1,
                Ok(Err(_)) => stats.failed += 1,
                Err(e) => {
                    error!("[答卷 {}] 任务执行失败: {}", submission_index, e);
                    stats.failed += 1;
                }
            }
        }

        stats
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    validated: usize,
    graded: usize,
    no_content: usize,
    failed: usize,
    total: usize,
}
