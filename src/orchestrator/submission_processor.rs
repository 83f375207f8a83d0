//! 单份答卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块驱动单份答卷走完完整批改流程，是答卷级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **读取文件**：加载答卷 PDF 字节
//! 2. **流程调度**：创建并驱动 `CorrectionFlow`
//! 3. **摘要输出**：学生、练习、日期、得分
//! 4. **自动验证**：按配置提交验证并报告结果 id
//! 5. **学习建议**：按配置拉取并原样展示

use crate::clients::{GradingClient, RecommendationClient, ResultStoreClient};
use crate::config::Config;
use crate::models::submission::SubmissionDocument;
use crate::services::ValidateOutcome;
use crate::workflow::{CorrectionFlow, SubmissionCtx, SubmitOutcome};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 单份答卷的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 已批改并成功验证
    Validated { result_id: i64 },
    /// 已批改，等待人工审阅（未开启自动验证）
    Graded,
    /// 评卷服务未返回可评分内容
    NoContent,
}

/// 处理单份答卷
///
/// # 参数
/// - `grading`: 评卷服务客户端
/// - `store`: 结果存储客户端
/// - `recommendations`: 学习建议客户端
/// - `path`: 答卷 PDF 路径
/// - `ctx`: 答卷上下文（用于日志）
/// - `config`: 配置
pub async fn process_submission(
    grading: GradingClient,
    store: ResultStoreClient,
    recommendations: RecommendationClient,
    path: &Path,
    ctx: &SubmissionCtx,
    config: &Config,
) -> Result<SubmissionOutcome> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("无法读取答卷文件: {}", path.display()))?;

    let document = SubmissionDocument::new(ctx.file_name.clone(), bytes);
    let mut flow = CorrectionFlow::new(grading, store);

    // ========== 流程 1: 提交批改 ==========
    info!("{} 📤 正在提交批改...", ctx);

    match flow.submit(&document).await? {
        SubmitOutcome::Graded => {}
        SubmitOutcome::NoGradableContent => {
            warn!("{} ⚠️ 未找到可评分内容，跳过", ctx);
            return Ok(SubmissionOutcome::NoContent);
        }
        SubmitOutcome::Aborted => {
            warn!("{} ⚠️ 批改响应被丢弃，跳过", ctx);
            return Ok(SubmissionOutcome::NoContent);
        }
    }

    let session = flow.session().context("批改完成但评卷会话缺失")?;
    let student_ref = session.student_ref;
    let exam_ref = session.exam_ref;

    info!(
        "{} 👤 学生: {} | 练习: #{} | 日期: {}",
        ctx,
        session.display_student_name(),
        session.exam_ref,
        session.submission_date.as_deref().unwrap_or("Inconnue")
    );
    info!(
        "{} 📊 得分: {}/{} ({}%)",
        ctx,
        session.correct_count(),
        session.total_count(),
        session.percentage()
    );

    if config.verbose_logging {
        for result in session.results.all() {
            info!(
                "{}   {} | 作答: {} | 正确: {} | 得分: {}",
                ctx, result.question_ref, result.student_answer, result.correct_answer, result.score
            );
        }
    }

    // ========== 流程 2: 提交验证（可选） ==========
    if !config.auto_validate {
        info!("{} 📝 批改完成，等待人工审阅", ctx);
        return Ok(SubmissionOutcome::Graded);
    }

    let result_id = match flow.validate_all().await? {
        ValidateOutcome::Validated { result_id } => result_id,
        ValidateOutcome::Aborted => {
            warn!("{} ⚠️ 验证响应被丢弃，会话保持未验证", ctx);
            return Ok(SubmissionOutcome::Graded);
        }
    };

    info!("{} ✅ 验证成功，结果 id: {}", ctx, result_id);

    // ========== 流程 3: 学习建议（可选，失败不影响批改结果） ==========
    if config.fetch_recommendations {
        match recommendations.for_student(student_ref, Some(exam_ref)).await {
            Ok(rec) => log_recommendation(ctx, &rec),
            Err(e) => warn!("{} ⚠️ 获取学习建议失败: {}", ctx, e),
        }
    }

    Ok(SubmissionOutcome::Validated { result_id })
}

/// 原样展示学习建议，内容由上游生成
fn log_recommendation(ctx: &SubmissionCtx, rec: &crate::clients::Recommendation) {
    info!("{} 💡 学习建议:", ctx);
    for s in &rec.strengths {
        info!("{}   [优势] {}", ctx, s);
    }
    for w in &rec.weaknesses {
        info!("{}   [待提高] {}", ctx, w);
    }
    for r in &rec.recommendations {
        info!("{}   [建议] {}", ctx, r);
    }
    for res in &rec.resources {
        info!("{}   [资源] {}", ctx, res);
    }
}
