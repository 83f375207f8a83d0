use correct_exam_submit::clients::{GradingClient, ProfileClient, ResultStoreClient};
use correct_exam_submit::clients::{GradingBackend, ResultStore};
use correct_exam_submit::models::SubmissionDocument;
use correct_exam_submit::utils::logging;
use correct_exam_submit::workflow::{CorrectionFlow, FlowState, SubmitOutcome};
use correct_exam_submit::Config;
use std::path::Path;
use std::time::Duration;

fn build_http(config: &Config) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .expect("构建 HTTP 客户端失败")
}

#[tokio::test]
#[ignore] // 默认忽略，需要本地后端并手动运行：cargo test -- --ignored
async fn test_correct_single_exam() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    let http = build_http(&config);

    // 加载答卷文件
    // 注意：请根据实际情况修改文件路径
    let pdf_path = Path::new("submissions/copie_test.pdf");
    let bytes = tokio::fs::read(pdf_path).await.expect("读取答卷文件失败");
    let document = SubmissionDocument::new("copie_test.pdf", bytes);

    // 创建批改流程
    let grading = GradingClient::new(&config, http.clone());
    let store = ResultStoreClient::new(&config, http);
    let mut flow = CorrectionFlow::new(grading, store);

    // 提交批改
    let outcome = flow.submit(&document).await.expect("提交批改失败");
    assert_eq!(outcome, SubmitOutcome::Graded, "答卷应该被成功批改");
    assert_eq!(flow.state(), FlowState::Graded);

    let session = flow.session().expect("批改后应该有评卷会话");
    println!(
        "学生 {} 得分 {}/{} ({}%)",
        session.display_student_name(),
        session.correct_count(),
        session.total_count(),
        session.percentage()
    );

    // 提交验证
    let result = flow.validate_all().await.expect("提交验证失败");
    println!("验证结果: {:?}", result);
    assert_eq!(flow.state(), FlowState::Validated);
}

#[tokio::test]
#[ignore]
async fn test_profile_me() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    let http = build_http(&config);

    // 测试获取审阅人资料
    let profile = ProfileClient::new(&config, http);
    let result = profile.me().await;

    assert!(result.is_ok(), "应该能够获取审阅人资料");
    println!("审阅人: {}", result.unwrap().name);
}

#[tokio::test]
#[ignore]
async fn test_grading_rejects_without_token() {
    // 初始化日志
    logging::init();

    // 加载配置（故意清空令牌）
    let mut config = Config::from_env();
    config.auth_token = String::new();
    let http = build_http(&config);

    let grading = GradingClient::new(&config, http);
    let document = SubmissionDocument::new("copie_test.pdf", vec![0x25, 0x50, 0x44, 0x46]);

    // 未鉴权的请求应该得到 401，并原样向上传递
    let err = grading
        .correct_exam(&document)
        .await
        .expect_err("无令牌的请求应该失败");
    assert!(err.is_upstream_auth(), "应该是上游鉴权错误: {}", err);
}

#[tokio::test]
#[ignore]
async fn test_save_result_roundtrip() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    let http = build_http(&config);

    // 直接保存一条结果（需要后端存在对应的练习和学生）
    let store = ResultStoreClient::new(&config, http);
    let result = store.save_result(2, 1, 1).await;

    match result {
        Ok(result_id) => println!("结果已保存, result_id={}", result_id),
        Err(e) => panic!("保存结果失败: {}", e),
    }
}
