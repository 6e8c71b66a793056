//! 扫描任务编排：归一化 → 解析输入 → 并发探测 → 写报告 → 可选删除源文件

use std::path::Path;

use tracing::info;

use super::model::ScanResponse;
use super::scheduler::run_scan;
use crate::config::ScanRequest;
use crate::error::{DirProbeError, ProbeResult};
use crate::parser::parse_input_file;
use crate::report::{append_markdown_report, resolve_report_path};

/// 只扫描不落盘：解析输入并探测全部URL
/// 输入文件无法打开/读取时在任何请求发出前返回错误
pub async fn scan_file(request: &ScanRequest) -> ProbeResult<ScanResponse> {
    let request = request.clone().normalize();
    if request.input_file_path.as_os_str().is_empty() {
        return Err(DirProbeError::InvalidInput("请输入输入文件路径".to_string()));
    }

    let parsed = parse_input_file(&request.input_file_path)?;
    info!(
        "输入文件：{}，命中行数={}，去重URL数={}",
        request.input_file_path.display(),
        parsed.matched_lines,
        parsed.urls.len()
    );

    let rows = run_scan(&parsed.urls, &request).await;
    Ok(ScanResponse::assemble(parsed.matched_lines, parsed.urls.len(), rows))
}

/// 完整扫描任务：扫描并追加Markdown报告，按需删除源文件
pub async fn run_scan_job(request: ScanRequest) -> ProbeResult<ScanResponse> {
    let request = request.normalize();
    let mut response = scan_file(&request).await?;

    let report_path = resolve_report_path(&request.input_file_path, request.output_dir.as_deref());
    append_markdown_report(&report_path, &request.input_file_path, &response).await?;
    info!("报告已追加：{}", report_path.display());
    response.report_path = Some(report_path);

    if request.delete_source_after_run {
        remove_source(&request.input_file_path).await?;
    }

    Ok(response)
}

async fn remove_source(path: &Path) -> ProbeResult<()> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|source| DirProbeError::SourceDelete {
            path: path.to_path_buf(),
            source,
        })?;
    info!("源文件已删除：{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server::{Route, TestServer};

    async fn demo_server() -> TestServer {
        TestServer::start(vec![
            (
                "/home",
                Route::new(200, "<html><head><title>Demo</title></head><body>wp-content</body></html>")
                    .header("X-Powered-By", "PHP/8.2"),
            ),
            ("/b", Route::new(200, "<html><head><title>B</title></head></html>")),
            ("/err", Route::new(500, "boom")),
        ])
        .await
    }

    #[tokio::test]
    async fn test_scan_file_demo_scenario() {
        let server = demo_server().await;
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("source.txt");
        std::fs::write(&input, format!("200 120B 0.001s {}\n", server.url("/home"))).unwrap();

        let response = scan_file(&ScanRequest::builder(&input).build()).await.unwrap();
        assert_eq!(response.total_urls, 1);
        assert_eq!(response.succeeded, 1);
        assert_eq!(response.failed, 0);
        let row = &response.rows[0];
        assert_eq!(row.url, server.url("/home"));
        assert_eq!(row.title, "Demo");
        assert_eq!(row.components, vec!["X-Powered-By: PHP/8.2", "WordPress"]);
        assert_eq!(row.error, "");
        assert!(response.report_path.is_none());
    }

    #[tokio::test]
    async fn test_forbidden_line_with_server_error_and_duplicates() {
        let server = demo_server().await;
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hits.txt");
        let content = format!(
            "403 10B 0.1s {err}\n301 5B 0.1s {b}\n404 1B 0.1s {home}\n301 5B 0.1s {b}\n",
            err = server.url("/err"),
            b = server.url("/b"),
            home = server.url("/home"),
        );
        std::fs::write(&input, content).unwrap();

        let response = scan_file(&ScanRequest::builder(&input).build()).await.unwrap();
        assert_eq!(response.matched_lines, 3);
        assert_eq!(response.total_urls, 2);
        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.rows[0].error, "HTTP 500");
        assert_eq!(response.rows[1].title, "B");
        assert_eq!(response.failed, 1);
        assert_eq!(response.succeeded, 1);
    }

    #[tokio::test]
    async fn test_run_scan_job_writes_report_next_to_input() {
        let server = demo_server().await;
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("source.txt");
        std::fs::write(&input, format!("200 120B 0.001s {}\n", server.url("/home"))).unwrap();

        let response = run_scan_job(ScanRequest::builder(&input).build()).await.unwrap();
        let expected = dir.path().join("source_report.md");
        assert_eq!(response.report_path.as_deref(), Some(expected.as_path()));

        let report = std::fs::read_to_string(&expected).unwrap();
        assert!(report.contains("| URL | Title | Components | Error |"));
        assert!(report.contains(&server.url("/home")));
        assert!(report.contains("| Demo |"));
        assert!(input.exists());
    }

    #[tokio::test]
    async fn test_run_scan_job_output_dir_and_delete_source() {
        let server = demo_server().await;
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("source.txt");
        std::fs::write(&input, format!("301 120B 0.001s {}\n", server.url("/home"))).unwrap();
        let out_dir = dir.path().join("reports");
        std::fs::create_dir(&out_dir).unwrap();

        let request = ScanRequest::builder(&input)
            .output_dir(&out_dir)
            .delete_source_after_run(true)
            .build();
        let response = run_scan_job(request).await.unwrap();

        let expected = out_dir.join("source_report.md");
        assert_eq!(response.report_path.as_deref(), Some(expected.as_path()));
        assert!(expected.exists());
        assert!(!input.exists());
    }

    #[tokio::test]
    async fn test_empty_input_still_writes_placeholder_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.log");
        std::fs::write(&input, "404 nothing here\n").unwrap();

        let response = run_scan_job(ScanRequest::builder(&input).build()).await.unwrap();
        assert_eq!(response.total_urls, 0);
        assert!(response.rows.is_empty());

        let report = std::fs::read_to_string(dir.path().join("empty_report.md")).unwrap();
        assert!(report.contains("No URL found in matched lines"));
    }

    #[tokio::test]
    async fn test_fatal_input_errors() {
        let err = scan_file(&ScanRequest::default()).await.unwrap_err();
        assert!(matches!(err, DirProbeError::InvalidInput(_)));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = run_scan_job(ScanRequest::builder(&missing).build()).await.unwrap_err();
        assert!(matches!(err, DirProbeError::InputOpen { .. }));
        assert!(!dir.path().join("missing_report.md").exists());
    }
}
