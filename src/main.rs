//! rsdirprobe 命令行入口

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rsdirprobe::{ScanRequest, run_scan_job};

/// 探测目录扫描结果中 200/301/403 命中的URL，输出标题与技术指纹报告
#[derive(Debug, Parser)]
#[command(name = "rsdirprobe", version, about)]
struct Cli {
    /// 目录扫描结果文件（如 dirsearch 输出）
    input: Option<PathBuf>,

    /// 从JSON文件加载扫描请求，命令行参数优先
    #[arg(long, value_name = "FILE")]
    request: Option<PathBuf>,

    /// 报告输出目录，默认与输入文件同目录
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// 并发数（1-100，默认30）
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// 单请求超时秒数（1-120，默认5）
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// 跟随重定向
    #[arg(long)]
    follow_redirects: bool,

    /// 扫描完成后删除源文件
    #[arg(long)]
    delete_source: bool,

    /// 以JSON输出完整结果
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_request(self) -> anyhow::Result<ScanRequest> {
        let mut request = match &self.request {
            Some(path) => ScanRequest::from_json_file(path)
                .with_context(|| format!("加载请求文件失败：{}", path.display()))?,
            None => ScanRequest::default(),
        };

        if let Some(input) = self.input {
            request.input_file_path = input;
        }
        if let Some(dir) = self.output_dir {
            request.output_dir = Some(dir);
        }
        if let Some(concurrency) = self.concurrency {
            request.concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            request.timeout_seconds = timeout;
        }
        request.follow_redirect |= self.follow_redirects;
        request.delete_source_after_run |= self.delete_source;

        Ok(request.normalize())
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    let request = cli.into_request()?;
    anyhow::ensure!(
        !request.input_file_path.as_os_str().is_empty(),
        "缺少输入文件：请指定 <INPUT> 或在 --request 中提供 inputFilePath"
    );

    let response = run_scan_job(request).await.context("扫描失败")?;

    if json {
        println!("{}", response.to_pretty_json()?);
        return Ok(());
    }

    for row in &response.rows {
        println!("{}", row);
    }
    if let Some(path) = &response.report_path {
        println!("报告：{}", path.display());
    }
    println!(
        "命中行数：{}，URL数：{}，成功：{}，失败：{}",
        response.matched_lines, response.total_urls, response.succeeded, response.failed
    );
    Ok(())
}
