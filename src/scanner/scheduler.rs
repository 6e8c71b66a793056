//! 扫描调度：固定大小的worker池消费 (序号, URL) 任务
//! 结果按序号回填，输出顺序与输入一致，与完成先后无关

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::model::ScanRow;
use crate::config::ScanRequest;
use crate::error::ProbeResult;
use crate::fetcher::{build_client, scan_url};

/// worker异常退出、未回报结果时写入的错误
pub const TASK_ABORTED: &str = "scan task aborted";

/// 扫描调度器，持有整个扫描共享的HTTP客户端
#[derive(Debug, Clone)]
pub struct ScanScheduler {
    client: Client,
    concurrency: usize,
}

impl ScanScheduler {
    /// 按归一化后的请求创建调度器
    pub fn new(request: &ScanRequest) -> ProbeResult<Self> {
        Ok(Self {
            client: build_client(request)?,
            concurrency: request.concurrency,
        })
    }

    /// 实际并发数：min(配置并发, URL数)，至少为1
    pub fn effective_concurrency(&self, url_count: usize) -> usize {
        self.concurrency.min(url_count).max(1)
    }

    /// 执行扫描，每个URL恰好产生一行结果
    pub async fn run(&self, urls: &[String]) -> Vec<ScanRow> {
        if urls.is_empty() {
            return Vec::new();
        }

        let workers = self.effective_concurrency(urls.len());
        let started = Instant::now();
        info!("开始扫描：URL数={}，并发数={}", urls.len(), workers);

        // 任务队列一次性填满，worker取空后自然退出
        let (task_tx, task_rx) = mpsc::unbounded_channel::<(usize, String)>();
        for task in urls.iter().cloned().enumerate() {
            // 接收端此时一定存在
            let _ = task_tx.send(task);
        }
        drop(task_tx);
        let task_rx = Arc::new(Mutex::new(task_rx));

        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(usize, ScanRow)>();
        let mut pool = JoinSet::new();
        for _ in 0..workers {
            let client = self.client.clone();
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            pool.spawn(async move {
                loop {
                    let next = task_rx.lock().await.recv().await;
                    let Some((index, url)) = next else {
                        break;
                    };
                    let row = scan_url(&client, &url).await;
                    if result_tx.send((index, row)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        let mut slots: Vec<Option<ScanRow>> = vec![None; urls.len()];
        while let Some((index, row)) = result_rx.recv().await {
            slots[index] = Some(row);
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                warn!("扫描worker异常退出：{}", e);
            }
        }

        let rows: Vec<ScanRow> = slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| slot.unwrap_or_else(|| ScanRow::failed(url.as_str(), TASK_ABORTED)))
            .collect();

        let failed = rows.iter().filter(|row| !row.is_success()).count();
        info!(
            "扫描结束：耗时{:?}，成功={}，失败={}",
            started.elapsed(),
            rows.len() - failed,
            failed
        );
        rows
    }
}

/// 对外暴露的简化接口，不返回错误
/// 客户端无法构建时，所有URL都记为失败
pub async fn run_scan(urls: &[String], request: &ScanRequest) -> Vec<ScanRow> {
    match ScanScheduler::new(request) {
        Ok(scheduler) => scheduler.run(urls).await,
        Err(e) => {
            warn!("HTTP客户端构建失败，全部URL记为失败：{}", e);
            let message = e.to_string();
            urls.iter()
                .map(|url| ScanRow::failed(url.as_str(), message.as_str()))
                .collect()
        }
    }
}
