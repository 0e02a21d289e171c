use crate::clients::LeetCodeClient;
use crate::config::Config;
use crate::services::{ArchiveWriter, Store};
use crate::utils::logging::{log_archive_stats, log_startup, log_sync_stats};
use crate::workflow::SyncEngine;
use anyhow::{Context, Result};
use tracing::{error, info};

/// 应用主结构
///
/// 数据库连接与 HTTP 客户端在启动时创建一次，之后显式传给各组件
pub struct App {
    config: Config,
    store: Store,
    client: LeetCodeClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        log_startup(&config.data_source, &config.answer_dir);

        let store = Store::connect(&config.data_source).await?;
        store.init_schema().await.context("初始化数据库表失败")?;

        let client = LeetCodeClient::new(&config)?;

        Ok(Self {
            config,
            store,
            client,
        })
    }

    /// 运行应用主逻辑：先同步（网络 → 数据库），再归档（数据库 → 文件）
    pub async fn run(&self) -> Result<()> {
        let sync_stats = SyncEngine::new(&self.client, self.store.clone(), &self.config)
            .run()
            .await
            .context("同步已通过题目失败")?;
        log_sync_stats(&sync_stats);

        info!("\n📁 正在写出代码文件...");
        let writer = ArchiveWriter::new(self.store.clone(), &self.config);
        match writer.write_all().await {
            Ok(stats) => {
                log_archive_stats(&stats, &self.config.answer_dir);
                Ok(())
            }
            Err(e) => {
                error!("❌ 归档中止: {}", e);
                Err(e).context("写出代码文件失败")
            }
        }
    }
}
