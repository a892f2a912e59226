// ==========================================
// 库存管理系统 - 平面文件导入器实现
// ==========================================
// 流程（单一格式）:
// 0. 读取导入源（不存在/为空 -> SourceMissing）
// 1. 格式解码（格式错误的行/元素跳过并计数）
// 2. 逐条 upsert（每条独立提交，不回滚）
// 3. 汇总报告
// ==========================================

use crate::domain::StoreFormat;
use crate::importer::decoder::decoder_for;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::ProductImporter;
use crate::importer::upsert::UpsertResolver;
use crate::store::FlatStores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// 导入状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportStatus {
    /// 已处理全部解码记录
    Completed,
    /// 导入源不存在或为空
    SourceMissing,
    /// JSON 文档整体无法解析
    InvalidDocument(String),
    /// 读取或写库失败（import-all 中记录后继续）
    Failed(String),
}

/// 单一格式导入报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub format: StoreFormat,
    pub status: ImportStatus,
    /// upsert 成功数（新建 + 合并）
    pub processed: usize,
    /// 名称为空未处理的记录数
    pub not_processed: usize,
    /// 格式错误被跳过的行/元素数
    pub skipped: usize,
    pub elapsed_ms: u64,
}

impl ImportReport {
    fn empty(format: StoreFormat, status: ImportStatus) -> Self {
        Self {
            format,
            status,
            processed: 0,
            not_processed: 0,
            skipped: 0,
            elapsed_ms: 0,
        }
    }
}

pub struct ProductImporterImpl {
    stores: Arc<FlatStores>,
    resolver: UpsertResolver,
}

impl ProductImporterImpl {
    pub fn new(stores: Arc<FlatStores>, resolver: UpsertResolver) -> Self {
        Self { stores, resolver }
    }
}

#[async_trait]
impl ProductImporter for ProductImporterImpl {
    async fn import_from(&self, format: StoreFormat) -> ImportResult<ImportReport> {
        let start = Instant::now();
        let store = self.stores.get(format);

        // ===== 阶段 0: 读取导入源 =====
        let bytes = match store.read_source()? {
            Some(bytes) => bytes,
            None => {
                tracing::info!(%format, path = %store.path().display(), "导入源不存在或为空");
                return Ok(ImportReport::empty(format, ImportStatus::SourceMissing));
            }
        };

        // ===== 阶段 1: 解码 =====
        let decoded = match decoder_for(format).decode(&bytes) {
            Ok(decoded) => decoded,
            Err(ImportError::InvalidDocument(msg)) => {
                tracing::warn!(%format, error = %msg, "文档无效，跳过导入");
                return Ok(ImportReport::empty(format, ImportStatus::InvalidDocument(msg)));
            }
            Err(e) => return Err(e),
        };

        // ===== 阶段 2: 逐条 upsert =====
        let mut report = ImportReport::empty(format, ImportStatus::Completed);
        report.skipped = decoded.skipped;
        for record in &decoded.records {
            let outcome = self
                .resolver
                .resolve(&record.name, record.quantity, record.unit_price)?;
            if outcome.is_processed() {
                report.processed += 1;
            } else {
                report.not_processed += 1;
            }
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            %format,
            processed = report.processed,
            not_processed = report.not_processed,
            skipped = report.skipped,
            elapsed_ms = report.elapsed_ms,
            "导入完成"
        );
        Ok(report)
    }

    async fn import_all(&self) -> Vec<ImportReport> {
        let mut reports = Vec::with_capacity(StoreFormat::IMPORT_ORDER.len());
        for format in StoreFormat::IMPORT_ORDER {
            let report = match self.import_from(format).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!(%format, error = %e, "导入失败，继续下一格式");
                    ImportReport::empty(format, ImportStatus::Failed(e.to_string()))
                }
            };
            reports.push(report);
        }
        reports
    }
}
