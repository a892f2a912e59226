// ==========================================
// 平面文件持久化API
// ==========================================
// 职责: 保存到 TXT/JSON/CSV、查看文件内容、导入到库存表
// 说明: 保存请求的参数为宽松文本，在此处完成数值转换
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::{LogEntry, StoreFormat};
use crate::i18n::t_with_args;
use crate::importer::{coerce_decimal, coerce_int, ImportReport, ImportStatus, ProductImporter};
use crate::store::FlatStores;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 保存请求缺省数量
pub const DEFAULT_SAVE_QUANTITY: i64 = 1;
/// 保存请求缺省单价
pub const DEFAULT_SAVE_PRICE: f64 = 1.0;

/// 保存响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    /// 实际写入的条目
    pub entry: LogEntry,
    /// 提示消息
    pub message: String,
}

/// 导入响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    pub report: ImportReport,
    /// 提示消息
    pub message: String,
}

pub struct PersistenceApi {
    stores: Arc<FlatStores>,
    importer: Arc<dyn ProductImporter>,
}

impl PersistenceApi {
    pub fn new(stores: Arc<FlatStores>, importer: Arc<dyn ProductImporter>) -> Self {
        Self { stores, importer }
    }

    /// 保存一条记录到指定格式
    ///
    /// # 参数
    /// - name: 名称（缺失/空白时使用格式缺省名）
    /// - quantity: 数量文本（无法解析时为 1）
    /// - price: 单价文本（无法解析时为 1.0，支持小数逗号）
    pub fn save(
        &self,
        format: StoreFormat,
        name: Option<&str>,
        quantity: Option<&str>,
        price: Option<&str>,
    ) -> ApiResult<SaveResponse> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(format.default_product_name());
        let entry = LogEntry::now(
            name,
            coerce_int(quantity, DEFAULT_SAVE_QUANTITY),
            coerce_decimal(price, DEFAULT_SAVE_PRICE),
        );

        let written = self.stores.get(format).append(&entry)?;
        tracing::info!(%format, name = %written.name, quantity = written.quantity, "已保存到平面文件");

        Ok(SaveResponse {
            entry: written,
            message: t_with_args("store.saved", &[("file", format.file_name())]),
        })
    }

    /// 查看指定格式的全部内容
    pub fn view(&self, format: StoreFormat) -> ApiResult<String> {
        Ok(self.stores.get(format).render()?)
    }

    /// 导入单一格式
    pub async fn import(&self, format: StoreFormat) -> ApiResult<ImportApiResponse> {
        let report = self.importer.import_from(format).await?;
        Ok(to_response(report))
    }

    /// 依次导入 TXT -> JSON -> CSV
    pub async fn import_all(&self) -> Vec<ImportApiResponse> {
        self.importer
            .import_all()
            .await
            .into_iter()
            .map(to_response)
            .collect()
    }
}

fn to_response(report: ImportReport) -> ImportApiResponse {
    let format = report.format;
    let message = match &report.status {
        ImportStatus::Completed => t_with_args(
            "import.done",
            &[("format", format.label()), ("count", report.processed.to_string().as_str())],
        ),
        ImportStatus::SourceMissing => {
            t_with_args("import.source_missing", &[("file", format.file_name())])
        }
        ImportStatus::InvalidDocument(_) => {
            t_with_args("import.invalid_document", &[("file", format.file_name())])
        }
        ImportStatus::Failed(reason) => t_with_args(
            "import.failed",
            &[("format", format.label()), ("reason", reason.as_str())],
        ),
    };
    ImportApiResponse { report, message }
}
