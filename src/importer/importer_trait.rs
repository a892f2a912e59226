// ==========================================
// 库存管理系统 - 导入 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::{ParsedRecord, StoreFormat};
use crate::importer::error::ImportResult;
use crate::importer::product_importer::ImportReport;
use async_trait::async_trait;

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 平面文件 -> 库存表 导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 导入单一格式的平面文件
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入报告（源缺失/文档无效也以报告形式返回）
    /// - Err: 文件读取错误、数据库错误（已写入的记录不回滚）
    async fn import_from(&self, format: StoreFormat) -> ImportResult<ImportReport>;

    /// 依次导入 TXT -> JSON -> CSV
    ///
    /// # 说明
    /// - 三个格式无条件依次执行，前一个失败不阻断后一个
    /// - 不做跨格式回滚，允许部分生效
    async fn import_all(&self) -> Vec<ImportReport>;
}

// ==========================================
// RecordDecoder Trait
// ==========================================
// 用途: 字节 -> 导入记录序列（格式相关）
// 实现者: LineDecoder, DocumentDecoder, TabularDecoder
pub trait RecordDecoder: Send + Sync {
    /// 解码器对应的格式
    fn format(&self) -> StoreFormat;

    /// 解码全部记录
    ///
    /// # 返回
    /// - Ok(DecodeOutput): 成功解码的记录 + 被跳过的格式错误条数
    /// - Err(InvalidDocument): 文档整体不可解析（仅 JSON）
    fn decode(&self, bytes: &[u8]) -> ImportResult<DecodeOutput>;
}

/// 解码结果
#[derive(Debug, Default)]
pub struct DecodeOutput {
    pub records: Vec<ParsedRecord>,
    /// 格式错误被跳过的行/元素数
    pub skipped: usize,
}
