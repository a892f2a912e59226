// ==========================================
// 库存管理系统 - 导入层
// ==========================================
// 职责: 平面文件 (TXT/JSON/CSV) -> 库存表
// 流程: 读取导入源 -> 格式解码 -> 按名 upsert -> 计数
// ==========================================

// 模块声明
pub mod coercion;
pub mod decoder;
pub mod error;
pub mod importer_trait;
pub mod product_importer;
pub mod upsert;

// 重导出核心类型
pub use coercion::{coerce_decimal, coerce_decimal_value, coerce_int, coerce_int_value};
pub use decoder::{decoder_for, DocumentDecoder, LineDecoder, TabularDecoder};
pub use error::{ImportError, ImportResult};
pub use product_importer::{ImportReport, ImportStatus, ProductImporterImpl};
pub use upsert::{UpsertOutcome, UpsertResolver};

// 重导出 Trait 接口
pub use importer_trait::{DecodeOutput, ProductImporter, RecordDecoder};
