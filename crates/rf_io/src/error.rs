// crates/rf_io/src/error.rs

//! IO 错误类型定义
//!
//! 提供 IO 模块的统一错误枚举。
//! 所有错误最终可转换为 RfError 以实现跨层错误传递。

use rf_foundation::RfError;
use std::path::PathBuf;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件格式识别失败
    #[error("无法识别文件格式: {path}")]
    UnknownFormat {
        /// 文件路径
        path: String,
    },

    /// 头部字段缺失
    #[error("头部字段缺失: {field}, 文件 {file}")]
    MissingHeaderField {
        /// 缺失的字段名
        field: &'static str,
        /// 文件路径
        file: PathBuf,
    },

    /// 头部字段无效
    #[error("头部字段无效: {file} 第{line}行: {message}")]
    InvalidHeader {
        /// 文件路径
        file: PathBuf,
        /// 行号（从 1 开始）
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 数据值无效
    #[error("数据值无效: {file} 第{line}行: {message}")]
    InvalidData {
        /// 文件路径
        file: PathBuf,
        /// 行号（从 1 开始，0 表示与具体行无关）
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 数据体不完整
    #[error("数据体不完整: {file} 期望 {expected} 个值, 实际 {actual}")]
    TruncatedData {
        /// 文件路径
        file: PathBuf,
        /// 期望值个数
        expected: usize,
        /// 实际值个数
        actual: usize,
    },

    /// 底层 IO 失败
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for RfError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::UnknownFormat { path } => {
                RfError::unsupported_format(path, vec!["asc".into(), "agr".into()])
            }
            IoError::MissingHeaderField { field, file } => {
                RfError::parse(file, 0, format!("头部字段缺失: {field}"))
            }
            IoError::InvalidHeader {
                file,
                line,
                message,
            }
            | IoError::InvalidData {
                file,
                line,
                message,
            } => RfError::parse(file, line, message),
            IoError::TruncatedData {
                file,
                expected,
                actual,
            } => RfError::parse(
                file,
                0,
                format!("数据体不完整: 期望 {expected} 个值, 实际 {actual}"),
            ),
            IoError::Io(e) => e.into(),
        }
    }
}
