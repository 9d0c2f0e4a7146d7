// crates/rf_foundation/src/lib.rs

//! RasterFuse Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`float`]: 数值常量和安全浮点运算
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 thiserror
//! 2. **层次化**: 基础层只定义核心错误，融合算法相关的降级分支在 rf_fusion 中就地处理
//! 3. **可追溯**: 支持错误链
//!
//! # 示例
//!
//! ```
//! use rf_foundation::error::{RfError, RfResult};
//!
//! fn read_config() -> RfResult<()> {
//!     Err(RfError::config("配置文件格式错误"))
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;

// 重导出常用类型
pub use error::{RfError, RfResult};
pub use float::{safe_div, DEFAULT_EPSILON, SAFE_DIV_EPSILON};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{RfError, RfResult};
    pub use crate::float::{safe_div, DEFAULT_EPSILON};
}
