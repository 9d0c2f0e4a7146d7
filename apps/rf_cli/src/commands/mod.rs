// apps/rf_cli/src/commands/mod.rs

//! CLI 子命令

pub mod fuse;
pub mod info;
pub mod validate;
