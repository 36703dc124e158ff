pub mod attendance; // 考勤数据系统
pub mod config; // 命令行配置
pub mod input; // 视频输入系统
pub mod renderer; // 渲染显示
pub mod scanner; // 二维码扫描系统
pub mod types; // 线程间共享数据结构

pub use crate::config::Args;
pub use crate::types::{DecodedFrame, LumaFrame, ScanEvent};
