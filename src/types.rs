use std::sync::Arc;
/// 考勤扫描系统数据结构定义
/// Data structures shared between decode / scan / render threads
use chrono::{DateTime, Local};

// ========== 公共常量 ==========

pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 720.0;

/// 签到确认提示停留的渲染帧数 (60fps下约2秒)
pub const ACK_HOLD_FRAMES: u32 = 120;

// ========== 数据结构 ==========

/// 已解码帧 (解码线程 → 渲染线程)
#[derive(Clone)]
pub struct DecodedFrame {
    pub rgba_data: Arc<Vec<u8>>, // 使用Arc共享数据,避免复制
    pub width: u32,
    pub height: u32,
    pub decode_fps: f64,
}

/// 亮度帧 (解码线程 → 扫描线程)
///
/// YUV420P的Y平面本身就是灰度图,二维码识别直接用
#[derive(Clone)]
pub struct LumaFrame {
    pub luma: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_id: u64,
}

/// 签到事件 (扫描线程 → 渲染线程)
#[derive(Clone, Debug)]
pub struct ScanEvent {
    pub name: String,
    pub reg_id: String,
    pub when: DateTime<Local>,
    /// 当前出席人数
    pub present: usize,
    /// 名单总人数
    pub total: usize,
}
