use clap::Parser;
/// 二维码考勤主程序
///
/// 三线程架构:
/// 1. 解码线程: FFmpeg拉流解码 → RGBA帧 + 亮度帧
/// 2. 扫描线程: 二维码识别 → 签到 → CSV落盘
/// 3. 主线程:   macroquad渲染显示
use crossbeam_channel::bounded;
use macroquad::prelude::Conf;
use mimalloc::MiMalloc;
use qrscan_rs::attendance::{load_roster, AttendanceBook};
use qrscan_rs::input::{decode_stream, ScanFilter};
use qrscan_rs::renderer::Renderer;
use qrscan_rs::scanner::scanner_thread;
use qrscan_rs::types::{WINDOW_HEIGHT, WINDOW_WIDTH};
use qrscan_rs::Args;
use std::path::Path;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn window_conf() -> Conf {
    Conf {
        window_title: "二维码考勤 - QR Attendance".to_string(),
        window_width: WINDOW_WIDTH as i32,
        window_height: WINDOW_HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    println!("🚀 二维码考勤系统启动");
    println!("📋 学生名单: {}", args.roster);
    println!("📝 考勤表: {}", args.attendance);

    let roster = match load_roster(Path::new(&args.roster)) {
        Ok(roster) => roster,
        Err(e) => {
            eprintln!("❌ 名单读取失败: {}", e);
            return;
        }
    };
    println!("✅ 名单加载完成: {}人", roster.len());

    let book = AttendanceBook::new(&args.attendance, &roster);

    // 解码端不阻塞,消费端掉队时丢帧,队列放短
    let (tx_render, rx_render) = bounded(2);
    let (tx_scan, rx_scan) = bounded(2);
    let (tx_event, rx_event) = bounded(16);

    let renderer = Renderer::new(rx_render, rx_event, book.records());

    // ========== 启动解码线程 ==========
    let camera_url = args.camera_url.clone();
    let filter = ScanFilter::new(tx_render, tx_scan);
    std::thread::spawn(move || {
        decode_stream(&camera_url, filter);
    });

    // ========== 启动扫描线程 ==========
    std::thread::spawn(move || {
        scanner_thread(rx_scan, tx_event, book);
    });

    println!("📖 扫描器就绪,请将二维码对准摄像头...");

    // ========== 主线程: 渲染 ==========
    renderer.run().await;

    println!("👋 考勤结束,结果保存在 {}", args.attendance);
}
