/// 二维码扫描系统 (QR Scan System)
///
/// 独立工作线程: 接收亮度帧 → rqrr识别 → 签到 → 写盘 → 通知渲染线程
pub mod payload;

pub use payload::Payload;

use crate::attendance::AttendanceBook;
use crate::types::{LumaFrame, ScanEvent};
use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use image::GrayImage;
use std::time::Instant;

/// 扫描线程主循环
pub fn scanner_thread(
    rx_luma: Receiver<LumaFrame>,
    tx_event: Sender<ScanEvent>,
    mut book: AttendanceBook,
) {
    println!("✅ 扫描线程启动");

    let mut count = 0u64;
    let mut last = Instant::now();

    while let Ok(frame) = rx_luma.recv() {
        let LumaFrame {
            luma,
            width,
            height,
            frame_id,
        } = frame;

        let gray = match GrayImage::from_raw(width, height, luma) {
            Some(img) => img,
            None => {
                eprintln!("❌ 灰度图构建失败: 帧{} ({}x{})", frame_id, width, height);
                continue;
            }
        };

        // 识别当前帧里的所有二维码
        let mut prepared = rqrr::PreparedImage::prepare(gray);
        for grid in prepared.detect_grids() {
            let (_meta, data) = match grid.decode() {
                Ok(decoded) => decoded,
                Err(e) => {
                    eprintln!("⚠️  二维码解码失败: {:?}", e);
                    continue;
                }
            };
            println!("📖 二维码内容: {}", data);

            match Payload::parse(&data) {
                Ok(payload) => {
                    if book.mark(&payload.name, &payload.reg_id) {
                        println!("✅ 签到成功: {} - {}", payload.name, payload.reg_id);
                        // 渲染线程掉队时丢弃事件,不阻塞扫描
                        let _ = tx_event.try_send(ScanEvent {
                            name: payload.name,
                            reg_id: payload.reg_id,
                            when: Local::now(),
                            present: book.present_count(),
                            total: book.records().len(),
                        });
                    }
                }
                Err(e) => eprintln!("⚠️  二维码格式错误: {}", e),
            }
        }

        // 每帧处理完都落盘,崩溃最多丢一帧的变更
        if let Err(e) = book.save() {
            eprintln!("❌ 考勤表写入失败: {}", e);
        }

        count += 1;
        if last.elapsed().as_secs_f64() >= 1.0 {
            let fps = count as f64 / last.elapsed().as_secs_f64();

            // 每秒打印一次扫描统计
            println!(
                "🔍 扫描统计: {}帧 | {:.1}fps | 出席 {}/{}",
                count,
                fps,
                book.present_count(),
                book.records().len()
            );

            last = Instant::now();
            count = 0;
        }
    }

    // 通道关闭,退出前再落一次盘
    if let Err(e) = book.save() {
        eprintln!("❌ 考勤表写入失败: {}", e);
    }
    println!("✅ 扫描线程退出");
}
