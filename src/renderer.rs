/// macroquad渲染模块
/// Render loop: 视频画面 + 签到确认提示 + egui考勤面板
use crate::attendance::{AttendanceRecord, Status};
use crate::types::{DecodedFrame, ScanEvent, ACK_HOLD_FRAMES};
use chrono::{DateTime, Local};
use crossbeam_channel::Receiver;
use egui_macroquad::egui;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::time::Instant;

/// 面板里保留的最近签到条数
const RECENT_SCANS: usize = 20;

/// 面板里的单行考勤状态
struct PanelEntry {
    name: String,
    reg_id: String,
    present: bool,
    last_seen: Option<DateTime<Local>>,
}

/// 渲染主线程: 接收解码帧与签到事件,绘制画面与状态
pub struct Renderer {
    rx_frame: Receiver<DecodedFrame>,
    rx_event: Receiver<ScanEvent>,

    entries: Vec<PanelEntry>,
    lookup: HashMap<String, usize>, // reg_id → entries下标
    present: usize,
    recent_scans: Vec<ScanEvent>,

    last_texture: Option<Texture2D>,
    video_width: u32,
    video_height: u32,
    decode_fps: f64,

    // 签到确认提示,按渲染帧计数
    ack_frames: u32,
    ack_name: String,

    render_count: u64,
    render_last: Instant,
    render_fps: f64,

    show_panel: bool,
}

impl Renderer {
    pub fn new(
        rx_frame: Receiver<DecodedFrame>,
        rx_event: Receiver<ScanEvent>,
        records: &[AttendanceRecord],
    ) -> Self {
        let entries: Vec<PanelEntry> = records
            .iter()
            .map(|r| PanelEntry {
                name: r.name.clone(),
                reg_id: r.reg_id.clone(),
                present: r.status == Status::Present,
                last_seen: r.last_seen,
            })
            .collect();
        let lookup = entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.reg_id.clone(), slot))
            .collect();
        let present = entries.iter().filter(|e| e.present).count();

        Self {
            rx_frame,
            rx_event,
            entries,
            lookup,
            present,
            recent_scans: Vec::new(),
            last_texture: None,
            video_width: 0,
            video_height: 0,
            decode_fps: 0.0,
            ack_frames: 0,
            ack_name: String::new(),
            render_count: 0,
            render_last: Instant::now(),
            render_fps: 0.0,
            show_panel: true,
        }
    }

    /// 渲染主循环,按Q退出
    pub async fn run(mut self) {
        loop {
            self.drain_channels();

            clear_background(BLACK);
            self.draw_video();
            self.draw_overlay();
            self.draw_panel();
            egui_macroquad::draw();

            self.render_count += 1;
            if self.render_last.elapsed().as_secs_f64() >= 1.0 {
                self.render_fps =
                    self.render_count as f64 / self.render_last.elapsed().as_secs_f64();
                self.render_last = Instant::now();
                self.render_count = 0;
            }

            if is_key_pressed(KeyCode::Tab) {
                self.show_panel = !self.show_panel;
            }
            if is_key_pressed(KeyCode::Q) {
                break;
            }

            next_frame().await;
        }

        println!("✅ 渲染线程退出");
    }

    fn drain_channels(&mut self) {
        // 只保留最新一帧
        while let Ok(frame) = self.rx_frame.try_recv() {
            self.video_width = frame.width;
            self.video_height = frame.height;
            self.decode_fps = frame.decode_fps;

            let texture = Texture2D::from_rgba8(
                frame.width as u16,
                frame.height as u16,
                &frame.rgba_data[..],
            );
            texture.set_filter(FilterMode::Linear);
            self.last_texture = Some(texture);
        }

        while let Ok(event) = self.rx_event.try_recv() {
            if let Some(&slot) = self.lookup.get(&event.reg_id) {
                let entry = &mut self.entries[slot];
                entry.present = true;
                entry.last_seen = Some(event.when);
            }
            self.present = event.present;
            self.ack_frames = ACK_HOLD_FRAMES;
            self.ack_name = format!("{} ({})", event.name, event.reg_id);

            self.recent_scans.push(event);
            if self.recent_scans.len() > RECENT_SCANS {
                self.recent_scans.remove(0);
            }
        }
    }

    fn draw_video(&self) {
        let texture = match &self.last_texture {
            Some(texture) => texture,
            None => {
                draw_text(
                    "Waiting for video stream...",
                    50.0,
                    screen_height() / 2.0,
                    30.0,
                    GRAY,
                );
                return;
            }
        };
        if self.video_width == 0 || self.video_height == 0 {
            return;
        }

        // 等比缩放,居中显示
        let (vw, vh) = (self.video_width as f32, self.video_height as f32);
        let scale = (screen_width() / vw).min(screen_height() / vh);
        let dest = vec2(vw * scale, vh * scale);
        draw_texture_ex(
            texture,
            (screen_width() - dest.x) / 2.0,
            (screen_height() - dest.y) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(dest),
                ..Default::default()
            },
        );
    }

    fn draw_overlay(&mut self) {
        if self.ack_frames > 0 {
            self.ack_frames -= 1;
            draw_text("Attendance Recorded", 50.0, 50.0, 40.0, GREEN);
            draw_text(&self.ack_name, 50.0, 90.0, 30.0, GREEN);
        }

        let status = format!(
            "Present {}/{} | decode {:.1}fps | render {:.1}fps | [Tab] panel  [Q] quit",
            self.present,
            self.entries.len(),
            self.decode_fps,
            self.render_fps,
        );
        draw_text(&status, 10.0, screen_height() - 10.0, 20.0, WHITE);
    }

    fn draw_panel(&mut self) {
        egui_macroquad::ui(|egui_ctx| {
            if !self.show_panel {
                return;
            }
            egui::Window::new("考勤面板")
                .default_pos(egui::pos2(10.0, 10.0))
                .default_size(egui::vec2(360.0, 500.0))
                .resizable(true)
                .show(egui_ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("出席:");
                        ui.colored_label(egui::Color32::GREEN, format!("{}", self.present));
                        ui.label(format!("/ {}", self.entries.len()));
                    });

                    ui.separator();

                    egui::CollapsingHeader::new("📋 名单")
                        .default_open(true)
                        .show(ui, |ui| {
                            egui::ScrollArea::vertical()
                                .max_height(260.0)
                                .show(ui, |ui| {
                                    for entry in &self.entries {
                                        ui.horizontal(|ui| {
                                            let (mark, color) = if entry.present {
                                                ("出席", egui::Color32::GREEN)
                                            } else {
                                                ("缺席", egui::Color32::GRAY)
                                            };
                                            ui.colored_label(color, mark);
                                            ui.label(format!(
                                                "{} ({})",
                                                entry.name, entry.reg_id
                                            ));
                                            if let Some(when) = entry.last_seen {
                                                ui.weak(when.format("%H:%M:%S").to_string());
                                            }
                                        });
                                    }
                                });
                        });

                    egui::CollapsingHeader::new("🕒 最近签到").show(ui, |ui| {
                        for event in self.recent_scans.iter().rev() {
                            ui.label(format!(
                                "{}  {} ({})",
                                event.when.format("%H:%M:%S"),
                                event.name,
                                event.reg_id
                            ));
                        }
                    });
                });
        });
    }
}
