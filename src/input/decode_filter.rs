/// FFmpeg解码过滤器模块
/// FFmpeg decode filter: YUV420P帧 → RGBA(渲染) + 亮度平面(扫描)
use crate::types::{DecodedFrame, LumaFrame};
use crossbeam_channel::Sender;
use ez_ffmpeg::filter::frame_filter::FrameFilter;
use ez_ffmpeg::filter::frame_filter_context::FrameFilterContext;
use ez_ffmpeg::{AVMediaType, Frame};
use std::sync::Arc;
use std::time::Instant;

/// 帧分发过滤器: 双输出 (渲染 + 扫描)
#[derive(Clone)]
pub struct ScanFilter {
    pub tx_render: Sender<DecodedFrame>, // 发送给渲染线程
    pub tx_scan: Sender<LumaFrame>,      // 发送给扫描线程
    frame_id: u64,
    count: usize,
    last: Instant,
    current_fps: f64,
}

impl ScanFilter {
    pub fn new(tx_render: Sender<DecodedFrame>, tx_scan: Sender<LumaFrame>) -> Self {
        Self {
            tx_render,
            tx_scan,
            frame_id: 0,
            count: 0,
            last: Instant::now(),
            current_fps: 0.0,
        }
    }
}

impl FrameFilter for ScanFilter {
    fn media_type(&self) -> AVMediaType {
        AVMediaType::AVMEDIA_TYPE_VIDEO
    }

    fn init(&mut self, _ctx: &FrameFilterContext) -> Result<(), String> {
        println!("✅ 解码线程启动");
        Ok(())
    }

    fn filter_frame(
        &mut self,
        frame: Frame,
        _ctx: &FrameFilterContext,
    ) -> Result<Option<Frame>, String> {
        unsafe {
            if frame.as_ptr().is_null() {
                return Ok(Some(frame));
            }

            let w = (*frame.as_ptr()).width as usize;
            let h = (*frame.as_ptr()).height as usize;

            let data_y = (*frame.as_ptr()).data[0];
            let data_u = (*frame.as_ptr()).data[1];
            let data_v = (*frame.as_ptr()).data[2];
            let y_stride = (*frame.as_ptr()).linesize[0] as usize;
            let uv_stride = (*frame.as_ptr()).linesize[1] as usize;

            // Y平面按行拷出,linesize可能大于宽度
            let mut luma = vec![0u8; w * h];
            for row in 0..h {
                let src = std::slice::from_raw_parts(data_y.add(row * y_stride), w);
                luma[row * w..(row + 1) * w].copy_from_slice(src);
            }

            // YUV420P → RGBA (BT.601)
            let mut rgba_data = vec![255u8; w * h * 4]; // 预填充alpha=255
            for row in 0..h {
                for col in 0..w {
                    let y_val = luma[row * w + col] as f32;
                    let u_val = *data_u.add((row / 2) * uv_stride + col / 2) as f32 - 128.0;
                    let v_val = *data_v.add((row / 2) * uv_stride + col / 2) as f32 - 128.0;

                    let idx = (row * w + col) * 4;
                    rgba_data[idx] = (y_val + 1.402 * v_val).clamp(0.0, 255.0) as u8;
                    rgba_data[idx + 1] =
                        (y_val - 0.344 * u_val - 0.714 * v_val).clamp(0.0, 255.0) as u8;
                    rgba_data[idx + 2] = (y_val + 1.772 * u_val).clamp(0.0, 255.0) as u8;
                    // alpha已经是255,无需设置
                }
            }

            self.frame_id += 1;
            self.count += 1;
            if self.last.elapsed().as_secs_f64() >= 1.0 {
                let elapsed = self.last.elapsed().as_secs_f64();
                self.current_fps = self.count as f64 / elapsed;

                // 每秒打印一次解码统计
                println!("📺 解码统计: {}帧 | {:.1}fps", self.count, self.current_fps);

                self.last = Instant::now();
                self.count = 0;
            }

            // try_send避免阻塞解码,消费端掉队时丢帧
            let _ = self.tx_render.try_send(DecodedFrame {
                rgba_data: Arc::new(rgba_data),
                width: w as u32,
                height: h as u32,
                decode_fps: self.current_fps,
            });
            let _ = self.tx_scan.try_send(LumaFrame {
                luma,
                width: w as u32,
                height: h as u32,
                frame_id: self.frame_id,
            });

            Ok(Some(frame))
        }
    }

    fn uninit(&mut self, _ctx: &FrameFilterContext) {
        println!("✅ 解码线程退出");
    }
}
