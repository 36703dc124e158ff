/// 网络视频流解码模块
/// Network stream decoder with bounded reconnect
use super::decode_filter::ScanFilter;
use ez_ffmpeg::core::context::null_output::create_null_output;
use ez_ffmpeg::filter::frame_pipeline_builder::FramePipelineBuilder;
use ez_ffmpeg::{AVMediaType, FfmpegContext};

/// 断流后的最大重连次数
const MAX_RETRIES: u32 = 3;

/// 拉流解码一次,阻塞直到流结束
fn run_stream(camera_url: &str, filter: ScanFilter) -> Result<(), String> {
    let pipe: FramePipelineBuilder = AVMediaType::AVMEDIA_TYPE_VIDEO.into();
    let pipe = pipe.filter("scan", Box::new(filter));
    let out = create_null_output().add_frame_pipeline(pipe);

    // IP摄像头的MJPEG流多为yuvj系列像素格式,统一转成yuv420p
    let ctx = FfmpegContext::builder()
        .input(camera_url)
        .filter_desc("format=yuv420p")
        .output(out)
        .build()
        .map_err(|e| format!("构建失败: {}", e))?;

    let sch = ctx.start().map_err(|e| format!("启动失败: {}", e))?;
    let _ = sch.wait();
    Ok(())
}

/// 解码线程入口: 首次连不上直接退出进程,中途断流有限重连
pub fn decode_stream(camera_url: &str, filter: ScanFilter) {
    println!("📹 摄像头地址: {}", camera_url);

    if let Err(e) = run_stream(camera_url, filter.clone()) {
        eprintln!("❌ 无法连接IP摄像头: {}", e);
        std::process::exit(1);
    }

    // 首次连接成功过,之后断流按次数重连
    let mut retry_count = 0;
    while retry_count < MAX_RETRIES {
        retry_count += 1;
        println!("🔄 视频流中断,重连中 ({}/{})", retry_count, MAX_RETRIES);
        std::thread::sleep(std::time::Duration::from_millis(500));

        match run_stream(camera_url, filter.clone()) {
            Ok(_) => retry_count = 0, // 重连成功,重新计数
            Err(e) => eprintln!("⚠️  重连失败: {}", e),
        }
    }

    eprintln!("❌ 视频流重连失败,解码线程退出");
}
