/// 视频输入系统 (Video Input System)
///
/// 独立工作线程,负责视频流解码与预处理
/// - ScanFilter: 帧分发过滤器,YUV→RGBA与亮度平面双输出
/// - decode_stream: 网络流拉流解码 (有限重连)
pub mod decode_filter;
pub mod decoder;

pub use decode_filter::ScanFilter;
pub use decoder::decode_stream;
