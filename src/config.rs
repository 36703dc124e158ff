/// 命令行配置模块
/// CLI configuration
use clap::Parser;

/// 二维码考勤程序参数
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "二维码考勤 - IP摄像头签到系统", long_about = None)]
pub struct Args {
    /// IP摄像头视频流地址
    #[arg(short, long, default_value = "http://192.168.137.141:8080/video")]
    pub camera_url: String,

    /// 学生名单CSV路径 (表头 + 姓名,学号)
    #[arg(short, long, default_value = "students.csv")]
    pub roster: String,

    /// 考勤结果CSV路径
    #[arg(short = 'o', long, default_value = "attendance.csv")]
    pub attendance: String,
}
