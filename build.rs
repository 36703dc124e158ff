// 构建脚本: 链接FFmpeg静态库依赖
fn main() {
    // 仅Windows MSVC + vcpkg静态FFmpeg需要补充的系统库
    #[cfg(all(target_os = "windows", target_env = "msvc"))]
    {
        // Intel QSV (静态FFmpeg带qsv组件时需要)
        println!("cargo:rustc-link-lib=dylib=libmfx");

        // x264 编码器
        println!("cargo:rustc-link-lib=dylib=libx264");

        // OLE 自动化和VFW
        println!("cargo:rustc-link-lib=dylib=oleaut32");
        println!("cargo:rustc-link-lib=dylib=vfw32");

        // Secure Channel (TLS/SSL)
        println!("cargo:rustc-link-lib=dylib=secur32");
    }
}
