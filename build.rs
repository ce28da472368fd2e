use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // 只有开发板 demo 需要 ESP-HAL 的链接配置，主机构建保持干净
    if env::var_os("CARGO_FEATURE_BOARD").is_none() {
        return;
    }

    // ESP32-S3-N16R8 使用 Octal PSRAM
    println!("cargo:rustc-env=ESP_HAL_CONFIG_PSRAM_MODE=octal");

    // esp-hal 提供的链接脚本
    println!("cargo:rustc-link-arg-examples=-Tlinkall.x");

    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={}/ld", manifest_dir);
    }
}
