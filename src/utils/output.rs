//! # 美化输出工具
//!
//! 提供统一的终端输出样式。诊断日志走 `log`，这里只负责面向用户的结果输出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 与 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印键值对
pub fn print_field(key: &str, value: &str) {
    println!("  {:<18} {}", key.dimmed(), value);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 格式化三维向量
pub fn format_vector(v: &[f64; 3], precision: usize) -> String {
    format!(
        "{:>w$.p$} {:>w$.p$} {:>w$.p$}",
        v[0],
        v[1],
        v[2],
        w = precision + 5,
        p = precision
    )
}
