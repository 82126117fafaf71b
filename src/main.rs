//! # solidstate - CIF 结构几何工具
//!
//! 命令行入口，业务逻辑全部位于 `solidstate` 库中。
//!
//! ## 子命令
//! - `inspect` - 晶胞参数、晶格/倒格矢与原子表
//! - `bonds`   - 周期像超胞中的共价键检测
//! - `kpath`   - k 点坐标转换为 tpiba 单位
//! - `summary` - 批量解析并导出 CSV
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   └── commands/   (命令执行逻辑)
//!         └── solidstate (库: parsers, models, symmetry, bonds, batch, utils)
//! ```

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use solidstate::utils::output;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    if let Err(e) = commands::run(cli) {
        output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
