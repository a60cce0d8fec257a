//! graphkit CLI 工具
//!
//! 交互式算法菜单，读取 JSON 配置后按编号运行

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use graphkit::cli::{MenuChoice, Runner};
use graphkit::{Config, TracingReporter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graphkit-cli")]
#[command(version, about = "graphkit 算法菜单")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "Config.json")]
    config: PathBuf,

    /// 执行单个菜单项后退出（编号 1-8）
    #[arg(short, long)]
    run: Option<MenuChoice>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 只输出错误
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_banner() {
    println!(
        "{} {}",
        "graphkit".bright_cyan().bold(),
        format!("v{}", graphkit::VERSION).dimmed()
    );
    println!("{}", "图算法与经典算法练习".bright_white());
    println!("=====================");
}

fn print_menu() {
    println!("\n{}", "菜单".bold());
    for choice in MenuChoice::ALL {
        println!(
            "{}. {}",
            choice.number().to_string().bright_yellow(),
            choice.label()
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose, args.quiet);

    let config = Config::load(&args.config)
        .with_context(|| format!("无法加载配置文件 {}", args.config.display()))?;
    let reporter = TracingReporter;
    let runner = Runner::new(&config, &reporter);

    // 单次执行模式
    if let Some(choice) = args.run {
        runner.run(choice)?;
        return Ok(());
    }

    if !args.quiet {
        print_banner();
    }
    interactive(&runner)
}

fn interactive(runner: &Runner<'_>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        print!("\n{} ", "请选择一个选项:".bright_white());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.parse::<MenuChoice>() {
            Ok(choice) if choice.is_quit() => break,
            Ok(choice) => {
                if let Err(e) = runner.run(choice) {
                    tracing::error!("{}", e);
                }
            }
            Err(e) => tracing::error!("{}", e),
        }

        print!("\n按回车键返回菜单...");
        io::stdout().flush()?;
        if lines.next().is_none() {
            break;
        }
    }

    tracing::info!("再见！");
    Ok(())
}
