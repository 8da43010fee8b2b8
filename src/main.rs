use anyhow::Result;
use clap::Parser;
use console::style;
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;
use video_thumbnail_extractor::cli::Cli;
use video_thumbnail_extractor::component::BatchOrchestrator;
use video_thumbnail_extractor::component::thumbnail_extractor::{RunSummary, print_summary};
use video_thumbnail_extractor::config::Settings;
use video_thumbnail_extractor::init;
use video_thumbnail_extractor::signal::setup_shutdown_signal;
use video_thumbnail_extractor::tools::SystemProcessRunner;

/// 有影片擷取失敗時的結束碼
const EXIT_PARTIAL_FAILURE: u8 = 2;

fn main() -> ExitCode {
    init::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => {
            print_summary(&summary);
            if summary.all_succeeded() {
                info!("Program exited normally");
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_PARTIAL_FAILURE)
            }
        }
        Err(e) => {
            error!("Program error: {e:#}");
            eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let shutdown_signal = setup_shutdown_signal()?;

    let mut settings = Settings::load(&cli.settings)?;
    cli.apply_overrides(&mut settings);

    println!("{}", style("=== 影片縮圖擷取 ===").cyan().bold());

    let orchestrator = BatchOrchestrator::new(
        settings,
        Arc::new(SystemProcessRunner::default()),
        shutdown_signal,
    )
    .with_progress(!cli.no_progress);

    orchestrator.run(&cli.run_options())
}
