use clap::Parser;
use setup_check::utils::logger;
use setup_check::{default_checks, CheckRunner, CliConfig, Settings};
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let mut runner = CheckRunner::new_with_monitoring(default_checks(&settings), settings.monitor);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = runner.run(&mut out)?;

    if settings.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    }

    if settings.strict && !summary.all_passed {
        std::process::exit(1);
    }

    Ok(())
}
