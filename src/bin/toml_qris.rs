use clap::Parser;
use qris_gen::config::toml_config::TomlConfig;
use qris_gen::core::{GeneratedPayload, Storage};
use qris_gen::utils::error::ErrorSeverity;
use qris_gen::utils::{logger, validation::Validate};
use qris_gen::{LocalStorage, QrEncoder, QrGenerator, QrisError};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "toml-qris")]
#[command(about = "Batch QRIS image generation driven by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "qris.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the base payload from config
    #[arg(long)]
    base: Option<String>,

    /// Dry run - print the payloads without rendering images
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
struct ManifestEntry {
    file: String,
    #[serde(flatten)]
    generated: GeneratedPayload,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌，JSON 格式由配置決定
    if config.json_logging() {
        let level = if args.verbose { "debug" } else { config.log_level() };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based QRIS generator");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(base) = args.base {
        config.payload = Some(qris_gen::config::toml_config::PayloadConfig { base });
        tracing::info!("🔧 Base payload overridden from command line");
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "✅ {} request(s), {}x{} px, output: {}",
        config.requests.len(),
        config.width(),
        config.height(),
        config.output_path()
    );

    if let Err(e) = run(&config, args.dry_run).await {
        tracing::error!(
            "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &TomlConfig, dry_run: bool) -> qris_gen::Result<()> {
    let base = config
        .base_payload()
        .ok_or_else(|| QrisError::MissingConfigError {
            field: "payload.base".to_string(),
        })?;

    let generator = QrGenerator::new(QrEncoder::default(), config.logo_source()?);
    let storage = LocalStorage::new(config.output_path());
    let mut manifest = Vec::with_capacity(config.requests.len());

    for request in &config.requests {
        let file = request.filename();
        let generated = generator.generate_payload(base, request.amount)?;

        if dry_run {
            println!("{} -> {}", file, generated.payload);
        } else {
            let png =
                generator.generate_qr_image(base, request.amount, config.width(), config.height())?;
            storage.write_file(&file, &png).await?;
            tracing::info!("🖼️  {} (amount {}, CRC {})", file, request.amount, generated.checksum);
        }

        manifest.push(ManifestEntry { file, generated });
    }

    if config.manifest_enabled() && !dry_run {
        let json = serde_json::to_vec_pretty(&manifest)?;
        storage.write_file("manifest.json", &json).await?;
        tracing::info!("📋 Manifest written with {} entries", manifest.len());
    }

    println!("✅ Generated {} QRIS code(s)", manifest.len());
    Ok(())
}
