use clap::Parser;
use qris_gen::core::checksum::{self, CHECKSUM_LEN};
use qris_gen::core::Storage;
use qris_gen::utils::error::ErrorSeverity;
use qris_gen::utils::{logger, validation::Validate};
use qris_gen::{CliConfig, LocalStorage, QrEncoder, QrGenerator, QrisError};
use serde::Serialize;

#[derive(Serialize)]
struct VerifyReport<'a> {
    valid: bool,
    found: &'a str,
    expected: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting qris-gen");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ qris-gen failed: {} (Category: {:?}, Severity: {:?})",
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

async fn run(config: &CliConfig) -> qris_gen::Result<()> {
    let storage = LocalStorage::new(".");

    let base = match (&config.base, &config.base_file) {
        (Some(base), _) => base.trim().to_string(),
        (None, Some(path)) => storage.read_payload(path).await?,
        (None, None) => {
            return Err(QrisError::MissingConfigError {
                field: "--base or --base-file".to_string(),
            })
        }
    };

    if config.verify {
        return verify_base(&base, config.json);
    }

    let amount = config.amount.ok_or_else(|| QrisError::MissingConfigError {
        field: "--amount".to_string(),
    })?;

    let generator = QrGenerator::new(QrEncoder::default(), config.logo_source());
    let generated = generator.generate_payload(&base, amount)?;

    if let Some(output) = &config.output {
        let png = generator.generate_qr_image(&base, amount, config.width, config.height)?;
        storage.write_file(output, &png).await?;
        tracing::info!("📁 QR image saved to: {}", output);
        if !config.json {
            println!("✅ QR image saved to: {}", output);
        }
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&generated)?);
    } else if config.output.is_none() {
        println!("{}", generated.payload);
    }

    Ok(())
}

fn verify_base(base: &str, json: bool) -> qris_gen::Result<()> {
    let valid = checksum::verify(base);
    let split = base.len().saturating_sub(CHECKSUM_LEN);
    let (body, found) = match (base.get(..split), base.get(split..)) {
        (Some(body), Some(found)) => (body, found),
        _ => ("", base),
    };
    let report = VerifyReport {
        valid,
        found,
        expected: checksum::crc16(body),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if valid {
        println!("✅ CRC {} is valid", report.found);
    } else {
        println!(
            "❌ CRC mismatch: payload ends with {}, expected {}",
            report.found, report.expected
        );
    }

    if valid {
        Ok(())
    } else {
        Err(QrisError::malformed("checksum does not match payload"))
    }
}
