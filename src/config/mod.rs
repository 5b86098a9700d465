pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use crate::adapters::logo::{FileLogo, NoLogo, DEFAULT_LOGO_PATH};
    use crate::domain::ports::LogoSource;
    use crate::utils::error::{QrisError, Result};
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "qris-gen")]
    #[command(about = "Turn a static QRIS payload into a dynamic one carrying an amount")]
    pub struct CliConfig {
        /// Static QRIS payload
        #[arg(long, conflicts_with = "base_file")]
        pub base: Option<String>,

        /// File holding the static QRIS payload
        #[arg(long)]
        pub base_file: Option<String>,

        /// Transaction amount, whole currency units
        #[arg(long, required_unless_present = "verify")]
        pub amount: Option<u64>,

        /// Write a PNG image here instead of printing the payload
        #[arg(short, long)]
        pub output: Option<String>,

        #[arg(long, default_value = "300")]
        pub width: u32,

        #[arg(long, default_value = "300")]
        pub height: u32,

        #[arg(long, default_value = DEFAULT_LOGO_PATH)]
        pub logo_path: String,

        #[arg(long, help = "Render without the center logo")]
        pub no_logo: bool,

        #[arg(long, help = "Print the result as JSON")]
        pub json: bool,

        #[arg(long, help = "Only check the CRC of the base payload")]
        pub verify: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn logo_source(&self) -> Box<dyn LogoSource> {
            if self.no_logo {
                Box::new(NoLogo)
            } else {
                Box::new(FileLogo::new(&self.logo_path))
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if self.base.is_none() && self.base_file.is_none() {
                return Err(QrisError::MissingConfigError {
                    field: "--base or --base-file".to_string(),
                });
            }
            if let Some(base) = &self.base {
                validation::validate_non_empty_string("--base", base)?;
            }
            if let Some(path) = &self.base_file {
                validation::validate_path("--base-file", path)?;
            }

            validation::validate_dimension("--width", self.width)?;
            validation::validate_dimension("--height", self.height)?;

            if let Some(output) = &self.output {
                validation::validate_path("--output", output)?;
                validation::validate_file_extensions("--output", &[output.clone()], &["png"])?;
            }
            if !self.no_logo {
                validation::validate_path("--logo-path", &self.logo_path)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &[&str]) -> CliConfig {
            CliConfig::try_parse_from(std::iter::once("qris-gen").chain(args.iter().copied()))
                .unwrap()
        }

        #[test]
        fn test_defaults() {
            let config = parse(&["--base", "abc", "--amount", "10000"]);
            assert_eq!(config.amount, Some(10000));
            assert_eq!((config.width, config.height), (300, 300));
            assert_eq!(config.logo_path, "logo/qris.png");
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_amount_required_unless_verify() {
            assert!(CliConfig::try_parse_from(["qris-gen", "--base", "abc"]).is_err());
            let config = parse(&["--base", "abc", "--verify"]);
            assert!(config.amount.is_none());
        }

        #[test]
        fn test_base_and_base_file_conflict() {
            assert!(CliConfig::try_parse_from([
                "qris-gen",
                "--base",
                "abc",
                "--base-file",
                "qris.txt",
                "--amount",
                "1"
            ])
            .is_err());
        }

        #[test]
        fn test_validation_failures() {
            let missing_base = parse(&["--amount", "1"]);
            assert!(matches!(
                missing_base.validate(),
                Err(QrisError::MissingConfigError { .. })
            ));

            let zero_width = parse(&["--base", "abc", "--amount", "1", "--width", "0"]);
            assert!(zero_width.validate().is_err());

            let jpeg = parse(&["--base", "abc", "--amount", "1", "-o", "out.jpg"]);
            assert!(jpeg.validate().is_err());
        }
    }
}
