pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::adapters::web3forms::DEFAULT_ENDPOINT;
    use crate::core::{ConfigProvider, Timings};
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "login-form")]
    #[command(about = "Validate login credentials and submit them to a Web3Forms endpoint")]
    pub struct CliConfig {
        #[arg(long, help = "Email address typed into the form")]
        pub email: String,

        #[arg(long, help = "Password typed into the form; read from stdin when omitted")]
        pub password: Option<String>,

        #[arg(short, long, help = "TOML configuration file; overrides the endpoint options below")]
        pub config: Option<String>,

        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        pub endpoint: String,

        #[arg(long, help = "Web3Forms access key")]
        pub access_key: Option<String>,

        #[arg(long)]
        pub subject: Option<String>,

        #[arg(long)]
        pub from_name: Option<String>,

        #[arg(long, default_value = "2000")]
        pub reset_delay_ms: u64,

        #[arg(long, help = "Validate the input without submitting it")]
        pub dry_run: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
        pub log_format: LogFormat,
    }

    impl ConfigProvider for CliConfig {
        fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn hidden_fields(&self) -> Vec<(String, String)> {
            [
                ("access_key", &self.access_key),
                ("subject", &self.subject),
                ("from_name", &self.from_name),
            ]
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
            .collect()
        }

        fn timings(&self) -> Timings {
            Timings {
                reset_delay: Duration::from_millis(self.reset_delay_ms),
                ..Timings::default()
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("--endpoint", &self.endpoint)?;
            let access_key = validation::validate_required_field("--access-key", &self.access_key)?;
            validation::validate_non_empty_string("--access-key", access_key)?;
            validation::validate_range("--reset-delay-ms", self.reset_delay_ms, 0, 60_000)
        }
    }

}
