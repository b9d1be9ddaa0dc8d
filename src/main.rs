use anyhow::Context;
use clap::Parser;
use login_form::core::{ConfigProvider, Field, FieldValidation, SubmissionOutcome};
use login_form::utils::error::{ErrorSeverity, FormError};
use login_form::utils::{logger, validation::Validate};
use login_form::{CliConfig, FormController, InMemoryDocument, TomlConfig, Web3FormsClient};
use std::io::BufRead;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose, args.log_format);

    tracing::info!("Starting login-form CLI");
    if args.verbose {
        tracing::debug!("Endpoint: {}, dry run: {}", args.endpoint, args.dry_run);
    }

    let provider: Box<dyn ConfigProvider> = match load_provider(&args) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    let password = match args.password.take() {
        Some(password) => password,
        None => read_password().context("failed to read password from stdin")?,
    };

    let document = Arc::new(InMemoryDocument::new(provider.hidden_fields()));
    let submitter = Web3FormsClient::new(provider.endpoint());
    let controller = FormController::new(Arc::clone(&document), submitter, provider.timings());

    document.type_into(Field::Email, &args.email);
    let email = controller.on_email_input();
    document.type_into(Field::Password, &password);
    let password = controller.on_password_input();
    report_field("E-Mail", &email);
    report_field("Passwort", &password);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be submitted");
        let valid = email.is_valid() && password.is_valid();
        std::process::exit(if valid { 0 } else { 1 });
    }

    tracing::info!("📨 Submitting to {}", provider.endpoint());
    let outcome = controller.submit().await;
    let shown = document.notification_messages();

    match &outcome {
        SubmissionOutcome::Accepted { .. } => {
            for message in &shown {
                println!("✅ {}", message);
            }
        }
        _ => {
            for message in &shown {
                eprintln!("❌ {}", message);
            }
        }
    }

    let code = match outcome {
        SubmissionOutcome::Accepted { .. } => 0,
        SubmissionOutcome::Rejected | SubmissionOutcome::Busy => 1,
        SubmissionOutcome::Failed { .. } | SubmissionOutcome::NetworkError { .. } => 2,
    };
    if code > 0 {
        std::process::exit(code);
    }

    Ok(())
}

fn load_provider(args: &CliConfig) -> Result<Box<dyn ConfigProvider>, FormError> {
    match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Ok(Box::new(config))
        }
        None => {
            args.validate()?;
            Ok(Box::new(args.clone()))
        }
    }
}

fn read_password() -> std::io::Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn report_field(label: &str, validation: &FieldValidation) {
    if validation.message.is_empty() {
        tracing::warn!("❌ {}: leer", label);
    } else if validation.is_valid() {
        tracing::info!("✅ {}: {}", label, validation.message);
    } else {
        tracing::warn!("❌ {}: {}", label, validation.message);
    }
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(error: &FormError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
