use clap::Parser;
use learnpath::core::engine::{RoadmapOutcome, ROADMAP_HEADING};
use learnpath::core::ConfigProvider;
use learnpath::domain::model::{Level, RoadmapRequest};
use learnpath::utils::error::{AppError, ErrorSeverity};
use learnpath::utils::{logger, validation::Validate};
use learnpath::{CliArgs, ConsoleNotifier, RoadmapEngine, ServicePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("CLI args: {:?}", args);

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e, None),
    };

    // Secrets are checked before any file or network work; a dry run never needs them.
    let checked = if args.dry_run {
        config.validate_settings()
    } else {
        config.validate()
    };
    if let Err(e) = checked {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e, None);
    }

    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => exit_with(&e, None),
    };
    tracing::debug!(
        "Loaded {} courses ({} beginner, {} intermediate, {} advanced)",
        catalog.len(),
        catalog.count_by_level(Level::Beginner),
        catalog.count_by_level(Level::Intermediate),
        catalog.count_by_level(Level::Advanced)
    );

    let document = match tokio::fs::read(&args.resume).await {
        Ok(bytes) => Some(bytes),
        Err(e) => exit_with(&AppError::IoError(e), None),
    };

    let model = config.model().to_string();
    let pipeline = ServicePipeline::from_config(config, catalog, ConsoleNotifier);
    let engine = RoadmapEngine::new(pipeline);

    if args.dry_run {
        return dry_run(&engine, document, &args.goal).await;
    }

    match engine.trigger(document, &args.goal).await {
        Ok(Some(outcome)) => render(&outcome),
        Ok(None) => exit_with(&missing_inputs(), None),
        Err(e) => exit_with(&e, Some(&model)),
    }

    Ok(())
}

async fn dry_run(
    engine: &RoadmapEngine<ServicePipeline<ConsoleNotifier>>,
    document: Option<Vec<u8>>,
    goal: &str,
) -> anyhow::Result<()> {
    tracing::info!("DRY RUN MODE - no remote service will be called");

    let request = match RoadmapRequest::from_inputs(document, goal) {
        Some(request) => request,
        None => exit_with(&missing_inputs(), None),
    };

    match engine.preview(&request).await {
        Ok(preview) => {
            println!("📄 Resume words: {}", preview.resume_words);
            println!("📚 Catalog courses: {}", engine.pipeline().catalog().len());
            println!("🧮 Context words: {}", preview.context_words);
            Ok(())
        }
        Err(e) => exit_with(&e, None),
    }
}

fn render(outcome: &RoadmapOutcome) {
    println!("---");
    println!("{}", ROADMAP_HEADING);
    println!();
    println!("{}", outcome.roadmap());
    println!();
    eprintln!("📥 Roadmap saved to: {}", outcome.artifact.path);
}

fn missing_inputs() -> AppError {
    AppError::ValidationError {
        message: "both a non-empty resume PDF and a career goal are required".to_string(),
    }
}

fn exit_with(e: &AppError, model: Option<&str>) -> ! {
    tracing::error!(
        "Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    match (e, model) {
        (AppError::GenerationError { .. }, Some(model)) => eprintln!(
            "💡 Check if your API key is correct and has access to {}.",
            model
        ),
        _ => eprintln!("💡 {}", e.recovery_suggestion()),
    }

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
