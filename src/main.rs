//! Movie Success Predictor
//!
//! Estimates box-office revenue from a console, a one-shot command or a web dashboard.

use anyhow::Context;
use clap::{Parser, Subcommand};
use movie_success_predictor::{
    config::{expand_path, Config},
    console::{render, Console, RustylinePrompter, DEFAULT_TITLE},
    estimator::{HeuristicRevenueEstimator, NormalVariation},
    ml::{BoostingConfig, MovieFeatures, RevenueModel},
    monitor::{start_dashboard, DashboardState},
    report::{Analysis, RiskWarning},
    types::{PredictionRequest, Season},
};
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "movie-predictor")]
#[command(about = "Box-office revenue predictor for planned movies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive heuristic predictor
    Console,
    /// Predict one movie and print the analysis
    Predict {
        /// Genre name, e.g. Action or Sci-Fi
        #[arg(short, long)]
        genre: String,
        /// Production budget in millions
        #[arg(short, long)]
        budget: f64,
        /// Expected quality rating (1-10)
        #[arg(short, long)]
        rating: f64,
        /// Release season: Summer, Holiday or anything else
        #[arg(short, long, default_value = "Other")]
        season: String,
        /// Has a famous actor
        #[arg(long)]
        star: bool,
        /// Is a sequel or franchise entry
        #[arg(long)]
        sequel: bool,
        #[arg(short, long, default_value = DEFAULT_TITLE)]
        title: String,
    },
    /// Start the web dashboard
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
        /// Train a model from this CSV to enable model predictions
        #[arg(short, long)]
        dataset: Option<String>,
    },
    /// Train a model and print the training report
    Train {
        #[arg(short, long)]
        dataset: Option<String>,
    },
    /// Train a model and predict one movie
    Estimate {
        #[arg(short, long)]
        dataset: Option<String>,
        /// Production budget in dollars
        #[arg(long)]
        budget: f64,
        #[arg(long)]
        score: f64,
        #[arg(long)]
        votes: f64,
        /// Runtime in minutes
        #[arg(long)]
        runtime: f64,
        #[arg(long)]
        year: f64,
    },
    /// Interactive trained-model predictor
    ModelConsole {
        #[arg(short, long)]
        dataset: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Console => run_console(config),
        Commands::Predict {
            genre,
            budget,
            rating,
            season,
            star,
            sequel,
            title,
        } => {
            let request = PredictionRequest::new(budget, genre, rating, Season::from_label(&season), star, sequel);
            predict_once(config, title, request)
        }
        Commands::Serve { port, dataset } => serve(config, port, dataset).await,
        Commands::Train { dataset } => train(config, dataset),
        Commands::Estimate {
            dataset,
            budget,
            score,
            votes,
            runtime,
            year,
        } => {
            let features = MovieFeatures {
                budget,
                score,
                votes,
                runtime,
                year,
            };
            estimate(config, dataset, features)
        }
        Commands::ModelConsole { dataset } => run_model_console(config, dataset),
    }
}

fn run_console(config: Config) -> anyhow::Result<()> {
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let mut variation = NormalVariation::from_config(&config.estimator)?;

    let mut console = Console::new(RustylinePrompter::new()?, std::io::stdout());
    let shown = console.run_heuristic(&estimator, &mut variation)?;
    tracing::info!(shown, "console session finished");
    Ok(())
}

fn predict_once(config: Config, title: String, request: PredictionRequest) -> anyhow::Result<()> {
    request.validate()?;
    let estimator = HeuristicRevenueEstimator::with_defaults();
    let mut variation = NormalVariation::from_config(&config.estimator)?;

    let genre = estimator.genres().get(&request.genre)?;
    let mut out = std::io::stdout().lock();
    render::genre_info(&mut out, genre)?;
    render::warnings(&mut out, &RiskWarning::assess(&request))?;

    let result = estimator.predict(&request, &mut variation)?;
    let analysis = Analysis::new(title, request, result)?;
    render::analysis(&mut out, &analysis)?;
    out.flush()?;
    Ok(())
}

/// Dataset from the command line, falling back to the configured one
fn dataset_path(config: &Config, dataset: Option<String>) -> anyhow::Result<String> {
    dataset
        .map(|d| expand_path(&d))
        .or_else(|| config.model.resolved_dataset_path())
        .context("no dataset given; pass --dataset or set model.dataset_path")
}

fn train_model(config: &Config, path: &str) -> anyhow::Result<RevenueModel> {
    tracing::info!("Training revenue model from {}", path);
    let model = RevenueModel::train_from_path(path, &BoostingConfig::from(&config.model))
        .with_context(|| format!("training from {}", path))?;

    let report = model.report();
    tracing::info!(
        rows_loaded = report.rows_loaded,
        rows_kept = report.rows_kept,
        r2_log = report.r2_log,
        mae = report.mae,
        "model trained"
    );
    Ok(model)
}

async fn serve(config: Config, port: Option<u16>, dataset: Option<String>) -> anyhow::Result<()> {
    let variation = NormalVariation::from_config(&config.estimator)?;
    let mut state = DashboardState::new(
        HeuristicRevenueEstimator::with_defaults(),
        Box::new(variation),
        config.dashboard.history_limit,
    );

    let dataset = dataset
        .map(|d| expand_path(&d))
        .or_else(|| config.model.resolved_dataset_path());
    match dataset {
        Some(path) => state = state.with_model(train_model(&config, &path)?),
        None => tracing::warn!("No dataset configured, model predictions disabled"),
    }

    let port = port.unwrap_or(config.dashboard.port);
    start_dashboard(Arc::new(state), &config.dashboard.host, port).await?;
    Ok(())
}

fn train(config: Config, dataset: Option<String>) -> anyhow::Result<()> {
    let path = dataset_path(&config, dataset)?;
    let model = train_model(&config, &path)?;
    let report = model.report();

    println!("\n📊 TRAINING REPORT");
    println!("{}", "=".repeat(40));
    println!("Rows loaded:      {}", report.rows_loaded);
    println!("Rows kept:        {}", report.rows_kept);
    println!("Trees:            {}", report.trees);
    println!("R² (log gross):   {:.3}", report.r2_log);
    println!("Mean abs. error:  ${:.0}", report.mae);
    println!(
        "Medians:          score {:.1}, votes {:.0}, runtime {:.0}, year {:.0}",
        report.medians.score, report.medians.votes, report.medians.runtime, report.medians.year
    );
    Ok(())
}

fn estimate(config: Config, dataset: Option<String>, features: MovieFeatures) -> anyhow::Result<()> {
    let path = dataset_path(&config, dataset)?;
    let model = train_model(&config, &path)?;
    let estimate = model.estimate(&features)?;

    let mut out = std::io::stdout().lock();
    render::model_estimate(&mut out, &estimate)?;
    out.flush()?;
    Ok(())
}

fn run_model_console(config: Config, dataset: Option<String>) -> anyhow::Result<()> {
    let path = dataset_path(&config, dataset)?;
    let model = train_model(&config, &path)?;

    let mut console = Console::new(RustylinePrompter::new()?, std::io::stdout());
    let shown = console.run_model(&model)?;
    tracing::info!(shown, "model console session finished");
    Ok(())
}
