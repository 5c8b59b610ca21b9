use clap::{CommandFactory, Parser, Subcommand};
use cli::{
    handlers::{PredictionMode, handle_evaluate, handle_predict},
    logging::init_tracing,
};
use drgrade::device::ComputeTarget;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a classifier on the validation split
    Evaluate {
        /// Path to the drgrade config file
        config_path: String,
        /// Linear probe weights (JSON)
        #[arg(long)]
        weights: String,
        /// Step the scalars are recorded at
        #[arg(long, default_value_t = 0)]
        step: u64,
        /// Append scalars to this JSON-lines file
        #[arg(long)]
        scalars: Option<String>,
        /// Override the config's compute target (cpu, gpu:N)
        #[arg(long)]
        device: Option<ComputeTarget>,
    },
    /// Write per-image predictions for the test split
    Predict {
        /// Path to the drgrade config file
        config_path: String,
        /// Linear probe weights (JSON)
        #[arg(long)]
        weights: String,
        /// What to extract for each image
        #[arg(long, value_enum, default_value_t = PredictionMode::Confidence)]
        mode: PredictionMode,
        /// Output CSV path
        #[arg(long)]
        output: String,
        /// Override the config's compute target (cpu, gpu:N)
        #[arg(long)]
        device: Option<ComputeTarget>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Evaluate {
            config_path,
            weights,
            step,
            scalars,
            device,
        }) => handle_evaluate(config_path, weights, step, scalars, device),
        Some(Commands::Predict {
            config_path,
            weights,
            mode,
            output,
            device,
        }) => handle_predict(config_path, weights, mode, output, device),
        None => {
            let mut cmd = Cli::command();
            cmd.print_help().map_err(Into::into)
        },
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
