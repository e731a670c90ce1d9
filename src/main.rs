use clap::{Parser, Subcommand, ValueEnum};

mod log;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

const DEFAULT_TASK: &str = "committing to advice columns";

#[derive(Parser)]
#[command(name = "task-timing")]
#[command(about = "Nested task timing analysis for prover benchmark logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the longest-running instance of a task.
    Slowest {
        #[arg(long)]
        log: String,

        #[arg(short = 't', long, default_value = DEFAULT_TASK)]
        task: String,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Per-name rollup of every closed task in the log.
    Summary {
        #[arg(long)]
        log: String,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Slowest { log, task, format } => {
            let agg = log::parse_log_file(&log)?;

            match (agg.slowest(&task), format) {
                (Some(found), Format::Text) => print!("{}", render::render_task_text(found)),
                (Some(found), Format::Json) => println!("{}", render::render_json(found)?),
                (None, Format::Text) => println!("no closed task named {:?}", task),
                (None, Format::Json) => println!("null"),
            }
        }
        Commands::Summary { log, format } => {
            let agg = log::parse_log_file(&log)?;
            let rows = agg.summary()?;

            match format {
                Format::Text => print!("{}", render::render_summary_text(&rows)),
                Format::Json => println!("{}", render::render_json(&rows)?),
            }
        }
    }

    Ok(())
}
