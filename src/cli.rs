use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::config::ServiceConfig;
use crate::models::schedule::{ScheduleRequest, DEFAULT_TIME_ZONE};
use crate::runtime;
use crate::service::prompt::{build_prompt, current_time_in};

#[derive(Parser)]
#[command(about = "Turn a free-text day plan into an .ics calendar file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a schedule and store it, printing the calendar URL.
    Create {
        user_input: String,
        #[arg(long, default_value = DEFAULT_TIME_ZONE)]
        time_zone: String,
    },
    /// Print the prompt that would be sent, without calling the model.
    Prompt {
        user_input: String,
        #[arg(long, default_value = DEFAULT_TIME_ZONE)]
        time_zone: String,
    },
}

pub async fn cli(config: ServiceConfig) -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Create {
            user_input,
            time_zone,
        } => {
            let pipeline = runtime::build_pipeline(&config)?;
            let request = ScheduleRequest::new(user_input, time_zone);
            let stored = pipeline.run(&request).await?;
            println!("{}", stored.locator.url);
        }
        Commands::Prompt {
            user_input,
            time_zone,
        } => {
            let now = current_time_in(&time_zone, Utc::now());
            println!("{}", build_prompt(&user_input, now, &time_zone));
        }
    }
    Ok(())
}
