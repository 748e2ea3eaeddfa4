use anyhow::Result;
use clap::{Parser, Subcommand};
use mentor::coach::models::{GenerateQuiz, QuizMode};
use mentor::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mentor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the topic catalog
    Topics,
    /// Show per-topic mastery and study time
    Progress,
    /// Show the upcoming review schedule
    Schedule,
    /// Print the onboarding diagnostic questions
    Diagnostic,
    /// Take a quiz without going through the interactive menu
    Quiz {
        /// Topic ids to draw questions from
        #[arg(short, long)]
        topics: Vec<String>,
        /// Quiz mode: diagnostic, practice or review
        #[arg(short, long, default_value = "practice")]
        mode: QuizMode,
        /// Number of questions
        #[arg(short, long)]
        count: Option<u32>,
        /// Bias question selection toward detected weaknesses
        #[arg(long)]
        focus_weaknesses: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut app = App::new(config.clone());

    match cli.command {
        Some(Commands::Topics) => app.show_topics().await,
        Some(Commands::Progress) => app.show_progress().await,
        Some(Commands::Schedule) => app.show_schedule().await,
        Some(Commands::Diagnostic) => app.show_diagnostic().await,
        Some(Commands::Quiz { topics, mode, count, focus_weaknesses }) => {
            let request = GenerateQuiz::new(mode)
                .with_topics(topics)
                .with_num_questions(count.unwrap_or(config.quiz_length))
                .with_focus_weaknesses(focus_weaknesses);
            app.take_quiz(request).await?;
        }
        None => app.run().await?,
    }

    Ok(())
}
