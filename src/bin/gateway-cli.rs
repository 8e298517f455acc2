use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the organization console gateway", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, env = "INTERNAL_API_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Organization id.
    #[arg(short, long, default_value_t = 1)]
    org: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the gateway is up
    Health,
    /// Job postings
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Organization members
    Members {
        #[command(subcommand)]
        command: MemberCommands,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// List the organization's jobs
    List,
    /// Create a job from a JSON file
    Create { file: PathBuf },
    /// Replace a job with the contents of a JSON file
    Update { id: u64, file: PathBuf },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Add a member
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "User")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let org = cli.org;

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/healthz", base)).send().await?,
        Commands::Jobs { command } => match command {
            JobCommands::List => {
                client
                    .get(format!("{}/api/org/{}/get-jobs", base, org))
                    .send()
                    .await?
            }
            JobCommands::Create { file } => {
                client
                    .post(format!("{}/api/org/{}/add-job", base, org))
                    .json(&read_json(&file)?)
                    .send()
                    .await?
            }
            JobCommands::Update { id, file } => {
                client
                    .put(format!("{}/api/org/{}/update-job/{}", base, org, id))
                    .json(&read_json(&file)?)
                    .send()
                    .await?
            }
        },
        Commands::Members { command } => match command {
            MemberCommands::Add { name, email, role } => {
                client
                    .post(format!("{}/api/org/{}/add-member", base, org))
                    .json(&serde_json::json!({ "name": name, "email": email, "role": role }))
                    .send()
                    .await?
            }
        },
    };

    print_response(res).await
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }
    Ok(())
}
