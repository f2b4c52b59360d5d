use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{debug, error};

use askllama::{Config, Error, TaskClassifier};

/// Ask a local LLM whether an email describes a task
#[derive(Debug, Parser)]
#[command(name = "askllama", version)]
struct Cli
{   /// File holding the email text; reads stdin when omitted
    file: Option<PathBuf>

  , /// Model name to request
    #[arg(long)]
    model: Option<String>

  , /// Request timeout in seconds
    #[arg(long, default_value_t = askllama::config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64

  , /// What to print
    #[arg(long, value_enum, default_value_t = Output::Content)]
    output: Output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output
{   /// The model's message content
    Content
  , /// The HTTP response body as received
    Raw
  , /// The parsed classification as JSON
    Json
}

#[tokio::main]
async fn main()
{   env_logger::init();
    let cli = Cli::parse();
    debug!("Parsed arguments: {:?}", cli);

    if let Err(e) = run(cli).await
    {   error!("askllama failed: {}", e);
        eprintln!("askllama: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Error>
{   let email = read_email(cli.file.as_ref())?;

    let mut config = Config::from_env()?
      .with_timeout(Duration::from_secs(cli.timeout))?;
    if let Some(model) = cli.model
    {   config = config.with_model(model);
    }

    let classifier = TaskClassifier::new(config)?;
    let mut stdout = std::io::stdout();

    match cli.output
    {   Output::Content => {
          let content = classifier.reply_content(&email).await?;
          write!(stdout, "{}", content)?;
        }
      , Output::Raw => {
          let response = classifier.classify(&email).await?;
          let status = response.status();
          eprintln!("{}", status);
          let body = response.text().await?;
          writeln!(stdout, "{}", body)?;
          if !status.is_success()
          {   return Err(Error::Other(
                format!("service returned {}", status)
              ));
          }
        }
      , Output::Json => {
          let result = classifier.classify_result(&email).await?;
          let pretty = serde_json::to_string_pretty(&result)
            .map_err(|e| Error::Other(e.to_string()))?;
          writeln!(stdout, "{}", pretty)?;
        }
    }

    stdout.flush()?;
    Ok(())
}

fn read_email(file: Option<&PathBuf>) -> Result<String, Error>
{   let email = match file
    {   Some(path) => {
          debug!("Reading email from {}", path.display());
          std::fs::read_to_string(path)?
        }
      , None => {
          debug!("Reading email from stdin");
          let mut buf = String::new();
          std::io::stdin().read_to_string(&mut buf)?;
          buf
        }
    };

    if email.trim().is_empty()
    {   return Err(Error::Other("email text is empty".to_string()));
    }
    Ok(email)
}
