//! Scriptly terminal client
//!
//! Runs the page flows against a live server: email/password sign-in and
//! signup through the identity provider, and blog generation with the
//! resulting session.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use scriptly_client::{
    AuthForm, AuthHandoff, ClickDispatcher, ClickDisposition, FirebaseIdentity, FlowOutcome,
    GenerationTrigger, HttpBackend, IdentityProvider, DEFAULT_USER_ID,
};
use scriptly_common::FirebaseWebConfig;

mod page;

use page::TerminalPage;

#[derive(Parser)]
#[command(name = "scriptly")]
#[command(version)]
#[command(about = "Scriptly terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scriptly server
    #[arg(long, env = "SCRIPTLY_URL", default_value = "http://localhost:3000", global = true)]
    url: String,

    /// Web API key; fetched from the server when unset
    #[arg(long, env = "FB_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Firebase project; fetched from the server when unset
    #[arg(long, env = "FB_PROJECT_ID", global = true)]
    project_id: Option<String>,

    /// Auth emulator host:port
    #[arg(long, env = "FIREBASE_AUTH_EMULATOR_HOST", global = true)]
    emulator: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct Credentials {
    #[arg(long, env = "SCRIPTLY_EMAIL")]
    email: String,

    #[arg(long, env = "SCRIPTLY_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Create an account, then sign in
    Signup {
        #[command(flatten)]
        credentials: Credentials,

        /// Display name for the new account
        #[arg(long)]
        username: String,
    },

    /// Sign in, then generate a blog from a prompt
    Generate {
        #[command(flatten)]
        credentials: Credentials,

        /// Queue the blog for review instead of saving a draft
        #[arg(long)]
        auto_submit: bool,

        /// Blog topic or prompt
        prompt: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(load_env(None))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(outcome) if outcome.is_redirect() => {}
        Ok(outcome) => {
            tracing::debug!(?outcome, "Flow did not complete");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// Load `.env` (or `env_file`), then build the log filter from the
/// resulting environment
fn load_env(env_file: Option<&Path>) -> tracing_subscriber::EnvFilter {
    let loaded = match env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    if let Err(e) = loaded {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env: {e}");
        }
    }
    tracing_subscriber::EnvFilter::from_default_env()
}

async fn run(cli: Cli) -> Result<FlowOutcome> {
    let backend = Arc::new(HttpBackend::new(&cli.url)?);
    let web_config = web_config(&cli, &backend).await?;
    let embedded = serde_json::to_string(&web_config)?;
    let emulator = cli.emulator.clone();

    match cli.command {
        Commands::Login { credentials } => {
            let page = TerminalPage::stdio().with_web_config(embedded);
            let form = AuthForm::login(credentials.email, credentials.password);
            sign_in(page, backend, emulator, &form).await
        }
        Commands::Signup {
            credentials,
            username,
        } => {
            let page = TerminalPage::stdio()
                .with_web_config(embedded)
                .as_signup();
            let form = AuthForm::signup(credentials.email, credentials.password, username);
            sign_in(page, backend, emulator, &form).await
        }
        Commands::Generate {
            credentials,
            auto_submit,
            prompt,
        } => {
            let page = TerminalPage::stdio().with_web_config(embedded);
            let form = AuthForm::login(credentials.email, credentials.password);
            let outcome = sign_in(page, backend.clone(), emulator, &form).await?;
            if !outcome.is_redirect() {
                return Ok(outcome);
            }

            let page = Arc::new(TerminalPage::stdio().with_prompt(&prompt));
            let trigger = GenerationTrigger::new(page, backend, DEFAULT_USER_ID)
                .with_auto_submit(auto_submit);
            Ok(trigger.trigger().await)
        }
    }
}

/// Flags win; otherwise ask the server for the configuration its pages embed
async fn web_config(cli: &Cli, backend: &HttpBackend) -> Result<FirebaseWebConfig> {
    if let (Some(api_key), Some(project_id)) = (&cli.api_key, &cli.project_id) {
        return Ok(FirebaseWebConfig {
            api_key: api_key.clone(),
            project_id: project_id.clone(),
            ..Default::default()
        });
    }

    backend
        .fetch_web_config()
        .await
        .with_context(|| format!("Failed to load sign-in configuration from {}", backend.base_url()))
}

async fn sign_in(
    page: TerminalPage,
    backend: Arc<HttpBackend>,
    emulator: Option<String>,
    form: &AuthForm,
) -> Result<FlowOutcome> {
    let handoff = AuthHandoff::from_page(Arc::new(page), backend, |config| {
        let identity = FirebaseIdentity::new(config);
        let identity = match emulator.as_deref() {
            Some(host) => identity.with_emulator(host),
            None => identity,
        };
        Arc::new(identity) as Arc<dyn IdentityProvider>
    })?
    .context("Sign-in configuration missing")?;

    match ClickDispatcher::new(Some(Arc::new(handoff))).submit(form).await {
        ClickDisposition::Intercepted(outcome) => Ok(outcome),
        ClickDisposition::PassThrough => bail!("Sign-in handler not installed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_file_sets_log_filter() {
        let path = std::env::temp_dir().join(format!("scriptly-cli-{}.env", std::process::id()));
        std::fs::write(&path, "RUST_LOG=scriptly=debug\n").unwrap();
        std::env::remove_var("RUST_LOG");

        let filter = load_env(Some(&path));

        assert_eq!(std::env::var("RUST_LOG").as_deref(), Ok("scriptly=debug"));
        assert!(filter.to_string().contains("scriptly=debug"));

        std::env::remove_var("RUST_LOG");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "scriptly",
            "generate",
            "--email",
            "a@b.com",
            "--password",
            "pw",
            "--auto-submit",
            "--url",
            "http://example.com",
            "rust tips",
        ])
        .unwrap();

        assert_eq!(cli.url, "http://example.com");
        match cli.command {
            Commands::Generate {
                credentials,
                auto_submit,
                prompt,
            } => {
                assert_eq!(credentials.email, "a@b.com");
                assert!(auto_submit);
                assert_eq!(prompt, "rust tips");
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_signup_requires_username() {
        let result = Cli::try_parse_from([
            "scriptly",
            "signup",
            "--email",
            "a@b.com",
            "--password",
            "pw",
        ]);
        assert!(result.is_err());
    }
}
