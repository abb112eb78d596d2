//! Authprobe runner
//!
//! Runs every canonical scenario against a deployment and exits non-zero if
//! any scenario fails.

use std::path::PathBuf;

use authprobe::{runner, HarnessConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = HarnessConfig::from_env();
    let mut avatar: Option<PathBuf> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--auth-url" | "-a" => {
                if i + 1 < args.len() {
                    config.auth_base_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--heartbeat-url" | "-b" => {
                if i + 1 < args.len() {
                    config.heartbeat_base_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--api-key" | "-k" => {
                if i + 1 < args.len() {
                    config.api_key = args[i + 1].clone();
                    i += 1;
                }
            }
            "--avatar" => {
                if i + 1 < args.len() {
                    avatar = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("authprobe - contract checks for the auth service\n");
                println!("USAGE:");
                println!("    authprobe [OPTIONS]\n");
                println!("OPTIONS:");
                println!("    -a, --auth-url <URL>       Auth service base URL (incl. /api/auth)");
                println!("    -b, --heartbeat-url <URL>  Heartbeat service base URL");
                println!("    -k, --api-key <KEY>        API key sent as X-API-Key");
                println!("        --avatar <PATH>        Image file for the upload scenario");
                println!("    -h, --help                 Show this help message");
                println!("\nEnv overrides: AUTH_SERVICE_URL, HEARTBEAT_URL, X_API_KEY");
                return;
            }
            _ => {}
        }
        i += 1;
    }

    // Fall back to the embedded 1x1 PNG when no avatar file was given. The
    // temp file guard must outlive the run.
    let _guard;
    let avatar = match avatar {
        Some(path) => path,
        None => match runner::default_avatar() {
            Ok((guard, path)) => {
                _guard = guard;
                path
            }
            Err(e) => {
                eprintln!("cannot prepare avatar fixture: {}", e);
                std::process::exit(2);
            }
        },
    };

    let report = runner::run_all(&config, &avatar).await;
    print!("{}", report.summary());
    if !report.passed() {
        std::process::exit(1);
    }
}
