use anyhow::bail;
use clap::Parser;

/// Runtime configuration for the `barcode-range-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first). Credential pairs are deliberately not CLI
/// arguments; see [`crate::server::credentials::CredentialStore::from_env`].
#[derive(Parser, Debug, Clone)]
#[command(
    name = "barcode-range-server",
    version,
    about = "A mock HTTP service that allocates randomized barcode ranges"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Example: "0.0.0.0:3030" or "127.0.0.1:8080"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:3030"))]
    pub server_addr: String,

    /// Largest accepted request body, in bytes.
    ///
    /// Larger bodies are rejected with `413 Payload Too Large` before any
    /// validation runs.
    ///
    /// Environment variable: `MAX_BODY_BYTES`
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 100 * 1024)]
    pub max_body_bytes: usize,

    /// Emit logs as JSON lines instead of human-readable output.
    ///
    /// Environment variable: `LOG_JSON`
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub max_body_bytes: usize,
    pub log_json: bool,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.max_body_bytes == 0 {
            bail!("MAX_BODY_BYTES must be greater than 0");
        }

        if args.server_addr.trim().is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        Ok(Self {
            server_addr: args.server_addr,
            max_body_bytes: args.max_body_bytes,
            log_json: args.log_json,
        })
    }
}
