use stampede::*;

use clap::Parser;
use model::defaults;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Login endpoint to post to
    #[arg(long, default_value = defaults::URL)]
    url: String,

    /// Number of virtual users
    #[arg(short, long, default_value_t = defaults::USERS)]
    users: usize,

    /// Sequential requests sent by each virtual user
    #[arg(short, long, default_value_t = defaults::REQUESTS_PER_USER)]
    requests: usize,

    /// Username placed in the JSON body
    #[arg(long, default_value = defaults::USERNAME)]
    username: String,

    /// Password placed in the JSON body
    #[arg(long, default_value = defaults::PASSWORD)]
    password: String,

    /// Per-request timeout in seconds, 0 to wait forever
    #[arg(short, long, default_value_t = defaults::TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Do not draw the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let config = model::Config {
        vus: args.users,
        requests_per_user: args.requests,
        timeout: (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs)),
        progress: !args.no_progress,
        spec: Arc::new(model::RequestSpec::new(
            args.url,
            args.username,
            args.password,
        )),
    };

    driver::run(config, std::io::stdout()).await?;

    Ok(())
}
