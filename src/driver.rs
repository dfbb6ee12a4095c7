use crate::error::DriverError;
use crate::model::Config;
use crate::report::{Report, Reporter};
use crate::worker::worker;
use std::io::Write;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::info;

/// Runs every virtual user to completion, one line per request on `out`.
pub async fn run<W>(config: Config, out: W) -> Result<Report<W>, DriverError>
where
    W: Write + Send + 'static,
{
    info!(
        url = %config.spec.url,
        users = config.vus,
        requests_per_user = config.requests_per_user,
        timeout = ?config.timeout,
        "starting load run"
    );

    let (tx, rx) = mpsc::channel(100);
    let reporter = Reporter::new(out, config.total_requests(), config.progress);
    let h = tokio::spawn(reporter.run(rx));

    let mut set = JoinSet::new();
    for rank in 0..config.vus {
        set.spawn(worker(rank, config.clone(), tx.clone()));
    }

    drop(tx);

    let mut first_err = None;
    while let Some(res) = set.join_next().await {
        if let Err(e) = res.map_err(DriverError::from).and_then(|r| r) {
            if first_err.is_none() {
                set.abort_all();
                first_err = Some(e);
            }
        }
    }

    let report = h.await??;
    if let Some(e) = first_err {
        return Err(e);
    }

    info!(lines = report.lines, "load run finished");
    Ok(report)
}
