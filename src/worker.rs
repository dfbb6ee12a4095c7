use crate::error::{DriverError, RequestError};
use crate::model::{Config, Outcome, RequestSpec, Status};
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::debug;

/// Posts the login body once. Any HTTP status counts as a response.
pub async fn send_once(client: &reqwest::Client, spec: &RequestSpec) -> Status {
    let response = match client.post(&spec.url).json(&spec.body).send().await {
        Ok(res) => res,
        Err(e) => return Status::Failed(RequestError::from(e)),
    };
    let code = response.status().as_u16();

    // drain the body so the connection goes back to this user's pool
    if let Err(e) = response.bytes().await {
        debug!(code, error = %e, "discarding unread response body");
    }
    Status::Code(code)
}

/// Runs one virtual user: `requests_per_user` sequential posts over a single client.
pub async fn worker(
    rank: usize,
    config: Config,
    tx: mpsc::Sender<Outcome>,
) -> Result<(), DriverError> {
    let client = config.client()?;
    debug!(rank, requests = config.requests_per_user, "virtual user started");

    for ite in 0..config.requests_per_user {
        let sent_at = Utc::now();
        let status = send_once(&client, &config.spec).await;
        let received_at = Utc::now();

        match &status {
            Status::Code(code) => debug!(
                rank,
                ite,
                code,
                elapsed_ms = (received_at - sent_at).num_milliseconds(),
                "response"
            ),
            Status::Failed(e) => debug!(rank, ite, error = %e, "request failed"),
        }

        tx.send(Outcome {
            rank,
            ite,
            status,
            sent_at,
            received_at,
        })
        .await
        .map_err(|_| DriverError::ReporterClosed)?;
    }

    debug!(rank, "virtual user finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_requests_stay_quiet_at_warn_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = Config {
            vus: 1,
            requests_per_user: 3,
            timeout: Some(Duration::from_secs(5)),
            progress: false,
            spec: Arc::new(RequestSpec::new(
                format!("http://127.0.0.1:{port}/auth/login"),
                "test1",
                "test123",
            )),
        };

        let (tx, mut rx) = mpsc::channel(8);
        worker(0, config, tx).await.unwrap();

        let mut failed = 0;
        while let Some(outcome) = rx.recv().await {
            assert!(outcome.status.code().is_none());
            failed += 1;
        }
        assert_eq!(failed, 3);
        assert!(captured.0.lock().unwrap().is_empty());
    }
}
