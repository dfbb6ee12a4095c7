use crate::model::Outcome;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tokio::sync::mpsc;

/// Sole writer of outcome lines.
pub struct Reporter<W> {
    out: W,
    pb: ProgressBar,
    lines: usize,
}

#[derive(Debug)]
pub struct Report<W> {
    pub lines: usize,
    pub out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, total: usize, progress: bool) -> Self {
        let pb = if progress {
            let sty = ProgressStyle::with_template("{spinner} {elapsed_precise} [{bar:40}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            let pb = ProgressBar::new(total as u64);
            pb.set_style(sty);
            pb
        } else {
            ProgressBar::hidden()
        };
        Self { out, pb, lines: 0 }
    }

    pub fn record(&mut self, outcome: &Outcome) -> std::io::Result<()> {
        let out = &mut self.out;
        self.pb.suspend(|| {
            writeln!(out, "{outcome}")?;
            out.flush()
        })?;
        self.pb.inc(1);
        self.lines += 1;
        Ok(())
    }

    /// Drains the channel until all senders are dropped.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Outcome>) -> std::io::Result<Report<W>> {
        while let Some(outcome) = rx.recv().await {
            self.record(&outcome)?;
        }
        self.pb.finish_and_clear();
        Ok(Report {
            lines: self.lines,
            out: self.out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;
    use crate::model::Status;
    use chrono::Utc;

    fn outcome(rank: usize, ite: usize, status: Status) -> Outcome {
        let now = Utc::now();
        Outcome {
            rank,
            ite,
            status,
            sent_at: now,
            received_at: now,
        }
    }

    #[tokio::test]
    async fn writes_one_line_per_outcome_in_arrival_order() {
        let (tx, rx) = mpsc::channel(8);
        let reporter = Reporter::new(Vec::new(), 3, false);
        let h = tokio::spawn(reporter.run(rx));

        tx.send(outcome(1, 0, Status::Code(200))).await.unwrap();
        tx.send(outcome(0, 0, Status::Code(429))).await.unwrap();
        tx.send(outcome(
            1,
            1,
            Status::Failed(RequestError::Connect("connection refused".into())),
        ))
        .await
        .unwrap();
        drop(tx);

        let report = h.await.unwrap().unwrap();
        assert_eq!(report.lines, 3);
        assert_eq!(
            String::from_utf8(report.out).unwrap(),
            "user-1 -> 200\nuser-0 -> 429\nuser-1 -> error: connect: connection refused\n"
        );
    }

    #[tokio::test]
    async fn empty_channel_writes_nothing() {
        let (tx, rx) = mpsc::channel::<Outcome>(1);
        drop(tx);
        let report = Reporter::new(Vec::new(), 0, false).run(rx).await.unwrap();
        assert_eq!(report.lines, 0);
        assert!(report.out.is_empty());
    }
}
