//! Background scan service
//!
//! Directory listings run on a dedicated worker thread so the UI thread
//! never blocks on the filesystem. Each dispatched scan carries a
//! monotonically increasing generation; only the result matching the
//! latest dispatch is ever handed back, so a stale scan can never
//! overwrite a newer navigation. Queued requests are coalesced to the
//! newest before the worker starts listing.

use app_fs::{scan_directory, Entry};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug)]
struct ScanRequest {
    generation: u64,
    path: PathBuf,
}

/// A completed directory scan.
#[derive(Debug)]
pub struct ScanResult {
    pub generation: u64,
    pub path: PathBuf,
    pub entries: Vec<Entry>,
    pub elapsed_ms: f64,
}

/// Handle to the scan worker, owned by the UI side.
pub struct Scanner {
    request_tx: Sender<ScanRequest>,
    reply_rx: Receiver<ScanResult>,
    latest: u64,
    applied: u64,
}

impl Scanner {
    /// Spawn the worker thread and return the UI-side handle.
    pub fn new() -> Self {
        let (request_tx, request_rx) = unbounded::<ScanRequest>();
        let (reply_tx, reply_rx) = unbounded::<ScanResult>();

        std::thread::spawn(move || worker_loop(request_rx, reply_tx));

        Self {
            request_tx,
            reply_rx,
            latest: 0,
            applied: 0,
        }
    }

    /// Request a scan of `path`, superseding any scan still in flight.
    /// Returns the generation assigned to this request.
    pub fn dispatch(&mut self, path: PathBuf) -> u64 {
        self.latest += 1;
        let generation = self.latest;

        tracing::debug!("Dispatching scan #{} for {}", generation, path.display());
        if self.request_tx.send(ScanRequest { generation, path }).is_err() {
            tracing::error!("Scan worker is gone, scan #{} dropped", generation);
        }

        generation
    }

    /// Drain completed scans, returning the one matching the latest
    /// dispatch. Anything older is discarded unseen.
    pub fn poll(&mut self) -> Option<ScanResult> {
        let mut fresh = None;

        loop {
            match self.reply_rx.try_recv() {
                Ok(result) if result.generation == self.latest => {
                    self.applied = result.generation;
                    fresh = Some(result);
                }
                Ok(stale) => {
                    tracing::debug!("Discarding stale scan #{}", stale.generation);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        fresh
    }

    /// Whether the latest dispatched scan has not come back yet.
    pub fn is_pending(&self) -> bool {
        self.applied != self.latest
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn worker_loop(request_rx: Receiver<ScanRequest>, reply_tx: Sender<ScanResult>) {
    while let Ok(mut request) = request_rx.recv() {
        // Only the newest queued request is worth scanning.
        while let Ok(newer) = request_rx.try_recv() {
            tracing::debug!("Skipping superseded scan #{}", request.generation);
            request = newer;
        }

        let started = Instant::now();

        // A failed listing degrades to zero entries; the UI shows an
        // empty list either way and must not distinguish the two.
        let entries = match scan_directory(&request.path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Scan of {} failed: {}", request.path.display(), e);
                Vec::new()
            }
        };

        let result = ScanResult {
            generation: request.generation,
            path: request.path,
            entries,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        };

        if reply_tx.send(result).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn poll_until_result(scanner: &mut Scanner) -> ScanResult {
        for _ in 0..500 {
            if let Some(result) = scanner.poll() {
                return result;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("scan worker never replied");
    }

    #[test]
    fn test_scan_completes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut scanner = Scanner::new();
        let generation = scanner.dispatch(dir.path().to_path_buf());
        assert!(scanner.is_pending());

        let result = poll_until_result(&mut scanner);
        assert_eq!(result.generation, generation);
        assert_eq!(result.entries.len(), 2);
        assert!(!scanner.is_pending());
    }

    #[test]
    fn test_newest_dispatch_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("marker.txt"), b"x").unwrap();

        let mut scanner = Scanner::new();
        scanner.dispatch(first.path().to_path_buf());
        scanner.dispatch(second.path().to_path_buf());

        let result = poll_until_result(&mut scanner);
        assert_eq!(result.path, second.path());
        assert_eq!(result.entries.len(), 1);

        // Nothing older ever surfaces afterwards.
        assert!(scanner.poll().is_none());
    }

    #[test]
    fn test_poll_discards_stale_generations() {
        // Hand-built scanner: replies injected directly, no worker.
        let (request_tx, _request_rx) = unbounded();
        let (reply_tx, reply_rx) = unbounded();
        let mut scanner = Scanner {
            request_tx,
            reply_rx,
            latest: 2,
            applied: 0,
        };

        for generation in [1, 2] {
            reply_tx
                .send(ScanResult {
                    generation,
                    path: PathBuf::from(format!("dir{}", generation)),
                    entries: Vec::new(),
                    elapsed_ms: 0.0,
                })
                .unwrap();
        }

        let result = scanner.poll().unwrap();
        assert_eq!(result.generation, 2);
        assert_eq!(result.path, PathBuf::from("dir2"));
        assert!(scanner.poll().is_none());
    }

    #[test]
    fn test_failed_listing_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vanished = dir.path().join("vanished");

        let mut scanner = Scanner::new();
        scanner.dispatch(vanished.clone());

        let result = poll_until_result(&mut scanner);
        assert_eq!(result.path, vanished);
        assert!(result.entries.is_empty());
    }
}
