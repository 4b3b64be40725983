//! Regenerates documents whenever the spreadsheet changes.
//!
//! The source file is polled for modification time and size. A change seen
//! while a cycle is running is picked up by the next poll, so bursts of edits
//! coalesce into at most one follow-up cycle.

use crate::config::FileConfig;
use crate::generate::{SourceOptions, generate_once};
use i18n_csv::Generator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// How often the stop flag is checked while sleeping.
const STOP_CHECK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

fn fingerprint(path: &Path) -> Option<Fingerprint> {
    let metadata = std::fs::metadata(path).ok()?;
    Some(Fingerprint {
        modified: metadata.modified().ok(),
        len: metadata.len(),
    })
}

/// Sleeps for `interval`, returning early once `stop` is set.
async fn pause(interval: Duration, stop: &AtomicBool) {
    tokio::select! {
        _ = tokio::time::sleep(interval) => {}
        _ = async {
            while !stop.load(Ordering::Relaxed) {
                tokio::time::sleep(STOP_CHECK).await;
            }
        } => {}
    }
}

/// Runs `on_change` once, then again after every change to `path`, until
/// `stop` is set. Failed cycles are reported and the loop carries on.
///
/// Returns how many cycles ran.
pub async fn watch_loop<F>(
    path: PathBuf,
    interval: Duration,
    stop: Arc<AtomicBool>,
    mut on_change: F,
) -> usize
where
    F: FnMut() -> Result<(), String>,
{
    let mut cycles = 0;
    let mut last = fingerprint(&path);

    if let Err(e) = on_change() {
        eprintln!("❌ Error during generation: {}", e);
    }
    cycles += 1;

    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        pause(interval, &stop).await;
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let current = fingerprint(&path);
        if current == last {
            continue;
        }
        last = current;

        if current.is_none() {
            warn!(path = %path.display(), "watched file disappeared");
            continue;
        }

        println!("\n📝 File changed: {}", path.display());
        println!("🔄 Regenerating JSON files...\n");
        debug!(cycle = cycles + 1, "starting regeneration");
        if let Err(e) = on_change() {
            eprintln!("❌ Error during regeneration: {}", e);
        }
        cycles += 1;
    }

    info!(cycles, "watcher stopped");
    cycles
}

/// `watch` command: regenerate on every change until Ctrl-C.
pub async fn run_watch(
    opts: &SourceOptions,
    file: &FileConfig,
    interval_ms: Option<u64>,
) -> Result<(), String> {
    let (input, output) = opts.input_and_output(file, "watch")?;
    let config = opts.generator_config(file, &input, Some(output.as_str()))?;
    let generator = Generator::new(config);
    let interval = Duration::from_millis(
        interval_ms
            .or(file.watch_interval_ms)
            .unwrap_or(DEFAULT_INTERVAL_MS)
            .max(1),
    );

    let stop = Arc::new(AtomicBool::new(false));
    let signal_flag = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n👋 Stopping file watcher...");
            signal_flag.store(true, Ordering::Relaxed);
        }
    });

    println!("👀 Watching for CSV file changes...\n");
    watch_loop(PathBuf::from(&input), interval, stop, || {
        generate_once(&generator, &input, &output)
    })
    .await;
    Ok(())
}
