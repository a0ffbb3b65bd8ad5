use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, registry, prelude::*};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard};
use std::fs::OpenOptions;

fn build_and_set_global_subscriber<P>(logfile: Option<P>, is_test : bool) -> anyhow::Result<Option<WorkerGuard>> where
  P : AsRef<Path>
{
  let stderr_log = fmt::layer().with_writer(std::io::stderr);
  let env_filter = EnvFilter::from_default_env();
  let r = registry().with(stderr_log).with(env_filter);

  let flush_guard = match logfile {
    Some(p) => {
      let logfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(p)?;
      let (writer, _guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(logfile);
      let json = fmt::layer()
        .json()
        .with_span_list(true)
        .with_current_span(false)
        .with_writer(writer);

      let r = r.with(json);
      if is_test { r.try_init().ok(); }
      else { r.try_init().map_err(|e| anyhow::anyhow!("{}", e))?; }
      Some(_guard)
    },
    None => {
      if is_test { r.try_init().ok(); }
      else { r.try_init().map_err(|e| anyhow::anyhow!("{}", e))?; }
      None
    }
  };
  Ok(flush_guard)
}

/// Installs the global subscriber: human-readable events on stderr, filtered by `RUST_LOG`, and
/// if `logfile` is given, every event as JSON in that file.  Keep the returned guard alive until
/// exit so the file gets flushed.
pub fn init_logging(logfile: Option<impl AsRef<Path>>) -> anyhow::Result<Option<WorkerGuard>> {
  build_and_set_global_subscriber(logfile, false)
}

#[allow(dead_code)]
pub(crate) fn init_test_logging(logfile: Option<impl AsRef<Path>>) -> Option<WorkerGuard> {
  build_and_set_global_subscriber(logfile, true).ok().flatten()
}
