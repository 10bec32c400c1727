//! Wiring of the counter and the renderer for one file.
//!
//! [`count_file`] opens the file, builds the shared [`ProgressState`], starts the
//! renderer on a scoped thread, counts inline on the calling thread and waits for the
//! bar to finish before returning the [`WordReport`].

use std::{
    fmt,
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use crate::{
    ProgressState,
    config::RenderConfig,
    counter::count_words,
    error::{Error, Result},
    probe::file_size,
    render::render_until_complete,
};

/// Outcome of a successful counting run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordReport {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// Number of whitespace-delimited words.
    pub words: u64,
    /// Number of bytes read.
    pub bytes: u64,
    /// Wall time spent counting.
    pub elapsed: Duration,
}

impl fmt::Display for WordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "There are {} words in {}.", self.words, self.path.display())
    }
}

/// Opens `path` for counting. Directories are refused here: they open on some
/// platforms but cannot be read.
fn open(path: &Path) -> io::Result<File> {
    let file = File::open(path)?;
    if file.metadata()?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "is a directory",
        ));
    }
    Ok(file)
}

/// Counts the words in the file at `path` while drawing the progress bar on `out`.
///
/// The bar is always complete (50 markers and a newline) when this returns `Ok`. If the
/// file cannot be opened, nothing is written to `out`.
///
/// # Errors
///
/// * [`Error::Open`] if the file cannot be opened. The renderer is never started.
/// * [`Error::Read`] if a read fails partway through.
pub fn count_file<W: Write + Send>(
    path: impl AsRef<Path>,
    config: &RenderConfig,
    out: W,
) -> Result<WordReport> {
    let path = path.as_ref();

    let file = open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let total = file_size(path);
    log::debug!("{}: {total} bytes", path.display());

    count_reader(path, file, total, config, out)
}

/// Counts the words read from `reader`, drawing progress against `total` bytes on `out`.
///
/// `path` only labels the run and the report.
///
/// # Errors
///
/// [`Error::Read`] if `reader` fails partway through. The bar is still completed.
pub fn count_reader<R: Read, W: Write + Send>(
    path: impl AsRef<Path>,
    reader: R,
    total: u64,
    config: &RenderConfig,
    mut out: W,
) -> Result<WordReport> {
    let path = path.as_ref();
    let progress = ProgressState::new(path.to_string_lossy(), total);

    let counted = thread::scope(|s| {
        let renderer = s.spawn(|| {
            if let Err(err) = render_until_complete(&progress, config, &mut out) {
                log::warn!("progress bar stopped: {err}");
            }
        });

        let counted = count_words(reader, &progress);

        // Skip the rest of the current poll interval.
        renderer.thread().unpark();
        if renderer.join().is_err() {
            log::warn!("progress renderer panicked");
        }

        counted
    });

    let words = counted.map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot = progress.snapshot();
    log::debug!(
        "{}: {} bytes in {:?} ({:.0} B/s)",
        snapshot.label(),
        snapshot.current(),
        snapshot.elapsed(),
        snapshot.throughput()
    );

    Ok(WordReport {
        path: path.to_path_buf(),
        words,
        bytes: snapshot.current(),
        elapsed: snapshot.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::{self, Cursor, Read, Write},
        time::Duration,
    };

    use super::{count_file, count_reader};
    use crate::{config::RenderConfig, error::Error};

    const FULL_BAR: &str = "---------+---------+---------+---------+---------+\n";

    fn config() -> RenderConfig {
        RenderConfig::default().with_poll_interval(Duration::from_micros(100))
    }

    fn run(content: &[u8]) -> (u64, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, content).unwrap();

        let mut out = Vec::new();
        let report = count_file(&path, &config(), &mut out).unwrap();
        assert_eq!(report.path, path);
        assert_eq!(report.bytes, content.len() as u64);

        (report.words, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_hello_world() {
        let (words, bar) = run(b"hello world");
        assert_eq!(words, 2);
        assert_eq!(bar, FULL_BAR);
    }

    /// Empty File
    /// Zero bytes gives zero words and the renderer still terminates.
    #[test]
    fn test_empty_file() {
        let (words, bar) = run(b"");
        assert_eq!(words, 0);
        assert_eq!(bar, FULL_BAR);
    }

    #[test]
    fn test_leading_and_trailing() {
        let (words, _) = run(b"  leading and trailing  ");
        assert_eq!(words, 3);
    }

    #[test]
    fn test_whitespace_only() {
        let (words, bar) = run(b" \n\t \r\n ");
        assert_eq!(words, 0);
        assert_eq!(bar, FULL_BAR);
    }

    /// Large Input
    /// Enough bytes that the renderer samples many times mid-run.
    #[test]
    fn test_large_file_bar_is_exact() {
        let content = "lorem ipsum dolor\n".repeat(20_000);
        let (words, bar) = run(content.as_bytes());
        assert_eq!(words, 60_000);
        assert_eq!(bar, FULL_BAR);
    }

    #[test]
    fn test_report_display() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, "hello world").unwrap();

        let report = count_file(&path, &config(), Vec::new()).unwrap();

        assert_eq!(
            report.to_string(),
            format!("There are 2 words in {}.", path.display())
        );
    }

    /// Missing File
    /// Open failure is reported and the renderer never writes anything.
    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let mut out = Vec::new();
        let err = count_file(&path, &config(), &mut out).unwrap_err();

        assert!(matches!(err, Error::Open { .. }));
        assert_eq!(err.to_string(), "Could not open file");
        assert!(out.is_empty());
    }

    #[test]
    fn test_directory_is_open_failure() {
        let dir = tempfile::tempdir().unwrap();

        let mut out = Vec::new();
        let err = count_file(dir.path(), &config(), &mut out).unwrap_err();

        assert!(matches!(err, Error::Open { .. }));
        assert!(out.is_empty());
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    /// Closed Output
    /// A bar that cannot be written does not change the count.
    #[test]
    fn test_broken_output_keeps_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "hello world ".repeat(10_000)).unwrap();

        let report = count_file(&path, &config(), ClosedSink).unwrap();

        assert_eq!(report.words, 20_000);
        assert_eq!(report.bytes, 120_000);
    }

    struct FailAfter {
        data: Cursor<Vec<u8>>,
        remaining: usize,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("device gone"));
            }
            let len = buf.len().min(self.remaining);
            let n = self.data.read(&mut buf[..len])?;
            self.remaining -= n;
            Ok(n)
        }
    }

    /// Read Failure
    /// A read failing midway is reported as a read error and the bar is still closed.
    #[test]
    fn test_read_failure_is_read_error() {
        let reader = FailAfter {
            data: Cursor::new(b"one two three four".to_vec()),
            remaining: 8,
        };

        let mut out = Vec::new();
        let err = count_reader("flaky.txt", reader, 18, &config(), &mut out).unwrap_err();

        assert!(matches!(&err, Error::Read { path, .. } if path.as_os_str() == "flaky.txt"));
        assert_eq!(err.to_string(), "Could not read file");
        assert_eq!(String::from_utf8(out).unwrap(), FULL_BAR);
    }
}
