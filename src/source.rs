use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

#[cfg(test)]
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io::Cursor,
};

pub use self::{clock::*, stats::*};

mod clock {
    use super::*;

    /// a source of time for the sampling loop.
    pub trait Clock {
        fn now(&self) -> Instant;

        /// waits out the gap between two ticks.
        fn sleep(&self, duration: Duration) {
            std::thread::sleep(duration)
        }
    }

    #[derive(Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
    }

    /// a mock clock.
    ///
    /// time only moves when the clock is advanced, or when something sleeps on it.
    #[cfg(test)]
    pub struct MockClock {
        now: Cell<Instant>,
    }

    #[cfg(test)]
    impl Default for MockClock {
        fn default() -> Self {
            Self {
                now: Cell::new(Instant::now()),
            }
        }
    }

    #[cfg(test)]
    impl MockClock {
        pub fn advance(&self, duration: Duration) {
            let Self { now } = self;
            now.set(now.get() + duration);
        }
    }

    #[cfg(test)]
    impl Clock for MockClock {
        fn now(&self) -> Instant {
            self.now.get()
        }

        fn sleep(&self, duration: Duration) {
            self.advance(duration)
        }
    }
}

/// abstracts over providers of statistics.
mod stats {
    use super::*;

    /// a source of kernel statistics.
    pub trait StatsSource {
        /// returns a reader.
        fn open(&self) -> io::Result<impl Read>;
    }

    /// stats backed by a file in `/proc`.
    #[derive(Clone, Debug)]
    pub struct ProcFile {
        path: PathBuf,
    }

    /// a mock stat source.
    ///
    /// each call to [`StatsSource::open()`] yields the next queued document. once the queue is
    /// exhausted, opening fails as though the file had disappeared.
    #[cfg(test)]
    #[derive(Default)]
    pub struct MockFile {
        contents: RefCell<VecDeque<String>>,
    }

    // === impl ProcFile ===

    impl StatsSource for ProcFile {
        fn open(&self) -> io::Result<impl Read> {
            File::open(&self.path).map(BufReader::new)
        }
    }

    impl ProcFile {
        const STAT: &str = "/proc/stat";
        const MEMINFO: &str = "/proc/meminfo";

        /// the kernel's cpu time accounting.
        pub fn stat() -> Self {
            Self::at(Self::STAT)
        }

        /// the kernel's memory accounting.
        pub fn meminfo() -> Self {
            Self::at(Self::MEMINFO)
        }

        pub fn at(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_owned(),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    // === impl MockFile ===

    #[cfg(test)]
    impl StatsSource for MockFile {
        fn open(&self) -> io::Result<impl Read> {
            let Self { contents } = self;

            contents
                .borrow_mut()
                .pop_front()
                .map(Cursor::new)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "mock file is exhausted"))
        }
    }

    #[cfg(test)]
    impl MockFile {
        pub fn new<I, S>(documents: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                contents: RefCell::new(documents.into_iter().map(Into::into).collect()),
            }
        }
    }
}
