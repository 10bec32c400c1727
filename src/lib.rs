//! # `word_progress`
//!
//! Counts the words in a file while a second thread draws a textual progress bar of the
//! bytes consumed so far.
//!
//! The two sides share nothing but a [`ProgressState`]:
//!
//! * **Producer**: the counter streams the file one byte at a time, advancing an atomic
//!   byte cursor and classifying whitespace transitions.
//! * **Consumer**: the renderer samples the cursor at a bounded rate and prints up to 50
//!   markers, catching up opportunistically when the producer runs ahead.
//!
//! ## Modules
//!
//! * [`probe`]: File size lookup used as the bar's total.
//! * [`progress`]: The shared [`ProgressState`] and its [`ProgressSnapshot`].
//! * [`io`]: A [`std::io::Read`] wrapper that publishes bytes read.
//! * [`counter`]: The word-boundary state machine and the counting loop.
//! * [`render`]: Marker computation and the polling render loop.
//! * [`run`]: Ties the above together for one file.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod counter;
pub mod error;
pub mod io;
pub mod probe;
pub mod progress;
pub mod render;
pub mod run;

pub use config::RenderConfig;
pub use counter::{WordCounter, count_words};
pub use error::{Error, Result};
pub use progress::{ProgressSnapshot, ProgressState};
pub use run::{WordReport, count_file, count_reader};
