// Copyright 2025 Pageflow (https://github.com/pageflow-rs/pageflow)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Lazy record sources.
//!
//! A [`RecordSource`] is a pull-based, single-consumer sequence with three
//! observable states per pull: another record (`Ok(Some)`), end of sequence
//! (`Ok(None)`), or failure (`Err`). Of the failures, exactly one is special:
//! [`SourceError::Busy`], raised when a source is asked to advance while a
//! previous advance is still running. The fetcher recognizes end-of-sequence
//! and `Busy` as normal exhaustion; every other error is fatal.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};
use thiserror::Error;
use tokio::sync::Mutex;

use pageflow_core::{BoxError, Record};

/// Failure while advancing a record source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source was asked to advance while another advance was in flight.
    /// Recognized by the fetcher as exhaustion, not failure.
    #[error("source advanced reentrantly")]
    Busy,

    /// Source-specific failure. Fatal to the fetch.
    #[error("source failed")]
    Other(#[source] BoxError),
}

/// A pull-based, single-consumer lazy sequence of records.
#[async_trait]
pub trait RecordSource<T>: Send {
    /// Advance the source by one record.
    async fn next_record(&mut self) -> Result<Option<Record<T>>, SourceError>;
}

/// Source over an in-memory iterator. Mostly useful for tests and demos.
#[derive(Debug)]
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I> {
    /// Wrap anything iterable into a source.
    pub fn new<It>(items: It) -> Self
    where
        It: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: items.into_iter(),
        }
    }
}

#[async_trait]
impl<T, I> RecordSource<T> for IterSource<I>
where
    T: Send,
    I: Iterator<Item = Record<T>> + Send,
{
    async fn next_record(&mut self) -> Result<Option<Record<T>>, SourceError> {
        Ok(self.iter.next())
    }
}

/// Source over an infallible stream of records.
#[derive(Debug)]
pub struct StreamSource<S> {
    stream: S,
}

impl<S> StreamSource<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<T, S> RecordSource<T> for StreamSource<S>
where
    T: Send,
    S: Stream<Item = Record<T>> + Send + Unpin,
{
    async fn next_record(&mut self) -> Result<Option<Record<T>>, SourceError> {
        Ok(self.stream.next().await)
    }
}

/// Source over a fallible stream; item errors become [`SourceError::Other`]
/// and are therefore fatal to the fetch.
#[derive(Debug)]
pub struct TryStreamSource<S> {
    stream: S,
}

impl<S> TryStreamSource<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<T, S, E> RecordSource<T> for TryStreamSource<S>
where
    T: Send,
    E: Into<BoxError>,
    S: Stream<Item = Result<Record<T>, E>> + Send + Unpin,
{
    async fn next_record(&mut self) -> Result<Option<Record<T>>, SourceError> {
        match self.stream.next().await {
            Some(Ok(record)) => Ok(Some(record)),
            Some(Err(cause)) => Err(SourceError::Other(cause.into())),
            None => Ok(None),
        }
    }
}

/// A stream shared between several consumers.
///
/// Advancing never waits for the inner lock: if the stream is already being
/// advanced elsewhere, the pull reports [`SourceError::Busy`] and the calling
/// fetcher retires itself. A single stream of results can back several
/// pagination sessions this way, with exactly one of them draining it.
#[derive(Debug)]
pub struct SharedStreamSource<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedStreamSource<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stream)),
        }
    }
}

impl<S> Clone for SharedStreamSource<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<T, S> RecordSource<T> for SharedStreamSource<S>
where
    T: Send,
    S: Stream<Item = Record<T>> + Send + Unpin,
{
    async fn next_record(&mut self) -> Result<Option<Record<T>>, SourceError> {
        let mut stream = self.inner.try_lock().map_err(|_| SourceError::Busy)?;
        Ok(stream.next().await)
    }
}
