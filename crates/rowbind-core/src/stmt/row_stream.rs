use super::ValueRecord;

use std::{
    collections::VecDeque,
    fmt,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// A stream of rows produced by a driver.
///
/// Rows are either fully buffered (drivers that read every row eagerly) or
/// pulled from an underlying stream as the consumer asks for them. Both look
/// the same to consumers.
#[derive(Default)]
pub struct RowStream {
    buffer: VecDeque<ValueRecord>,
    stream: Option<DynStream>,
}

type DynStream = Pin<Box<dyn Stream<Item = crate::Result<ValueRecord>> + Send + 'static>>;

impl RowStream {
    pub fn from_stream<T>(stream: T) -> Self
    where
        T: Stream<Item = crate::Result<ValueRecord>> + Send + 'static,
    {
        Self {
            buffer: VecDeque::new(),
            stream: Some(Box::pin(stream)),
        }
    }

    pub fn from_vec(rows: Vec<ValueRecord>) -> Self {
        Self {
            buffer: rows.into(),
            stream: None,
        }
    }

    /// Returns the next row in the stream
    pub async fn next(&mut self) -> Option<crate::Result<ValueRecord>> {
        StreamExt::next(self).await
    }

    pub async fn collect(mut self) -> crate::Result<Vec<ValueRecord>> {
        let (low, _) = self.size_hint();
        let mut ret = Vec::with_capacity(low);

        while let Some(res) = self.next().await {
            ret.push(res?);
        }

        Ok(ret)
    }
}

impl Stream for RowStream {
    type Item = crate::Result<ValueRecord>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(next) = self.buffer.pop_front() {
            Poll::Ready(Some(Ok(next)))
        } else if let Some(stream) = self.stream.as_mut() {
            stream.as_mut().poll_next(cx)
        } else {
            Poll::Ready(None)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (low, high) = match &self.stream {
            Some(stream) => stream.size_hint(),
            None => (0, Some(0)),
        };

        let buffered = self.buffer.len();
        (low + buffered, high.map(|high| high + buffered))
    }
}

impl From<Vec<ValueRecord>> for RowStream {
    fn from(value: Vec<ValueRecord>) -> Self {
        Self::from_vec(value)
    }
}

impl fmt::Debug for RowStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStream")
            .field("buffered", &self.buffer.len())
            .field("streaming", &self.stream.is_some())
            .finish()
    }
}
