//! Open record sinks of one transfer run

use std::collections::BTreeMap;

use crate::collection::Collection;
use crate::error::LedgerResult;
use crate::sink::RecordSink;

type Opener<'a, S> = Box<dyn FnMut(Collection) -> LedgerResult<S> + 'a>;

/// Cache of record sinks, opened on first use and kept for the whole run
///
/// A run may touch several collections; each one is opened at most once and
/// handed back by [`TransferSession::into_sinks`] so the caller can persist
/// exactly the books that were written.
pub struct TransferSession<'a, S> {
    sinks: BTreeMap<Collection, S>,
    opener: Opener<'a, S>,
}

impl<'a, S: RecordSink> TransferSession<'a, S> {
    /// Create a session that opens sinks with `opener`
    pub fn new<F>(opener: F) -> Self
    where
        F: FnMut(Collection) -> LedgerResult<S> + 'a,
    {
        Self {
            sinks: BTreeMap::new(),
            opener: Box::new(opener),
        }
    }

    /// Create a session over sinks that are already open
    pub fn with_sinks<I>(sinks: I) -> Self
    where
        I: IntoIterator<Item = (Collection, S)>,
    {
        let mut session = Self::new(|collection| {
            Err(crate::error::LedgerError::StoreUnavailable(format!(
                "no record book for {collection}"
            )))
        });
        session.sinks.extend(sinks);
        session
    }

    /// Sink for a collection, opening it on first use
    pub fn sink_mut(&mut self, collection: Collection) -> LedgerResult<&mut S> {
        if !self.sinks.contains_key(&collection) {
            let sink = (self.opener)(collection)?;
            tracing::debug!(%collection, "opened record book");
            self.sinks.insert(collection, sink);
        }
        self.sinks
            .get_mut(&collection)
            .ok_or_else(|| crate::error::LedgerError::StoreUnavailable(collection.to_string()))
    }

    /// Close the session, returning every opened sink
    pub fn into_sinks(self) -> BTreeMap<Collection, S> {
        self.sinks
    }
}

impl<S> std::fmt::Debug for TransferSession<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferSession")
            .field("opened", &self.sinks.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageLayout;
    use crate::sink::BookSink;
    use care_diary_core::Book;

    #[test]
    fn test_opens_each_collection_once() {
        let mut opened = Vec::new();
        {
            let mut session = TransferSession::new(|collection| {
                opened.push(collection);
                Ok(BookSink::new(Book::new(), PageLayout::default()))
            });

            session.sink_mut(Collection::SecondFloor).unwrap();
            session.sink_mut(Collection::SecondFloor).unwrap();
            session.sink_mut(Collection::Departed).unwrap();

            let sinks = session.into_sinks();
            assert_eq!(sinks.len(), 2);
        }
        assert_eq!(opened, vec![Collection::SecondFloor, Collection::Departed]);
    }

    #[test]
    fn test_with_sinks_refuses_unknown() {
        let sink = BookSink::new(Book::new(), PageLayout::default());
        let mut session = TransferSession::with_sinks([(Collection::ThirdFloor, sink)]);
        assert!(session.sink_mut(Collection::ThirdFloor).is_ok());
        assert!(session.sink_mut(Collection::SecondFloor).is_err());
    }
}
