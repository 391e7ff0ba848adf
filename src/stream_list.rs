use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::{
    error::ListError,
    stream::{Platform, StreamRef},
};

type ListResult<T> = std::result::Result<T, ListError>;

/// Emitted after every successful mutation so a renderer can redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Added(StreamRef),
    Removed(StreamRef),
    Moved { from: usize, to: usize },
    /// The whole list was loaded from persisted or shared state.
    Replaced,
}

/// Ordered set of streams. Order is display order, identity is
/// `(platform, id)` and never repeats.
#[derive(Debug, Default)]
pub struct StreamList {
    streams: Vec<StreamRef>,
    subscribers: Vec<UnboundedSender<ListEvent>>,
}

impl StreamList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<ListEvent> {
        let (sender, receiver) = unbounded_channel();
        self.subscribers.push(sender);
        receiver
    }

    fn notify(&mut self, event: ListEvent) {
        // Dropped receivers are forgotten on the next send.
        self.subscribers.retain(|sender| sender.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StreamRef> {
        self.streams.iter()
    }

    pub fn get(&self, index: usize) -> Option<&StreamRef> {
        self.streams.get(index)
    }

    pub fn as_slice(&self) -> &[StreamRef] {
        &self.streams
    }

    pub fn contains(&self, platform: &Platform, id: &str) -> bool {
        self.position(platform, id).is_some()
    }

    pub fn has_platform(&self, platform: &Platform) -> bool {
        self.streams.iter().any(|stream| &stream.platform == platform)
    }

    fn position(&self, platform: &Platform, id: &str) -> Option<usize> {
        self.streams.iter().position(|stream| stream.is(platform, id))
    }

    /// Appends `stream` to the end of the list.
    ///
    /// # Errors
    /// [`ListError::DuplicateEntry`] if the same platform and id are already present.
    pub fn add(&mut self, stream: StreamRef) -> ListResult<()> {
        if self.contains(&stream.platform, &stream.id) {
            return Err(ListError::DuplicateEntry {
                platform: stream.platform,
                id: stream.id,
            });
        }

        log::debug!("adding stream {stream}");
        self.streams.push(stream.clone());
        self.notify(ListEvent::Added(stream));
        Ok(())
    }

    /// Returns whether a stream was removed.
    pub fn remove(&mut self, platform: &Platform, id: &str) -> bool {
        let Some(index) = self.position(platform, id) else {
            return false;
        };

        let removed = self.streams.remove(index);
        log::debug!("removed stream {removed}");
        self.notify(ListEvent::Removed(removed));
        true
    }

    /// Moves the stream at `from` to `to`, shifting the ones in between. This is
    /// a move, not a swap: the relative order of every other stream is kept.
    ///
    /// # Errors
    /// [`ListError::IndexOutOfRange`] when either index is past the end.
    pub fn move_stream(&mut self, from: usize, to: usize) -> ListResult<()> {
        let len = self.streams.len();
        for index in [from, to] {
            if index >= len {
                return Err(ListError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let stream = self.streams.remove(from);
        self.streams.insert(to, stream);
        log::debug!("moved stream {from} -> {to}");
        self.notify(ListEvent::Moved { from, to });
        Ok(())
    }

    pub fn serialize_for_persistence(&self) -> String {
        serde_json::to_string(&self.streams).unwrap_or_else(|_| String::from("[]"))
    }

    /// Replaces the list with the entries of a persisted JSON array. Entries
    /// without a platform or id are skipped, as are repeats.
    ///
    /// # Errors
    /// [`ListError::MalformedPersistedState`] if `data` is not a JSON array. The
    /// list is unchanged in that case.
    pub fn deserialize_from_persistence(&mut self, data: &str) -> ListResult<()> {
        let entries = json_array(data).map_err(ListError::MalformedPersistedState)?;
        self.replace_all(entries.iter().filter_map(StreamRef::from_json_object));
        Ok(())
    }

    /// Compact, URL-safe form of the list: base64 of a JSON array of
    /// `[platform initial, id]` tuples.
    pub fn serialize_for_sharing(&self) -> String {
        let tuples: Vec<[String; 2]> = self.streams.iter().map(StreamRef::to_share_tuple).collect();
        let json = serde_json::to_string(&tuples).unwrap_or_else(|_| String::from("[]"));
        general_purpose::STANDARD.encode(json.as_bytes())
    }

    /// Inverse of [`StreamList::serialize_for_sharing`]. Replaces the whole list.
    ///
    /// # Errors
    /// [`ListError::MalformedShareState`] if the payload is not base64, not UTF-8
    /// or not a JSON array. The list is unchanged in that case. Spaces are read
    /// as `+`, which form decoding of a hand-pasted link turns them into.
    pub fn deserialize_from_sharing(&mut self, payload: &str) -> ListResult<()> {
        let bytes = general_purpose::STANDARD
            .decode(payload.trim().replace(' ', "+"))
            .map_err(|err| ListError::MalformedShareState(err.to_string()))?;
        let json = String::from_utf8(bytes).map_err(|err| ListError::MalformedShareState(err.to_string()))?;
        let entries = json_array(&json).map_err(ListError::MalformedShareState)?;
        self.replace_all(entries.iter().filter_map(StreamRef::from_share_tuple));
        Ok(())
    }

    /// Reads the superseded share format: a plain JSON array of
    /// `{platform, id}` objects (already percent-decoded).
    ///
    /// # Errors
    /// [`ListError::MalformedShareState`] if `data` is not a JSON array.
    pub fn deserialize_from_legacy_share(&mut self, data: &str) -> ListResult<()> {
        let entries = json_array(data).map_err(ListError::MalformedShareState)?;
        self.replace_all(entries.iter().filter_map(StreamRef::from_json_object));
        Ok(())
    }

    fn replace_all(&mut self, streams: impl Iterator<Item = StreamRef>) {
        let mut loaded: Vec<StreamRef> = Vec::new();
        for stream in streams {
            if loaded.iter().any(|s| s.is(&stream.platform, &stream.id)) {
                log::debug!("skipping repeated stream {stream}");
                continue;
            }
            loaded.push(stream);
        }

        log::debug!("loaded {} streams", loaded.len());
        self.streams = loaded;
        self.notify(ListEvent::Replaced);
    }
}

fn json_array(data: &str) -> std::result::Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => Err(format!("expected an array, found {other}")),
        Err(err) => Err(err.to_string()),
    }
}
