use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    error::{Error, ListError},
    parser,
    share::{self, ShareParams},
    storage::{Storage, STREAMS_KEY, THEME_KEY},
    stream::{Platform, StreamRef},
    stream_list::{ListEvent, StreamList},
};

type SessionResult<T> = std::result::Result<T, Error>;

/// Where the layout came from when the session started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    ShareLink,
    LegacyShareLink,
    Storage,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// The stream list together with the store it is persisted to. Renderers get a
/// `Session` and never touch the list or the storage directly; every mutation
/// goes through here and is written back before returning.
pub struct Session<S: Storage> {
    list: StreamList,
    storage: S,
    origin: Origin,
}

impl<S: Storage> Session<S> {
    /// Builds the startup layout. A share link wins over persisted state and,
    /// when it decodes, immediately replaces what was persisted. A link that is
    /// absent or broken falls back to storage.
    pub fn bootstrap(storage: S, share_link: Option<&str>) -> Self {
        let mut session = Self {
            list: StreamList::new(),
            storage,
            origin: Origin::Empty,
        };

        let params = share_link.map(share::read_share_params).unwrap_or_default();
        if let Some(origin) = session.load_share_params(&params) {
            session.origin = origin;
            session.persist();
            return session;
        }

        if let Some(data) = session.storage.get(STREAMS_KEY) {
            match session.list.deserialize_from_persistence(&data) {
                Ok(()) => session.origin = Origin::Storage,
                Err(err) => log::warn!("ignoring persisted streams: {err}"),
            }
        }
        session
    }

    fn load_share_params(&mut self, params: &ShareParams) -> Option<Origin> {
        if let Some(payload) = &params.compact {
            match self.list.deserialize_from_sharing(payload) {
                Ok(()) => return Some(Origin::ShareLink),
                Err(err) => log::warn!("ignoring share link: {err}"),
            }
        }
        if let Some(data) = &params.legacy {
            match self.list.deserialize_from_legacy_share(data) {
                Ok(()) => return Some(Origin::LegacyShareLink),
                Err(err) => log::warn!("ignoring legacy share link: {err}"),
            }
        }
        None
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn streams(&self) -> &StreamList {
        &self.list
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<ListEvent> {
        self.list.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Parses user input and appends the stream it names.
    ///
    /// # Errors
    /// The parse error for unusable input, [`ListError::DuplicateEntry`] when
    /// the stream is already in the layout.
    pub fn add_input(&mut self, input: &str) -> SessionResult<StreamRef> {
        let stream = parser::parse(input)?;
        self.add(stream.clone())?;
        Ok(stream)
    }

    pub fn add(&mut self, stream: StreamRef) -> Result<(), ListError> {
        self.list.add(stream)?;
        self.persist();
        Ok(())
    }

    pub fn remove(&mut self, platform: &Platform, id: &str) -> bool {
        let removed = self.list.remove(platform, id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn move_stream(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        self.list.move_stream(from, to)?;
        self.persist();
        Ok(())
    }

    /// Replaces the layout with the one in `link`, as opening that link would.
    ///
    /// # Errors
    /// [`ListError::MalformedShareState`] if the link carries no usable payload.
    pub fn import_share_link(&mut self, link: &str) -> Result<(), ListError> {
        let params = share::read_share_params(link);
        if params.is_empty() {
            return Err(ListError::MalformedShareState("link has no share parameter".to_string()));
        }
        match self.load_share_params(&params) {
            Some(_) => {
                self.persist();
                Ok(())
            }
            None => Err(ListError::MalformedShareState("share parameter could not be decoded".to_string())),
        }
    }

    pub fn share_payload(&self) -> String {
        self.list.serialize_for_sharing()
    }

    /// # Errors
    /// Fails if `base_url` is not an absolute URL.
    pub fn share_url(&self, base_url: &str) -> anyhow::Result<String> {
        share::share_url(base_url, &self.list)
    }

    pub fn theme(&self) -> Theme {
        match self.storage.get(THEME_KEY).as_deref() {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        let value = match theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        if let Err(err) = self.storage.set(THEME_KEY, value) {
            log::warn!("cannot persist theme: {err:?}");
        }
    }

    fn persist(&mut self) {
        let data = self.list.serialize_for_persistence();
        if let Err(err) = self.storage.set(STREAMS_KEY, &data) {
            log::warn!("cannot persist streams: {err:?}");
        }
    }
}
