#![forbid(unsafe_code)]

//! Channel catalog: the static, ordered list of selectable tiles.
//!
//! Channels are immutable metadata sourced once at startup; the engine never
//! creates or destroys them at runtime. Navigation operates by list position
//! with wraparound, so `next` from the last channel lands on the first.
//!
//! # Invariants
//!
//! 1. Channel order is the construction order and never changes.
//! 2. `neighbor()` wraps: `(index + 1) % len` and `(index - 1 + len) % len`.
//! 3. Lookups by unknown id are `None`, never a panic.

/// Opaque identifier for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Immutable visual metadata for one selectable tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    id: ChannelId,
    title: String,
    /// Accent color, CSS-style (e.g. `"#dbeafe"`).
    accent: String,
    /// Descriptor for the icon or preview content the tile shows.
    icon: String,
    description: String,
}

impl Channel {
    /// Create a channel with the given id and title.
    pub fn new(id: impl Into<ChannelId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            accent: String::new(),
            icon: String::new(),
            description: String::new(),
        }
    }

    /// Set the accent color (builder pattern).
    #[must_use]
    pub fn accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = accent.into();
        self
    }

    /// Set the icon/content descriptor (builder pattern).
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn accent_color(&self) -> &str {
        &self.accent
    }

    #[must_use]
    pub fn icon_ref(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.description
    }
}

/// Navigation direction for adjacent-tile switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// The ordered, immutable set of channels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    channels: Vec<Channel>,
}

impl Catalog {
    /// Create a catalog from an ordered list of channels.
    #[must_use]
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// The built-in three-channel lineup.
    #[must_use]
    pub fn default_lineup() -> Self {
        Self::new(vec![
            Channel::new("about", "About Me")
                .accent("#dbeafe")
                .icon("user")
                .description("Background, skills, and experience."),
            Channel::new("video", "Video Portfolio")
                .accent("#fee2e2")
                .icon("video")
                .description("Cinematography and editing work."),
            Channel::new("music", "Beat Maker")
                .accent("#dcfce7")
                .icon("music")
                .description("Original beats and productions."),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Look up a channel by id.
    #[must_use]
    pub fn get(&self, id: &ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id() == id)
    }

    /// Position of a channel in the lineup.
    #[must_use]
    pub fn index_of(&self, id: &ChannelId) -> Option<usize> {
        self.channels.iter().position(|c| c.id() == id)
    }

    /// Channel at a given position.
    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    /// The wraparound neighbor of `id` in the given direction.
    ///
    /// `None` when the id is unknown or the catalog is empty; navigation is
    /// then a no-op and the current channel stays active.
    #[must_use]
    pub fn neighbor(&self, id: &ChannelId, direction: Direction) -> Option<&Channel> {
        let len = self.channels.len();
        if len == 0 {
            return None;
        }
        let index = self.index_of(id)?;
        let next = match direction {
            Direction::Next => (index + 1) % len,
            Direction::Prev => (index + len - 1) % len,
        };
        self.channels.get(next)
    }

    /// Iterate channels in lineup order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineup() -> Catalog {
        Catalog::default_lineup()
    }

    #[test]
    fn default_lineup_order() {
        let cat = lineup();
        let ids: Vec<_> = cat.iter().map(|c| c.id().as_str().to_string()).collect();
        assert_eq!(ids, ["about", "video", "music"]);
    }

    #[test]
    fn get_and_index_of() {
        let cat = lineup();
        let id = ChannelId::new("video");
        assert_eq!(cat.get(&id).map(|c| c.title()), Some("Video Portfolio"));
        assert_eq!(cat.index_of(&id), Some(1));
        assert!(cat.get(&ChannelId::new("nope")).is_none());
    }

    #[test]
    fn neighbor_wraps_forward() {
        let cat = lineup();
        let last = ChannelId::new("music");
        let next = cat.neighbor(&last, Direction::Next).map(Channel::id);
        assert_eq!(next, Some(&ChannelId::new("about")));
    }

    #[test]
    fn neighbor_wraps_backward() {
        let cat = lineup();
        let first = ChannelId::new("about");
        let prev = cat.neighbor(&first, Direction::Prev).map(Channel::id);
        assert_eq!(prev, Some(&ChannelId::new("music")));
    }

    #[test]
    fn next_then_prev_is_identity() {
        let cat = lineup();
        for channel in cat.iter() {
            let there = cat.neighbor(channel.id(), Direction::Next).unwrap();
            let back = cat.neighbor(there.id(), Direction::Prev).unwrap();
            assert_eq!(back.id(), channel.id());
        }
    }

    #[test]
    fn unknown_id_has_no_neighbor() {
        let cat = lineup();
        assert!(cat.neighbor(&ChannelId::new("ghost"), Direction::Next).is_none());
    }

    #[test]
    fn empty_catalog_is_inert() {
        let cat = Catalog::default();
        assert!(cat.is_empty());
        assert!(cat.neighbor(&ChannelId::new("about"), Direction::Next).is_none());
    }

    #[test]
    fn builder_fields() {
        let ch = Channel::new("x", "X")
            .accent("#fff")
            .icon("star")
            .description("desc");
        assert_eq!(ch.accent_color(), "#fff");
        assert_eq!(ch.icon_ref(), "star");
        assert_eq!(ch.summary(), "desc");
    }
}
