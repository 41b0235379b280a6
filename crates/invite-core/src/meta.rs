//! Social preview (Open Graph / Twitter Card) head tags.

use crate::game_info::GameInfo;

/// Title used when the game details are not available.
pub const FALLBACK_TITLE: &str = "Unknown Game";

/// Description used when the game details are not available.
pub const FALLBACK_DESCRIPTION: &str = "Roblox game";

/// Keys of the tags that only exist while a thumbnail is known.
const IMAGE_TAGS: [(MetaAttr, &str); 2] = [
    (MetaAttr::Property, "og:image"),
    (MetaAttr::Name, "twitter:image"),
];

/// Which attribute carries the tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MetaAttr {
    /// `<meta property="og:...">`
    Property,
    /// `<meta name="twitter:...">`
    Name,
}

impl MetaAttr {
    /// HTML attribute name.
    pub fn attribute(self) -> &'static str {
        match self {
            MetaAttr::Property => "property",
            MetaAttr::Name => "name",
        }
    }
}

/// Writes head elements of the live document.
///
/// Implementations live in the platform crate (DOM on the web). Tags are
/// identified by `(attr, key)`; writing an existing tag replaces its
/// content instead of adding a second element.
pub trait HeadWriter {
    fn set_title(&self, title: &str);
    fn upsert_meta(&self, tag: &MetaTag);
    fn remove_meta(&self, attr: MetaAttr, key: &str);
}

/// One `<meta>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub attr: MetaAttr,
    pub key: &'static str,
    pub content: String,
}

impl MetaTag {
    fn property(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Property,
            key,
            content: content.into(),
        }
    }

    fn name(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Name,
            key,
            content: content.into(),
        }
    }
}

/// What a link preview should show for the current game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialMeta {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl SocialMeta {
    pub fn from_info(info: &GameInfo) -> Self {
        let details = info.details.as_ref();
        Self {
            title: details
                .and_then(|d| d.name.clone())
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            description: details
                .and_then(|d| d.description.clone())
                .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
            image: info.image_url().map(str::to_string),
        }
    }

    /// Head tags in document order. Image tags are left out without an image.
    pub fn tags(&self) -> Vec<MetaTag> {
        let mut tags = vec![
            MetaTag::property("og:type", "website"),
            MetaTag::property("og:title", &self.title),
            MetaTag::property("og:description", &self.description),
        ];
        if let Some(image) = &self.image {
            tags.push(MetaTag::property("og:image", image));
        }
        tags.push(MetaTag::name("twitter:card", "summary_large_image"));
        tags.push(MetaTag::name("twitter:title", &self.title));
        tags.push(MetaTag::name("twitter:description", &self.description));
        if let Some(image) = &self.image {
            tags.push(MetaTag::name("twitter:image", image));
        }
        tags
    }

    /// Bring the document head in line with this preview.
    ///
    /// Every tag is upserted; image tags left over from a previous game are
    /// removed when there is no image.
    pub fn apply<W: HeadWriter + ?Sized>(&self, head: &W) {
        head.set_title(&self.title);
        for tag in self.tags() {
            head.upsert_meta(&tag);
        }
        if self.image.is_none() {
            for (attr, key) in IMAGE_TAGS {
                head.remove_meta(attr, key);
            }
        }
    }
}
