//! Media URLs
//!
//! Stored media are addressed as `{base}/{media id}/{file name}`. Resized
//! conversions live next to the original as
//! `{base}/{media id}/conversions/{file stem}-{conversion}.jpg`.

use crate::domain::products::records::MediaRecord;

/// Fixed image conversions generated for every uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Thumb,
    Small,
    Large,
}

impl Conversion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    base_url: String,
}

impl MediaUrls {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();

        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { base_url }
    }

    /// URL of the uploaded file itself.
    #[must_use]
    pub fn original(&self, media: &MediaRecord) -> String {
        format!("{}/{}/{}", self.base_url, media.id, media.file_name)
    }

    /// URL of a resized conversion.
    #[must_use]
    pub fn conversion(&self, media: &MediaRecord, conversion: Conversion) -> String {
        let stem = media
            .file_name
            .rsplit_once('.')
            .map_or(media.file_name.as_str(), |(stem, _)| stem);

        format!(
            "{}/{}/conversions/{}-{}.jpg",
            self.base_url,
            media.id,
            stem,
            conversion.as_str()
        )
    }
}
