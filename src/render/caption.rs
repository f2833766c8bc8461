// Caption metadata for one render, as supplied by the metadata fetcher.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    pub comic_number: i32,
    pub alt_text: String,
    // opaque to rendering; logged only
    pub image_reference: String,
}

impl Caption {
    pub fn new(title: impl Into<String>, comic_number: i32, alt_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            comic_number,
            alt_text: alt_text.into(),
            image_reference: String::new(),
        }
    }

    pub fn with_image_reference(mut self, reference: impl Into<String>) -> Self {
        self.image_reference = reference.into();
        self
    }

    /// Header line drawn above the image: `#<number>: <title>`.
    pub fn header(&self) -> String {
        format!("#{}: {}", self.comic_number, self.title)
    }
}
