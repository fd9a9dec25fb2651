/// Single-image focus overlay state.
///
/// The lightbox owns a clone of the image it displays, so the gallery or
/// search results changing underneath it has no effect until it is
/// explicitly closed.

use crate::api::types::ImageRecord;

#[derive(Debug, Default)]
pub struct Lightbox {
    current: Option<ImageRecord>,
}

impl Lightbox {
    pub fn open(&mut self, image: ImageRecord) {
        self.current = Some(image);
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ImageRecord> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> ImageRecord {
        ImageRecord {
            id,
            filename: format!("img_{id}.jpg"),
            caption: None,
            s3_url: String::new(),
            uploaded_at: None,
        }
    }

    #[test]
    fn test_open_and_close() {
        let mut lightbox = Lightbox::default();
        assert!(!lightbox.is_open());

        lightbox.open(record(3));
        assert!(lightbox.is_open());
        assert_eq!(lightbox.current().unwrap().id, 3);

        lightbox.close();
        assert!(lightbox.current().is_none());
    }

    #[test]
    fn test_reopening_replaces_the_image() {
        let mut lightbox = Lightbox::default();
        lightbox.open(record(1));
        lightbox.open(record(2));
        assert_eq!(lightbox.current().unwrap().id, 2);
    }
}
