use super::board::ImageRef;

/// Images picked for the next round.
#[derive(Clone, Debug)]
pub struct ImageSelection {
    images: Vec<ImageRef>,
    preview_limit: usize,
}

impl ImageSelection {
    pub fn new(preview_limit: usize) -> Self {
        ImageSelection {
            images: Vec::new(),
            preview_limit,
        }
    }

    pub fn set(&mut self, images: Vec<ImageRef>) {
        self.images = images;
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn preview(&self) -> &[ImageRef] {
        &self.images[..self.images.len().min(self.preview_limit)]
    }

    pub fn for_round(&self, pair_count: usize) -> &[ImageRef] {
        &self.images[..self.images.len().min(pair_count)]
    }

    pub fn summary(&self) -> String {
        let count = self.images.len();
        let noun = if count == 1 { "image" } else { "images" };
        if count > self.preview_limit {
            format!("{count} {noun} selected (showing {})", self.preview_limit)
        } else {
            format!("{count} {noun} selected")
        }
    }
}
