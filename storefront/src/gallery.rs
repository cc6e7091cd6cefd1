//! Product gallery swaps
//!
//! When an option group carries individual photos (e.g. one set per
//! color), selecting a value replaces the gallery images with that value's
//! photos. Slots beyond the available photos are hidden.

use shared::models::OptionPhoto;

/// Directory the storefront serves uploaded images from
pub const UPLOADS_PREFIX: &str = "/static/uploads/";

/// What a gallery slot should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    /// Show the slot with a new image source
    Replace(String),
    /// Hide the slot
    Hide,
    /// Show the slot with its original image
    ShowOriginal,
}

/// Photos to show for a selected option value, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPlan {
    sources: Vec<String>,
    main: usize,
}

impl GalleryPlan {
    /// Build a plan from option value photos
    ///
    /// Photos are ordered by their `order` field (ties keep payload order).
    /// The main photo is the first flagged `is_main`, else the first one.
    /// Returns `None` when there is nothing to show.
    pub fn from_photos(photos: &[OptionPhoto]) -> Option<Self> {
        if photos.is_empty() {
            return None;
        }
        let mut sorted: Vec<&OptionPhoto> = photos.iter().collect();
        sorted.sort_by_key(|p| p.order);
        let main = sorted.iter().position(|p| p.is_main).unwrap_or(0);
        Some(Self {
            sources: sorted
                .iter()
                .map(|p| format!("{}{}", UPLOADS_PREFIX, p.path))
                .collect(),
            main,
        })
    }

    /// Image sources in display order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Source of the main photo
    pub fn main_source(&self) -> &str {
        &self.sources[self.main]
    }

    /// Lay the plan onto `slots` gallery images
    ///
    /// Slot `i` shows photo `i`; photos beyond the slot count are dropped
    /// and slots beyond the photo count are hidden.
    pub fn apply(&self, slots: usize) -> Vec<SlotState> {
        (0..slots)
            .map(|i| match self.sources.get(i) {
                Some(src) => SlotState::Replace(src.clone()),
                None => SlotState::Hide,
            })
            .collect()
    }

    /// Bring every slot back
    pub fn restore(slots: usize) -> Vec<SlotState> {
        vec![SlotState::ShowOriginal; slots]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RawId;

    fn photo(id: i64, path: &str, order: i32, is_main: bool) -> OptionPhoto {
        OptionPhoto {
            id: RawId::Int(id),
            path: path.to_string(),
            order,
            is_main,
        }
    }

    #[test]
    fn test_no_photos_no_plan() {
        assert!(GalleryPlan::from_photos(&[]).is_none());
    }

    #[test]
    fn test_photos_sorted_by_order() {
        let plan = GalleryPlan::from_photos(&[
            photo(1, "back.jpg", 2, false),
            photo(2, "front.jpg", 0, false),
            photo(3, "side.jpg", 1, true),
        ])
        .unwrap();
        assert_eq!(
            plan.sources(),
            &[
                "/static/uploads/front.jpg".to_string(),
                "/static/uploads/side.jpg".to_string(),
                "/static/uploads/back.jpg".to_string(),
            ]
        );
        assert_eq!(plan.main_source(), "/static/uploads/side.jpg");
    }

    #[test]
    fn test_main_defaults_to_first() {
        let plan =
            GalleryPlan::from_photos(&[photo(1, "b.jpg", 5, false), photo(2, "a.jpg", 1, false)])
                .unwrap();
        assert_eq!(plan.main_source(), "/static/uploads/a.jpg");
    }

    #[test]
    fn test_apply_hides_extra_slots() {
        let plan = GalleryPlan::from_photos(&[photo(1, "a.jpg", 0, true)]).unwrap();
        assert_eq!(
            plan.apply(3),
            vec![
                SlotState::Replace("/static/uploads/a.jpg".to_string()),
                SlotState::Hide,
                SlotState::Hide,
            ]
        );
        assert!(plan.apply(0).is_empty());
    }

    #[test]
    fn test_apply_drops_extra_photos() {
        let plan =
            GalleryPlan::from_photos(&[photo(1, "a.jpg", 0, false), photo(2, "b.jpg", 1, false)])
                .unwrap();
        assert_eq!(plan.apply(1).len(), 1);
        assert_eq!(GalleryPlan::restore(2), vec![SlotState::ShowOriginal; 2]);
    }
}
