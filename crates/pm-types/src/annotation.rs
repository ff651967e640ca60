use serde::{Deserialize, Serialize};

/// A bounding-box annotation in normalised image coordinates.
///
/// `x`, `y` locate the top-left corner and `w`, `h` the extent, all as
/// fractions of the image size. The annotation sub-store accepts any record
/// type; this is the shape the front-end and the remote API agree on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxAnnotation {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub class_name: String,
}

impl BoxAnnotation {
    pub fn new(x: f64, y: f64, w: f64, h: f64, class_name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            w,
            h,
            class_name: class_name.into(),
        }
    }

    /// Whether the box lies inside the unit square and has a positive area.
    pub fn is_normalized(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        self.w > 0.0
            && self.h > 0.0
            && in_unit(self.x)
            && in_unit(self.y)
            && in_unit(self.x + self.w)
            && in_unit(self.y + self.h)
    }
}
