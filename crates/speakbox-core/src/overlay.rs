use speakbox_types::{BoxView, Point, Region, ResizeMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxLimits {
    /// Edge proximity that turns a press into a resize
    pub border: i32,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for BoxLimits {
    fn default() -> Self {
        Self {
            border: 8,
            min_width: 40,
            min_height: 30,
        }
    }
}

/// Classify a box-local pointer position. Corners win over edges.
pub fn classify(local: Point, width: u32, height: u32, border: i32) -> ResizeMode {
    let (w, h) = (width as i32, height as i32);
    let left = local.x < border;
    let right = local.x > w - border;
    let top = local.y < border;
    let bottom = local.y > h - border;

    if left && top {
        ResizeMode::NW
    } else if right && top {
        ResizeMode::NE
    } else if left && bottom {
        ResizeMode::SW
    } else if right && bottom {
        ResizeMode::SE
    } else if left {
        ResizeMode::W
    } else if right {
        ResizeMode::E
    } else if top {
        ResizeMode::N
    } else if bottom {
        ResizeMode::S
    } else {
        ResizeMode::None
    }
}

/// Apply a resize delta to the gesture-start geometry.
///
/// The floor is `min(limit, origin size)` so a box that started below the
/// limit is never grown by a zero delta. When the floor kicks in, the edge
/// that is not being dragged stays where it was.
pub fn resize(origin: Region, mode: ResizeMode, dx: i32, dy: i32, limits: BoxLimits) -> Region {
    let mut left = i64::from(origin.x);
    let mut top = i64::from(origin.y);
    let mut right = i64::from(origin.right());
    let mut bottom = i64::from(origin.bottom());
    let (dx, dy) = (i64::from(dx), i64::from(dy));

    if mode.moves_left() {
        left += dx;
    }
    if mode.moves_right() {
        right += dx;
    }
    if mode.moves_top() {
        top += dy;
    }
    if mode.moves_bottom() {
        bottom += dy;
    }

    let min_w = i64::from(limits.min_width.min(origin.width));
    let min_h = i64::from(limits.min_height.min(origin.height));

    if right - left < min_w {
        if mode.moves_left() {
            left = right - min_w;
        } else {
            right = left + min_w;
        }
    }
    if bottom - top < min_h {
        if mode.moves_top() {
            top = bottom - min_h;
        } else {
            bottom = top + min_h;
        }
    }

    Region::new(
        left as i32,
        top as i32,
        (right - left) as u32,
        (bottom - top) as u32,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Move {
        pointer: Point,
        origin: Region,
    },
    Resize {
        pointer: Point,
        origin: Region,
        mode: ResizeMode,
    },
}

/// The persistent box marking the area re-captured on every read
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    region: Region,
    opacity: f32,
    hover: ResizeMode,
    gesture: Option<Gesture>,
    limits: BoxLimits,
}

impl OverlayBox {
    pub fn new(region: Region, opacity: f32, limits: BoxLimits) -> Self {
        Self {
            region,
            opacity: clamp_opacity(opacity).unwrap_or(0.5),
            hover: ResizeMode::None,
            gesture: None,
            limits,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn hover_mode(&self) -> ResizeMode {
        self.hover
    }

    /// Opacity is clamped to `0.0..=1.0`; NaN is ignored
    pub fn set_opacity(&mut self, opacity: f32) -> f32 {
        if let Some(opacity) = clamp_opacity(opacity) {
            self.opacity = opacity;
        }
        self.opacity
    }

    /// Passive pointer movement, tracked regardless of buttons
    pub fn hover(&mut self, pointer: Point) -> ResizeMode {
        let local = Point::new(pointer.x - self.region.x, pointer.y - self.region.y);
        self.hover = classify(local, self.region.width, self.region.height, self.limits.border);
        self.hover
    }

    pub fn begin_move(&mut self, pointer: Point) {
        self.gesture = Some(Gesture::Move {
            pointer,
            origin: self.region,
        });
    }

    pub fn begin_resize(&mut self, pointer: Point) -> ResizeMode {
        let mode = self.hover(pointer);
        self.gesture = Some(Gesture::Resize {
            pointer,
            origin: self.region,
            mode,
        });
        mode
    }

    /// Pointer moved with a button held. Returns the new geometry, or `None`
    /// when no gesture is active (the move is then a hover).
    pub fn drag_to(&mut self, pointer: Point) -> Option<Region> {
        let region = match self.gesture? {
            Gesture::Move {
                pointer: start,
                origin,
            } => {
                let (dx, dy) = pointer.delta_from(start);
                origin.offset(dx, dy)
            }
            Gesture::Resize {
                pointer: start,
                origin,
                mode,
            } => {
                let (dx, dy) = pointer.delta_from(start);
                resize(origin, mode, dx, dy, self.limits)
            }
        };
        self.region = region;
        Some(region)
    }

    pub fn end_gesture(&mut self) -> Option<Region> {
        self.gesture.take().map(|_| self.region)
    }

    pub fn view(&self, visible: bool) -> BoxView {
        BoxView {
            region: self.region,
            opacity: self.opacity,
            visible,
            hover: self.hover,
        }
    }
}

fn clamp_opacity(opacity: f32) -> Option<f32> {
    (!opacity.is_nan()).then(|| opacity.clamp(0.0, 1.0))
}

/// `show_box` is user intent, `auto_hide` a temporary suppression that keeps
/// the box active for capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxVisibility {
    pub show_box: bool,
    pub auto_hide: bool,
}

impl BoxVisibility {
    pub fn new(show_box: bool, auto_hide: bool) -> Self {
        Self {
            show_box,
            auto_hide,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.show_box && !self.auto_hide
    }

    pub fn toggle_auto_hide(&mut self) -> bool {
        self.auto_hide = !self.auto_hide;
        self.auto_hide
    }
}

impl Default for BoxVisibility {
    fn default() -> Self {
        Self::new(true, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OverlayBox {
        OverlayBox::new(Region::new(100, 100, 200, 150), 0.5, BoxLimits::default())
    }

    /// A pointer position inside the border band for `mode`
    fn grip(region: Region, mode: ResizeMode) -> Point {
        let cx = region.x + region.width as i32 / 2;
        let cy = region.y + region.height as i32 / 2;
        let (l, r) = (region.x + 2, region.right() - 2);
        let (t, b) = (region.y + 2, region.bottom() - 2);
        match mode {
            ResizeMode::None => Point::new(cx, cy),
            ResizeMode::N => Point::new(cx, t),
            ResizeMode::S => Point::new(cx, b),
            ResizeMode::E => Point::new(r, cy),
            ResizeMode::W => Point::new(l, cy),
            ResizeMode::NE => Point::new(r, t),
            ResizeMode::NW => Point::new(l, t),
            ResizeMode::SE => Point::new(r, b),
            ResizeMode::SW => Point::new(l, b),
        }
    }

    #[test]
    fn test_classify_border_band() {
        assert_eq!(classify(Point::new(0, 0), 200, 150, 8), ResizeMode::NW);
        assert_eq!(classify(Point::new(199, 0), 200, 150, 8), ResizeMode::NE);
        assert_eq!(classify(Point::new(3, 149), 200, 150, 8), ResizeMode::SW);
        assert_eq!(classify(Point::new(195, 145), 200, 150, 8), ResizeMode::SE);
        assert_eq!(classify(Point::new(7, 70), 200, 150, 8), ResizeMode::W);
        assert_eq!(classify(Point::new(193, 70), 200, 150, 8), ResizeMode::E);
        assert_eq!(classify(Point::new(100, 2), 200, 150, 8), ResizeMode::N);
        assert_eq!(classify(Point::new(100, 143), 200, 150, 8), ResizeMode::S);
        assert_eq!(classify(Point::new(8, 8), 200, 150, 8), ResizeMode::None);
        assert_eq!(classify(Point::new(192, 142), 200, 150, 8), ResizeMode::None);
    }

    #[test]
    fn test_resize_se_grows() {
        let mut b = sample();
        let start = grip(b.region(), ResizeMode::SE);
        assert_eq!(b.begin_resize(start), ResizeMode::SE);
        let region = b.drag_to(Point::new(start.x + 20, start.y + 10)).unwrap();
        assert_eq!(region, Region::new(100, 100, 220, 160));
    }

    #[test]
    fn test_resize_se_clamps_to_floor() {
        let mut b = sample();
        let start = grip(b.region(), ResizeMode::SE);
        b.begin_resize(start);
        let region = b.drag_to(Point::new(start.x - 500, start.y - 500)).unwrap();
        assert_eq!(region, Region::new(100, 100, 40, 30));
    }

    #[test]
    fn test_resize_nw_clamp_keeps_far_edges() {
        let origin = Region::new(100, 100, 200, 150);
        let region = resize(origin, ResizeMode::NW, 500, 500, BoxLimits::default());
        assert_eq!(region.right(), origin.right());
        assert_eq!(region.bottom(), origin.bottom());
        assert_eq!((region.width, region.height), (40, 30));
    }

    #[test]
    fn test_resize_never_below_floor() {
        let origin = Region::new(100, 100, 200, 150);
        for mode in ResizeMode::ALL {
            for (dx, dy) in [(-1000, -1000), (1000, 1000), (-1000, 1000), (1000, -1000), (190, 140)] {
                let r = resize(origin, mode, dx, dy, BoxLimits::default());
                assert!(r.width >= 40 && r.height >= 30, "{mode:?} ({dx},{dy}) -> {r}");
                if !mode.moves_left() {
                    assert_eq!(r.x, origin.x, "{mode:?} moved the left edge");
                }
                if !mode.moves_right() && r.width > 40 {
                    assert_eq!(r.right(), origin.right(), "{mode:?} moved the right edge");
                }
                if mode.moves_left() {
                    assert_eq!(r.right(), origin.right(), "{mode:?} moved the right edge");
                }
                if mode.moves_top() {
                    assert_eq!(r.bottom(), origin.bottom(), "{mode:?} moved the bottom edge");
                } else {
                    assert_eq!(r.y, origin.y, "{mode:?} moved the top edge");
                }
            }
        }
    }

    #[test]
    fn test_resize_returns_to_origin_for_every_mode() {
        for mode in ResizeMode::ALL {
            let mut b = sample();
            let start = grip(b.region(), mode);
            assert_eq!(b.begin_resize(start), mode);
            for (dx, dy) in [(13, -7), (-300, 400), (1, 1), (-2, 90)] {
                b.drag_to(Point::new(start.x + dx, start.y + dy));
            }
            assert_eq!(b.drag_to(start), Some(Region::new(100, 100, 200, 150)), "{mode:?}");
        }
    }

    #[test]
    fn test_resize_in_middle_changes_nothing() {
        let mut b = sample();
        let start = grip(b.region(), ResizeMode::None);
        assert_eq!(b.begin_resize(start), ResizeMode::None);
        assert_eq!(b.drag_to(Point::new(start.x + 50, start.y + 50)), Some(b.region()));
        assert_eq!(b.region(), Region::new(100, 100, 200, 150));
    }

    #[test]
    fn test_move_keeps_size_and_is_reversible() {
        let mut b = sample();
        let start = Point::new(150, 120);
        b.begin_move(start);
        assert_eq!(
            b.drag_to(Point::new(180, 60)),
            Some(Region::new(130, 40, 200, 150))
        );
        assert_eq!(b.drag_to(start), Some(Region::new(100, 100, 200, 150)));
        assert_eq!(b.end_gesture(), Some(Region::new(100, 100, 200, 150)));
        assert_eq!(b.end_gesture(), None);
    }

    #[test]
    fn test_drag_without_gesture_is_hover() {
        let mut b = sample();
        assert_eq!(b.drag_to(Point::new(0, 0)), None);
        assert_eq!(b.hover(Point::new(102, 102)), ResizeMode::NW);
        assert_eq!(b.view(true).hover, ResizeMode::NW);
    }

    #[test]
    fn test_opacity_never_touches_geometry() {
        let mut b = sample();
        assert_eq!(b.set_opacity(1.7), 1.0);
        assert_eq!(b.set_opacity(-0.2), 0.0);
        assert_eq!(b.set_opacity(f32::NAN), 0.0);
        assert_eq!(b.set_opacity(0.25), 0.25);
        assert_eq!(b.region(), Region::new(100, 100, 200, 150));
    }

    #[test]
    fn test_visibility_policy() {
        let mut v = BoxVisibility::default();
        assert!(v.is_visible());
        assert!(v.toggle_auto_hide());
        assert!(!v.is_visible());
        v.show_box = false;
        assert!(!v.toggle_auto_hide());
        assert!(!v.is_visible());
        v.show_box = true;
        assert!(v.is_visible());
    }
}
