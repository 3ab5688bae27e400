//! Keeping the highlighted option visible.
//!
//! Two independent checks run whenever the highlight moves:
//!
//! 1. Within the listbox: if the list scrolls and the option lies above or
//!    below its visible window, the list is scrolled just far enough
//!    ([`ensure_visible`]). This scroll is instant.
//! 2. Within the page: if the option is not fully inside the viewport, the
//!    shell is asked to smooth-scroll it into view ([`is_in_viewport`]).
//!
//! Geometry is read from a [`GeometryProvider`] on every check and never
//! cached; the shell's live layout is authoritative. Scroll commands are fire
//! and forget: nothing in the controller waits for an animation.

use horizon_combobox_core::{Rect, Size};

use crate::logging::targets;

/// Scroll metrics of the listbox container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerGeometry {
    /// Current vertical scroll offset.
    pub scroll_top: f32,
    /// Height of the visible window.
    pub client_height: f32,
    /// Height of the full scrollable content.
    pub scroll_height: f32,
}

impl ContainerGeometry {
    /// Create container metrics.
    pub const fn new(scroll_top: f32, client_height: f32, scroll_height: f32) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// Whether the content overflows the visible window.
    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// Content offset of the bottom edge of the visible window.
    #[inline]
    pub fn visible_bottom(&self) -> f32 {
        self.scroll_top + self.client_height
    }
}

/// Position of an option inside the listbox content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemGeometry {
    /// Offset of the option's top edge from the top of the content.
    pub offset_top: f32,
    /// Height of the option.
    pub offset_height: f32,
}

impl ItemGeometry {
    /// Create item metrics.
    pub const fn new(offset_top: f32, offset_height: f32) -> Self {
        Self {
            offset_top,
            offset_height,
        }
    }

    /// Offset of the option's bottom edge.
    #[inline]
    pub fn offset_bottom(&self) -> f32 {
        self.offset_top + self.offset_height
    }
}

/// Everything [`ensure_visible`] needs, read in one go.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometrySnapshot {
    pub container: ContainerGeometry,
    pub item: ItemGeometry,
}

/// An instruction to set the listbox scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// The new vertical scroll offset.
    pub scroll_top: f32,
    /// Whether the shell should animate the scroll.
    pub smooth: bool,
}

/// Element a page-level scroll should bring into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// The combobox trigger.
    Trigger,
    /// The option at the given index.
    Option(usize),
}

/// A scroll the shell should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRequest {
    /// Scroll the listbox container.
    List(ScrollCommand),
    /// Scroll the page so the target is visible, nearest edge first.
    IntoView { target: ScrollTarget, smooth: bool },
}

/// Read-only access to the shell's live layout.
///
/// Every method may return `None` when the element is not laid out (for
/// example while the list is hidden); the check is then skipped.
pub trait GeometryProvider: Send + Sync {
    /// Position of the option at `index` within the listbox content.
    fn option_geometry(&self, index: usize) -> Option<ItemGeometry>;

    /// Bounding box of the option at `index` in viewport coordinates.
    fn option_bounds(&self, index: usize) -> Option<Rect>;

    /// Scroll metrics of the listbox.
    fn container_geometry(&self) -> Option<ContainerGeometry>;

    /// Bounding box of the trigger in viewport coordinates.
    fn trigger_bounds(&self) -> Option<Rect>;

    /// Size of the page viewport.
    fn viewport_size(&self) -> Size;
}

/// Compute the list scroll needed to reveal the item, if any.
///
/// Returns `None` when the container does not scroll or the item is already
/// fully inside the visible window. An item above the window is aligned to
/// the top; an item below it is aligned to the bottom.
pub fn ensure_visible(geometry: &GeometrySnapshot) -> Option<ScrollCommand> {
    let GeometrySnapshot { container, item } = geometry;
    if !container.is_scrollable() {
        return None;
    }

    if item.offset_top < container.scroll_top {
        Some(ScrollCommand {
            scroll_top: item.offset_top,
            smooth: false,
        })
    } else if item.offset_bottom() > container.visible_bottom() {
        Some(ScrollCommand {
            scroll_top: item.offset_bottom() - container.client_height,
            smooth: false,
        })
    } else {
        None
    }
}

/// Whether `bounds` lies entirely inside a viewport of the given size.
///
/// Edges touching the viewport border count as inside.
#[inline]
pub fn is_in_viewport(bounds: &Rect, viewport: Size) -> bool {
    Rect::from_size(viewport).contains_rect(bounds)
}

/// Scroll requests that reveal the option at `index`, list scroll first.
pub fn option_scroll_requests(provider: &dyn GeometryProvider, index: usize) -> Vec<ScrollRequest> {
    let mut requests = Vec::new();

    let list_command = provider
        .container_geometry()
        .zip(provider.option_geometry(index))
        .and_then(|(container, item)| ensure_visible(&GeometrySnapshot { container, item }));
    if let Some(command) = list_command {
        tracing::trace!(
            target: targets::SCROLL,
            index,
            scroll_top = command.scroll_top,
            "scrolling list to option"
        );
        requests.push(ScrollRequest::List(command));
    }

    let viewport = provider.viewport_size();
    if provider
        .option_bounds(index)
        .is_some_and(|bounds| !is_in_viewport(&bounds, viewport))
    {
        tracing::trace!(target: targets::SCROLL, index, "scrolling option into view");
        requests.push(ScrollRequest::IntoView {
            target: ScrollTarget::Option(index),
            smooth: true,
        });
    }

    requests
}

/// The request that reveals the trigger, if it is not fully visible.
pub fn trigger_scroll_request(provider: &dyn GeometryProvider) -> Option<ScrollRequest> {
    let bounds = provider.trigger_bounds()?;
    if is_in_viewport(&bounds, provider.viewport_size()) {
        return None;
    }
    tracing::trace!(target: targets::SCROLL, "scrolling trigger into view");
    Some(ScrollRequest::IntoView {
        target: ScrollTarget::Trigger,
        smooth: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(scroll_top: f32, offset_top: f32) -> GeometrySnapshot {
        GeometrySnapshot {
            container: ContainerGeometry::new(scroll_top, 100.0, 400.0),
            item: ItemGeometry::new(offset_top, 20.0),
        }
    }

    #[test]
    fn test_visible_item_needs_no_scroll() {
        assert_eq!(ensure_visible(&snapshot(0.0, 40.0)), None);
        // Exactly flush with both edges.
        assert_eq!(ensure_visible(&snapshot(40.0, 40.0)), None);
        assert_eq!(ensure_visible(&snapshot(0.0, 80.0)), None);
    }

    #[test]
    fn test_item_above_aligns_top() {
        let command = ensure_visible(&snapshot(100.0, 60.0)).unwrap();
        assert_eq!(command.scroll_top, 60.0);
        assert!(!command.smooth);
    }

    #[test]
    fn test_item_below_aligns_bottom() {
        let command = ensure_visible(&snapshot(0.0, 150.0)).unwrap();
        assert_eq!(command.scroll_top, 70.0);
    }

    #[test]
    fn test_unscrollable_container_is_left_alone() {
        let geometry = GeometrySnapshot {
            container: ContainerGeometry::new(0.0, 400.0, 400.0),
            item: ItemGeometry::new(500.0, 20.0),
        };
        assert_eq!(ensure_visible(&geometry), None);
    }

    #[test]
    fn test_is_in_viewport() {
        let viewport = Size::new(800.0, 600.0);
        assert!(is_in_viewport(&Rect::new(10.0, 10.0, 100.0, 30.0), viewport));
        assert!(is_in_viewport(&Rect::new(0.0, 570.0, 800.0, 30.0), viewport));
        assert!(!is_in_viewport(&Rect::new(10.0, -1.0, 100.0, 30.0), viewport));
        assert!(!is_in_viewport(&Rect::new(750.0, 10.0, 100.0, 30.0), viewport));
        assert!(!is_in_viewport(&Rect::new(10.0, 590.0, 100.0, 30.0), viewport));
    }

    struct Layout {
        scroll_top: f32,
        option_top: f32,
    }

    impl GeometryProvider for Layout {
        fn option_geometry(&self, index: usize) -> Option<ItemGeometry> {
            Some(ItemGeometry::new(index as f32 * 20.0, 20.0))
        }

        fn option_bounds(&self, index: usize) -> Option<Rect> {
            Some(Rect::new(0.0, self.option_top + index as f32 * 20.0, 200.0, 20.0))
        }

        fn container_geometry(&self) -> Option<ContainerGeometry> {
            Some(ContainerGeometry::new(self.scroll_top, 100.0, 400.0))
        }

        fn trigger_bounds(&self) -> Option<Rect> {
            Some(Rect::new(0.0, self.option_top - 30.0, 200.0, 30.0))
        }

        fn viewport_size(&self) -> Size {
            Size::new(1024.0, 768.0)
        }
    }

    #[test]
    fn test_option_requests_list_then_page() {
        let layout = Layout {
            scroll_top: 0.0,
            option_top: 700.0,
        };
        let requests = option_scroll_requests(&layout, 10);
        assert_eq!(
            requests,
            vec![
                ScrollRequest::List(ScrollCommand {
                    scroll_top: 120.0,
                    smooth: false
                }),
                ScrollRequest::IntoView {
                    target: ScrollTarget::Option(10),
                    smooth: true
                },
            ]
        );
    }

    #[test]
    fn test_visible_option_requests_nothing() {
        let layout = Layout {
            scroll_top: 0.0,
            option_top: 100.0,
        };
        assert!(option_scroll_requests(&layout, 2).is_empty());
    }

    #[test]
    fn test_trigger_request() {
        let offscreen = Layout {
            scroll_top: 0.0,
            option_top: 10.0,
        };
        assert_eq!(
            trigger_scroll_request(&offscreen),
            Some(ScrollRequest::IntoView {
                target: ScrollTarget::Trigger,
                smooth: true
            })
        );

        let onscreen = Layout {
            scroll_top: 0.0,
            option_top: 300.0,
        };
        assert_eq!(trigger_scroll_request(&onscreen), None);
    }
}
