use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a rectangle of size `size` centered within `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}
