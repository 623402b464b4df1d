//! Display precedence between the three result sets.

/// Picks the result set to display.
///
/// Last write wins in a fixed order: all countries, then search, then region
/// filter. A present result replaces the earlier one even when it is empty.
///
/// Region results therefore beat search results whenever both exist,
/// regardless of which input the user touched last.
pub fn select_display<T>(all: Option<T>, search: Option<T>, region: Option<T>) -> Option<T> {
    let mut display = all;
    if search.is_some() {
        display = search;
    }
    if region.is_some() {
        display = region;
    }
    display
}
