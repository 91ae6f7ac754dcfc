/// Everything the demo page reacts to
///
/// Actions come from key presses (see `keys::key_to_action`) and are applied
/// by `App::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Insert the toolbar container into the page, or take it out again
    ToggleToolbar,
    /// Click the icon's host node
    ClickIcon,
    /// Replace the tooltip label through `update_options`
    CycleLabel,
    /// Flip the `icon-url` attribute on the host node
    ToggleIconUrl,
    CleanupIcons,
    /// Build a fresh icon through the factory
    RespawnIcon,
    Dialog(DialogAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    SelectNext,
    SelectPrev,
    Copy,
    Close,
}
