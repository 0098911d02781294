//! Action-sheet menus
//!
//! Two menus are offered through the platform's action sheet: the native menu
//! (camera, geolocation, network) and the deep-link test menu (one button per
//! sample link). The provider answers with a button index which is mapped
//! back to a choice here; out-of-range indices map to `None`.

use crate::deep_link::SAMPLE_LINKS;
use crate::platform::{ActionSheetButton, ActionSheetOptions};

/// Entries of the native menu, in button order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    TakePhoto,
    Geolocation,
    NetworkStatus,
    Cancel,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::TakePhoto,
        MenuAction::Geolocation,
        MenuAction::NetworkStatus,
        MenuAction::Cancel,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn button(&self) -> ActionSheetButton {
        match self {
            MenuAction::TakePhoto => ActionSheetButton::new("📸 Take photo"),
            MenuAction::Geolocation => ActionSheetButton::new("📍 Geolocation"),
            MenuAction::NetworkStatus => ActionSheetButton::new("🌐 Check network"),
            MenuAction::Cancel => ActionSheetButton::cancel("❌ Cancel"),
        }
    }
}

pub fn native_menu_options() -> ActionSheetOptions {
    ActionSheetOptions {
        title: "Choose an action".to_string(),
        message: "Available options".to_string(),
        options: MenuAction::ALL.iter().map(MenuAction::button).collect(),
    }
}

/// Choice made in the deep-link test menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepLinkChoice {
    Link(&'static str),
    Cancel,
}

impl DeepLinkChoice {
    pub fn from_index(index: usize) -> Option<Self> {
        match SAMPLE_LINKS.get(index) {
            Some(link) => Some(DeepLinkChoice::Link(link)),
            None if index == SAMPLE_LINKS.len() => Some(DeepLinkChoice::Cancel),
            None => None,
        }
    }
}

const DEEP_LINK_TITLES: [&str; 5] = [
    "🏠 Home page",
    "📦 Product",
    "👤 User profile",
    "⚙️ Settings",
    "❓ Unknown path",
];

pub fn deep_link_menu_options() -> ActionSheetOptions {
    let mut options: Vec<_> = DEEP_LINK_TITLES
        .iter()
        .map(|title| ActionSheetButton::new(*title))
        .collect();
    options.push(ActionSheetButton::cancel("❌ Cancel"));

    ActionSheetOptions {
        title: "Choose a deep link to test".to_string(),
        message: "Which link do you want to try?".to_string(),
        options,
    }
}
