pub mod config;
pub mod error;
pub mod dom;
pub mod layout;
pub mod timers;
pub mod motion;
pub mod visibility;
pub mod throttle;
pub mod theme;
pub mod particles;
pub mod progress;
pub mod header;
pub mod navigation;
pub mod reveal;
pub mod counter;
pub mod slider;
pub mod commands;
pub mod forms;
pub mod page;
pub mod snapshot;
pub mod driver;

pub use commands::{PageCommand, SliderCommand};
pub use config::{AppConfig, EasingType, ScrollConfig};
pub use dom::{Document, ElementId};
pub use driver::PageDriver;
pub use error::{Error, Result};
pub use layout::PageLayout;
pub use page::{Page, PageEvent};
pub use snapshot::PageSnapshot;
pub use theme::{FileStore, MemoryStore, PreferenceStore, Theme};
