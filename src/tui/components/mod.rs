//! # TUI Components
//!
//! Stateless components receive everything as props:
//! - `TitleBar`: translation, reference and loading indicator
//!
//! Stateful components keep presentation state across frames and emit events:
//! - `ChapterView`: scrollable verses, scroll-to-verse and highlight
//! - `Picker`: overlay list for translations, books, chapters and results
//! - `SearchBox`: query input with live book suggestions
//!
//! Each file co-locates its state, events, rendering and tests.

mod title_bar;
pub use title_bar::TitleBar;

pub mod chapter_view;
pub use chapter_view::{ChapterView, ChapterViewState};
pub mod picker;
pub use picker::{Picker, PickerEvent, PickerItem, PickerState};
pub mod search_box;
pub use search_box::{SearchBox, SearchEvent};
