pub mod export;
pub mod hotkeys;
pub mod ingest;
pub mod interaction;
pub mod layout;
pub mod series;
pub mod tabs;
pub mod view;
pub mod x_formatter;
