// hypermark library - exposes all core modules for testing

pub mod app;
pub mod bytemark;
pub mod hackernews;
pub mod hyperpaths;
pub mod ops;
pub mod output;
pub mod selection;
pub mod services;
pub mod urlmode;
