//! Sweet Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod purchase;
pub(crate) mod restock;
pub(crate) mod update;
