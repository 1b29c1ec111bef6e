//! View controllers for the list and detail pages.
//!
//! Each controller owns the state backing one view and keeps it synchronized
//! with the remote store under an optimistic-update discipline: mutations are
//! applied locally first and the request fires afterwards; if the request
//! fails the controller reloads the whole collection from the server instead
//! of tracking per-item rollback state. No controller method returns an
//! error — every failure is routed into the view's `error` field.

pub mod detail;
pub mod list;

pub use detail::DetailController;
pub use list::ListController;
