//! Order composition workflow and the order list it feeds
pub mod catalog;
pub mod operator;
pub mod order_list;
pub mod wizard;

pub use catalog::{Catalog, Collection, LoadError};
pub use operator::{AlwaysConfirm, Confirm, LogNotifier, NeverConfirm, Notify, RecordingNotifier};
pub use order_list::{OrderListController, OrderRow};
pub use wizard::{OrderWizard, SubmitState, SubmitTicket};
