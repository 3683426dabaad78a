pub mod dispatch;
pub mod status;

pub use dispatch::{call_tool, dispatch, open_journal};
