//! Client data layer for the estate dashboards.
//!
//! The action layer talks to the API, the query cache keeps fetched results
//! per key, and the mutation hooks keep that cache in step with the server
//! after every write. Calendar, messaging and table helpers hold the view
//! state the dashboards render.

pub mod actions;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod hooks;
pub mod http;
pub mod messages;
pub mod navigation;
pub mod reducers;
pub mod sanitize;
pub mod table;

pub use actions::{Api, HttpApi, QueryOptions};
pub use cache::{keys, QueryCache, QueryKey};
pub use calendar::{Calendar, CalendarView};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorHandler};
pub use hooks::MutationContext;
pub use messages::{initials, Messenger};
pub use navigation::{Navigator, Notifier};
pub use sanitize::Sanitize;
pub use table::{DataTable, Searchable};
