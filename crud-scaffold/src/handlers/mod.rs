//! Generic request handling
//!
//! [`CrudHandler`] implements [`CollectionHandler`] for any entity over any
//! [`Repository`](crate::repository::Repository). It answers with an
//! [`ItemResponse`] on success and an [`ApiError`] otherwise; both convert
//! into HTTP responses, so the handler plugs straight into
//! [`crud_router`](crate::routes::crud_router).
//!
//! # Example
//!
//! ```rust,ignore
//! use crud_scaffold::handlers::{CollectionHandler, CrudHandler, EmptyListPolicy};
//! use crud_scaffold::registrant::Registrant;
//! use crud_scaffold::repository::PgRepository;
//!
//! let handler = CrudHandler::<Registrant, _>::new(PgRepository::new(descriptor))
//!     .with_empty_list_policy(EmptyListPolicy::Empty);
//!
//! match handler.get(42).await {
//!     Ok(response) => println!("{}", response.data.osu_name),
//!     Err(error) => eprintln!("{}", error),
//! }
//! ```

mod crud;
mod error;
mod response;
mod traits;

pub use crud::{CrudHandler, EmptyListPolicy};
pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use response::ItemResponse;
pub use traits::CollectionHandler;
