//! HTTP interface.
//!
//! - `GET /`: health message
//! - `POST /identificar-tabelas/`: table previews of an uploaded `.docx`
//! - `POST /substituir-tabelas/`: the `.docx` with its selected tables
//!   replaced by the classified items of an uploaded `.xlsx`
//! - `POST /validar-excel/`: column check of an uploaded `.xlsx`

pub mod error;
pub mod handlers;
pub mod router;
pub mod upload;

pub use error::ApiError;
pub use router::{AppState, router};
