pub use crate::errors::{AppError, Result};
